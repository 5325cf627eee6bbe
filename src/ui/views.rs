use ratatui::text::{Line, Text};

use crate::app::App;

pub fn menu_view(app: &App) -> Text<'static> {
    Text::from(vec![
        Line::from("Registro de Empresas"),
        Line::from(""),
        Line::from("- 'i' or Enter: open the company inventory"),
        Line::from("- 'x': export the collection to a text file"),
        Line::from("- 'q': quit"),
        Line::from(""),
        Line::from(format!("{} companies on file", app.store.records().len())),
    ])
}

pub fn company_lines(app: &App) -> Vec<Line<'static>> {
    let visible = app.visible_records();
    if visible.is_empty() {
        return vec![Line::from("- no companies match")];
    }

    visible
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let cursor = if idx == app.selected { ">" } else { " " };
            let photo = if record.photo.is_some() { " [photo]" } else { "" };
            Line::from(format!(
                "{cursor} {} | {} | {}{photo}",
                record.name, record.service, record.phone
            ))
        })
        .collect()
}

pub fn selected_detail(app: &App) -> Text<'static> {
    let visible = app.visible_records();
    let Some(record) = visible.get(app.selected) else {
        return Text::from("nothing selected");
    };

    Text::from(vec![
        Line::from(format!("Address: {}", record.address)),
        Line::from(format!("Details: {}", record.details)),
        Line::from(format!("Registered: {}", record.created_at)),
        Line::from(format!(
            "Photo: {}",
            if record.photo.is_some() { "yes" } else { "no" }
        )),
        Line::from(format!("Id: {}", record.id)),
    ])
}
