use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tui_input::Input;

use crate::app::{App, Focus, Screen};
use crate::ui::SCREEN_TITLES;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let tabs = Tabs::new(
        SCREEN_TITLES
            .iter()
            .map(|t| Line::from(*t))
            .collect::<Vec<_>>(),
    )
    .select(app.screen.index())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("company-registry"),
    )
    .style(Style::default().fg(Color::White))
    .highlight_style(
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(tabs, chunks[0]);

    match app.screen {
        Screen::Menu => render_menu(frame, app, chunks[1]),
        Screen::Inventory => render_inventory(frame, app, chunks[1]),
    }

    let status_lines = app
        .status_lines
        .iter()
        .rev()
        .take(6)
        .rev()
        .map(|l| Line::from(l.as_str()))
        .collect::<Vec<_>>();
    let status = Paragraph::new(status_lines)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: false });
    frame.render_widget(status, chunks[2]);

    frame.render_widget(footer(app), chunks[3]);

    if app.pending_delete.is_some() {
        render_delete_confirm(frame, app);
    }
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    let menu = Paragraph::new(super::views::menu_view(app))
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .wrap(Wrap { trim: true });
    frame.render_widget(menu, area);
}

fn render_inventory(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(30)])
        .split(area);

    render_form(frame, app, columns[0]);
    render_list(frame, app, columns[1]);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.form.editing.is_some() {
        "Edit company"
    } else {
        "New company"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let fields: [(&str, &Input, Focus); 6] = [
        ("Name", &app.form.name, Focus::Name),
        ("Service", &app.form.service, Focus::Service),
        ("Phone", &app.form.phone, Focus::Phone),
        ("Address", &app.form.address, Focus::Address),
        ("Details", &app.form.details, Focus::Details),
        ("Photo path", &app.form.photo_path, Focus::PhotoPath),
    ];
    for (idx, (label, input, focus)) in fields.into_iter().enumerate() {
        frame.render_widget(input_box(label, input, app.focus == focus), rows[idx]);
    }

    let photo_note = match (&app.form.pending_photo, app.form.editing.is_some()) {
        (Some(_), _) => "photo ready to save",
        (None, true) => "keeping current photo",
        (None, false) => "no photo",
    };
    frame.render_widget(Paragraph::new(photo_note), rows[6]);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(7),
        ])
        .split(area);

    frame.render_widget(
        input_box(
            "Search (name or service)",
            &app.search,
            app.focus == Focus::Search,
        ),
        rows[0],
    );

    let list_style = if app.focus == Focus::List {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default()
    };
    let list = Paragraph::new(super::views::company_lines(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(list_style)
                .title(format!("Companies ({})", app.visible_records().len())),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(list, rows[1]);

    let detail = Paragraph::new(super::views::selected_detail(app))
        .block(Block::default().borders(Borders::ALL).title("Selected"))
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, rows[2]);
}

fn input_box<'a>(label: &'a str, input: &'a Input, focused: bool) -> Paragraph<'a> {
    let style = if focused {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default()
    };
    Paragraph::new(input.value())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(label))
}

fn footer(app: &App) -> Paragraph<'static> {
    let spans = match app.screen {
        Screen::Menu => vec![
            Span::styled("i", Style::default().fg(Color::Yellow)),
            Span::raw(" inventory  "),
            Span::styled("x", Style::default().fg(Color::Yellow)),
            Span::raw(" export  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ],
        Screen::Inventory => vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" focus  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" submit/edit  "),
            Span::styled("n/e/d", Style::default().fg(Color::Yellow)),
            Span::raw(" new/edit/delete  "),
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(" search  "),
            Span::styled("Ctrl+x", Style::default().fg(Color::Yellow)),
            Span::raw(" export  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" back"),
        ],
    };
    Paragraph::new(vec![Line::from(spans)])
}

fn render_delete_confirm(frame: &mut Frame, app: &App) {
    let name = app
        .pending_delete
        .as_ref()
        .and_then(|id| app.store.get(id))
        .map(|record| record.name.clone())
        .unwrap_or_else(|| "this company".to_string());

    let area = centered_rect(frame.area(), 46, 5);
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(vec![
        Line::from(format!("Delete '{name}'?")),
        Line::from(""),
        Line::from("y: delete    n/Esc: cancel"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Confirm"));
    frame.render_widget(dialog, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
