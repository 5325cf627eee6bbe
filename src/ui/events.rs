use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::app::{App, Focus, Screen};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // The confirmation dialog swallows everything except its own answers.
    if app.pending_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return;
    }

    match app.screen {
        Screen::Menu => handle_menu_key(app, key),
        Screen::Inventory => handle_inventory_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('1') | KeyCode::Enter => app.open_inventory(),
        KeyCode::Char('x') | KeyCode::Char('2') => app.export(),
        KeyCode::Char('q') | KeyCode::Char('3') | KeyCode::Esc => app.running = false,
        _ => {}
    }
}

fn handle_inventory_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => app.back_to_menu(),
        (KeyCode::Tab, _) => app.focus_next(),
        (KeyCode::BackTab, _) => app.focus_previous(),
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => app.export(),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => app.submit_form(),
        _ if app.focus == Focus::List => handle_list_key(app, key),
        (KeyCode::Enter, _) if app.focus == Focus::PhotoPath => app.attach_photo(),
        (KeyCode::Enter, _) if app.focus == Focus::Search => app.focus = Focus::List,
        (KeyCode::Enter, _) => app.submit_form(),
        _ => forward_to_input(app, key),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('n') => app.focus = Focus::Name,
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('q') => app.running = false,
        _ => {}
    }
}

fn forward_to_input(app: &mut App, key: KeyEvent) {
    let event = Event::Key(key);
    if app.focus == Focus::Search {
        app.search.handle_event(&event);
        // The filtered list may have shrunk under the cursor.
        app.clamp_selection();
    } else if let Some(input) = app.form.input_mut(app.focus) {
        input.handle_event(&event);
    }
}
