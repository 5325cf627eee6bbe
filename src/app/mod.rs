use std::fs;
use std::time::Duration;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tui_input::Input;

use crate::registry::{CompanyDraft, CompanyRecord, CompanyStore, DataFile};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Inventory,
}

impl Screen {
    pub fn index(self) -> usize {
        match self {
            Screen::Menu => 0,
            Screen::Inventory => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Service,
    Phone,
    Address,
    Details,
    PhotoPath,
    Search,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Service,
            Focus::Service => Focus::Phone,
            Focus::Phone => Focus::Address,
            Focus::Address => Focus::Details,
            Focus::Details => Focus::PhotoPath,
            Focus::PhotoPath => Focus::Search,
            Focus::Search => Focus::List,
            Focus::List => Focus::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Name => Focus::List,
            Focus::Service => Focus::Name,
            Focus::Phone => Focus::Service,
            Focus::Address => Focus::Phone,
            Focus::Details => Focus::Address,
            Focus::PhotoPath => Focus::Details,
            Focus::Search => Focus::PhotoPath,
            Focus::List => Focus::Search,
        }
    }
}

/// Edit state lives here explicitly: `editing` holds the id of the record
/// being updated, `pending_photo` the blob attached since the last submit.
#[derive(Debug, Default)]
pub struct FormState {
    pub name: Input,
    pub service: Input,
    pub phone: Input,
    pub address: Input,
    pub details: Input,
    pub photo_path: Input,
    pub pending_photo: Option<String>,
    pub editing: Option<String>,
}

impl FormState {
    pub fn draft(&self) -> CompanyDraft {
        CompanyDraft {
            name: self.name.value().to_string(),
            service: self.service.value().to_string(),
            phone: self.phone.value().to_string(),
            address: self.address.value().to_string(),
            details: self.details.value().to_string(),
            photo: self.pending_photo.clone(),
        }
    }

    pub fn load(&mut self, record: &CompanyRecord) {
        self.name = Input::new(record.name.clone());
        self.service = Input::new(record.service.clone());
        self.phone = Input::new(record.phone.clone());
        self.address = Input::new(record.address.clone());
        self.details = Input::new(record.details.clone());
        self.photo_path = Input::default();
        self.pending_photo = None;
        self.editing = Some(record.id.clone());
    }

    pub fn clear(&mut self) {
        *self = FormState::default();
    }

    pub fn input_mut(&mut self, focus: Focus) -> Option<&mut Input> {
        match focus {
            Focus::Name => Some(&mut self.name),
            Focus::Service => Some(&mut self.service),
            Focus::Phone => Some(&mut self.phone),
            Focus::Address => Some(&mut self.address),
            Focus::Details => Some(&mut self.details),
            Focus::PhotoPath => Some(&mut self.photo_path),
            Focus::Search | Focus::List => None,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub running: bool,
    pub focus: Focus,
    pub form: FormState,
    pub search: Input,
    pub selected: usize,
    pub pending_delete: Option<String>,
    pub status_lines: Vec<String>,
    pub store: CompanyStore,
    pub data_file: DataFile,
}

impl App {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_data_file(DataFile::new()?))
    }

    pub fn with_data_file(data_file: DataFile) -> Self {
        let mut store = CompanyStore::new();
        store.replace_all(data_file.load());

        let mut app = Self {
            screen: Screen::Menu,
            running: true,
            focus: Focus::List,
            form: FormState::default(),
            search: Input::default(),
            selected: 0,
            pending_delete: None,
            status_lines: Vec::new(),
            store,
            data_file,
        };
        app.log(format!("loaded {} companies", app.store.records().len()));
        app
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.status_lines.push(line.into());
        if self.status_lines.len() > 200 {
            let _ = self.status_lines.drain(0..(self.status_lines.len() - 200));
        }
    }

    /// Records currently visible in the list pane: the collection filtered
    /// by the live search query, in collection order.
    pub fn visible_records(&self) -> Vec<&CompanyRecord> {
        self.store.search(self.search.value())
    }

    pub fn selected_visible_id(&self) -> Option<String> {
        self.visible_records()
            .get(self.selected)
            .map(|record| record.id.clone())
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_records().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn open_inventory(&mut self) {
        self.screen = Screen::Inventory;
        self.focus = Focus::List;
        self.clamp_selection();
    }

    pub fn back_to_menu(&mut self) {
        if self.form.editing.is_some() {
            self.cancel_edit();
        } else {
            self.screen = Screen::Menu;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn select_next(&mut self) {
        let len = self.visible_records().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.visible_records().len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Submit with no edit target registers a new company; with one, it
    /// updates that record. The form only clears on success, so the user
    /// keeps their input after a validation failure.
    pub fn submit_form(&mut self) {
        let draft = self.form.draft();
        let result = match self.form.editing.clone() {
            Some(id) => self
                .store
                .update(&id, draft)
                .map(|record| format!("updated '{}'", record.name)),
            None => self
                .store
                .create(draft)
                .map(|record| format!("registered '{}'", record.name)),
        };

        match result {
            Ok(message) => {
                self.persist();
                self.form.clear();
                self.clamp_selection();
                self.log(message);
            }
            Err(err) => self.log(format!("cannot save: {err}")),
        }
    }

    pub fn begin_edit(&mut self) {
        let Some(id) = self.selected_visible_id() else {
            self.log("no record selected");
            return;
        };
        match self.store.get(&id) {
            Some(record) => {
                let record = record.clone();
                self.form.load(&record);
                self.focus = Focus::Name;
                self.log(format!("editing '{}'", record.name));
            }
            None => self.log("record no longer exists"),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
        self.log("edit cancelled");
    }

    pub fn request_delete(&mut self) {
        match self.selected_visible_id() {
            Some(id) => self.pending_delete = Some(id),
            None => self.log("no record selected"),
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match self.store.delete(&id) {
            Ok(()) => {
                self.persist();
                self.clamp_selection();
                self.log("company deleted");
            }
            Err(err) => self.log(format!("cannot delete: {err}")),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// File-chooser stand-in: reads the image named in the photo-path field
    /// and keeps it as an opaque base64 blob for the next submit.
    pub fn attach_photo(&mut self) {
        let path = self.form.photo_path.value().trim().to_string();
        if path.is_empty() {
            self.log("enter an image path first");
            return;
        }
        match read_photo(&path) {
            Ok(encoded) => {
                self.form.pending_photo = Some(encoded);
                self.log(format!("photo attached from {path}"));
            }
            Err(err) => self.log(format!("could not attach photo: {err:#}")),
        }
    }

    pub fn export(&mut self) {
        match self.data_file.export_text(self.store.records()) {
            Some(path) => self.log(format!("exported to {}", path.display())),
            None => self.log("export failed; see log file"),
        }
    }

    // Every successful mutation is followed by a save before the next draw.
    // A failed save keeps the in-memory change so input is not lost.
    fn persist(&mut self) {
        if !self.data_file.save(self.store.records()) {
            self.log("could not write companies.json; change kept in memory only");
        }
    }
}

fn read_photo(path: &str) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {path}"))?;
    Ok(BASE64.encode(bytes))
}

pub fn run() -> anyhow::Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;

    let mut app = App::new()?;

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(150))? {
            if let Event::Key(key_event) = event::read()? {
                ui::handle_key(app, key_event);
            }
        }
    }
    Ok(())
}
