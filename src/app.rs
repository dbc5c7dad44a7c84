//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: events flow
//! into [`App::update`], and [`App::view`] draws the current state. The app
//! owns every input value and hands it to the fields on each call.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::data::{columns_for, Record};
use crate::events::{is_force_quit, Event, KeyContext};
use crate::ui::{
    render_context_help, theme, DataTable, DataTableAction, InputField, InputFieldAction,
    InputType, TableRow,
};

/// Width of the form column beside the table.
const FORM_WIDTH: u16 = 42;

/// The component receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Username,
    Email,
    Password,
}

impl Focus {
    /// The next focus stop, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Focus::Table => Focus::Username,
            Focus::Username => Focus::Email,
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Table,
        }
    }

    /// The previous focus stop, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Focus::Table => Focus::Password,
            Focus::Username => Focus::Table,
            Focus::Email => Focus::Username,
            Focus::Password => Focus::Email,
        }
    }

    /// Index into the form fields, or `None` for the table.
    fn field_index(self) -> Option<usize> {
        match self {
            Focus::Table => None,
            Focus::Username => Some(USERNAME),
            Focus::Email => Some(EMAIL),
            Focus::Password => Some(PASSWORD),
        }
    }

    fn from_field_index(index: usize) -> Option<Self> {
        match index {
            USERNAME => Some(Focus::Username),
            EMAIL => Some(Focus::Email),
            PASSWORD => Some(Focus::Password),
            _ => None,
        }
    }
}

const USERNAME: usize = 0;
const EMAIL: usize = 1;
const PASSWORD: usize = 2;

/// A form field together with the value the app owns for it.
#[derive(Debug, Clone)]
struct FormField {
    input: InputField,
    value: String,
}

impl FormField {
    fn new(input: InputField) -> Self {
        Self {
            input,
            value: String::new(),
        }
    }
}

/// The demo application.
pub struct App {
    should_quit: bool,
    focus: Focus,
    table: DataTable<Record>,
    fields: Vec<FormField>,
}

impl App {
    /// Create the app over `records`, styled by `settings`.
    pub fn new(records: Vec<Record>, settings: &Settings) -> Self {
        let rows: Vec<Rc<Record>> = records.into_iter().map(Rc::new).collect();
        let columns = columns_for(&rows, |key| settings.is_sortable(key));
        debug!(rows = rows.len(), columns = columns.len(), "Creating application");

        let mut table = DataTable::new(columns)
            .with_title("Records")
            .with_selection_mode(settings.selection_mode)
            .on_row_select(|selected| {
                let ids: Vec<String> = selected.iter().map(|r| r.row_id().to_string()).collect();
                info!(ids = ?ids, "Row selection changed");
            });
        table.set_rows(rows);

        let styled = |input: InputField| {
            input
                .with_size(settings.input_size)
                .with_variant(settings.input_variant)
        };
        let fields = vec![
            FormField::new(styled(
                InputField::new()
                    .with_label("Username")
                    .with_placeholder("Enter username")
                    .with_helper_text("This is a helper text")
                    .with_clearable(true),
            )),
            FormField::new(styled(
                InputField::new()
                    .with_label("Email")
                    .with_placeholder("Enter email")
                    .with_error_message("Invalid email"),
            )),
            FormField::new(styled(
                InputField::new()
                    .with_label("Password")
                    .with_placeholder("Enter password")
                    .with_type(InputType::Password),
            )),
            FormField::new(styled(
                InputField::new()
                    .with_label("Loading")
                    .with_placeholder("Fetching...")
                    .with_loading(true),
            )),
            FormField::new(styled(
                InputField::new()
                    .with_label("Disabled")
                    .with_placeholder("Can't type here")
                    .with_disabled(true),
            )),
        ];

        Self {
            should_quit: false,
            focus: Focus::default(),
            table,
            fields,
        }
    }

    /// Returns true if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The focused component.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// The data table.
    pub fn table(&self) -> &DataTable<Record> {
        &self.table
    }

    /// The value of the focused field, if a field is focused.
    pub fn focused_value(&self) -> Option<&str> {
        self.focus
            .field_index()
            .map(|index| self.fields[index].value.as_str())
    }

    /// The current email value and whether it is flagged invalid.
    pub fn email(&self) -> (&str, bool) {
        let field = &self.fields[EMAIL];
        (field.value.as_str(), field.input.is_invalid())
    }

    fn key_context(&self) -> KeyContext {
        match self.focus {
            Focus::Table => KeyContext::Table,
            Focus::Password => KeyContext::PasswordInput,
            Focus::Username | Focus::Email => KeyContext::Input,
        }
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Mouse(mouse) => {
                trace!(kind = ?mouse.kind, column = mouse.column, row = mouse.row, "Mouse event");
                self.handle_mouse_event(mouse);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.table.tick();
                for field in &mut self.fields {
                    field.input.tick();
                }
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if is_force_quit(&key) {
            self.should_quit = true;
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => {
                self.focus = self.focus.next();
                return;
            }
            (KeyCode::BackTab, _) => {
                self.focus = self.focus.prev();
                return;
            }
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                let loading = !self.table.is_loading();
                self.table.set_loading(loading);
                debug!(loading, "Table loading toggled");
                return;
            }
            _ => {}
        }

        match self.focus.field_index() {
            None => {
                if key.code == KeyCode::Char('q') && key.modifiers == KeyModifiers::NONE {
                    self.should_quit = true;
                    return;
                }
                if let Some(action) = self.table.handle_input(key) {
                    self.log_table_action(&action);
                }
            }
            Some(index) => {
                let field = &mut self.fields[index];
                if let Some(action) = field.input.handle_input(key, &field.value) {
                    self.apply_field_action(index, action);
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, event: MouseEvent) {
        let (column, row) = (event.column, event.row);
        let clicked = event.kind == MouseEventKind::Down(MouseButton::Left);

        if self.table.contains(column, row) {
            if clicked {
                self.focus = Focus::Table;
            }
            if let Some(action) = self.table.handle_mouse(event) {
                self.log_table_action(&action);
            }
            return;
        }

        let Some(index) = self
            .fields
            .iter()
            .position(|field| field.input.contains(column, row))
        else {
            return;
        };
        if clicked {
            if let Some(focus) = Focus::from_field_index(index) {
                self.focus = focus;
            }
        }
        let field = &mut self.fields[index];
        if let Some(action) = field.input.handle_mouse(event, &field.value) {
            self.apply_field_action(index, action);
        }
    }

    fn apply_field_action(&mut self, index: usize, action: InputFieldAction) {
        let InputFieldAction::Change(value) = action;
        if index == EMAIL {
            self.fields[EMAIL]
                .input
                .set_invalid(!value.is_empty() && !value.contains('@'));
        }
        self.fields[index].value = value;
    }

    fn log_table_action(&self, action: &DataTableAction<Record>) {
        match action {
            DataTableAction::SortChanged(sort) => {
                trace!(key = %sort.key, direction = ?sort.direction, "Table sort action");
            }
            DataTableAction::SelectionChanged(rows) => {
                trace!(count = rows.len(), "Table selection action");
            }
        }
    }

    /// One-line summary of the sort and selection.
    fn status_line(&self) -> Line<'static> {
        let t = theme();
        let sort = match self.table.sort_config() {
            Some(sort) => format!("Sorted by {} {}", sort.key, sort.direction.glyph()),
            None => "Unsorted".to_string(),
        };
        let ids = self.table.selected_ids();
        let selected = if ids.is_empty() {
            "none".to_string()
        } else {
            ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        Line::from(vec![
            Span::styled(sort, Style::default().fg(t.fg)),
            Span::styled("  |  ", Style::default().fg(t.muted)),
            Span::styled(format!("Selected: {}", selected), Style::default().fg(t.fg)),
        ])
    }

    /// Render the application.
    pub fn view(&mut self, frame: &mut Frame) {
        let [main, status, help] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [table_area, form_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(FORM_WIDTH)])
                .spacing(1)
                .areas(main);

        self.table
            .render(frame, table_area, self.focus == Focus::Table);
        self.render_form(frame, form_area);

        frame.render_widget(Paragraph::new(self.status_line()), status);
        render_context_help(frame, help, self.key_context());
    }

    fn render_form(&mut self, frame: &mut Frame, area: Rect) {
        let mut constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|field| Constraint::Length(field.input.height()))
            .collect();
        constraints.push(Constraint::Fill(1));
        let areas = Layout::vertical(constraints).spacing(1).split(area);

        let focused = self.focus.field_index();
        for (index, (field, field_area)) in self.fields.iter_mut().zip(areas.iter()).enumerate() {
            field
                .input
                .render(frame, *field_area, &field.value, focused == Some(index));
        }
    }
}
