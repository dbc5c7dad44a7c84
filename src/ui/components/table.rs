//! Sortable, selectable data table component.
//!
//! The table owns two pieces of local state: the active sort and the list of
//! selected rows. Rows, columns, the loading flag and the selection mode are
//! supplied by the caller.
//!
//! ## Sorting
//!
//! Sorting is textual. Every value is converted to its string representation
//! and compared lexicographically, so `"10"` sorts before `"2"`. Missing and
//! null values sort as the empty string. The sort is stable in both
//! directions. Activating the same sortable column repeatedly alternates
//! between ascending and descending; there is no unsorted third state.
//!
//! ## Selection
//!
//! Rows are shared as `Rc<T>` and selection membership is decided by handle
//! identity, not by row id or value. Callers must keep handing the same
//! handles to the table across updates for highlighting to stay correct.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cell::{CellValue, RowId, TableRow};
use super::loading::LoadingIndicator;
use crate::ui::theme::theme;

/// Width of the leading checkbox column.
const CHECKBOX_WIDTH: u16 = 3;

/// Horizontal gap between columns.
const COLUMN_SPACING: u16 = 1;

/// Placeholder shown when there are no rows.
const EMPTY_MESSAGE: &str = "No data available";

/// How rows respond to activation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Rows cannot be selected.
    #[default]
    None,
    /// At most one row is selected; activating another row replaces it.
    Single,
    /// Any number of rows can be selected.
    Multiple,
}

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Increasing lexical order.
    Ascending,
    /// Decreasing lexical order.
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Header glyph for an active sort in this direction.
    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The active sort: which column and in which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Key of the sorted column.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Describes one table column.
pub struct Column<T> {
    key: String,
    title: String,
    accessor: Box<dyn Fn(&T) -> CellValue>,
    sortable: bool,
    width: Constraint,
}

impl<T> Column<T> {
    /// Create a non-sortable column that reads its values with `accessor`.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            accessor: Box::new(accessor),
            sortable: false,
            width: Constraint::Fill(1),
        }
    }

    /// Allow header activation to sort by this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set the width constraint (defaults to an equal share).
    pub fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    /// The unique column key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether this column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Read this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

/// Action returned from the table after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum DataTableAction<T> {
    /// The sort changed.
    SortChanged(SortConfig),
    /// The selection changed; carries the full new selection.
    SelectionChanged(Vec<Rc<T>>),
}

/// Callback invoked with the full selection after every selection change.
pub type RowSelectCallback<T> = Box<dyn FnMut(&[Rc<T>])>;

/// What a screen position points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    /// Header cell of the column at this index.
    Header(usize),
    /// Body row at this display index.
    Row(usize),
}

/// Geometry of the last render, used for mouse hit testing.
#[derive(Debug, Clone, Default)]
struct TableLayout {
    /// The whole widget.
    area: Rect,
    /// The header line.
    header: Rect,
    /// Header cell of each column. Body cells share their x and width.
    columns: Vec<Rect>,
    /// Area below the header holding the visible rows.
    body: Rect,
    /// Display index of the first visible row.
    offset: usize,
}

/// A table with header-driven sorting and row selection.
pub struct DataTable<T> {
    /// Rows in caller order.
    rows: Vec<Rc<T>>,
    /// Column descriptors.
    columns: Vec<Column<T>>,
    /// Whether the caller is still loading rows.
    loading: bool,
    /// How rows respond to activation.
    selection_mode: SelectionMode,
    /// Active sort, if any.
    sort: Option<SortConfig>,
    /// Selected rows in selection order.
    selected: Vec<Rc<T>>,
    /// Keyboard cursor, as a display index.
    cursor: usize,
    /// Header cursor, as a column index.
    header_cursor: usize,
    /// Display index of the first visible row.
    offset: usize,
    /// Optional title on the border.
    title: Option<String>,
    /// Selection-changed notification.
    on_row_select: Option<RowSelectCallback<T>>,
    /// Placeholder shown while loading.
    loader: LoadingIndicator,
    /// Geometry of the last render.
    layout: Option<TableLayout>,
}

impl<T: TableRow> DataTable<T> {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            loading: false,
            selection_mode: SelectionMode::default(),
            sort: None,
            selected: Vec::new(),
            cursor: 0,
            header_cursor: 0,
            offset: 0,
            title: None,
            on_row_select: None,
            loader: LoadingIndicator::new(),
            layout: None,
        }
    }

    /// Set the border title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.set_selection_mode(mode);
        self
    }

    /// Register the selection-changed callback.
    pub fn on_row_select(mut self, callback: impl FnMut(&[Rc<T>]) + 'static) -> Self {
        self.on_row_select = Some(Box::new(callback));
        self
    }

    /// Replace the rows.
    ///
    /// The selection and sort are kept. Selected handles that are no longer
    /// among the rows stay selected until toggled.
    pub fn set_rows(&mut self, rows: Vec<Rc<T>>) {
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    /// Replace the columns.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        self.columns = columns;
        self.header_cursor = self.header_cursor.min(self.columns.len().saturating_sub(1));
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.loader.start();
        } else {
            self.loader.stop();
        }
    }

    /// Set the selection mode.
    ///
    /// Switching to [`SelectionMode::None`] clears the selection; switching
    /// to [`SelectionMode::Single`] keeps only the most recently selected
    /// row. Neither change is reported through the callback.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
        match mode {
            SelectionMode::None => self.selected.clear(),
            SelectionMode::Single if self.selected.len() > 1 => {
                let keep = self.selected.split_off(self.selected.len() - 1);
                self.selected = keep;
            }
            _ => {}
        }
    }

    /// Whether the table is loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Whether rows respond to activation.
    pub fn is_selectable(&self) -> bool {
        self.selection_mode != SelectionMode::None
    }

    /// The rows in caller order.
    pub fn rows(&self) -> &[Rc<T>] {
        &self.rows
    }

    /// The columns.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The active sort.
    pub fn sort_config(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Drop the active sort and return to caller order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// The selected rows in selection order.
    pub fn selected_rows(&self) -> &[Rc<T>] {
        &self.selected
    }

    /// Ids of the selected rows in selection order.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selected.iter().map(|row| row.row_id()).collect()
    }

    /// Check if this exact row handle is selected.
    pub fn is_selected(&self, row: &Rc<T>) -> bool {
        self.selected.iter().any(|selected| Rc::ptr_eq(selected, row))
    }

    /// The keyboard cursor as a display index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The header cursor as a column index.
    pub fn header_cursor(&self) -> usize {
        self.header_cursor
    }

    /// Indices into [`rows`](Self::rows) in display order.
    pub fn display_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        let Some(sort) = &self.sort else {
            return order;
        };
        let Some(column) = self.columns.iter().find(|c| c.key == sort.key) else {
            return order;
        };

        let keys: Vec<String> = self
            .rows
            .iter()
            .map(|row| column.value(row).sort_key().into_owned())
            .collect();
        // `sort_by` is stable, so equal keys keep caller order in both directions.
        order.sort_by(|&a, &b| sort.direction.apply(keys[a].cmp(&keys[b])));
        order
    }

    /// The rows in display order.
    pub fn sorted_rows(&self) -> Vec<Rc<T>> {
        self.display_order()
            .into_iter()
            .map(|index| Rc::clone(&self.rows[index]))
            .collect()
    }

    /// Activate the header of the column at `index`.
    ///
    /// Non-sortable columns are ignored. A new column sorts ascending; the
    /// active column flips between ascending and descending.
    pub fn handle_sort(&mut self, index: usize) -> Option<DataTableAction<T>> {
        let column = self.columns.get(index)?;
        if !column.sortable {
            return None;
        }

        let direction = match &self.sort {
            Some(sort) if sort.key == column.key && sort.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        let config = SortConfig {
            key: column.key.clone(),
            direction,
        };

        debug!(column = %config.key, ?direction, "Sort changed");
        self.header_cursor = index;
        self.sort = Some(config.clone());
        Some(DataTableAction::SortChanged(config))
    }

    /// Toggle the selection of a row handle.
    ///
    /// Returns the new selection, or `None` when rows are not selectable.
    /// The callback receives the same selection.
    pub fn toggle_row_selection(&mut self, row: &Rc<T>) -> Option<Vec<Rc<T>>> {
        if !self.is_selectable() {
            return None;
        }

        if let Some(position) = self.selected.iter().position(|r| Rc::ptr_eq(r, row)) {
            self.selected.remove(position);
        } else if self.selection_mode == SelectionMode::Multiple {
            self.selected.push(Rc::clone(row));
        } else {
            self.selected = vec![Rc::clone(row)];
        }

        let selection = self.selected.clone();
        debug!(
            count = selection.len(),
            ids = ?self.selected_ids(),
            "Selection changed"
        );
        if let Some(callback) = self.on_row_select.as_mut() {
            callback(&selection);
        }
        Some(selection)
    }

    /// Activate the row at display index `index` and move the cursor there.
    pub fn activate_row(&mut self, index: usize) -> Option<DataTableAction<T>> {
        let row_index = *self.display_order().get(index)?;
        let row = Rc::clone(&self.rows[row_index]);
        self.cursor = index;
        self.toggle_row_selection(&row)
            .map(DataTableAction::SelectionChanged)
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        self.loader.tick();
    }

    /// Move the row cursor down.
    pub fn move_down(&mut self) {
        if !self.rows.is_empty() && self.cursor < self.rows.len() - 1 {
            self.cursor += 1;
        }
    }

    /// Move the row cursor up.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the row cursor to the first row.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move the row cursor to the last row.
    pub fn move_to_end(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    /// Move the header cursor left.
    pub fn move_header_left(&mut self) {
        self.header_cursor = self.header_cursor.saturating_sub(1);
    }

    /// Move the header cursor right.
    pub fn move_header_right(&mut self) {
        if !self.columns.is_empty() && self.header_cursor < self.columns.len() - 1 {
            self.header_cursor += 1;
        }
    }

    /// Handle keyboard input.
    ///
    /// Input is ignored while loading or empty, since there is nothing to
    /// activate on screen.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<DataTableAction<T>> {
        if self.loading || self.rows.is_empty() {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.move_to_start();
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.move_to_end();
                None
            }
            (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                self.move_header_left();
                None
            }
            (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                self.move_header_right();
                None
            }
            (KeyCode::Char('s'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
                self.handle_sort(self.header_cursor)
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) => self.activate_row(self.cursor),
            _ => None,
        }
    }

    /// Handle mouse input against the geometry of the last render.
    ///
    /// A left click on a header activates that column; a left click on a row
    /// activates that row. The wheel moves the cursor.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<DataTableAction<T>> {
        if self.loading || self.rows.is_empty() || !self.contains(event.column, event.row) {
            return None;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.hit_test(event.column, event.row)? {
                    Hit::Header(index) => self.handle_sort(index),
                    Hit::Row(index) => {
                        self.cursor = index;
                        self.activate_row(index)
                    }
                }
            }
            MouseEventKind::ScrollDown => {
                self.move_down();
                None
            }
            MouseEventKind::ScrollUp => {
                self.move_up();
                None
            }
            _ => None,
        }
    }

    /// Whether a screen position lies inside the last rendered area.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|layout| rect_contains(layout.area, column, row))
    }

    /// Resolve a screen position to a header cell or body row.
    fn hit_test(&self, column: u16, row: u16) -> Option<Hit> {
        let layout = self.layout.as_ref()?;

        if rect_contains(layout.header, column, row) {
            return layout
                .columns
                .iter()
                .position(|cell| column >= cell.x && column < cell.x + cell.width)
                .map(Hit::Header);
        }

        if rect_contains(layout.body, column, row) {
            let index = layout.offset + usize::from(row - layout.body.y);
            if index < self.rows.len() {
                return Some(Hit::Row(index));
            }
        }

        None
    }

    /// Keep the cursor inside the visible window of `visible` rows.
    fn adjust_offset(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
        self.offset = self.offset.min(self.rows.len().saturating_sub(visible));
    }

    /// Split a line into the checkbox cell (if selectable) and column cells.
    fn cell_areas(&self, line: Rect) -> (Option<Rect>, Vec<Rect>) {
        let selectable = self.is_selectable();
        let mut constraints = Vec::with_capacity(self.columns.len() + 1);
        if selectable {
            constraints.push(Constraint::Length(CHECKBOX_WIDTH));
        }
        constraints.extend(self.columns.iter().map(|column| column.width));

        let areas = Layout::horizontal(constraints)
            .spacing(COLUMN_SPACING)
            .split(line);

        if selectable {
            (areas.first().copied(), areas.iter().skip(1).copied().collect())
        } else {
            (None, areas.to_vec())
        }
    }

    /// Render the table.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area to render in
    /// * `focused` - Whether the table has keyboard focus
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        let border_style = if focused {
            Style::default().fg(t.focus)
        } else {
            Style::default().fg(t.border)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(title) = &self.title {
            block = block.title(format!(" {} ", title));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.loading {
            self.layout = None;
            self.loader.render(frame, inner);
            return;
        }

        if self.rows.is_empty() {
            self.layout = None;
            let empty = Paragraph::new(EMPTY_MESSAGE)
                .style(Style::default().fg(t.muted))
                .block(Block::default().padding(Padding::uniform(1)));
            frame.render_widget(empty, inner);
            return;
        }

        let header = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
        let body = Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(1),
        );
        let (checkbox, columns) = self.cell_areas(header);

        self.adjust_offset(usize::from(body.height));
        self.render_header(frame, &columns, focused);
        self.render_body(frame, body, checkbox, &columns, focused);

        self.layout = Some(TableLayout {
            area,
            header,
            columns,
            body,
            offset: self.offset,
        });
    }

    /// Render the header line.
    fn render_header(&self, frame: &mut Frame, columns: &[Rect], focused: bool) {
        let t = theme();
        let active = self.sort.as_ref();

        for (index, (column, cell)) in self.columns.iter().zip(columns).enumerate() {
            let mut style = Style::default().fg(t.header).add_modifier(Modifier::BOLD);
            if focused && index == self.header_cursor {
                style = style.fg(t.accent).add_modifier(Modifier::UNDERLINED);
            }

            let mut spans = vec![Span::styled(column.title.as_str(), style)];
            if column.sortable {
                let (glyph, glyph_style) = match active {
                    Some(sort) if sort.key == column.key => {
                        (sort.direction.glyph(), Style::default().fg(t.accent))
                    }
                    _ => ("↕", Style::default().fg(t.muted)),
                };
                spans.push(Span::raw(" "));
                spans.push(Span::styled(glyph, glyph_style));
            }

            frame.render_widget(Paragraph::new(Line::from(spans)), *cell);
        }
    }

    /// Render the visible rows.
    fn render_body(
        &self,
        frame: &mut Frame,
        body: Rect,
        checkbox: Option<Rect>,
        columns: &[Rect],
        focused: bool,
    ) {
        let t = theme();
        let order = self.display_order();
        let visible = usize::from(body.height);

        for (line, display_index) in (self.offset..order.len()).take(visible).enumerate() {
            let row = &self.rows[order[display_index]];
            let y = body.y + line as u16;
            let selected = self.is_selected(row);

            let mut style = Style::default().fg(t.fg);
            if selected {
                style = style.bg(t.selected_bg);
            }
            if focused && display_index == self.cursor {
                style = style.bg(t.cursor_bg).add_modifier(Modifier::BOLD);
            }

            frame.render_widget(
                Block::default().style(style),
                Rect::new(body.x, y, body.width, 1),
            );

            if let Some(cell) = checkbox {
                let (mark, mark_style) = if selected {
                    ("[x]", style.fg(t.accent))
                } else {
                    ("[ ]", style.fg(t.muted))
                };
                frame.render_widget(
                    Paragraph::new(mark).style(mark_style),
                    Rect::new(cell.x, y, cell.width, 1),
                );
            }

            for (column, cell) in self.columns.iter().zip(columns) {
                let value = column.value(row);
                frame.render_widget(
                    Paragraph::new(value.cell_text().into_owned()).style(style),
                    Rect::new(cell.x, y, cell.width, 1),
                );
            }
        }
    }
}

/// Whether `(column, row)` lies inside `rect`.
fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Person {
        id: i64,
        name: CellValue,
        age: CellValue,
    }

    impl TableRow for Person {
        fn row_id(&self) -> RowId {
            RowId::Int(self.id)
        }
    }

    fn person(id: i64, name: impl Into<CellValue>, age: impl Into<CellValue>) -> Rc<Person> {
        Rc::new(Person {
            id,
            name: name.into(),
            age: age.into(),
        })
    }

    fn columns() -> Vec<Column<Person>> {
        vec![
            Column::new("id", "ID", |p: &Person| CellValue::Int(p.id)),
            Column::new("name", "Name", |p: &Person| p.name.clone()).sortable(true),
            Column::new("age", "Age", |p: &Person| p.age.clone()).sortable(true),
        ]
    }

    fn table(rows: Vec<Rc<Person>>, mode: SelectionMode) -> DataTable<Person> {
        let mut table = DataTable::new(columns()).with_selection_mode(mode);
        table.set_rows(rows);
        table
    }

    fn ids(rows: &[Rc<Person>]) -> Vec<i64> {
        rows.iter().map(|p| p.id).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(table: &mut DataTable<Person>, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| table.render(frame, frame.area(), true))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_no_sort_keeps_input_order() {
        let t = table(
            vec![person(3, "c", 1), person(1, "a", 2), person(2, "b", 3)],
            SelectionMode::None,
        );
        assert!(t.sort_config().is_none());
        assert_eq!(ids(&t.sorted_rows()), vec![3, 1, 2]);
    }

    #[test]
    fn test_header_toggles_bob_and_al() {
        let mut t = table(vec![person(1, "Bob", 30), person(2, "Al", 40)], SelectionMode::None);

        t.handle_sort(1);
        assert_eq!(ids(&t.sorted_rows()), vec![2, 1]);

        t.handle_sort(1);
        assert_eq!(ids(&t.sorted_rows()), vec![1, 2]);
    }

    #[test]
    fn test_sort_period_is_two() {
        let mut t = table(vec![person(1, "a", 1)], SelectionMode::None);
        let expected = [
            SortDirection::Ascending,
            SortDirection::Descending,
            SortDirection::Ascending,
            SortDirection::Descending,
        ];
        for direction in expected {
            let action = t.handle_sort(1);
            assert_eq!(
                action,
                Some(DataTableAction::SortChanged(SortConfig {
                    key: "name".to_string(),
                    direction,
                }))
            );
        }
    }

    #[test]
    fn test_switching_column_resets_to_ascending() {
        let mut t = table(vec![person(1, "a", 1)], SelectionMode::None);
        t.handle_sort(1);
        t.handle_sort(1);
        assert_eq!(t.sort_config().unwrap().direction, SortDirection::Descending);

        t.handle_sort(2);
        let sort = t.sort_config().unwrap();
        assert_eq!(sort.key, "age");
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_non_sortable_header_is_noop() {
        let mut t = table(vec![person(2, "b", 1), person(1, "a", 2)], SelectionMode::None);
        assert!(t.handle_sort(0).is_none());
        assert!(t.handle_sort(0).is_none());
        assert!(t.sort_config().is_none());

        t.handle_sort(1);
        let before = t.sort_config().cloned();
        assert!(t.handle_sort(0).is_none());
        assert_eq!(t.sort_config().cloned(), before);
    }

    #[test]
    fn test_out_of_range_header_is_noop() {
        let mut t = table(vec![person(1, "a", 1)], SelectionMode::None);
        assert!(t.handle_sort(9).is_none());
    }

    #[test]
    fn test_sort_is_textual() {
        let mut t = table(
            vec![person(1, "x", 2), person(2, "y", 10), person(3, "z", 1)],
            SelectionMode::None,
        );
        t.handle_sort(2);
        assert_eq!(ids(&t.sorted_rows()), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_adjacent_pairs_are_ordered() {
        let names = ["delta", "Alpha", "charlie", "bravo", "", "alpha", "Zulu"];
        let rows = names
            .iter()
            .enumerate()
            .map(|(i, name)| person(i as i64, *name, 0))
            .collect();
        let mut t = table(rows, SelectionMode::None);

        t.handle_sort(1);
        let asc = t.sorted_rows();
        for pair in asc.windows(2) {
            assert!(pair[0].name.sort_key() <= pair[1].name.sort_key());
        }

        t.handle_sort(1);
        let desc = t.sorted_rows();
        for pair in desc.windows(2) {
            assert!(pair[0].name.sort_key() >= pair[1].name.sort_key());
        }
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let mut t = table(
            vec![
                person(1, "same", 0),
                person(2, "other", 0),
                person(3, "same", 0),
                person(4, "same", 0),
            ],
            SelectionMode::None,
        );

        t.handle_sort(1);
        assert_eq!(ids(&t.sorted_rows()), vec![2, 1, 3, 4]);

        t.handle_sort(1);
        assert_eq!(ids(&t.sorted_rows()), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_null_and_undefined_sort_as_empty() {
        let mut t = table(
            vec![
                person(1, "b", 0),
                person(2, CellValue::Null, 0),
                person(3, CellValue::Undefined, 0),
                person(4, "a", 0),
            ],
            SelectionMode::None,
        );
        t.handle_sort(1);
        assert_eq!(ids(&t.sorted_rows()), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_selection_ignored_when_not_selectable() {
        let rows = vec![person(1, "a", 1)];
        let mut t = table(rows.clone(), SelectionMode::None);
        assert!(t.toggle_row_selection(&rows[0]).is_none());
        assert!(t.activate_row(0).is_none());
        assert!(t.selected_rows().is_empty());
    }

    #[test]
    fn test_single_select_holds_at_most_one() {
        let rows = vec![person(1, "a", 1), person(2, "b", 2), person(3, "c", 3)];
        let mut t = table(rows.clone(), SelectionMode::Single);

        for row in rows.iter().chain(rows.iter().rev()).chain(rows.iter()) {
            t.toggle_row_selection(row);
            assert!(t.selected_rows().len() <= 1);
        }

        t.toggle_row_selection(&rows[1]);
        assert_eq!(ids(t.selected_rows()), vec![2]);
        t.toggle_row_selection(&rows[0]);
        assert_eq!(ids(t.selected_rows()), vec![1]);
        t.toggle_row_selection(&rows[0]);
        assert!(t.selected_rows().is_empty());
    }

    #[test]
    fn test_multi_select_toggles_membership() {
        let rows = vec![person(1, "a", 1), person(2, "b", 2), person(3, "c", 3)];
        let mut t = table(rows.clone(), SelectionMode::Multiple);

        t.toggle_row_selection(&rows[2]);
        t.toggle_row_selection(&rows[0]);
        t.toggle_row_selection(&rows[1]);
        assert_eq!(ids(t.selected_rows()), vec![3, 1, 2]);

        let selection = t.toggle_row_selection(&rows[0]).unwrap();
        assert_eq!(ids(&selection), vec![3, 2]);

        t.toggle_row_selection(&rows[0]);
        assert_eq!(ids(t.selected_rows()), vec![3, 2, 1]);
    }

    #[test]
    fn test_selection_uses_handle_identity() {
        let first = person(1, "same", 1);
        let twin = person(1, "same", 1);
        assert_eq!(first, twin);

        let mut t = table(vec![Rc::clone(&first), Rc::clone(&twin)], SelectionMode::Multiple);
        t.toggle_row_selection(&first);
        assert!(t.is_selected(&first));
        assert!(!t.is_selected(&twin));

        t.toggle_row_selection(&twin);
        assert_eq!(t.selected_rows().len(), 2);
    }

    #[test]
    fn test_callback_receives_each_selection() {
        let seen: Rc<RefCell<Vec<Vec<i64>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let rows = vec![person(1, "a", 1), person(2, "b", 2)];
        let mut t = DataTable::new(columns())
            .with_selection_mode(SelectionMode::Multiple)
            .on_row_select(move |selection: &[Rc<Person>]| sink.borrow_mut().push(ids(selection)));
        t.set_rows(rows.clone());

        t.toggle_row_selection(&rows[0]);
        t.toggle_row_selection(&rows[1]);
        t.toggle_row_selection(&rows[0]);

        assert_eq!(*seen.borrow(), vec![vec![1], vec![1, 2], vec![2]]);
    }

    #[test]
    fn test_activate_row_uses_display_order() {
        let rows = vec![person(1, "Bob", 1), person(2, "Al", 2)];
        let mut t = table(rows, SelectionMode::Single);
        t.handle_sort(1);

        let action = t.activate_row(0);
        match action {
            Some(DataTableAction::SelectionChanged(selection)) => assert_eq!(ids(&selection), vec![2]),
            other => panic!("unexpected action: {:?}", other),
        }
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn test_set_rows_keeps_selection() {
        let rows = vec![person(1, "a", 1), person(2, "b", 2)];
        let mut t = table(rows.clone(), SelectionMode::Multiple);
        t.toggle_row_selection(&rows[1]);

        t.set_rows(vec![Rc::clone(&rows[1])]);
        assert!(t.is_selected(&rows[1]));
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn test_switching_to_single_keeps_last_selection() {
        let rows = vec![person(1, "a", 1), person(2, "b", 2)];
        let mut t = table(rows.clone(), SelectionMode::Multiple);
        t.toggle_row_selection(&rows[0]);
        t.toggle_row_selection(&rows[1]);

        t.set_selection_mode(SelectionMode::Single);
        assert_eq!(ids(t.selected_rows()), vec![2]);

        t.set_selection_mode(SelectionMode::None);
        assert!(t.selected_rows().is_empty());
    }

    #[test]
    fn test_keyboard_navigation_sort_and_select() {
        let rows = vec![person(1, "Bob", 1), person(2, "Al", 2), person(3, "Cy", 3)];
        let mut t = table(rows, SelectionMode::Multiple);

        t.handle_input(key(KeyCode::Char('j')));
        t.handle_input(key(KeyCode::Down));
        assert_eq!(t.cursor(), 2);
        t.handle_input(key(KeyCode::Down));
        assert_eq!(t.cursor(), 2);
        t.handle_input(key(KeyCode::Char('k')));
        assert_eq!(t.cursor(), 1);

        // Header cursor starts on the non-sortable id column.
        assert!(t.handle_input(key(KeyCode::Char('s'))).is_none());
        t.handle_input(key(KeyCode::Char('l')));
        assert!(matches!(
            t.handle_input(key(KeyCode::Enter)),
            Some(DataTableAction::SortChanged(_))
        ));
        assert_eq!(ids(&t.sorted_rows()), vec![2, 1, 3]);

        let action = t.handle_input(key(KeyCode::Char(' ')));
        match action {
            Some(DataTableAction::SelectionChanged(selection)) => assert_eq!(ids(&selection), vec![1]),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_input_ignored_while_loading_or_empty() {
        let mut t = table(vec![person(1, "a", 1), person(2, "b", 2)], SelectionMode::Multiple);
        t.set_loading(true);
        assert!(t.handle_input(key(KeyCode::Char(' '))).is_none());
        t.handle_input(key(KeyCode::Down));
        assert_eq!(t.cursor(), 0);

        let mut empty = table(Vec::new(), SelectionMode::Multiple);
        assert!(empty.handle_input(key(KeyCode::Char(' '))).is_none());
    }

    #[test]
    fn test_render_loading_placeholder() {
        let mut t = table(vec![person(1, "Bob", 1)], SelectionMode::None);
        t.set_loading(true);
        let lines = render(&mut t, 40, 6).join("\n");
        assert!(lines.contains("Loading..."));
        assert!(!lines.contains("Bob"));
    }

    #[test]
    fn test_render_empty_placeholder() {
        let mut t = table(Vec::new(), SelectionMode::None);
        let lines = render(&mut t, 40, 6).join("\n");
        assert!(lines.contains("No data available"));
        assert!(!lines.contains("Name"));
    }

    #[test]
    fn test_render_rows_and_headers() {
        let mut t = table(
            vec![person(1, "Bob", CellValue::Undefined), person(2, CellValue::Null, 7)],
            SelectionMode::None,
        );
        let lines = render(&mut t, 40, 6);
        assert!(lines[1].contains("ID"));
        assert!(lines[1].contains("Name ↕"));
        assert!(lines[2].contains("Bob"));
        assert!(lines[2].contains('-'));
        assert!(lines[3].contains("null"));
        assert!(lines[3].contains('7'));
    }

    #[test]
    fn test_render_sort_glyph_and_checkboxes() {
        let rows = vec![person(1, "Bob", 1), person(2, "Al", 2)];
        let mut t = table(rows.clone(), SelectionMode::Multiple);
        t.handle_sort(1);
        t.toggle_row_selection(&rows[0]);

        let lines = render(&mut t, 40, 6);
        assert!(lines[1].contains("Name ▲"));
        assert!(lines[2].contains("[ ]") && lines[2].contains("Al"));
        assert!(lines[3].contains("[x]") && lines[3].contains("Bob"));
    }

    #[test]
    fn test_mouse_click_header_and_row() {
        let rows = vec![person(1, "Bob", 1), person(2, "Al", 2)];
        let mut t = table(rows, SelectionMode::Multiple);
        render(&mut t, 40, 6);

        // Border at x=0, checkbox at 1..4, spacing, then three equal columns.
        let (_, cells) = t.cell_areas(Rect::new(1, 1, 38, 1));
        let name_x = cells[1].x;

        let action = t.handle_mouse(click(name_x, 1));
        assert!(matches!(action, Some(DataTableAction::SortChanged(_))));
        assert_eq!(ids(&t.sorted_rows()), vec![2, 1]);

        render(&mut t, 40, 6);
        let action = t.handle_mouse(click(name_x, 3));
        match action {
            Some(DataTableAction::SelectionChanged(selection)) => assert_eq!(ids(&selection), vec![1]),
            other => panic!("unexpected action: {:?}", other),
        }
        assert_eq!(t.cursor(), 1);
    }

    #[test]
    fn test_mouse_click_on_non_sortable_header() {
        let mut t = table(vec![person(1, "a", 1)], SelectionMode::None);
        render(&mut t, 40, 6);
        assert!(t.handle_mouse(click(1, 1)).is_none());
        assert!(t.sort_config().is_none());
    }

    #[test]
    fn test_mouse_outside_is_ignored() {
        let mut t = table(vec![person(1, "a", 1)], SelectionMode::Multiple);
        render(&mut t, 40, 6);
        assert!(!t.contains(50, 50));
        assert!(t.handle_mouse(click(50, 50)).is_none());
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let rows = (0..10).map(|i| person(i, format!("row{}", i), i)).collect();
        let mut t = table(rows, SelectionMode::None);
        t.move_to_end();
        let lines = render(&mut t, 40, 6);
        // Three body lines fit between the header and the bottom border.
        assert!(lines[4].contains("row9"));
        assert!(!lines.join("\n").contains("row0"));
    }
}
