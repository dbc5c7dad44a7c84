//! User interface components.
//!
//! The two building blocks are [`DataTable`] and [`InputField`]. Both are
//! plain structs holding only their local view state; callers feed them
//! data, forward input events, and render them into a ratatui frame.

mod components;
pub mod theme;

pub use components::{
    render_context_help, CellValue, Column, DataTable, DataTableAction, FieldMessage, InlineLoader,
    InputField, InputFieldAction, InputSize, InputType, InputVariant, LoadingIndicator, RowId,
    RowSelectCallback, SelectionMode, SortConfig, SortDirection, TableRow, MISSING_PLACEHOLDER,
};
pub use theme::{init_theme, load_theme, theme, Theme};
