//! Reusable UI components.

mod cell;
mod help_bar;
mod input;
mod loading;
mod table;

pub use cell::{CellValue, RowId, TableRow, MISSING_PLACEHOLDER};
pub use help_bar::render_context_help;
pub use input::{FieldMessage, InputField, InputFieldAction, InputSize, InputType, InputVariant};
pub use loading::{InlineLoader, LoadingIndicator};
pub use table::{
    Column, DataTable, DataTableAction, RowSelectCallback, SelectionMode, SortConfig,
    SortDirection,
};
