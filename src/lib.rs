//! Terminal UI building blocks.
//!
//! [`ui::DataTable`] is a sortable, selectable table over shared rows, and
//! [`ui::InputField`] is a controlled text input with password, clear,
//! loading and disabled states. Both render with ratatui and take crossterm
//! key and mouse events. The remaining modules make up the `tui-blocks` demo
//! binary that shows them together.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod tui;
pub mod ui;
