//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::ui::SelectionMode;

/// Terminal demo of a sortable, selectable data table and text input fields.
#[derive(Debug, Parser)]
#[command(name = "tui-blocks", version, about)]
pub struct Cli {
    /// JSON file with an array of row objects, each with an "id".
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Configuration file to use instead of the default location.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Row selection mode; overrides the configuration file.
    #[arg(short, long, value_enum)]
    pub selection: Option<SelectionMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["tui-blocks"]).unwrap();
        assert!(cli.data.is_none());
        assert!(cli.config.is_none());
        assert!(cli.selection.is_none());
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "tui-blocks",
            "--data",
            "rows.json",
            "--config",
            "alt.toml",
            "--selection",
            "single",
        ])
        .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("rows.json")));
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert_eq!(cli.selection, Some(SelectionMode::Single));
    }

    #[test]
    fn test_invalid_selection_mode() {
        assert!(Cli::try_parse_from(["tui-blocks", "-s", "many"]).is_err());
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
