//! Application settings configuration.

use serde::{Deserialize, Serialize};

use crate::events::DEFAULT_TICK_RATE_MS;
use crate::ui::{InputSize, InputVariant, SelectionMode};

/// Demo application settings.
///
/// Every field has a default, so a partial `[settings]` table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use (`"dark"` or `"light"`).
    pub theme: String,
    /// Event poll interval in milliseconds; drives spinner animation.
    pub tick_rate_ms: u64,
    /// How table rows respond to activation.
    pub selection_mode: SelectionMode,
    /// Size preset for the demo fields.
    pub input_size: InputSize,
    /// Visual variant for the demo fields.
    pub input_variant: InputVariant,
    /// Column keys that do not sort on header activation.
    pub unsortable_columns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            selection_mode: SelectionMode::Multiple,
            input_size: InputSize::default(),
            input_variant: InputVariant::default(),
            unsortable_columns: vec!["id".to_string()],
        }
    }
}

impl Settings {
    /// Whether the column with `key` is sortable.
    pub fn is_sortable(&self, key: &str) -> bool {
        !self.unsortable_columns.iter().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.tick_rate_ms, 100);
        assert_eq!(settings.selection_mode, SelectionMode::Multiple);
        assert!(!settings.is_sortable("id"));
        assert!(settings.is_sortable("name"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            selection_mode = "single"
            input_variant = "ghost"
            "#,
        )
        .unwrap();
        assert_eq!(settings.selection_mode, SelectionMode::Single);
        assert_eq!(settings.input_variant, InputVariant::Ghost);
        assert_eq!(settings.input_size, InputSize::Md);
        assert_eq!(settings.theme, "dark");
    }
}
