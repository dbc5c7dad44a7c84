//! Centralized error types for the demo application.
//!
//! The components themselves never fail. Errors only come from the shell
//! around them: configuration, the data file, and the terminal.

use thiserror::Error;

use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// IO errors (file system, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The data file is valid JSON but not a list of rows.
    #[error("invalid data: {0}")]
    Data(String),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        AppError::Data(msg.into())
    }

    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Json(e) => format!("Data file is not valid JSON (line {}).", e.line()),
            AppError::Data(msg) => format!("Data file has an unexpected shape: {}", msg),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error prevents the application from starting.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Json(_) | AppError::Data(_) | AppError::Terminal(_) | AppError::Io(_)
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_)) => {
                Some("Fix or delete the configuration file to use defaults.")
            }
            AppError::Json(_) | AppError::Data(_) => Some(
                "Provide a JSON array of objects, each with an integer or string \"id\".",
            ),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
        assert!(app_err.user_message().contains("not valid JSON"));
    }

    #[test]
    fn test_user_message_data() {
        let err = AppError::data("row 2 has no id");
        assert!(err.user_message().contains("row 2 has no id"));
    }

    #[test]
    fn test_config_errors_are_not_critical() {
        assert!(!AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::data("bad").is_critical());
    }

    #[test]
    fn test_suggested_action_for_data() {
        let action = AppError::data("bad").suggested_action();
        assert!(action.unwrap().contains("\"id\""));
        assert!(AppError::terminal("x").suggested_action().is_none());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert_eq!(err.user_message(), "Terminal error: test error");
    }
}
