//! Centralized error types for issuedeck.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
///
/// Aggregates every error that can occur in issuedeck, providing
/// user-friendly messages while preserving the underlying error for logs.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Errors opening an external link.
    #[error("Could not open link: {0}")]
    Browser(String),

    /// Errors writing to the system clipboard.
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

impl AppError {
    /// Get a user-friendly message for display.
    ///
    /// This returns a message suitable for a notice in the UI, without
    /// technical detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) | ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => "Server error. Please try again later.".to_string(),
                ApiError::BadRequest(msg) => format!("The server rejected the request: {}", msg),
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(url) => format!("Invalid issue endpoint: {}", url),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the server. Please try again.".to_string()
                }
                ApiError::Unsuccessful => "The server could not load issues.".to_string(),
            },
            AppError::Browser(url) => format!("Could not open {} in a browser.", url),
            AppError::Clipboard(_) => "Could not copy to the clipboard.".to_string(),
        }
    }

    /// Check if this error is recoverable by retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::RateLimited)
                | AppError::Api(ApiError::ServerError(_))
                | AppError::Api(ApiError::Network(_))
                | AppError::Api(ApiError::InvalidResponse(_))
                | AppError::Api(ApiError::Unsuccessful)
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix the configuration file or pass --config with another path.")
            }
            AppError::Api(ApiError::InvalidUrl(_)) => {
                Some("Set 'endpoint' in the configuration file or pass --endpoint.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a few seconds and press 'r' to refresh."),
            AppError::Api(ApiError::Network(_)) | AppError::Api(ApiError::ServerError(_)) => {
                Some("Press 'r' to retry.")
            }
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
        assert!(matches!(
            app_err,
            AppError::Config(ConfigError::NoConfigDir)
        ));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::RateLimited.into();
        assert!(matches!(app_err, AppError::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("/github/issues".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("/github/issues"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "page_size must be between 1 and 100".to_string(),
        ));
        assert!(err.user_message().contains("page_size"));
    }

    #[test]
    fn test_user_message_browser() {
        let err = AppError::Browser("https://example.com".to_string());
        assert!(err.user_message().contains("https://example.com"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(AppError::Api(ApiError::RateLimited).is_recoverable());
        assert!(AppError::Api(ApiError::ServerError("x".to_string())).is_recoverable());
        assert!(!AppError::Api(ApiError::NotFound("x".to_string())).is_recoverable());
        assert!(!AppError::Config(ConfigError::NoConfigDir).is_recoverable());
    }

    #[test]
    fn test_suggested_action() {
        let action = AppError::Api(ApiError::RateLimited).suggested_action();
        assert!(action.unwrap().contains("refresh"));

        let action = AppError::Api(ApiError::InvalidUrl("x".to_string())).suggested_action();
        assert!(action.unwrap().contains("--endpoint"));

        assert!(AppError::Browser("x".to_string()).suggested_action().is_none());
    }

    #[test]
    fn test_clipboard_error_is_not_recoverable() {
        let err = AppError::Clipboard("no display".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.user_message(), "Could not copy to the clipboard.");
    }
}
