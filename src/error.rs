//! Error handling for gandi-domains

use thiserror::Error;

/// Main error type for gandi-domains
#[derive(Error, Debug, Clone)]
pub enum GandiError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Non-2xx response or transport failure. Transport failures carry no status code.
    #[error("{message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        response_body: Option<serde_json::Value>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GandiError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an API error
    pub fn api(
        message: impl Into<String>,
        status_code: Option<u16>,
        response_body: Option<serde_json::Value>,
    ) -> Self {
        Self::Api {
            message: message.into(),
            status_code,
            response_body,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code of an API error, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Parsed (or `{"message": raw}`) body of an API error response
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { response_body, .. } => response_body.as_ref(),
            _ => None,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}", message)
            }
            Self::Api {
                message,
                status_code,
                ..
            } => match status_code {
                Some(code @ (401 | 403)) => format!(
                    "❌ API error ({}): {}\n💡 Check that your personal access token is valid",
                    code, message
                ),
                Some(code) => format!("❌ API error ({}): {}", code, message),
                None => format!("❌ Network error: {}\n💡 Check your internet connection", message),
            },
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Unexpected API response: {}", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<reqwest::Error> for GandiError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());

        if err.is_connect() {
            Self::api(format!("Connection failed: {}", err), status_code, None)
        } else if err.is_timeout() {
            Self::api(format!("Request timed out: {}", err), status_code, None)
        } else {
            Self::api(err.to_string(), status_code, None)
        }
    }
}

impl From<serde_json::Error> for GandiError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for GandiError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GandiError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::GandiError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::GandiError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::GandiError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::GandiError::validation(format!($fmt, $($arg)*))
    };
}
