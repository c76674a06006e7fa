use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RelnotesError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // GitHub upstream errors
    GithubError {
        operation: String,
        status_code: Option<u16>,
        reason: String,
    },
    RateLimitExceeded {
        remaining: u32,
        reset: Option<i64>,
    },

    // Generation errors (non-success status before streaming starts)
    GenerationError {
        status_code: Option<u16>,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        reason: String,
        context: Option<String>,
    },

    // Network errors
    NetworkError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },

    // Validation errors
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl RelnotesError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn github_error(operation: &str, status_code: Option<u16>, reason: &str) -> Self {
        Self::GithubError {
            operation: operation.to_string(),
            status_code,
            reason: reason.to_string(),
        }
    }

    pub fn generation_error(status_code: Option<u16>, reason: &str) -> Self {
        Self::GenerationError {
            status_code,
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, reason: &str, context: Option<&str>) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
            context: context.map(|s| s.to_string()),
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NetworkError { .. }
            | Self::GithubError { .. }
            | Self::RateLimitExceeded { .. }
            | Self::GenerationError { .. }
            | Self::ValidationError { .. }
            | Self::ConfigurationError { .. } => true,
            Self::ConfigurationFileError { .. }
            | Self::ParseError { .. }
            | Self::SystemError { .. } => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::GithubError { .. }
            | Self::GenerationError { .. }
            | Self::NetworkError { .. }
            | Self::ParseError { .. }
            | Self::RateLimitExceeded { .. } => ErrorSeverity::Medium,
            Self::ConfigurationError { .. } | Self::ValidationError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::GithubError { operation, status_code, reason } => {
                let mut msg = format!("GitHub error during {}: {}", operation, reason);
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Check the owner/repo values and your GITHUB_TOKEN");
                msg
            }
            Self::RateLimitExceeded { remaining, reset } => {
                let mut msg = format!(
                    "GitHub rate limit exceeded ({} calls remaining)",
                    remaining
                );
                if let Some(reset) = reset {
                    if let Some(at) = chrono::DateTime::from_timestamp(*reset, 0) {
                        msg.push_str(&format!(", resets at {}", at.format("%H:%M:%S UTC")));
                    }
                }
                msg.push_str("\n💡 Provide a GITHUB_TOKEN or try again later");
                msg
            }
            Self::GenerationError { status_code, reason } => {
                let mut msg = String::from("Generation failed");
                if let Some(code) = status_code {
                    msg.push_str(&format!(": {}", code));
                }
                msg.push_str(&format!(" ({})", reason));
                msg.push_str("\n💡 Re-trigger the generation to retry");
                msg
            }
            Self::ParseError { content_type, reason, context } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(ctx) = context {
                    msg.push_str(&format!("\nContext: {}", ctx));
                }
                msg
            }
            Self::NetworkError { operation, url, status_code, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Check your internet connection and try again");
                msg
            }
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = format!(
                    "Validation error for field '{}': value '{}' violates constraint '{}'",
                    field, value, constraint
                );
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for RelnotesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for RelnotesError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for relnotes operations
pub type RelnotesResult<T> = Result<T, RelnotesError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &RelnotesError) {
        let severity = error.severity();

        // Log technical details
        log::error!("[{}] {}", severity.name(), error.technical_details());

        // Print user-friendly message
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

/// Convert from standard library errors
impl From<std::io::Error> for RelnotesError {
    fn from(error: std::io::Error) -> Self {
        RelnotesError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for RelnotesError {
    fn from(error: serde_json::Error) -> Self {
        RelnotesError::parse_error("JSON", &error.to_string(), None)
    }
}

impl From<toml::de::Error> for RelnotesError {
    fn from(error: toml::de::Error) -> Self {
        RelnotesError::parse_error("TOML", error.message(), None)
    }
}

impl From<reqwest::Error> for RelnotesError {
    fn from(error: reqwest::Error) -> Self {
        RelnotesError::NetworkError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}
