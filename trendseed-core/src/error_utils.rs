use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            CoreError::Llm(e) => {
                error!("LLM error details: {:?}", e);
            }
            CoreError::Keyword(e) => {
                error!("Keyword error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Llm(e) => e.user_friendly_message(),
            CoreError::Keyword(e) => e.user_friendly_message(),
            CoreError::Io(_) => {
                "Could not write the keyword file. Please check the output path.".to_string()
            }
            CoreError::Serialization(_) => {
                "Could not serialize the keyword result.".to_string()
            }
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Llm(_) => "LLM".to_string(),
            CoreError::Keyword(_) => "KEYWORD".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
        }
    }
}

impl ErrorExt for LlmError {
    fn log_error(&self) -> &Self {
        error!("LlmError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("LlmError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            LlmError::HttpStatus {
                provider, status, ..
            } => match *status {
                401 | 403 => format!(
                    "{} rejected the API key. Please update your credentials.",
                    provider
                ),
                429 => format!("Rate limit exceeded for {}. Please try again later.", provider),
                s if s >= 500 => format!(
                    "{} service is temporarily unavailable. Please try again later.",
                    provider
                ),
                _ => format!("{} rejected the request (HTTP {}).", provider, status),
            },
            LlmError::InvalidResponseFormat { provider, .. } => {
                format!("{} returned a response that could not be read.", provider)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            LlmError::HttpStatus { .. } => "LLM_HTTP_STATUS".to_string(),
            LlmError::InvalidResponseFormat { .. } => "LLM_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for KeywordError {
    fn log_error(&self) -> &Self {
        error!("KeywordError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("KeywordError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            KeywordError::InvalidJson(_) | KeywordError::UnexpectedShape { .. } => {
                "The AI answer was not the expected JSON object.".to_string()
            }
            KeywordError::NoKeywords => "The AI did not return any keywords.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            KeywordError::InvalidJson(_) => "KEYWORD_INVALID_JSON".to_string(),
            KeywordError::UnexpectedShape { .. } => "KEYWORD_UNEXPECTED_SHAPE".to_string(),
            KeywordError::NoKeywords => "KEYWORD_EMPTY".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::NoApiKey { checked } => format!(
                "No API key found. Set one of these environment variables: {}.",
                checked
            ),
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::NoApiKey { .. } => "CONFIG_NO_API_KEY".to_string(),
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

/// Logs errors with their code and user-facing message.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_error(&self, error: &CoreError) {
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!("User message: {}", error.user_friendly_message());
    }

    /// For failures that do not change the outcome of the run.
    pub fn report_warning(&self, error: &CoreError) {
        error.log_warn();
        info!("Error code: {}", error.error_code());
    }
}
