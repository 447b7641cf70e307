use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Keyword error: {0}")]
    Keyword(#[from] KeywordError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("{provider} returned HTTP {status}: {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response format from {provider}: {details}")]
    InvalidResponseFormat { provider: String, details: String },
}

#[derive(Error, Debug)]
pub enum KeywordError {
    #[error("AI response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("AI response has an unexpected shape: {details}")]
    UnexpectedShape { details: String },

    #[error("AI produced no usable keywords")]
    NoKeywords,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No API key configured (checked {checked})")]
    NoApiKey { checked: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
