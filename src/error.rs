use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Discord API error: {0}")]
    #[diagnostic(code(ctfbot::discord_api))]
    DiscordApi(#[from] serenity::Error),

    #[error("Environment error: {0}")]
    #[diagnostic(code(ctfbot::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(ctfbot::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(ctfbot::fetch))]
    Fetch(#[from] FetchError),

    #[error("Component error: {0}")]
    #[diagnostic(code(ctfbot::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(ctfbot::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(ctfbot::other))]
    Other(String),
}

/// Failure kinds of a single CTFtime fetch.
///
/// Both are terminal for the call that produced them; nothing retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure or a status outside the success range
    #[error("CTFtime request failed: {0}")]
    Network(String),

    /// The body (or a field inside it) did not have the expected shape
    #[error("CTFtime returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::MalformedResponse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BotResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}
