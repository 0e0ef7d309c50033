use serde::Deserialize;

/// Literal shown for optional fields the API left out
pub const PLACEHOLDER: &str = "N/A";

/// One event as returned by the CTFtime API.
///
/// Only the fields the bot shows are kept; anything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct RemoteEvent {
    pub title: String,
    pub start: String,
    pub finish: String,
    pub url: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub participants: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Render-ready counterpart of a [`RemoteEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEvent {
    pub title: String,
    /// `DD-MM-YYYY HH:MM:SS` in the event's own offset
    pub start: String,
    pub finish: String,
    pub url: String,
    pub format: String,
    pub participants: String,
    pub weight: String,
}
