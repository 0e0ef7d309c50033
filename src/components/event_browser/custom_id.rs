//! Button custom ids that route a press back to its browsing session.

use super::paginator::NavAction;
use uuid::Uuid;

const PREFIX: &str = "ctf";

/// Stable key of one browsing session
pub type SessionId = Uuid;

impl NavAction {
    fn as_str(self) -> &'static str {
        match self {
            NavAction::Previous => "prev",
            NavAction::Next => "next",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prev" => Some(NavAction::Previous),
            "next" => Some(NavAction::Next),
            _ => None,
        }
    }
}

/// Build the custom id for a navigation button: `ctf:{action}:{session}`
pub fn build_custom_id(action: NavAction, session_id: SessionId) -> String {
    format!("{PREFIX}:{}:{}", action.as_str(), session_id.simple())
}

/// Whether a custom id belongs to the event browser at all
pub fn is_browser_custom_id(custom_id: &str) -> bool {
    custom_id.starts_with(&format!("{PREFIX}:"))
}

/// Parse a navigation custom id. Foreign or garbled ids yield `None`.
pub fn parse_custom_id(custom_id: &str) -> Option<(NavAction, SessionId)> {
    let mut parts = custom_id.split(':');

    if parts.next()? != PREFIX {
        return None;
    }

    let action = NavAction::parse(parts.next()?)?;
    let session_id = Uuid::parse_str(parts.next()?).ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some((action, session_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let id = Uuid::new_v4();
        for action in [NavAction::Previous, NavAction::Next] {
            let custom_id = build_custom_id(action, id);
            assert!(is_browser_custom_id(&custom_id));
            assert!(custom_id.len() <= 100, "Discord caps custom ids at 100 chars");
            assert_eq!(parse_custom_id(&custom_id), Some((action, id)));
        }
    }

    #[test]
    fn test_rejects_foreign_ids() {
        let id = Uuid::new_v4().simple().to_string();
        assert_eq!(parse_custom_id(&format!("pg:next:{id}")), None);
        assert_eq!(parse_custom_id(&format!("ctf:jump:{id}")), None);
        assert_eq!(parse_custom_id("ctf:next:not-a-uuid"), None);
        assert_eq!(parse_custom_id(&format!("ctf:next:{id}:extra")), None);
        assert_eq!(parse_custom_id("ctf:next"), None);
        assert_eq!(parse_custom_id(""), None);
        assert!(!is_browser_custom_id("help:next"));
    }
}
