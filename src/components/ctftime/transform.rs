use super::models::{DisplayEvent, RemoteEvent, PLACEHOLDER};
use super::time::format_timestamp;
use crate::error::FetchError;

/// Turn fetched events into display records, keeping their order.
///
/// Absent optional fields become [`PLACEHOLDER`]; a bad timestamp fails the whole batch.
pub fn transform(events: &[RemoteEvent]) -> Result<Vec<DisplayEvent>, FetchError> {
    events.iter().map(to_display).collect()
}

fn to_display(event: &RemoteEvent) -> Result<DisplayEvent, FetchError> {
    Ok(DisplayEvent {
        title: event.title.clone(),
        start: format_timestamp("start", &event.start)?,
        finish: format_timestamp("finish", &event.finish)?,
        url: event.url.clone(),
        format: or_placeholder(event.format.as_deref().filter(|f| !f.trim().is_empty())),
        participants: or_placeholder(event.participants),
        weight: or_placeholder(event.weight.map(format_weight)),
    })
}

fn or_placeholder<T: ToString>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_weight(weight: f64) -> String {
    format!("{:.2}", weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str) -> RemoteEvent {
        RemoteEvent {
            title: title.to_string(),
            start: "2024-07-05T10:00:00+00:00".to_string(),
            finish: "2024-07-07T10:00:00+00:00".to_string(),
            url: format!("https://{}.example", title),
            ..Default::default()
        }
    }

    #[test]
    fn test_order_preserved() {
        let events = vec![event("b"), event("a"), event("c")];
        let display = transform(&events).unwrap();
        let titles: Vec<_> = display.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_optionals_use_placeholder() {
        let display = transform(&[event("plain")]).unwrap();
        assert_eq!(display[0].format, PLACEHOLDER);
        assert_eq!(display[0].participants, PLACEHOLDER);
        assert_eq!(display[0].weight, PLACEHOLDER);
        assert_eq!(display[0].start, "05-07-2024 10:00:00");
        assert_eq!(display[0].finish, "07-07-2024 10:00:00");
    }

    #[test]
    fn test_present_optionals_rendered() {
        let mut full = event("full");
        full.format = Some("Jeopardy".to_string());
        full.participants = Some(412);
        full.weight = Some(24.5);

        let display = transform(&[full]).unwrap();
        assert_eq!(display[0].format, "Jeopardy");
        assert_eq!(display[0].participants, "412");
        assert_eq!(display[0].weight, "24.50");
    }

    #[test]
    fn test_blank_format_is_absent() {
        let mut blank = event("blank");
        blank.format = Some("  ".to_string());
        let display = transform(&[blank]).unwrap();
        assert_eq!(display[0].format, PLACEHOLDER);
    }

    #[test]
    fn test_bad_timestamp_fails_batch() {
        let mut broken = event("broken");
        broken.finish = "soon".to_string();

        let result = transform(&[event("ok"), broken]);
        assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(transform(&[]).unwrap().is_empty());
    }
}
