//! Domain-specific assertion macros for authsift harnesses.

/// Assert the id, source address and account of one event.
///
/// ```rust
/// assert_event!(event, "E9", "10.0.0.5", "root");
/// ```
#[macro_export]
macro_rules! assert_event {
    ($event:expr, $id:expr, $addr:expr, $account:expr) => {{
        let event: &authsift_core::ParsedEvent = &$event;
        pretty_assertions::assert_eq!(
            (event.event_id.as_str(), event.source_address.as_str(), event.account.as_str()),
            ($id, $addr, $account),
            "for message {:?}",
            event.raw_message
        );
    }};
}

/// Render every event's timestamp as text, in order.
pub fn stamps(events: &[authsift_core::ParsedEvent]) -> Vec<String> {
    events.iter().map(|e| e.timestamp.to_string()).collect()
}
