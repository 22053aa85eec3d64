//! Core types for authsift-core.
//!
//! This module defines the data structures shared by every stage of the
//! pipeline: the decoded [`RawLogLine`], the classified [`ParsedEvent`], and
//! its [`EventTimestamp`].

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Event id assigned when no catalogue pattern matches a message.
pub const UNKNOWN_EVENT: &str = "UNKNOWN";

/// Output format for resolved timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One sshd line split into its syslog fields.
///
/// Produced by [`crate::decoder::decode_line`]; the timestamp is kept as text
/// because it carries no year and is resolved later by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLogLine<'a> {
    /// `Mon DD HH:MM:SS`, exactly as it appeared in the line.
    pub timestamp_text: &'a str,
    pub host: &'a str,
    /// `None` when the digits do not fit in a `u64`.
    pub pid: Option<u64>,
    pub message: &'a str,
}

/// Timestamp of a [`ParsedEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTimestamp {
    /// Year-qualified timestamp produced by the reconciler.
    Resolved(NaiveDateTime),
    /// The original timestamp text, kept verbatim when it failed to parse.
    Unparsed(String),
}

impl EventTimestamp {
    pub fn resolved(&self) -> Option<NaiveDateTime> {
        match self {
            EventTimestamp::Resolved(ts) => Some(*ts),
            EventTimestamp::Unparsed(_) => None,
        }
    }
}

impl std::fmt::Display for EventTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventTimestamp::Resolved(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
            EventTimestamp::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for EventTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A classified security event, one per decoded log line.
///
/// Field names serialize to the sink column names, so the CSV header is
/// `Timestamp,EventId,SourceIP,User,Raw_Message` in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEvent {
    #[serde(rename = "Timestamp")]
    pub timestamp: EventTimestamp,
    /// A catalogue id or [`UNKNOWN_EVENT`]; never empty.
    #[serde(rename = "EventId")]
    pub event_id: String,
    /// Empty when the message carries no IPv4 address.
    #[serde(rename = "SourceIP")]
    pub source_address: String,
    /// Empty when the message names no account.
    #[serde(rename = "User")]
    pub account: String,
    #[serde(rename = "Raw_Message")]
    pub raw_message: String,
}

impl ParsedEvent {
    pub fn is_unknown(&self) -> bool {
        self.event_id == UNKNOWN_EVENT
    }
}
