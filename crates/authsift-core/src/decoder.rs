//! Line decoder: splits one sshd syslog line into its fields.
//!
//! Grammar: `<Mon DD HH:MM:SS> <host> sshd[<pid>]: <message>`. Anything else
//! (blank lines, other daemons, truncated records) is not a log line and is
//! skipped by the caller without producing an event.

use crate::types::RawLogLine;
use regex::Regex;
use std::sync::LazyLock;

static LINE_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+\s+\d+\s+\d+:\d+:\d+)\s+(\S+)\s+sshd\[(\d+)\]:\s+(.*)$").expect("regex")
});

/// Decode `line`, or `None` if it does not follow the sshd line grammar.
pub fn decode_line(line: &str) -> Option<RawLogLine<'_>> {
    let caps = LINE_GRAMMAR.captures(line)?;
    let pid = caps.get(3)?.as_str().parse().ok();
    Some(RawLogLine {
        timestamp_text: caps.get(1)?.as_str(),
        host: caps.get(2)?.as_str(),
        pid,
        message: caps.get(4)?.as_str(),
    })
}
