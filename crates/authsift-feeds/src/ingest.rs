//! Ingestion loop: reader in, parsed events and an ingest report out.
//!
//! Lines are read as bytes and converted lossily, so a stray non-UTF-8 byte
//! degrades one message instead of aborting the run. Blank lines are not
//! counted; every other line either yields an event or is counted as skipped.

use crate::{FeedError, LineFeed};
use authsift_core::{EventParser, EventTimestamp, ParsedEvent, ReconciliationState};
use std::io::BufRead;

/// Per-feed counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub source: String,
    /// Non-empty lines read.
    pub total_lines: usize,
    /// Lines that produced an event.
    pub parsed: usize,
    /// Lines that did not follow the sshd line grammar.
    pub skipped: usize,
    /// Events whose timestamp was kept as raw text.
    pub unparsed_timestamps: usize,
}

impl IngestReport {
    /// Share of non-empty lines that produced an event, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            self.parsed as f64 * 100.0 / self.total_lines as f64
        }
    }

    /// Add another feed's counters to this one.
    pub fn absorb(&mut self, other: &IngestReport) {
        self.total_lines += other.total_lines;
        self.parsed += other.parsed;
        self.skipped += other.skipped;
        self.unparsed_timestamps += other.unparsed_timestamps;
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestOutput {
    pub events: Vec<ParsedEvent>,
    pub report: IngestReport,
}

/// Run every line of `reader` through `parser` with a fresh state.
///
/// Logs progress every `progress_interval` lines (0 disables it).
pub fn ingest<R: BufRead>(
    name: &str,
    mut reader: R,
    parser: &EventParser,
    progress_interval: usize,
) -> Result<IngestOutput, FeedError> {
    let mut state = ReconciliationState::new();
    let mut out = IngestOutput {
        events: Vec::new(),
        report: IngestReport { source: name.to_string(), ..Default::default() },
    };
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| FeedError::Read { name: name.to_string(), source })?;
        if n == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim();
        if line.is_empty() {
            continue;
        }

        out.report.total_lines += 1;
        match parser.parse_line(line, &mut state) {
            Some(event) => {
                if matches!(event.timestamp, EventTimestamp::Unparsed(_)) {
                    out.report.unparsed_timestamps += 1;
                }
                out.report.parsed += 1;
                out.events.push(event);
            }
            None => out.report.skipped += 1,
        }

        if progress_interval > 0 && out.report.total_lines % progress_interval == 0 {
            tracing::info!(source = name, lines = out.report.total_lines, "processing");
        }
    }

    tracing::info!(
        source = name,
        lines = out.report.total_lines,
        parsed = out.report.parsed,
        skipped = out.report.skipped,
        unparsed_timestamps = out.report.unparsed_timestamps,
        "feed complete"
    );
    Ok(out)
}

/// Ingest several feeds concurrently, one blocking task and one
/// reconciliation state per feed. Results come back in `feeds` order.
pub async fn ingest_all(
    feeds: Vec<Box<dyn LineFeed>>,
    parser: EventParser,
    progress_interval: usize,
) -> Result<Vec<IngestOutput>, FeedError> {
    let handles: Vec<_> = feeds
        .into_iter()
        .map(|feed| {
            let parser = parser.clone();
            let name = feed.name().to_string();
            let handle = tokio::task::spawn_blocking(move || {
                let reader = feed.open()?;
                ingest(feed.name(), reader, &parser, progress_interval)
            });
            (name, handle)
        })
        .collect();

    let mut outputs = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let output = handle.await.map_err(|err| {
            tracing::error!(source = %name, error = %err, "ingest task failed");
            FeedError::TaskFailed(name)
        })??;
        outputs.push(output);
    }
    Ok(outputs)
}
