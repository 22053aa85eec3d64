//! Event parser: one raw line in, at most one [`ParsedEvent`] out.
//!
//! Composes the decoder, reconciler, classifier and extractors. The rolling
//! [`ReconciliationState`] is passed in by the caller on every call, so one
//! parser can serve any number of independent streams.

use crate::catalogue::Catalogue;
use crate::classifier::classify;
use crate::decoder::decode_line;
use crate::extract::{extract_account, extract_address};
use crate::reconcile::{Reconciler, ReconciliationState};
use crate::types::ParsedEvent;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EventParser {
    catalogue: Arc<Catalogue>,
    reconciler: Reconciler,
}

impl EventParser {
    pub fn new(catalogue: Arc<Catalogue>, reconciler: Reconciler) -> Self {
        Self { catalogue, reconciler }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Parse one trimmed line.
    ///
    /// Returns `None`, leaving `state` untouched, when the line does not
    /// follow the sshd line grammar.
    pub fn parse_line(&self, line: &str, state: &mut ReconciliationState) -> Option<ParsedEvent> {
        let Some(raw) = decode_line(line) else {
            tracing::trace!(line, "not an sshd line; skipped");
            return None;
        };

        let timestamp = self.reconciler.resolve(raw.timestamp_text, state);
        let message = raw.message.trim();

        Some(ParsedEvent {
            timestamp,
            event_id: classify(&self.catalogue, message).to_string(),
            source_address: extract_address(message).to_string(),
            account: extract_account(message).to_string(),
            raw_message: message.to_string(),
        })
    }

    /// Parse every line of one stream with a fresh state, dropping lines that
    /// are not sshd records.
    pub fn parse_stream<'a, I>(&'a self, lines: I) -> impl Iterator<Item = ParsedEvent> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        let mut state = ReconciliationState::new();
        lines
            .into_iter()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(move |l| self.parse_line(l, &mut state))
    }
}
