//! Report: event filtering and aggregate statistics over parsed events.
//!
//! [`EventFilter`] narrows a batch of events by date range and event id.
//! [`Summary`] computes the executive report printed after a run: volumes,
//! analysed period, top event ids and source addresses, attempts on `root`,
//! and a breakdown of the UNKNOWN bucket so gaps in the catalogue stay
//! visible. Empty addresses and accounts are not counted.

use crate::config::ReportConfig;
use crate::types::ParsedEvent;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Length at which UNKNOWN sample messages are cut.
const SAMPLE_WIDTH: usize = 80;
/// Number of top source addresses listed for the UNKNOWN bucket.
const UNKNOWN_TOP_SOURCES: usize = 3;

// ---------------------------------------------------------------------------
// EventFilter
// ---------------------------------------------------------------------------

/// Date-range and event-id filter. An empty filter keeps every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    event_ids: Option<HashSet<String>>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep events on or after `date`.
    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Keep events on or before `date`.
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Keep only these event ids. An empty list keeps none.
    pub fn event_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none() && self.event_ids.is_none()
    }

    /// Events whose timestamp failed to parse are dropped once a date bound
    /// is set.
    pub fn matches(&self, event: &ParsedEvent) -> bool {
        if let Some(ids) = &self.event_ids {
            if !ids.contains(&event.event_id) {
                return false;
            }
        }
        if self.since.is_none() && self.until.is_none() {
            return true;
        }
        let Some(date) = event.timestamp.resolved().map(|ts| ts.date()) else {
            return false;
        };
        self.since.map_or(true, |s| date >= s) && self.until.map_or(true, |u| date <= u)
    }

    pub fn apply(&self, events: Vec<ParsedEvent>) -> Vec<ParsedEvent> {
        if self.is_empty() {
            return events;
        }
        events.into_iter().filter(|e| self.matches(e)).collect()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Breakdown of events classified as UNKNOWN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownSummary {
    pub count: usize,
    pub unique_sources: usize,
    /// First distinct messages, cut to 80 characters.
    pub samples: Vec<String>,
    pub top_sources: Vec<(String, usize)>,
}

/// Aggregate statistics over one batch of events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_events: usize,
    pub first_seen: Option<NaiveDateTime>,
    pub last_seen: Option<NaiveDateTime>,
    pub unique_sources: usize,
    pub unique_accounts: usize,
    pub unique_event_ids: usize,
    pub top_events: Vec<(String, usize)>,
    pub top_sources: Vec<(String, usize)>,
    pub root_attempts: usize,
    pub unknown: UnknownSummary,
}

impl Summary {
    pub fn from_events(events: &[ParsedEvent], opts: &ReportConfig) -> Self {
        let resolved = || events.iter().filter_map(|e| e.timestamp.resolved());
        let unknown: Vec<&ParsedEvent> = events.iter().filter(|e| e.is_unknown()).collect();

        let mut samples: Vec<String> = Vec::new();
        for e in &unknown {
            if samples.len() == opts.unknown_samples {
                break;
            }
            let cut: String = e.raw_message.chars().take(SAMPLE_WIDTH).collect();
            if !samples.contains(&cut) {
                samples.push(cut);
            }
        }

        Self {
            total_events: events.len(),
            first_seen: resolved().min(),
            last_seen: resolved().max(),
            unique_sources: distinct(events.iter().map(|e| e.source_address.as_str())),
            unique_accounts: distinct(events.iter().map(|e| e.account.as_str())),
            unique_event_ids: distinct(events.iter().map(|e| e.event_id.as_str())),
            top_events: top_n(events.iter().map(|e| e.event_id.as_str()), opts.top_events),
            top_sources: top_n(events.iter().map(|e| e.source_address.as_str()), opts.top_sources),
            root_attempts: events.iter().filter(|e| e.account == "root").count(),
            unknown: UnknownSummary {
                count: unknown.len(),
                unique_sources: distinct(unknown.iter().map(|e| e.source_address.as_str())),
                samples,
                top_sources: top_n(
                    unknown.iter().map(|e| e.source_address.as_str()),
                    UNKNOWN_TOP_SOURCES,
                ),
            },
        }
    }

    /// Hours between the first and last resolved timestamp.
    pub fn span_hours(&self) -> f64 {
        match (self.first_seen, self.last_seen) {
            (Some(first), Some(last)) => (last - first).num_seconds() as f64 / 3600.0,
            _ => 0.0,
        }
    }

    pub fn unknown_share(&self) -> f64 {
        if self.total_events == 0 {
            0.0
        } else {
            self.unknown.count as f64 * 100.0 / self.total_events as f64
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.filter(|v| !v.is_empty()).collect::<HashSet<_>>().len()
}

/// Most frequent non-empty values, ties broken by first appearance.
fn top_n<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, v) in values.filter(|v| !v.is_empty()).enumerate() {
        counts.entry(v).or_insert((0, idx)).0 += 1;
    }
    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(n)
        .map(|(v, (count, _))| (v.to_string(), count))
        .collect()
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);

        if self.unknown.count > 0 {
            writeln!(f, "{rule}")?;
            writeln!(f, "UNKNOWN events")?;
            writeln!(f, "{rule}")?;
            writeln!(f, "  total UNKNOWN        : {} ({:.1}%)", self.unknown.count, self.unknown_share())?;
            writeln!(f, "  unique sources       : {}", self.unknown.unique_sources)?;
            writeln!(f, "  sample messages:")?;
            for (i, msg) in self.unknown.samples.iter().enumerate() {
                writeln!(f, "    {}. {msg}...", i + 1)?;
            }
            writeln!(f, "  top sources:")?;
            if self.unknown.top_sources.is_empty() {
                writeln!(f, "    (no source address)")?;
            }
            for (ip, count) in &self.unknown.top_sources {
                writeln!(f, "    {ip}: {count}")?;
            }
        }

        writeln!(f, "{rule}")?;
        writeln!(f, "Summary")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "  events analysed      : {}", self.total_events)?;
        if let (Some(first), Some(last)) = (self.first_seen, self.last_seen) {
            writeln!(f, "  period               : {first} -> {last}")?;
            writeln!(f, "  span                 : {:.2}h", self.span_hours())?;
        }
        writeln!(f, "  unique sources       : {}", self.unique_sources)?;
        writeln!(f, "  unique accounts      : {}", self.unique_accounts)?;
        writeln!(f, "  event types          : {}", self.unique_event_ids)?;
        writeln!(f, "  attempts on root     : {}", self.root_attempts)?;

        writeln!(f, "  top events:")?;
        for (id, count) in &self.top_events {
            writeln!(f, "    {id}: {count}")?;
        }
        if !self.top_sources.is_empty() {
            writeln!(f, "  top sources:")?;
            for (ip, count) in &self.top_sources {
                writeln!(f, "    {ip}: {count}")?;
            }
        }
        write!(f, "{rule}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
