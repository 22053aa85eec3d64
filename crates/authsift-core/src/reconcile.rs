//! Temporal reconciler: turns year-less syslog timestamps into absolute ones.
//!
//! sshd writes `Mon DD HH:MM:SS` with no year. The reconciler carries a
//! single rolling value, the previously resolved timestamp, and uses it to
//! pick the year for the next line:
//!
//! - **First line** (no previous timestamp): the current calendar year, or
//!   the year before if the log month is later than the current month.
//! - **Later lines**: the year of the previous timestamp.
//! - **Roll-over**: if the candidate lands more than the roll-over threshold
//!   (300 days by default) *before* the previous timestamp, it is a
//!   December → January wrap and the candidate moves to `year + 1`.
//!
//! A timestamp that fails to parse comes back as
//! [`EventTimestamp::Unparsed`] and leaves the state untouched, so one bad
//! line cannot shift the year of the lines after it.

use crate::types::EventTimestamp;
use chrono::{Datelike, Local, Month, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use thiserror::Error;

pub const DEFAULT_ROLLOVER_THRESHOLD_DAYS: i64 = 300;

const SYSLOG_FORMAT: &str = "%b %d %H:%M:%S %Y";

/// A roll-over threshold that is not a positive, representable day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rollover threshold must be a positive number of days, got {0}")]
pub struct InvalidThreshold(pub i64);

/// The previously resolved timestamp of one log stream.
///
/// Owned by the loop that processes that stream; independent streams each
/// need their own instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconciliationState {
    previous: Option<NaiveDateTime>,
}

impl ReconciliationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state that continues from an already resolved timestamp.
    pub fn resuming_from(previous: NaiveDateTime) -> Self {
        Self { previous: Some(previous) }
    }

    pub fn previous(&self) -> Option<NaiveDateTime> {
        self.previous
    }
}

/// Year-resolution rules, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciler {
    today: NaiveDate,
    rollover_threshold: TimeDelta,
}

impl Reconciler {
    /// A reconciler that treats `today` as the invocation date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            rollover_threshold: TimeDelta::days(DEFAULT_ROLLOVER_THRESHOLD_DAYS),
        }
    }

    /// A reconciler anchored on the local calendar date.
    pub fn from_clock() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_rollover_threshold_days(mut self, days: i64) -> Result<Self, InvalidThreshold> {
        if days <= 0 {
            return Err(InvalidThreshold(days));
        }
        self.rollover_threshold = TimeDelta::try_days(days).ok_or(InvalidThreshold(days))?;
        Ok(self)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve `text` against `state`, advancing the state on success.
    pub fn resolve(&self, text: &str, state: &mut ReconciliationState) -> EventTimestamp {
        match self.try_resolve(text, state.previous) {
            Some(ts) => {
                state.previous = Some(ts);
                EventTimestamp::Resolved(ts)
            }
            None => {
                tracing::trace!(timestamp = text, "unparseable timestamp; state unchanged");
                EventTimestamp::Unparsed(text.to_string())
            }
        }
    }

    fn try_resolve(&self, text: &str, previous: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
        // Syslog pads single-digit days with a second space.
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let month: Month = normalized.split(' ').next()?.parse().ok()?;

        let year = match previous {
            Some(prev) => prev.year(),
            None if month.number_from_month() > self.today.month() => self.today.year() - 1,
            None => self.today.year(),
        };

        let candidate =
            NaiveDateTime::parse_from_str(&format!("{normalized} {year}"), SYSLOG_FORMAT).ok()?;
        // chrono reads second 60 as a leap second; syslog never writes one.
        if candidate.nanosecond() >= 1_000_000_000 {
            return None;
        }

        match previous {
            Some(prev) if candidate - prev < -self.rollover_threshold => {
                let rolled = candidate.with_year(year + 1)?;
                tracing::debug!(
                    from = %prev,
                    to = %rolled,
                    "year roll-over detected"
                );
                Some(rolled)
            }
            _ => Some(candidate),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
