//! authsift-core: sshd log classification core.
//!
//! Turns raw sshd syslog lines into [`ParsedEvent`] records. The pipeline for
//! one line is:
//!
//! ```text
//! decoder ──► reconciler ──► classifier ──► extractors ──► ParsedEvent
//!                 ▲   │
//!                 └───┘ ReconciliationState (one per stream)
//! ```
//!
//! Everything except the reconciliation state is immutable after start-up,
//! so a single [`EventParser`] can serve several streams as long as each owns
//! its own state. Sinks ([`export`]) and reporting ([`report`]) consume the
//! resulting events.

pub mod catalogue;
pub mod classifier;
pub mod config;
pub mod decoder;
pub mod export;
pub mod extract;
pub mod parser;
pub mod reconcile;
pub mod report;
pub mod types;

pub use catalogue::{Catalogue, CatalogueError, EventPattern};
pub use classifier::classify;
pub use parser::EventParser;
pub use reconcile::{InvalidThreshold, Reconciler, ReconciliationState};
pub use types::{EventTimestamp, ParsedEvent, RawLogLine, UNKNOWN_EVENT};
