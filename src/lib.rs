//! authsift: classify sshd authentication logs into security events.
//!
//! The binary wires the two library crates together:
//!
//! ```text
//! feeds (file/stdin) ──► EventParser ──► filter ──► export (csv/jsonl)
//!                                           │
//!                                           └──► summary
//! ```
//!
//! [`app::run`] is the whole run minus process setup, exposed here so that
//! integration tests can drive it end to end.

pub mod app;
