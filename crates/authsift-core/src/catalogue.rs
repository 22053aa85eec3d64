//! Event catalogue: the ordered table of sshd message signatures.
//!
//! The catalogue is an explicit ordered list, not a map: several entries
//! overlap (`E8` and `E40` are identical, `E42` is a superset of every other
//! "Too many authentication failures" entry) and the order in which they are
//! consulted decides which id wins. See [`crate::classifier`] for the lookup
//! order.
//!
//! All patterns are compiled case-insensitive. Entries that need a negative
//! look-ahead carry a second `exclude` pattern instead, since `regex` has no
//! look-around: such an entry matches when `pattern` matches and `exclude`
//! does not.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

/// Static definition of one catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct PatternDef {
    pub id: &'static str,
    pub pattern: &'static str,
    pub exclude: Option<&'static str>,
}

pub(crate) const fn def(id: &'static str, pattern: &'static str) -> PatternDef {
    PatternDef { id, pattern, exclude: None }
}

const fn def_excluding(id: &'static str, pattern: &'static str, exclude: &'static str) -> PatternDef {
    PatternDef { id, pattern, exclude: Some(exclude) }
}

/// The built-in catalogue, in declaration order.
pub const BUILTIN_PATTERNS: &[PatternDef] = &[
    def("E1", r"Accepted password for .+ from .+ port .+ ssh2"),
    def("E2", r"Connection closed by .+ \[preauth\]"),
    def("E3", r"Did not receive identification string from"),
    def("E4", r"Disconnecting: Too many authentication failures for admin"),
    def("E5", r"Disconnecting: Too many authentication failures for root"),
    def("E6", r"error: Received disconnect from .+: .+: com\.jcraft\.jsch\.JSchException: Auth fail"),
    def("E7", r"error: Received disconnect from .+: .+: No more user authentication methods available"),
    def("E8", r"Failed none for invalid user .+ from .+ port .+ ssh2"),
    def_excluding(
        "E9",
        r"Failed password for .+ from .+ port .+ ssh2",
        r"Failed password for invalid user",
    ),
    def("E10", r"Failed password for invalid user .+ from .+ port .+ ssh2"),
    def("E11", r"fatal: Write failed: Connection reset by peer"),
    def("E12", r"input_?userauth_?request: invalid user .+ \[preauth\]"),
    def("E13", r"Invalid user .+ from \d+\.\d+\.\d+\.\d+"),
    def("E14", r"message repeated .+ times: \[ Failed password for root"),
    def("E15", r"PAM \d+ more authentication failure;"),
    def("E16", r"PAM \d+ more authentication failures;"),
    def("E17", r"PAM \d+ more authentication failures;.*user=root"),
    def("E18", r"PAM service\(sshd\) ignoring max retries"),
    def_excluding(
        "E19",
        r"pam_unix\(sshd:auth\): authentication failure;",
        r"pam_unix\(sshd:auth\): authentication failure;.*user=",
    ),
    def("E20", r"pam_unix\(sshd:auth\): authentication failure;.*user="),
    def("E21", r"pam_unix\(sshd:auth\): check pass; user unknown"),
    def("E22", r"pam_unix\(sshd:session\): session closed for user"),
    def("E23", r"pam_unix\(sshd:session\): session opened for user"),
    def("E24", r"Received disconnect from .+: \d+: Bye Bye \[preauth\]"),
    def("E25", r"Received disconnect from .+: \d+: Closed due to user request"),
    def("E26", r"Received disconnect from .+: \d+: disconnected by user"),
    def("E27", r"reverse mapping checking getaddrinfo for .+ \[.+\] failed - POSSIBLE BREAK-IN ATTEMPT!"),
    def("E28", r"fatal: Read from socket failed: Connection reset by peer"),
    def("E29", r"error: Received disconnect from .+: 13: User request"),
    def("E30", r"Disconnecting: Too many authentication failures for support \[preauth\]"),
    def("E31", r"Disconnecting: Too many authentication failures for pi \[preauth\]"),
    def("E32", r"Bad packet length \d+"),
    def("E33", r"Disconnecting: Packet corrupt"),
    def("E34", r"Address .+ maps to .+, but this does not map back to the address - POSSIBLE"),
    def("E35", r"Received disconnect from .+: 11:"),
    def("E36", r"Disconnecting: Too many authentication failures for user"),
    def("E37", r"fatal: no hostkey alg \[preauth\]"),
    def("E38", r"Bad protocol version identification .+ from .+ port"),
    def("E39", r"Invalid user .+ from \d+\.\d+\.\d+\.\d+ port"),
    def("E40", r"Failed none for invalid user .+ from .+ port .+ ssh2"),
    def("E41", r"Disconnecting: Too many authentication failures for supervisor"),
    def("E42", r"Disconnecting: Too many authentication failures for \w+"),
    def("E43", r"error: Received disconnect from .+: 3: java\.net\.SocketTimeoutException"),
    def("E44", r"error: Received disconnect from .+: 3: com\.jcraft\.jsch\.JSchException: timeout"),
    def("E45", r"Failed none for invalid user\s+from \d+\.\d+\.\d+\.\d+ port \d+ ssh2"),
    def("E46", r"Invalid user\s+from \d+\.\d+\.\d+\.\d+"),
    def("E47", r"input_userauth_request:\s+invalid user\s+\[preauth\]"),
    def("E48", r"error: connect_to .+ port \d+: failed"),
    def("E49", r"Corrupted MAC on input\. \[preauth\]"),
    def("E50", r"error: Received disconnect from .+: 3: org\.vngx\.jsch\.userauth\.AuthCancelException"),
    def("E51", r"Server listening on .+ port \d+"),
    def("E52", r"error: Received disconnect from .+: 13: Authentication cancelled"),
    def("E53", r"error: Received disconnect from .+: 3: com\.jcraft\.jsch\.JSchException: reject"),
    def("E54", r"error: Received disconnect from .+: 3: com\.jcraft\.jsch\.JSchException: Auth cancel"),
    def("E55", r"syslogin_perform_logout:"),
];

/// Ids consulted before the rest of the catalogue, most specific first.
///
/// Rare signatures come ahead of generic ones that would otherwise absorb
/// them: `E10` before `E9`, `E20` before `E19`, `E17` before `E16` before `E15`.
pub const PRIORITY_LIST: &[&str] = &[
    "E27", "E10", "E9", "E13", "E20", "E19", "E17", "E16", "E15", "E7", "E6", "E5", "E4", "E24",
    "E25", "E26", "E12", "E1", "E21",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("invalid pattern for {id}: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate catalogue id: {0}")]
    DuplicateId(String),
}

// ---------------------------------------------------------------------------
// EventPattern
// ---------------------------------------------------------------------------

/// A compiled catalogue entry.
#[derive(Debug, Clone)]
pub struct EventPattern {
    id: String,
    matcher: Regex,
    exclude: Option<Regex>,
}

impl EventPattern {
    pub fn new(id: impl Into<String>, pattern: &str) -> Result<Self, CatalogueError> {
        let id = id.into();
        let matcher = compile(&id, pattern)?;
        Ok(Self { id, matcher, exclude: None })
    }

    pub fn with_exclusion(mut self, exclude: &str) -> Result<Self, CatalogueError> {
        self.exclude = Some(compile(&self.id, exclude)?);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_match(&self, message: &str) -> bool {
        self.matcher.is_match(message)
            && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(message))
    }
}

fn compile(id: &str, pattern: &str) -> Result<Regex, CatalogueError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| CatalogueError::InvalidPattern { id: id.to_string(), source })
}

/// A site-specific pattern appended after the built-in entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtraPattern {
    pub id: String,
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// The compiled, ordered catalogue plus its resolved lookup order.
///
/// Built once at start-up and never mutated afterwards; share it by reference
/// (or `Arc`) between independent streams.
#[derive(Debug, Clone)]
pub struct Catalogue {
    patterns: Vec<EventPattern>,
    /// Indices into `patterns`, priority ids first, in [`PRIORITY_LIST`] order.
    priority: Vec<usize>,
    /// Indices of every other entry, in declaration order.
    fallback: Vec<usize>,
}

impl Catalogue {
    /// The built-in catalogue with the built-in priority list.
    pub fn builtin() -> Self {
        Self::build(BUILTIN_PATTERNS, PRIORITY_LIST, &[])
            .expect("built-in catalogue must compile")
    }

    /// The built-in catalogue with `extra` entries appended after it.
    pub fn with_extra(extra: &[ExtraPattern]) -> Result<Self, CatalogueError> {
        Self::build(BUILTIN_PATTERNS, PRIORITY_LIST, extra)
    }

    /// Compile `defs` followed by `extra`. Priority ids absent from the
    /// catalogue are ignored.
    pub fn build(
        defs: &[PatternDef],
        priority: &[&str],
        extra: &[ExtraPattern],
    ) -> Result<Self, CatalogueError> {
        let mut patterns = Vec::with_capacity(defs.len() + extra.len());
        let mut seen = HashSet::new();

        for d in defs {
            let mut p = EventPattern::new(d.id, d.pattern)?;
            if let Some(ex) = d.exclude {
                p = p.with_exclusion(ex)?;
            }
            patterns.push(p);
        }
        for e in extra {
            patterns.push(EventPattern::new(e.id.clone(), &e.pattern)?);
        }
        for p in &patterns {
            if !seen.insert(p.id.clone()) {
                return Err(CatalogueError::DuplicateId(p.id.clone()));
            }
        }

        let priority: Vec<usize> = priority
            .iter()
            .filter_map(|id| patterns.iter().position(|p| p.id == *id))
            .collect();
        let fallback = (0..patterns.len()).filter(|i| !priority.contains(i)).collect();

        Ok(Self { patterns, priority, fallback })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EventPattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventPattern> {
        self.patterns.iter()
    }

    /// Entries in lookup order: priority entries, then the rest in
    /// declaration order.
    pub fn lookup_order(&self) -> impl Iterator<Item = &EventPattern> {
        self.priority
            .iter()
            .chain(self.fallback.iter())
            .map(|&i| &self.patterns[i])
    }

    pub fn priority_ids(&self) -> impl Iterator<Item = &str> {
        self.priority.iter().map(|&i| self.patterns[i].id.as_str())
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
