//! Event classifier: maps a message to exactly one event id.
//!
//! Lookup order is fixed by the [`Catalogue`]: the priority list first, then
//! every remaining entry in declaration order. The first matching entry wins,
//! so overlapping entries later in the order are shadowed. A message that
//! matches nothing is classified as [`UNKNOWN_EVENT`].

use crate::catalogue::Catalogue;
use crate::types::UNKNOWN_EVENT;

/// Classify `message` against `catalogue`.
///
/// Pure: the result depends only on the catalogue and the message.
pub fn classify<'c>(catalogue: &'c Catalogue, message: &str) -> &'c str {
    catalogue
        .lookup_order()
        .find(|p| p.is_match(message))
        .map_or(UNKNOWN_EVENT, |p| p.id())
}
