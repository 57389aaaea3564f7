//! Open/closed determination for a reference instant.
//!
//! Boundaries on the reference weekday are paired in emission order: each
//! closing boundary pairs with the most recent unpaired opening before it.
//! The reference is open iff some pair satisfies `opening <= reference <
//! closing`. Pairing follows the layout rather than the clock, so nested
//! ranges (`Mo-Fr 08:00-20:00; We 10:00-12:00`) keep the outer range open,
//! and an instant between two disjoint ranges of one day stays closed.
//!
//! A closing boundary with nothing to pair with opens a range instead. Only
//! degenerate layouts such as `Tu-Mo 10:00-12:00`, where every boundary is
//! tagged closing, produce those.
//!
//! Emission order is lost once the boundaries are sorted, so callers locate
//! the match on the unsorted output.

use chrono::{DateTime, Datelike, TimeZone};

use crate::emitter::Boundary;

/// Index into `boundaries` (in emission order) of the closing boundary that
/// makes `reference` open, if any. When several ranges contain the
/// reference, the one that closes first wins.
pub(crate) fn locate<Tz: TimeZone>(
    boundaries: &[Boundary<Tz>],
    reference: &DateTime<Tz>,
) -> Option<usize> {
    let weekday = reference.weekday();
    let mut openings: Vec<&DateTime<Tz>> = Vec::new();
    let mut found: Option<usize> = None;

    for (index, boundary) in boundaries.iter().enumerate() {
        if boundary.weekday != weekday {
            continue;
        }
        if !boundary.closing {
            openings.push(&boundary.at);
            continue;
        }
        let Some(opening) = openings.pop() else {
            openings.push(&boundary.at);
            continue;
        };
        if opening <= reference && reference < &boundary.at {
            found = match found {
                Some(best) if boundaries[best].at <= boundary.at => Some(best),
                _ => Some(index),
            };
        }
    }
    found
}
