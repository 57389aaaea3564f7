//! Entry points: [`Splitter`] and the one-shot [`split`] / [`is_open`]
//! helpers.
//!
//! A `Splitter` is bound to one reference instant and owns all parsing
//! scratch space, so repeated calls do not allocate once the output buffer
//! has grown to fit. Every call starts from a reset.

use chrono::{DateTime, TimeZone};

use crate::classify;
use crate::emitter::{Boundary, Emitter};
use crate::error::{OpenHoursError, Result};
use crate::matching;
use crate::scanner::Scanner;

const FULL_WEEK: &str = "Mo-Su 00:00-23:59";
const FULL_DAY: &str = " 00:00-23:59";

/// A layout after shorthand expansion, as the scanner will see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Normalized<'a> {
    body: &'a str,
    suffix: &'static str,
}

impl<'a> Normalized<'a> {
    fn new(layout: &'a str) -> Self {
        let body = layout.trim_end();
        if body.is_empty() {
            return Self { body, suffix: "" };
        }
        if body == "24/7" {
            log::debug!("expanding 24/7 to {FULL_WEEK:?}");
            return Self {
                body: FULL_WEEK,
                suffix: "",
            };
        }
        if !body.contains(':') || classify::ends_with_weekday(body) {
            log::debug!("no trailing time range in {body:?}, assuming full day");
            return Self {
                body,
                suffix: FULL_DAY,
            };
        }
        Self { body, suffix: "" }
    }

    fn chars(&self) -> impl Iterator<Item = char> + 'a {
        self.body.chars().chain(self.suffix.chars())
    }
}

/// Parses opening-hours layouts against a fixed reference instant.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use openhours::Splitter;
///
/// // Wednesday 17:30
/// let now = Utc.with_ymd_and_hms(2022, 11, 9, 17, 30, 0).unwrap();
/// let mut splitter = Splitter::new(now);
///
/// let week = splitter.split("Mo-Fr 08:00-21:00; Sa 08:30-20:00").unwrap();
/// assert_eq!(week.boundaries().len(), 12);
/// assert!(week.is_open());
///
/// assert!(!splitter.matches("Mo-Su 11:00-17:00").unwrap());
/// ```
///
/// The splitter is mutable scratch state: calls take `&mut self`, so sharing
/// one across threads needs a lock around it.
#[derive(Debug, Clone)]
pub struct Splitter<Tz: TimeZone> {
    reference: DateTime<Tz>,
    scanner: Scanner,
    emitter: Emitter<Tz>,
}

impl<Tz: TimeZone> Splitter<Tz> {
    pub fn new(reference: DateTime<Tz>) -> Self {
        Self {
            emitter: Emitter::new(&reference),
            scanner: Scanner::default(),
            reference,
        }
    }

    pub fn reference(&self) -> &DateTime<Tz> {
        &self.reference
    }

    /// Parse `layout` into the sorted boundaries of the reference week and
    /// decide whether the reference instant is open.
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidLayout` if the layout opens an
    /// interval it never closes (an odd number of boundaries), or names a
    /// time that cannot be placed on the calendar.
    pub fn split(&mut self, layout: &str) -> Result<Split<'_, Tz>> {
        self.parse(layout)?;
        let matched = matching::locate(self.emitter.boundaries(), &self.reference)
            .map(|i| self.emitter.boundaries()[i].clone());

        self.emitter.sort();
        let boundaries = self.emitter.boundaries();
        let match_index = matched.and_then(|m| {
            boundaries
                .iter()
                .position(|b| b.closing && b.weekday == m.weekday && b.at == m.at)
        });
        Ok(Split {
            boundaries,
            match_index,
        })
    }

    /// Decide whether the reference instant is open under `layout`.
    ///
    /// Always agrees with `split(layout)?.is_open()`, but skips sorting.
    ///
    /// # Errors
    /// Same as [`Splitter::split`].
    pub fn matches(&mut self, layout: &str) -> Result<bool> {
        self.parse(layout)?;
        Ok(matching::locate(self.emitter.boundaries(), &self.reference).is_some())
    }

    fn parse(&mut self, layout: &str) -> Result<()> {
        self.scanner.reset();
        self.emitter.reset();

        let normalized = Normalized::new(layout);
        if self
            .scanner
            .scan(normalized.chars(), &mut self.emitter)
            .is_err()
        {
            log::debug!("{layout:?} has a time outside the representable range");
            return Err(OpenHoursError::InvalidLayout(layout.to_string()));
        }

        let count = self.emitter.boundaries().len();
        log::debug!("{layout:?} produced {count} boundaries");
        if count % 2 != 0 {
            return Err(OpenHoursError::InvalidLayout(layout.to_string()));
        }
        Ok(())
    }
}

/// The boundaries of one week, borrowed from the [`Splitter`] that produced
/// them, plus the open/closed verdict.
///
/// `Display` renders one line per calendar day, e.g. `Wed, 09 Nov
/// 08:00-12:00 14:00*18:00`, where `*` marks the interval that contains the
/// reference instant.
#[derive(Debug)]
pub struct Split<'a, Tz: TimeZone> {
    pub(crate) boundaries: &'a [Boundary<Tz>],
    pub(crate) match_index: Option<usize>,
}

impl<'a, Tz: TimeZone> Split<'a, Tz> {
    /// All boundaries, sorted ascending by instant.
    pub fn boundaries(&self) -> &'a [Boundary<Tz>] {
        self.boundaries
    }

    /// Whether the reference instant falls inside an open interval.
    pub fn is_open(&self) -> bool {
        self.match_index.is_some()
    }

    /// Position in [`Split::boundaries`] of the closing boundary of the
    /// interval containing the reference instant.
    pub fn match_index(&self) -> Option<usize> {
        self.match_index
    }
}

/// Parse `layout` for the week containing `reference`. Returns the sorted
/// boundaries and whether `reference` is open.
///
/// Allocates a fresh [`Splitter`]; keep one around when evaluating many
/// layouts against the same instant.
///
/// # Errors
/// Returns `OpenHoursError::InvalidLayout` if the layout produces an odd
/// number of boundaries.
pub fn split<Tz: TimeZone>(
    layout: &str,
    reference: &DateTime<Tz>,
) -> Result<(Vec<Boundary<Tz>>, bool)> {
    let mut splitter = Splitter::new(reference.clone());
    let split = splitter.split(layout)?;
    Ok((split.boundaries().to_vec(), split.is_open()))
}

/// Whether `reference` is open under `layout`.
///
/// # Errors
/// Same as [`split`].
pub fn is_open<Tz: TimeZone>(layout: &str, reference: &DateTime<Tz>) -> Result<bool> {
    Splitter::new(reference.clone()).matches(layout)
}
