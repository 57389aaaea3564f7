//! # openhours
//!
//! Parser for a compact dialect of the OSM `opening_hours` syntax that answers
//! two questions about a reference instant: which interval boundaries does the
//! schedule produce for the week containing it, and is it inside one of them.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//!
//! // Wednesday 17:30
//! let now = Utc.with_ymd_and_hms(2022, 11, 9, 17, 30, 0).unwrap();
//!
//! let (boundaries, open) = openhours::split("Mo 09:00-14:00 Tu-Fr 00:00-00:00", &now).unwrap();
//! assert_eq!(boundaries.len(), 10);
//! assert!(open);
//!
//! assert!(!openhours::is_open("Mo-Su 11:00-17:00", &now).unwrap());
//! ```
//!
//! ## Layouts
//!
//! ```text
//! schedule    := rule (";" rule)*
//! rule        := daygroup? timegroup+ | daygroup
//! daygroup    := weekday (("," | "-") weekday)*
//! weekday     := "Mo"|"Tu"|"We"|"Th"|"Fr"|"Sa"|"Su"   (case-insensitive)
//! timegroup   := HH ":" MM "-" HH ":" MM | HH ":" MM
//! ```
//!
//! `24/7` means every day, all day. A day group with no times means all day.
//! A closing `00:00` or `24:00` means the end of the day (23:59). Unknown
//! characters are skipped. The only error is `InvalidLayout`: a layout that
//! opens an interval without closing it, or names a time that falls outside
//! chrono's calendar.
//!
//! The reference is open when it lies in `[opening, closing)` for some range
//! on its weekday. Ranges overlap freely: in `Mo-Fr 08:00-20:00; We
//! 10:00-12:00` Wednesday is open from 08:00 to 20:00.
//!
//! ## Modules
//!
//! - [`splitter`] — `Splitter`, `split`, `is_open`
//! - [`emitter`] — `Boundary`, the tagged timestamps a split produces
//! - [`error`] — Error types

mod buffer;
mod classify;
pub mod emitter;
pub mod error;
mod format;
mod matching;
mod scanner;
pub mod splitter;

pub use emitter::Boundary;
pub use error::OpenHoursError;
pub use splitter::{is_open, split, Split, Splitter};
