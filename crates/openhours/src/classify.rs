//! Character classification for the layout scanner.
//!
//! Stateless: every decision depends on the character alone, except weekday
//! tokens, which need the following character as well (see [`weekday`]).

use chrono::Weekday;

/// What a single layout character means to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// An ASCII digit, carrying its numeric value.
    Digit(u8),
    /// Any alphabetic character; the first half of a possible weekday token.
    Letter,
    /// The range indicator `-`.
    Span,
    /// Separators, punctuation, whitespace and everything else.
    Other,
}

pub(crate) fn classify(c: char) -> CharClass {
    match c {
        '0'..='9' => CharClass::Digit(c as u8 - b'0'),
        '-' => CharClass::Span,
        c if c.is_alphabetic() => CharClass::Letter,
        _ => CharClass::Other,
    }
}

/// Match a two-letter weekday abbreviation (`Mo`, `Tu`, ... `Su`),
/// case-insensitively. Any other pair yields `None`.
pub(crate) fn weekday(first: char, second: char) -> Option<Weekday> {
    let weekday = match (first.to_ascii_lowercase(), second.to_ascii_lowercase()) {
        ('m', 'o') => Weekday::Mon,
        ('t', 'u') => Weekday::Tue,
        ('w', 'e') => Weekday::Wed,
        ('t', 'h') => Weekday::Thu,
        ('f', 'r') => Weekday::Fri,
        ('s', 'a') => Weekday::Sat,
        ('s', 'u') => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// True when `layout` ends with a weekday token, i.e. its trailing day group
/// has no explicit time range.
pub(crate) fn ends_with_weekday(layout: &str) -> bool {
    let mut rev = layout.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(second), Some(first)) => weekday(first, second).is_some(),
        _ => false,
    }
}
