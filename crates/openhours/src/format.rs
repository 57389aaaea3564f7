//! Human-readable rendering of a [`Split`].

use std::fmt;

use chrono::TimeZone;

use crate::splitter::Split;

/// One line per calendar day: `Mon, 07 Nov 09:00-14:00`. Openings (even
/// positions) are separated by a space, closings joined with `-`, or `*` for
/// the closing that contains the reference instant.
impl<Tz: TimeZone> fmt::Display for Split<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut day = None;
        for (i, boundary) in self.boundaries.iter().enumerate() {
            let at = &boundary.at;
            let date = at.date_naive();
            let time = at.format("%H:%M");
            if day != Some(date) {
                if i != 0 {
                    writeln!(f)?;
                }
                write!(f, "{} {}", at.format("%a, %d %b"), time)?;
            } else if i % 2 == 0 {
                write!(f, " {time}")?;
            } else {
                let sep = if self.match_index == Some(i) { '*' } else { '-' };
                write!(f, "{sep}{time}")?;
            }
            day = Some(date);
        }
        Ok(())
    }
}
