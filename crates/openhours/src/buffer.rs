//! Fixed-size token buffers owned by the scanner.
//!
//! Neither buffer allocates; both are cleared in place between day groups and
//! between parses.

use chrono::Weekday;

/// Pending weekdays awaiting a time range, in the order they were read.
///
/// Repeats are kept, so `Mo,Mo 09:00` emits Monday twice. The buffer holds
/// at most seven entries; further pushes are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DayBuffer {
    days: [Weekday; 7],
    len: usize,
}

impl Default for DayBuffer {
    fn default() -> Self {
        Self {
            days: [Weekday::Mon; 7],
            len: 0,
        }
    }
}

impl DayBuffer {
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn last(&self) -> Option<Weekday> {
        self.days[..self.len].last().copied()
    }

    pub(crate) fn push(&mut self, weekday: Weekday) {
        if self.len == self.days.len() {
            log::debug!("day buffer full, dropping {weekday}");
            return;
        }
        self.days[self.len] = weekday;
        self.len += 1;
    }

    /// Push every weekday after the last pushed one, through `to` inclusive.
    /// Does nothing when the buffer is empty.
    pub(crate) fn extend_through(&mut self, to: Weekday) {
        let Some(mut day) = self.last() else { return };
        while day != to {
            day = day.succ();
            self.push(day);
        }
    }

    /// Pending weekdays in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days[..self.len].iter().copied()
    }
}

/// Up to two pending digits of an hour or minute fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DigitBuffer {
    digits: [u8; 2],
    len: usize,
}

impl DigitBuffer {
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.digits.len()
    }

    /// Append a digit. Returns `false` (and keeps the buffer unchanged) when
    /// it already holds two.
    pub(crate) fn push(&mut self, digit: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.digits[self.len] = digit;
        self.len += 1;
        true
    }

    /// Numeric value of the buffered digits.
    pub(crate) fn value(&self) -> u32 {
        self.digits[..self.len]
            .iter()
            .fold(0, |acc, &d| acc * 10 + u32::from(d))
    }
}
