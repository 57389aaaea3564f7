//! The layout scanning state machine.
//!
//! A single left-to-right pass over the layout characters. Weekday tokens
//! accumulate in a [`DayBuffer`], digits in two [`DigitBuffer`]s; each time a
//! full `HH:MM` has been read, one boundary per pending weekday is handed to a
//! [`BoundarySink`]. Anything the scanner does not recognize is skipped.
//!
//! # States
//!
//! | state             | span pending | just emitted |
//! |-------------------|--------------|--------------|
//! | `Idle`            | no           | no           |
//! | `InDayGroup`      | no           | no           |
//! | `InSpan`          | yes          | no           |
//! | `AwaitingWeekday` | no           | yes          |
//! | `AwaitingTime`    | yes          | yes          |
//!
//! Transitions:
//!
//! - `-` moves `Idle`, `InDayGroup` and `InSpan` to `InSpan`, and
//!   `AwaitingWeekday` and `AwaitingTime` to `AwaitingTime`.
//! - A completed time emits (closing iff a span is pending) and moves every
//!   state to `AwaitingWeekday`.
//! - A weekday after an emission clears the day buffer first; the pending span
//!   survives (`AwaitingTime` becomes `InSpan`). Then, in `InSpan` with a
//!   buffered day earlier in the week than the new one, the range is expanded
//!   and the span consumed (`InDayGroup`); otherwise the day is appended and a
//!   pending span stays pending.

use chrono::Weekday;

use crate::buffer::{DayBuffer, DigitBuffer};
use crate::classify::{self, CharClass};

/// A boundary the sink could not place on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Unrepresentable;

/// Receives the boundaries produced by the scanner.
pub(crate) trait BoundarySink {
    /// Record `hour:minute` on `weekday`. `closing` is true when a range
    /// indicator preceded the time.
    fn dump(
        &mut self,
        weekday: Weekday,
        hour: u32,
        minute: u32,
        closing: bool,
    ) -> Result<(), Unrepresentable>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// Nothing meaningful scanned yet.
    #[default]
    Idle,
    /// Collecting weekdays of a group.
    InDayGroup,
    /// A `-` was seen and no boundary has been emitted since the current
    /// group began.
    InSpan,
    /// A boundary was just emitted; the next weekday starts a new group.
    AwaitingWeekday,
    /// A boundary was emitted and then a `-`: the next time closes it.
    AwaitingTime,
}

impl ScanState {
    fn span_pending(self) -> bool {
        matches!(self, Self::InSpan | Self::AwaitingTime)
    }

    fn just_emitted(self) -> bool {
        matches!(self, Self::AwaitingWeekday | Self::AwaitingTime)
    }

    fn on_span(self) -> Self {
        if self.just_emitted() {
            Self::AwaitingTime
        } else {
            Self::InSpan
        }
    }
}

/// Scratch state for one scan. Reused across parses via [`Scanner::reset`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Scanner {
    days: DayBuffer,
    hour: DigitBuffer,
    minute: DigitBuffer,
    state: ScanState,
}

impl Scanner {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ScanState {
        self.state
    }

    /// Scan `input` to the end, feeding boundaries into `sink`. Stops at the
    /// first boundary the sink rejects.
    pub(crate) fn scan<I, S>(&mut self, input: I, sink: &mut S) -> Result<(), Unrepresentable>
    where
        I: IntoIterator<Item = char>,
        S: BoundarySink,
    {
        let mut chars = input.into_iter();
        while let Some(c) = chars.next() {
            match classify::classify(c) {
                CharClass::Digit(digit) => self.on_digit(digit, sink)?,
                CharClass::Letter => {
                    // The second letter is consumed even when the pair turns
                    // out not to be a weekday.
                    let Some(next) = chars.next() else { break };
                    if let Some(weekday) = classify::weekday(c, next) {
                        self.on_weekday(weekday);
                    }
                }
                CharClass::Span => self.state = self.state.on_span(),
                CharClass::Other => {}
            }
        }
        self.finish(sink)
    }

    fn on_digit<S>(&mut self, digit: u8, sink: &mut S) -> Result<(), Unrepresentable>
    where
        S: BoundarySink,
    {
        if self.hour.push(digit) {
            return Ok(());
        }
        self.minute.push(digit);
        if !self.minute.is_full() {
            return Ok(());
        }

        let (hour, minute) = (self.hour.value(), self.minute.value());
        let closing = self.state.span_pending();
        for weekday in self.days.iter() {
            log::trace!("dump {weekday} {hour:02}:{minute:02} closing={closing}");
            sink.dump(weekday, hour, minute, closing)?;
        }
        self.hour.clear();
        self.minute.clear();
        self.state = ScanState::AwaitingWeekday;
        Ok(())
    }

    fn on_weekday(&mut self, weekday: Weekday) {
        match self.state {
            ScanState::AwaitingWeekday => {
                self.days.clear();
                self.state = ScanState::InDayGroup;
            }
            ScanState::AwaitingTime => {
                self.days.clear();
                self.state = ScanState::InSpan;
            }
            _ => {}
        }

        match (self.state, self.days.last()) {
            (ScanState::InSpan, Some(last))
                if last.num_days_from_monday() < weekday.num_days_from_monday() =>
            {
                log::trace!("expand {last}-{weekday}");
                self.days.extend_through(weekday);
                self.state = ScanState::InDayGroup;
            }
            (state, _) => {
                log::trace!("weekday {weekday}");
                self.days.push(weekday);
                if state == ScanState::Idle {
                    self.state = ScanState::InDayGroup;
                }
            }
        }
    }

    /// Weekdays still pending at the end of input get the full day.
    fn finish<S: BoundarySink>(&mut self, sink: &mut S) -> Result<(), Unrepresentable> {
        if self.state.just_emitted() || self.days.is_empty() {
            return Ok(());
        }
        for weekday in self.days.iter() {
            log::trace!("dump {weekday} full day (end of input)");
            sink.dump(weekday, 0, 0, false)?;
            sink.dump(weekday, 23, 59, true)?;
        }
        self.state = ScanState::AwaitingWeekday;
        Ok(())
    }
}
