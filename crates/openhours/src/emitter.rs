//! Boundary emission -- turns a scanned weekday and time into an absolute
//! timestamp in the week of the reference instant.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Weekday,
};

use crate::scanner::{BoundarySink, Unrepresentable};

/// One edge of an opening interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary<Tz: TimeZone> {
    /// The absolute instant, in the reference instant's zone.
    pub at: DateTime<Tz>,
    /// The schedule day this boundary belongs to. Usually `at.weekday()`, but
    /// times past 24:00 roll over into the next calendar day.
    pub weekday: Weekday,
    /// True when a range indicator preceded this boundary, i.e. it may end an
    /// interval.
    pub closing: bool,
}

/// Accumulates boundaries for the week containing a reference instant.
#[derive(Debug, Clone)]
pub(crate) struct Emitter<Tz: TimeZone> {
    tz: Tz,
    date: NaiveDate,
    weekday: Weekday,
    output: Vec<Boundary<Tz>>,
}

impl<Tz: TimeZone> Emitter<Tz> {
    pub(crate) fn new(reference: &DateTime<Tz>) -> Self {
        Self {
            tz: reference.timezone(),
            date: reference.date_naive(),
            weekday: reference.weekday(),
            // One open and one close for each day of the week.
            output: Vec::with_capacity(14),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.output.clear();
    }

    pub(crate) fn boundaries(&self) -> &[Boundary<Tz>] {
        &self.output
    }

    /// Order by instant. Equal instants keep their emission order.
    pub(crate) fn sort(&mut self) {
        self.output.sort_by(|a, b| a.at.cmp(&b.at));
    }

    /// Wall-clock time `hour:minute` on `weekday` of the reference week.
    /// Out-of-range values roll forward (`25:00` is 01:00 the next day).
    fn local_time(&self, weekday: Weekday, hour: u32, minute: u32) -> Option<NaiveDateTime> {
        let offset = i64::from(weekday.num_days_from_monday())
            - i64::from(self.weekday.num_days_from_monday());
        self.date
            .checked_add_signed(Duration::days(offset))?
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::hours(hour.into()) + Duration::minutes(minute.into()))
    }

    /// Attach the reference zone. Ambiguous times take the earlier instant;
    /// times inside a gap are read with the offset in effect before the gap,
    /// which moves them forward by the gap's length.
    fn localize(&self, local: NaiveDateTime) -> Option<DateTime<Tz>> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Some(at),
            LocalResult::None => {
                let before = local.checked_sub_signed(Duration::days(1))?;
                let offset = self.tz.offset_from_utc_datetime(&before).fix();
                let utc = local
                    .checked_sub_signed(Duration::seconds(offset.local_minus_utc().into()))?;
                Some(self.tz.from_utc_datetime(&utc))
            }
        }
    }
}

impl<Tz: TimeZone> BoundarySink for Emitter<Tz> {
    fn dump(
        &mut self,
        weekday: Weekday,
        hour: u32,
        minute: u32,
        closing: bool,
    ) -> Result<(), Unrepresentable> {
        // A closing 00:00 or 24:xx means "until the end of the day".
        let (hour, minute) = match (hour, minute) {
            (0, 0) | (24, _) if closing => (23, 59),
            other => other,
        };

        let Some(at) = self
            .local_time(weekday, hour, minute)
            .and_then(|local| self.localize(local))
        else {
            log::debug!("{weekday} {hour:02}:{minute:02} is outside the representable range");
            return Err(Unrepresentable);
        };

        self.output.push(Boundary {
            at,
            weekday,
            closing,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // Wednesday.
    fn emitter() -> Emitter<Utc> {
        Emitter::new(&Utc.with_ymd_and_hms(2026, 4, 1, 17, 30, 0).unwrap())
    }

    #[test]
    fn dates_roll_back_into_previous_month() {
        let mut e = emitter();
        e.dump(Weekday::Mon, 9, 0, false).unwrap();
        assert_eq!(
            e.boundaries()[0].at,
            Utc.with_ymd_and_hms(2026, 3, 30, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn closing_midnight_becomes_end_of_day() {
        let mut e = emitter();
        e.dump(Weekday::Wed, 0, 0, false).unwrap();
        e.dump(Weekday::Wed, 0, 0, true).unwrap();
        e.dump(Weekday::Thu, 24, 0, true).unwrap();
        e.dump(Weekday::Fri, 24, 30, true).unwrap();
        let at: Vec<_> = e.boundaries().iter().map(|b| b.at).collect();
        assert_eq!(at[0], Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap());
        assert_eq!(at[1], Utc.with_ymd_and_hms(2026, 4, 1, 23, 59, 0).unwrap());
        assert_eq!(at[2], Utc.with_ymd_and_hms(2026, 4, 2, 23, 59, 0).unwrap());
        assert_eq!(at[3], Utc.with_ymd_and_hms(2026, 4, 3, 23, 59, 0).unwrap());
    }

    #[test]
    fn opening_at_24_rolls_into_next_day() {
        let mut e = emitter();
        e.dump(Weekday::Sun, 24, 0, false).unwrap();
        let b = &e.boundaries()[0];
        assert_eq!(b.at, Utc.with_ymd_and_hms(2026, 4, 6, 0, 0, 0).unwrap());
        assert_eq!(b.weekday, Weekday::Sun);
        assert!(!b.closing);
    }

    #[test]
    fn time_past_the_last_date_is_rejected() {
        let last = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
        let mut e = Emitter::new(&Utc.from_utc_datetime(&last));
        let weekday = last.weekday();
        assert_eq!(e.dump(weekday, 23, 0, false), Ok(()));
        assert_eq!(e.dump(weekday, 25, 0, true), Err(Unrepresentable));
        assert_eq!(e.boundaries().len(), 1);
    }

    #[test]
    fn sort_orders_by_instant() {
        let mut e = emitter();
        e.dump(Weekday::Sun, 10, 0, false).unwrap();
        e.dump(Weekday::Mon, 10, 0, false).unwrap();
        e.dump(Weekday::Wed, 9, 0, true).unwrap();
        e.sort();
        let days: Vec<_> = e.boundaries().iter().map(|b| b.weekday).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]);
    }
}
