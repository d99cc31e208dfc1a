use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::MarketError;

/// Fixed time-of-day marker used by the compact timestamp render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Start,
    End,
}

/// Inclusive `[from, to]` calendar window. Immutable once constructed;
/// built once per request and shared by the price and news paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    anchor: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
    range_days: i64,
}

impl DateWindow {
    /// Symmetric window: `range_days` days on each side of `anchor`, inclusive.
    pub fn around(anchor: NaiveDate, range_days: i64) -> Result<Self, MarketError> {
        if range_days < 1 {
            return Err(MarketError::InvalidInput(format!(
                "range must be a positive number of days, got {range_days}"
            )));
        }

        // Checked arithmetic: range comes straight from request input
        let out_of_range =
            || MarketError::InvalidInput(format!("range of {range_days} days is out of range"));
        let span = Duration::try_days(range_days).ok_or_else(out_of_range)?;
        let from = anchor.checked_sub_signed(span).ok_or_else(out_of_range)?;
        let to = anchor.checked_add_signed(span).ok_or_else(out_of_range)?;

        Ok(Self {
            anchor,
            from,
            to,
            range_days,
        })
    }

    /// Window with explicit bounds, anchored at `start`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, MarketError> {
        if start > end {
            return Err(MarketError::InvalidInput(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self {
            anchor: start,
            from: start,
            to: end,
            range_days: (end - start).num_days(),
        })
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn from_date(&self) -> NaiveDate {
        self.from
    }

    pub fn to_date(&self) -> NaiveDate {
        self.to
    }

    pub fn range_days(&self) -> i64 {
        self.range_days
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// `YYYYMMDDTHHMM` with a fixed 00:01 start-of-day or 23:59 end-of-day
    /// marker, the form the timestamp-windowed news provider expects.
    pub fn compact_timestamp(date: NaiveDate, time: TimeOfDay) -> String {
        let marker = match time {
            TimeOfDay::Start => "0001",
            TimeOfDay::End => "2359",
        };
        format!("{}T{marker}", date.format("%Y%m%d"))
    }

    /// Plain `YYYY-MM-DD`, the form the calendar-windowed news provider expects.
    pub fn calendar_date(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}
