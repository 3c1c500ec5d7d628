use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar date interval, inclusive on both ends.
///
/// `start <= end` is expected but not enforced; an inverted interval simply
/// contains no dates.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DateInterval {
        DateInterval { start, end }
    }

    /// Map a date-time interval onto the days whose midnight lies inside it.
    ///
    /// Records are stamped at midnight, so a brushed range starting at noon on
    /// Jan 3 first includes Jan 4, while a range ending at noon on Jan 9 still
    /// includes Jan 9.
    pub fn from_datetimes(start: NaiveDateTime, end: NaiveDateTime) -> DateInterval {
        let first_day = if start.time() == NaiveTime::MIN {
            start.date()
        } else {
            start.date().succ_opt().unwrap_or(NaiveDate::MAX)
        };
        DateInterval {
            start: first_day,
            end: end.date(),
        }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Every date in the interval, in ascending order.
    pub fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over the dates of a `DateInterval`.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|date| *date <= self.end)?;
        self.next = current.succ_opt();
        Some(current)
    }
}
