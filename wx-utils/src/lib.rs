//! Shared utility functions for the weather anomaly crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    /// ISO calendar date format, "YYYY-MM-DD". Zero padding is optional when parsing.
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// US style "M/D/YYYY".
    pub const US_FORMAT: &str = "%m/%d/%Y";

    /// Year-first with slashes, "YYYY/M/D".
    pub const SLASH_ISO_FORMAT: &str = "%Y/%m/%d";

    /// Compact "YYYYMMDD".
    pub const COMPACT_FORMAT: &str = "%Y%m%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Format a date the way a browser's `Date.toDateString()` does, e.g. "Tue Jul 01 2014".
    pub fn to_date_string(date: &NaiveDate) -> String {
        date.format("%a %b %d %Y").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
    }

    /// Parse a calendar date in any of the forms found in the city CSV files.
    ///
    /// Accepts "2014-7-1" / "2014-07-01", "2014/7/1", "7/1/2014" and "20140701".
    /// A time suffix after 'T' or a space is ignored. No other forms are accepted.
    pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
        let trimmed = s.trim();
        let date_part = trimmed
            .split(|c: char| c == 'T' || c.is_whitespace())
            .next()
            .unwrap_or("");
        if date_part.is_empty() {
            return None;
        }
        let format = if date_part.contains('-') {
            ISO_FORMAT
        } else if date_part.contains('/') {
            let year_first = date_part
                .split('/')
                .next()
                .is_some_and(|head| head.len() == 4 && head.bytes().all(|b| b.is_ascii_digit()));
            if year_first {
                SLASH_ISO_FORMAT
            } else {
                US_FORMAT
            }
        } else if date_part.len() == 8 && date_part.bytes().all(|b| b.is_ascii_digit()) {
            COMPACT_FORMAT
        } else {
            return None;
        };
        NaiveDate::parse_from_str(date_part, format).ok()
    }

    /// Midnight at the start of `date`.
    pub fn midnight(date: &NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN)
    }

}

/// Number utility functions
pub mod numbers {
    /// Round to two decimal places, halves toward positive infinity.
    ///
    /// `round_to_hundredths(0.125) == 0.13` and `round_to_hundredths(-0.125) == -0.12`.
    /// NaN stays NaN.
    pub fn round_to_hundredths(value: f64) -> f64 {
        round_half_up(value * 100.0) / 100.0
    }

    /// Nearest integer, ties toward positive infinity.
    ///
    /// Compares the exact fractional part instead of computing `floor(x + 0.5)`,
    /// which rounds 0.49999999999999994 up to 1.
    fn round_half_up(value: f64) -> f64 {
        let floor = value.floor();
        if value - floor >= 0.5 {
            floor + 1.0
        } else {
            floor
        }
    }

    /// Parse the leading base-10 integer of `s`.
    ///
    /// Leading whitespace and an optional sign are accepted, parsing stops at
    /// the first non-digit. Returns `None` when no digit follows. Values
    /// outside the `i32` range saturate at `i32::MIN` / `i32::MAX`.
    pub fn parse_leading_int(s: &str) -> Option<i32> {
        let s = s.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits_len == 0 {
            return None;
        }
        let magnitude = rest[..digits_len].bytes().fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
        let value = if negative { -magnitude } else { magnitude };
        Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

}
