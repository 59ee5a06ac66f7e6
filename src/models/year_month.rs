use anyhow::Result;
use chrono::{Datelike, Days, Months, NaiveDate};

/// A calendar month identified by a 6-digit "YYYYMM" token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Parse a "YYYYMM" token: exactly six ASCII digits, month 01–12.
    pub fn parse(token: &str) -> Result<Self> {
        if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("Invalid month '{token}': expected six digits (YYYYMM)");
        }
        let year: i32 = token[..4].parse()?;
        let month: u32 = token[4..].parse()?;
        if !(1..=12).contains(&month) {
            anyhow::bail!("Invalid month '{token}': month must be 01-12");
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Integer key, e.g. 202001. Orders the same way as the token.
    pub fn as_int(&self) -> i32 {
        self.year * 100 + self.month as i32
    }

    pub fn first_day(&self) -> NaiveDate {
        // Month is validated on construction, so this cannot be None.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .unwrap_or_else(|| self.first_day())
    }

    /// Number of days in this calendar month, leap years included.
    pub fn day_count(&self) -> i64 {
        i64::from(self.last_day().day())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}
