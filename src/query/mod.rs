use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{Budget, YearMonth};

/// Capability to supply the full set of known budget records.
pub(crate) trait BudgetSource {
    fn get_all(&self) -> Result<Vec<Budget>>;
}

/// Prorated budget totals over a date range. Holds only a reference to
/// its source; every query is an independent computation.
pub(crate) struct BudgetService<'a, S: BudgetSource> {
    source: &'a S,
}

impl<'a, S: BudgetSource> BudgetService<'a, S> {
    pub(crate) fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Total budget overlapping the inclusive [start, end] range, with
    /// each month's amount spread evenly across its days. An inverted
    /// range yields 0 without touching the source.
    pub(crate) fn query(&self, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        if end < start {
            return Ok(0);
        }

        let start_month = YearMonth::from_date(start);
        let end_month = YearMonth::from_date(end);

        let mut total = 0;
        for budget in self.source.get_all()? {
            let month = budget.year_month;
            if month.as_int() < start_month.as_int() || month.as_int() > end_month.as_int() {
                continue;
            }

            // Clip the query range to this record's month.
            let (overlap_start, overlap_end) = if start_month == end_month {
                (start, end)
            } else if month == start_month {
                (start, month.last_day())
            } else if month == end_month {
                (month.first_day(), end)
            } else {
                (month.first_day(), month.last_day())
            };

            let day_count = (overlap_end - overlap_start).num_days() + 1;
            // Truncated daily rate times days; each uneven month drops
            // its own remainder.
            total += budget.daily_rate() * day_count;
        }

        Ok(total)
    }
}
