use crate::models::YearMonth;

/// Total amount allocated to one calendar month.
#[derive(Debug, Clone)]
pub struct Budget {
    pub id: Option<i64>,
    pub year_month: YearMonth,
    pub amount: i64,
}

impl Budget {
    pub fn new(year_month: YearMonth, amount: i64) -> Self {
        Self {
            id: None,
            year_month,
            amount,
        }
    }

    /// Whole-unit amount allocated to a single day of this month.
    /// Integer division: the remainder is not distributed.
    pub fn daily_rate(&self) -> i64 {
        self.amount / self.year_month.day_count()
    }
}
