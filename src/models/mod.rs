mod budget;
mod year_month;

pub use budget::Budget;
pub use year_month::YearMonth;
