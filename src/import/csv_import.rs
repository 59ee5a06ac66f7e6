use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{Budget, YearMonth};

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read a two-column CSV (month token, amount) into budget records.
    pub(crate) fn load(path: &Path) -> Result<Vec<Budget>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .context("Failed to open CSV file")?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // Try to detect if first row is a header: header fields parse as
        // neither a month token nor an amount
        let looks_like_header = rows[0].iter().all(|field| {
            let trimmed = field.trim();
            YearMonth::parse(trimmed).is_err() && parse_amount(trimmed).is_err()
        });
        let skip = usize::from(looks_like_header);

        let mut budgets = Vec::new();
        for (i, row) in rows.iter().enumerate().skip(skip) {
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let month_raw = row.first().map(|s| s.trim()).unwrap_or_default();
            let month = YearMonth::parse(month_raw)
                .with_context(|| format!("Row {}: bad month token '{month_raw}'", i + 1))?;

            let amount_raw = row.get(1).map(|s| s.trim()).unwrap_or_default();
            let amount = parse_amount(amount_raw)
                .with_context(|| format!("Row {}: bad amount '{amount_raw}'", i + 1))?;

            budgets.push(Budget::new(month, amount));
        }

        Ok(budgets)
    }
}

fn parse_amount(s: &str) -> Result<i64> {
    let cleaned = s.replace(['$', ','], "").trim().to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Empty amount");
    }
    cleaned
        .parse::<i64>()
        .context(format!("Failed to parse '{}' as whole amount", s))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
