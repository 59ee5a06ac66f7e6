mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::{Budget, YearMonth};
use crate::query::BudgetSource;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Insert or replace the single budget for a month.
    pub(crate) fn upsert_budget(&self, budget: &Budget) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO budgets (month, amount) VALUES (?1, ?2)
             ON CONFLICT(month) DO UPDATE SET amount = ?2",
            params![budget.year_month.to_string(), budget.amount],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, month, amount FROM budgets ORDER BY month")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut budgets = Vec::new();
        for row in rows {
            let (id, token, amount) = row?;
            let year_month = YearMonth::parse(&token)
                .with_context(|| format!("Corrupt month token in database: '{token}'"))?;
            budgets.push(Budget {
                id: Some(id),
                year_month,
                amount,
            });
        }
        Ok(budgets)
    }

    pub(crate) fn get_budget(&self, month: YearMonth) -> Result<Option<Budget>> {
        let result = self.conn.query_row(
            "SELECT id, amount FROM budgets WHERE month = ?1",
            params![month.to_string()],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        );
        match result {
            Ok((id, amount)) => Ok(Some(Budget {
                id: Some(id),
                year_month: month,
                amount,
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns true if a budget existed and was removed.
    pub(crate) fn delete_budget(&self, month: YearMonth) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM budgets WHERE month = ?1", params![month.to_string()])?;
        Ok(changed > 0)
    }

    /// Upsert a batch in one transaction. Returns how many months were new.
    pub(crate) fn insert_budgets_batch(&mut self, budgets: &[Budget]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut new_count = 0;
        for budget in budgets {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM budgets WHERE month = ?1)",
                params![budget.year_month.to_string()],
                |row| row.get(0),
            )?;
            if !exists {
                new_count += 1;
            }
            tx.execute(
                "INSERT INTO budgets (month, amount) VALUES (?1, ?2)
                 ON CONFLICT(month) DO UPDATE SET amount = ?2",
                params![budget.year_month.to_string(), budget.amount],
            )?;
        }
        tx.commit()?;
        Ok(new_count)
    }
}

impl BudgetSource for Database {
    fn get_all(&self) -> Result<Vec<Budget>> {
        self.get_budgets()
    }
}

#[cfg(test)]
mod tests;
