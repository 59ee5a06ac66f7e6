#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;
use crate::query::BudgetService;

fn ym(token: &str) -> YearMonth {
    YearMonth::parse(token).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── CRUD ──────────────────────────────────────────────────────

#[test]
fn test_upsert_and_get() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 310)).unwrap();

    let fetched = db.get_budget(ym("202001")).unwrap();
    assert!(fetched.is_some());
    let fetched = fetched.unwrap();
    assert_eq!(fetched.amount, 310);
    assert!(fetched.id.is_some());
}

#[test]
fn test_get_budget_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_budget(ym("202001")).unwrap().is_none());
}

#[test]
fn test_upsert_replaces_amount() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 310)).unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 620)).unwrap();

    let all = db.get_budgets().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, 620);
}

#[test]
fn test_get_budgets_ordered_by_month() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new(ym("202003"), 310)).unwrap();
    db.upsert_budget(&Budget::new(ym("201912"), 150)).unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 310)).unwrap();

    let tokens: Vec<String> = db
        .get_budgets()
        .unwrap()
        .iter()
        .map(|b| b.year_month.to_string())
        .collect();
    assert_eq!(tokens, vec!["201912", "202001", "202003"]);
}

#[test]
fn test_delete_budget() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 310)).unwrap();

    assert!(db.delete_budget(ym("202001")).unwrap());
    assert!(db.get_budget(ym("202001")).unwrap().is_none());
    assert!(!db.delete_budget(ym("202001")).unwrap());
}

#[test]
fn test_batch_counts_new_months() {
    let mut db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 100)).unwrap();

    let batch = vec![
        Budget::new(ym("202001"), 310),
        Budget::new(ym("202002"), 2900),
        Budget::new(ym("202003"), 310),
    ];
    let new_count = db.insert_budgets_batch(&batch).unwrap();
    assert_eq!(new_count, 2);

    let all = db.get_budgets().unwrap();
    assert_eq!(all.len(), 3);
    // The existing month was updated, not duplicated.
    assert_eq!(db.get_budget(ym("202001")).unwrap().unwrap().amount, 310);
}

#[test]
fn test_migrate_is_idempotent() {
    let file = tempfile::NamedTempFile::new().unwrap();
    {
        let db = Database::open(file.path()).unwrap();
        db.upsert_budget(&Budget::new(ym("202001"), 310)).unwrap();
    }
    // Reopening an existing database must keep its data intact.
    let db = Database::open(file.path()).unwrap();
    assert_eq!(db.get_budgets().unwrap().len(), 1);
}

// ── As a budget source ────────────────────────────────────────

#[test]
fn test_get_all_matches_get_budgets() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 310)).unwrap();
    db.upsert_budget(&Budget::new(ym("202002"), 2900)).unwrap();

    let all = db.get_all().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_query_through_store() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new(ym("202001"), 310)).unwrap();
    db.upsert_budget(&Budget::new(ym("202002"), 2900)).unwrap();
    db.upsert_budget(&Budget::new(ym("202003"), 310)).unwrap();
    db.upsert_budget(&Budget::new(ym("202004"), 3000)).unwrap();

    let service = BudgetService::new(&db);
    assert_eq!(
        service.query(date(2019, 12, 31), date(2020, 5, 1)).unwrap(),
        6520
    );
    assert_eq!(
        service.query(date(2020, 1, 31), date(2020, 2, 1)).unwrap(),
        110
    );
    assert_eq!(service.query(date(2020, 1, 1), date(2019, 1, 1)).unwrap(), 0);
}
