use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::db::Database;
use crate::models::{Budget, YearMonth};
use crate::query::BudgetService;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "set" => cli_set(&args[2..], db),
        "rm" | "remove" => cli_remove(&args[2..], db),
        "list" | "ls" => cli_list(db),
        "query" | "q" => cli_query(&args[2..], db),
        "import" => cli_import(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("prorata {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("Prorata — prorated monthly budget queries");
    println!();
    println!("Usage: prorata <command>");
    println!();
    println!("Commands:");
    println!("  set <YYYYMM> <amount>         Set the budget for a month");
    println!("  rm <YYYYMM>                   Remove the budget for a month");
    println!("  list                          List budgets with their daily rates");
    println!("  query <start> [end]           Prorated total for an inclusive date range");
    println!("                                Dates as YYYY-MM-DD; end defaults to today");
    println!("  import <file.csv>             Bulk-load budgets from a CSV (month,amount)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_set(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() != 2 {
        anyhow::bail!("Usage: prorata set <YYYYMM> <amount>");
    }
    let month = YearMonth::parse(&args[0])?;
    let amount: i64 = args[1]
        .parse()
        .with_context(|| format!("Invalid amount: '{}'", args[1]))?;

    db.upsert_budget(&Budget::new(month, amount))?;
    println!("Set {month}: {amount}");
    Ok(())
}

fn cli_remove(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() != 1 {
        anyhow::bail!("Usage: prorata rm <YYYYMM>");
    }
    let month = YearMonth::parse(&args[0])?;
    if db.delete_budget(month)? {
        println!("Removed {month}");
    } else {
        println!("No budget for {month}");
    }
    Ok(())
}

fn cli_list(db: &mut Database) -> Result<()> {
    let budgets = db.get_budgets()?;
    if budgets.is_empty() {
        println!("No budgets. Add one with: prorata set <YYYYMM> <amount>");
        return Ok(());
    }

    println!("{:<8} {:>12} {:>10}", "Month", "Amount", "Per day");
    for budget in &budgets {
        println!(
            "{:<8} {:>12} {:>10}",
            budget.year_month.to_string(),
            budget.amount,
            budget.daily_rate()
        );
    }
    Ok(())
}

fn cli_query(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() || args.len() > 2 {
        anyhow::bail!("Usage: prorata query <start> [end]");
    }
    let start = parse_date(&args[0])?;
    let end = match args.get(1) {
        Some(raw) => parse_date(raw)?,
        None => chrono::Local::now().date_naive(),
    };

    let total = BudgetService::new(db).query(start, end)?;
    println!("{total}");
    Ok(())
}

fn cli_import(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: prorata import <file.csv>");
    }
    let path = Path::new(&args[0]);
    if !path.exists() {
        anyhow::bail!("File not found: {}", args[0]);
    }

    let budgets = crate::import::CsvImporter::load(path)?;
    println!("Parsed {} budgets", budgets.len());

    let new_count = db.insert_budgets_batch(&budgets)?;
    println!(
        "Imported {new_count} new budgets ({} updated)",
        budgets.len() - new_count
    );
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Could not parse date '{raw}': expected YYYY-MM-DD"))
}
