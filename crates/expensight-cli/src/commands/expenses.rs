//! Expense, upload and reconciliation commands.

use super::App;
use anyhow::{Context, Result};
use expensight_core::expense::{ExpenseRecord, NewExpense};
use std::path::Path;

fn print_record(record: &ExpenseRecord) {
    let converted = match (&record.converted_amount, &record.conversion_currency) {
        (Some(amount), Some(currency)) => format!("{amount:.2} {currency}"),
        _ => "-".to_string(),
    };
    let status = if record.is_reconciled() {
        "RECONCILED"
    } else {
        "PENDING"
    };
    println!(
        "{:>6}  {}  {:<20}  {:>10.2} {}  {:>14}  {}",
        record.id,
        record.date.format("%Y-%m-%d"),
        record.category,
        record.amount,
        record.currency,
        converted,
        status,
    );
}

pub async fn list(app: &App, limit: Option<u32>) -> Result<()> {
    let count = app
        .book
        .load(limit)
        .await
        .map_err(|e| anyhow::anyhow!("could not fetch expenses: {e}"))?;
    if count == 0 {
        println!("No expenses yet.");
        return Ok(());
    }
    println!(
        "{:>6}  {:10}  {:<20}  {:>14}  {:>14}  {}",
        "id", "date", "category", "amount", "converted", "status"
    );
    for record in app.book.snapshot() {
        print_record(&record);
    }
    Ok(())
}

pub async fn add(
    app: &App,
    amount: f64,
    currency: &str,
    category: &str,
    date: &str,
) -> Result<()> {
    let record = app
        .book
        .add_manual(&NewExpense {
            amount,
            currency: currency.to_uppercase(),
            category: category.to_string(),
            date: date.to_string(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("could not add expense: {e}"))?;
    println!("Created expense {}.", record.id);
    Ok(())
}

pub async fn upload(app: &App, file: &Path) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .context("file name is not valid UTF-8")?;

    let outcome = app
        .uploads
        .upload(bytes, file_name)
        .await
        .map_err(|e| anyhow::anyhow!("upload failed: {e}"))?;
    println!(
        "Receipt {} processed into expense {} ({:.2} {} / {}).",
        outcome.receipt.filename,
        outcome.expense.id,
        outcome.expense.amount,
        outcome.expense.currency,
        outcome.expense.category,
    );
    Ok(())
}

pub async fn reconcile(app: &App, expense_id: i64, currency: Option<&str>) -> Result<()> {
    let result = app
        .reconciliation
        .reconcile(expense_id, currency)
        .await
        .map_err(|e| anyhow::anyhow!("reconciliation failed: {e}"))?;
    let expense = &result.expense;
    println!(
        "Expense {} reconciled: {:.2} {} -> {:.2} {} (rate {:.5}).",
        expense.id,
        expense.amount,
        expense.currency,
        expense.converted_amount.unwrap_or_default(),
        result.conversion_currency,
        result.fx_rate,
    );
    Ok(())
}

pub async fn history(app: &App) -> Result<()> {
    let entries = app
        .reconciliation
        .history()
        .await
        .map_err(|e| anyhow::anyhow!("could not fetch history: {e}"))?;
    if entries.is_empty() {
        println!("No reconciliation history found.");
        return Ok(());
    }
    for entry in entries {
        let when = entry
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  expense {:>6}  {:>10.2} {}  -> {:>10.2} {}  rate {}",
            when,
            entry.expense.id,
            entry.expense.amount,
            entry.base_currency.as_deref().unwrap_or("-"),
            entry.converted_amount,
            entry.conversion_currency.as_deref().unwrap_or("-"),
            entry
                .fx_rate
                .map(|r| format!("{r:.5}"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    Ok(())
}
