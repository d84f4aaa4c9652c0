//! Dashboard commands.

use super::App;
use anyhow::Result;

pub async fn stats(app: &App) -> Result<()> {
    let stats = app
        .dashboard
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("could not fetch stats: {e}"))?;
    println!("total receipts: {}", stats.total_receipts);
    println!("reconciled:     {}", stats.converted);
    println!("pending:        {}", stats.pending);
    println!("this month:     {}", stats.this_month);
    Ok(())
}

pub async fn trends(app: &App) -> Result<()> {
    let trends = app
        .dashboard
        .trends()
        .await
        .map_err(|e| anyhow::anyhow!("could not fetch trends: {e}"))?;
    if trends.data.is_empty() {
        println!("No trend data.");
        return Ok(());
    }
    for point in trends.data {
        println!("{:<4} {:>12.2}", point.name, point.total);
    }
    Ok(())
}
