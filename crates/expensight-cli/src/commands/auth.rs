//! Account and session commands.

use super::App;
use anyhow::{Result, bail};

pub async fn register(app: &App, email: &str, password: &str, base_currency: &str) -> Result<()> {
    app.session
        .register(email, password, base_currency)
        .await
        .map_err(|e| anyhow::anyhow!("registration failed: {e}"))?;
    println!("Account created for {email}. Log in with `expensight login`.");
    Ok(())
}

pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let session = app
        .session
        .login(email, password)
        .await
        .map_err(|e| anyhow::anyhow!("login failed: {e}"))?;
    println!("Logged in as {}.", session.email());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.session.logout();
    app.book.clear();
    println!("Logged out.");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session.current() {
        Some(session) => {
            println!("{}", session.email());
            if let Some(currency) = session.base_currency() {
                println!("base currency: {currency}");
            }
            Ok(())
        }
        None => bail!("not logged in"),
    }
}

pub async fn set_currency(app: &App, code: &str) -> Result<()> {
    let message = app
        .session
        .update_base_currency(&code.to_uppercase())
        .await
        .map_err(|e| anyhow::anyhow!("settings update failed: {e}"))?;
    println!("{message}");
    Ok(())
}
