use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::App;

#[derive(Parser)]
#[command(name = "expensight")]
#[command(about = "ExpenSight - track, upload and reconcile expenses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (does not log in)
    Register {
        email: String,
        password: String,
        /// Default reconciliation currency, e.g. USD
        base_currency: String,
    },
    /// Log in and persist the access token
    Login { email: String, password: String },
    /// Clear the session and the persisted token
    Logout,
    /// Show the authenticated account
    Whoami,
    /// Update the account's base currency
    SetCurrency { code: String },
    /// Expense operations
    Expenses {
        #[command(subcommand)]
        action: ExpenseAction,
    },
    /// Upload a receipt for OCR-derived expense creation
    Upload { file: PathBuf },
    /// Reconcile one expense against a historical FX rate
    Reconcile {
        expense_id: i64,
        /// Target currency; defaults to the account's base currency
        #[arg(long)]
        currency: Option<String>,
    },
    /// Show the reconciliation audit trail
    History,
    /// Show dashboard counters
    Stats,
    /// Show the six-month expense trend
    Trends,
}

#[derive(Subcommand)]
enum ExpenseAction {
    /// List expenses
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Add an expense manually
    Add {
        amount: f64,
        currency: String,
        category: String,
        /// Transaction date as YYYY-MM-DD
        date: String,
    },
}

impl Commands {
    /// Pseudo-path for the route guard; `None` for commands that work in
    /// either session state.
    fn route(&self) -> Option<&'static str> {
        match self {
            Commands::Register { .. } | Commands::Login { .. } => Some("/"),
            Commands::Whoami | Commands::SetCurrency { .. } => Some("/settings"),
            Commands::Expenses { .. } => Some("/expenses"),
            Commands::Upload { .. } => Some("/upload"),
            Commands::Reconcile { .. } | Commands::History => Some("/reconcile"),
            Commands::Stats | Commands::Trends => Some("/dashboard"),
            Commands::Logout => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::bootstrap().await?;

    if let Some(path) = cli.command.route() {
        app.ensure_allowed(path)?;
    }

    match cli.command {
        Commands::Register {
            email,
            password,
            base_currency,
        } => commands::auth::register(&app, &email, &password, &base_currency).await,
        Commands::Login { email, password } => commands::auth::login(&app, &email, &password).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::SetCurrency { code } => commands::auth::set_currency(&app, &code).await,
        Commands::Expenses { action } => match action {
            ExpenseAction::List { limit } => commands::expenses::list(&app, limit).await,
            ExpenseAction::Add {
                amount,
                currency,
                category,
                date,
            } => commands::expenses::add(&app, amount, &currency, &category, &date).await,
        },
        Commands::Upload { file } => commands::expenses::upload(&app, &file).await,
        Commands::Reconcile {
            expense_id,
            currency,
        } => commands::expenses::reconcile(&app, expense_id, currency.as_deref()).await,
        Commands::History => commands::expenses::history(&app).await,
        Commands::Stats => commands::dashboard::stats(&app).await,
        Commands::Trends => commands::dashboard::trends(&app).await,
    }
}
