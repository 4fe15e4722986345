//! Netbank CLI - ledger operations from the command line
//!
//! Usage:
//! ```bash
//! netbank init
//! netbank account open --name "Asha Rao" --branch "MG Road" --ifsc NETB0000001 \
//!     --upi asha@netbank --balance 1000 --password s3cret
//! netbank login asha@netbank --password s3cret
//! netbank resolve 1000000001 --mode upi vikram@netbank
//! netbank transfer 1000000001 2000000002 300 --mode imps --note rent
//! netbank history 1000000001
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use netbank_core::TransferMode;
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;
mod db;

use commands::{account, auth, transfer};

/// Netbank - a funds-transfer ledger over SQLite
#[derive(Parser)]
#[command(name = "netbank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/netbank.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Authenticate an identity (user id, email or account number)
    Login {
        /// Identity to authenticate
        identity: String,
        /// Password
        #[arg(long)]
        password: String,
    },

    /// Change an account's password
    Passwd {
        /// Account number
        account_number: String,
        /// New password
        #[arg(long)]
        new_password: String,
    },

    /// Resolve a beneficiary before transferring
    Resolve {
        /// Requesting account number
        account_number: String,
        /// Beneficiary identifier (account number or UPI alias)
        identifier: String,
        /// Transfer channel
        #[arg(long, default_value = "imps")]
        mode: ModeArg,
    },

    /// Transfer funds to a beneficiary
    Transfer {
        /// Sender account number
        sender: String,
        /// Beneficiary identifier (account number for IMPS, alias for UPI)
        identifier: String,
        /// Amount to transfer
        amount: Decimal,
        /// Transfer channel
        #[arg(long, default_value = "imps")]
        mode: ModeArg,
        /// Optional note on the ledger entry
        #[arg(long)]
        note: Option<String>,
    },

    /// Show an account's transaction history
    History {
        /// Account number
        account_number: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Initialize the database schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Open a new account with its credential
    Open {
        /// Holder name
        #[arg(long, short)]
        name: String,
        /// Branch name
        #[arg(long)]
        branch: String,
        /// Branch routing code
        #[arg(long)]
        ifsc: String,
        /// UPI alias (optional)
        #[arg(long)]
        upi: Option<String>,
        /// Opening balance
        #[arg(long, default_value = "0")]
        balance: Decimal,
        /// Login user id (generated when omitted)
        #[arg(long)]
        user_id: Option<String>,
        /// Email (optional)
        #[arg(long, short)]
        email: Option<String>,
        /// Login password
        #[arg(long)]
        password: String,
    },
    /// Show account details
    Show {
        /// Account number
        account_number: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Imps,
    Upi,
}

impl ModeArg {
    pub fn to_core_type(self) -> TransferMode {
        match self {
            ModeArg::Imps => TransferMode::Imps,
            ModeArg::Upi => TransferMode::Upi,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Ensure the data directory exists
    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&cli.db, force).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::Account { action } => {
            account::handle(&cli.db, action).await?;
        }

        Commands::Login { identity, password } => {
            auth::login(&cli.db, &identity, &password).await?;
        }

        Commands::Passwd {
            account_number,
            new_password,
        } => {
            auth::passwd(&cli.db, &account_number, &new_password).await?;
        }

        Commands::Resolve {
            account_number,
            identifier,
            mode,
        } => {
            transfer::resolve(&cli.db, &account_number, &identifier, mode).await?;
        }

        Commands::Transfer {
            sender,
            identifier,
            amount,
            mode,
            note,
        } => {
            transfer::run(&cli.db, &sender, &identifier, amount, mode, note.as_deref()).await?;
        }

        Commands::History {
            account_number,
            json,
        } => {
            transfer::history(&cli.db, &account_number, json).await?;
        }
    }

    Ok(())
}
