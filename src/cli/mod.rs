use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use crate::application::LedgerService;
use crate::domain::{format_money, parse_money, Account, AccountId, Favorite, Money, Payment};
use crate::io::{DEFAULT_HISTORY_CHUNK_SIZE, Exporter, Importer};

/// Wallet - accounts, payments and favorites kept in plain text dumps
#[derive(Parser)]
#[command(name = "wallet")]
#[command(about = "A wallet ledger that keeps its state in a directory of dump files")]
#[command(version)]
pub struct Cli {
    /// Directory holding accounts.dump, payments.dump and favorites.dump
    #[arg(short, long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new account
    Register {
        /// Phone number (must be unique)
        phone: String,
    },

    /// Deposit money into an account
    Deposit {
        account_id: AccountId,

        /// Amount to deposit (e.g., "100.50" or "100")
        amount: String,
    },

    /// Pay from an account
    Pay {
        account_id: AccountId,

        /// Amount to pay (e.g., "100.50" or "100")
        amount: String,

        /// Payment category (e.g., "auto", "food")
        #[arg(short, long)]
        category: String,
    },

    /// Reject a payment and return its amount to the account
    Reject {
        /// Payment ID
        payment_id: String,
    },

    /// Repeat a payment with the same account, amount and category
    Repeat {
        /// Payment ID
        payment_id: String,
    },

    /// Save a payment as a named favorite
    Favorite {
        /// Payment ID
        payment_id: String,

        /// Favorite name
        name: String,
    },

    /// Pay using a favorite
    PayFavorite {
        /// Favorite ID
        favorite_id: String,
    },

    /// Show an account
    Account {
        id: AccountId,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all accounts with their balances
    Accounts {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a payment
    Payment {
        /// Payment ID
        id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all favorites
    Favorites {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export an account's payment history as chunked files
    History {
        account_id: AccountId,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Maximum number of payments per file
        #[arg(long, default_value_t = DEFAULT_HISTORY_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Write accounts to a legacy single-line file
    ExportLegacy {
        /// Output file
        path: PathBuf,
    },

    /// Load accounts from a legacy single-line file
    ImportLegacy {
        /// Input file
        path: PathBuf,
    },
}

impl Commands {
    fn is_mutating(&self) -> bool {
        matches!(
            self,
            Commands::Register { .. }
                | Commands::Deposit { .. }
                | Commands::Pay { .. }
                | Commands::Reject { .. }
                | Commands::Repeat { .. }
                | Commands::Favorite { .. }
                | Commands::PayFavorite { .. }
                | Commands::ImportLegacy { .. }
        )
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let mut service = load(&self.data_dir)?;
        let persist = self.command.is_mutating();

        run_command(&mut service, self.command)?;

        if persist {
            save(&service, &self.data_dir)?;
        }
        Ok(())
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "wallet=debug" } else { "wallet=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded in another program
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn load(data_dir: &Path) -> Result<LedgerService> {
    let mut service = LedgerService::new();
    Importer::new(&mut service)
        .import_dump(data_dir)
        .with_context(|| format!("Failed to load ledger from {}", data_dir.display()))?;
    Ok(service)
}

fn save(service: &LedgerService, data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Exporter::new(service)
        .export_dump(data_dir)
        .with_context(|| format!("Failed to save ledger to {}", data_dir.display()))?;
    Ok(())
}

fn run_command(service: &mut LedgerService, command: Commands) -> Result<()> {
    match command {
        Commands::Register { phone } => {
            let account = service.register_account(phone)?;
            println!("Registered account {} ({})", account.id, account.phone);
        }

        Commands::Deposit { account_id, amount } => {
            let amount = parse_amount(&amount)?;
            service.deposit(account_id, amount)?;
            let account = service.find_account_by_id(account_id)?;
            println!(
                "Deposited {} to account {}. Balance: {}",
                format_money(amount),
                account_id,
                format_money(account.balance)
            );
        }

        Commands::Pay {
            account_id,
            amount,
            category,
        } => {
            let payment = service.pay(account_id, parse_amount(&amount)?, category)?;
            print_payment_created("Paid", &payment);
        }

        Commands::Reject { payment_id } => {
            let payment_id = parse_id(&payment_id, "payment")?;
            service.reject(payment_id)?;
            let payment = service.find_payment_by_id(payment_id)?;
            let account = service.find_account_by_id(payment.account_id)?;
            println!(
                "Rejected payment {}. Account {} balance: {}",
                payment_id,
                account.id,
                format_money(account.balance)
            );
        }

        Commands::Repeat { payment_id } => {
            let payment = service.repeat(parse_id(&payment_id, "payment")?)?;
            print_payment_created("Repeated", &payment);
        }

        Commands::Favorite { payment_id, name } => {
            let favorite = service.favorite_payment(parse_id(&payment_id, "payment")?, name)?;
            println!(
                "Saved favorite '{}': {} {} ({})",
                favorite.name,
                format_money(favorite.amount),
                favorite.category,
                favorite.id
            );
        }

        Commands::PayFavorite { favorite_id } => {
            let payment = service.pay_from_favorite(parse_id(&favorite_id, "favorite")?)?;
            print_payment_created("Paid", &payment);
        }

        Commands::Account { id, json } => {
            let account = service.find_account_by_id(id)?;
            if json {
                print_json(account)?;
            } else {
                print_accounts(&[account]);
            }
        }

        Commands::Accounts { json } => {
            let accounts = service.list_accounts();
            if json {
                print_json(&accounts)?;
            } else if accounts.is_empty() {
                println!("No accounts found.");
            } else {
                print_accounts(&accounts);
            }
        }

        Commands::Payment { id, json } => {
            let payment = service.find_payment_by_id(parse_id(&id, "payment")?)?;
            if json {
                print_json(payment)?;
            } else {
                println!("Payment: {}", payment.id);
                println!("  Account:  {}", payment.account_id);
                println!("  Amount:   {}", format_money(payment.amount));
                println!("  Category: {}", payment.category);
                println!("  Status:   {}", payment.status);
            }
        }

        Commands::Favorites { json } => {
            let favorites = service.list_favorites();
            if json {
                print_json(&favorites)?;
            } else if favorites.is_empty() {
                println!("No favorites found.");
            } else {
                print_favorites(&favorites);
            }
        }

        Commands::History {
            account_id,
            output,
            chunk_size,
        } => {
            fs::create_dir_all(&output)
                .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
            let files = Exporter::new(service).export_account_history(account_id, &output, chunk_size)?;
            eprintln!(
                "Exported history of account {} to {} file(s) in {}",
                account_id,
                files,
                output.display()
            );
        }

        Commands::ExportLegacy { path } => {
            let count = Exporter::new(service).export_legacy(&path)?;
            eprintln!("Exported {} accounts to {}", count, path.display());
        }

        Commands::ImportLegacy { path } => {
            let count = Importer::new(service)
                .import_legacy(&path)
                .with_context(|| format!("Failed to import legacy file: {}", path.display()))?;
            eprintln!("Imported {} accounts from {}", count, path.display());
        }
    }
    Ok(())
}

fn parse_amount(amount: &str) -> Result<Money> {
    parse_money(amount).with_context(|| format!("Invalid amount '{}'. Use '50.00' or '50'", amount))
}

fn parse_id(id: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(id).with_context(|| format!("Invalid {} ID format (expected UUID)", what))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_payment_created(verb: &str, payment: &Payment) {
    println!(
        "{} {} from account {} ({}): {}",
        verb,
        format_money(payment.amount),
        payment.account_id,
        payment.category,
        payment.id
    );
}

fn print_accounts(accounts: &[&Account]) {
    println!("{:<6} {:<20} {:>14}", "ID", "PHONE", "BALANCE");
    println!("{}", "-".repeat(42));
    for account in accounts {
        println!(
            "{:<6} {:<20} {:>14}",
            account.id,
            account.phone.as_str(),
            format_money(account.balance)
        );
    }
}

fn print_favorites(favorites: &[&Favorite]) {
    println!(
        "{:<36} {:<8} {:<20} {:<12} {:>12}",
        "ID", "ACCOUNT", "NAME", "CATEGORY", "AMOUNT"
    );
    println!("{}", "-".repeat(92));
    for favorite in favorites {
        println!(
            "{:<36} {:<8} {:<20} {:<12} {:>12}",
            favorite.id,
            favorite.account_id,
            truncate(&favorite.name, 20),
            truncate(&favorite.category, 12),
            format_money(favorite.amount)
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
