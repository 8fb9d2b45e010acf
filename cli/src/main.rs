//! `txn`: command-line front end for the transactions API.
//!
//! Reads `API_URL` / `API_TIMEOUT_SECS` (a `.env` file is honoured), runs one
//! operation and prints the result as pretty JSON on stdout. Logs go to
//! stderr and are controlled by `RUST_LOG`.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transaction_core::{ApiError, Config, TransactionApi, TransactionInput, TransactionStatus};

#[derive(Parser, Debug)]
#[command(name = "txn", version, about = "Command-line client for the transactions API")]
struct Cli {
    /// API base URL, overrides API_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List transactions, optionally filtered by sender, receiver or status
    List(ListArgs),
    /// Show one transaction
    Get { id: String },
    /// Create a transaction
    Create(InputArgs),
    /// Replace the writable fields of a transaction
    Update {
        id: String,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Delete a transaction
    Delete { id: String },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long, conflicts_with_all = ["receiver", "status"])]
    sender: Option<String>,
    #[arg(long, conflicts_with = "status")]
    receiver: Option<String>,
    #[arg(long)]
    status: Option<TransactionStatus>,
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(long)]
    sender: String,
    #[arg(long)]
    receiver: String,
    #[arg(long, allow_hyphen_values = true)]
    amount: Decimal,
    #[arg(long)]
    currency: String,
    #[arg(long)]
    description: Option<String>,
    /// PENDING, COMPLETED, FAILED or CANCELLED (defaults to PENDING on create)
    #[arg(long)]
    status: Option<TransactionStatus>,
}

impl InputArgs {
    fn into_input(self, default_status: Option<TransactionStatus>) -> Result<TransactionInput> {
        let status = self
            .status
            .or(default_status)
            .context("--status is required")?;
        Ok(TransactionInput {
            sender: self.sender,
            receiver: self.receiver,
            amount: self.amount,
            currency: self.currency,
            description: self.description,
            status,
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    info!(base_url = %config.base_url, "using transactions API");
    let api = TransactionApi::from_config(&config);

    match cli.command {
        Command::List(args) => {
            let txs = match (args.sender, args.receiver, args.status) {
                (Some(sender), _, _) => api.list_by_sender(&sender)?,
                (_, Some(receiver), _) => api.list_by_receiver(&receiver)?,
                (_, _, Some(status)) => api.list_by_status(status)?,
                (None, None, None) => api.list_all()?,
            };
            print_json(&txs)
        }
        Command::Get { id } => print_json(&api.get_by_id(&id)?),
        Command::Create(args) => {
            let input = args.into_input(Some(TransactionStatus::Pending))?;
            print_json(&api.create(&input)?)
        }
        Command::Update { id, input } => {
            let input = input.into_input(None)?;
            print_json(&api.update(&id, &input)?)
        }
        Command::Delete { id } => {
            api.delete_by_id(&id)?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

fn report(err: &anyhow::Error) {
    eprintln!("error: {err:#}");
    if let Some(ApiError::RequestFailure { status, body, .. }) = err.downcast_ref::<ApiError>() {
        eprintln!("server answered HTTP {status}");
        if !body.is_empty() {
            eprintln!("{body}");
        }
    }
}

/// Filter used when `RUST_LOG` is unset; keeps stderr quiet on success.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
