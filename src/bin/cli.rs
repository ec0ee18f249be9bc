//! urlstore CLI
//!
//! Command-line tool for working with a urlstore log file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use urlstore::wal::{WalReader, WalRecovery};
use urlstore::{Config, Store, SyncStrategy};

/// urlstore CLI
#[derive(Parser, Debug)]
#[command(name = "urlstore-cli")]
#[command(about = "CLI for the urlstore key-value log")]
#[command(version)]
struct Args {
    /// Log file
    #[arg(short, long, default_value = "store.db")]
    log: PathBuf,

    /// Maximum candidate keys tried per put
    #[arg(short, long, default_value = "64")]
    max_attempts: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a value and print its generated key
    Put {
        /// The value to store
        value: String,
    },

    /// Get a value by key
    Get {
        /// The key to look up
        key: String,
    },

    /// Print the number of entries
    Count,

    /// Check the log for damage without modifying it
    Verify,

    /// Print every valid record in log order
    Dump,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,urlstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    }
}

/// Run a command; returns the process exit code
fn run(args: Args) -> urlstore::Result<i32> {
    match &args.command {
        Commands::Verify => {
            let result = WalRecovery::verify(&args.log)?;
            println!(
                "records: {}\ncorrupted: {}\nvalid bytes: {}\ndamaged tail: {}",
                result.entries_recovered,
                result.entries_corrupted,
                result.valid_bytes,
                result.was_truncated
            );
            Ok(if result.was_truncated { 2 } else { 0 })
        }
        Commands::Dump => {
            for record in WalReader::open(&args.log)?.records() {
                let record = record?;
                println!("{}\t{}", record.key, record.value);
            }
            Ok(0)
        }
        Commands::Put { value } => {
            let store = open_store(&args)?;
            println!("{}", store.put(value)?);
            store.close()?;
            Ok(0)
        }
        Commands::Get { key } => {
            let store = open_store(&args)?;
            match store.get(key) {
                Some(value) => {
                    println!("{}", value);
                    Ok(0)
                }
                None => {
                    eprintln!("key not found: {}", key);
                    Ok(1)
                }
            }
        }
        Commands::Count => {
            let store = open_store(&args)?;
            println!("{}", store.count());
            Ok(0)
        }
    }
}

fn open_store(args: &Args) -> urlstore::Result<Store> {
    let config = Config::builder()
        .log_path(&args.log)
        .sync_strategy(SyncStrategy::EveryWrite)
        .max_put_attempts(args.max_attempts)
        .build();
    Store::open(config)
}
