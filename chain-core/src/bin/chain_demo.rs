//! Chain demo CLI - build a small chain and print it
//!
//! Usage:
//!     chain-demo
//!     chain-demo "Alice pays Bob 5" "Bob pays Charlie 2"
//!     chain-demo --json
//!     chain-demo --config chain.json
//!
//! Log verbosity follows `RUST_LOG` (default `chain_core=info`).

use std::path::PathBuf;

use clap::Parser;
use chain_core::{block::Block, ChainConfig, ChainService, SystemClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PAYLOADS: [&str; 3] = ["Alice pays Bob 5", "Bob pays Charlie 2", "Charlie pays Dave 1"];

#[derive(Parser, Debug)]
#[command(name = "chain-demo")]
#[command(about = "Build a demo hash chain and print every block")]
#[command(version)]
struct Args {
    /// Payloads to append after the genesis block
    payloads: Vec<String>,

    /// Path to a JSON chain configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output the chain as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chain_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let mut chain = ChainService::with_config(SystemClock::new(), config);

    let payloads: Vec<String> = if args.payloads.is_empty() {
        DEFAULT_PAYLOADS.iter().map(|p| p.to_string()).collect()
    } else {
        args.payloads
    };

    for payload in &payloads {
        if let Err(e) = chain.append(payload) {
            eprintln!("Skipped {:?}: {}", payload, e);
        }
    }

    if args.json {
        match serde_json::to_string_pretty(chain.blocks()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing chain: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        for block in chain.blocks() {
            print_block(block);
        }
    }

    let verification = chain.verify();
    if verification.is_valid {
        tracing::info!("Chain of {} blocks is valid", verification.block_count);
    } else {
        eprintln!(
            "Chain is INVALID: {}",
            verification.message.unwrap_or_default()
        );
        std::process::exit(2);
    }
}

fn load_config(path: &Option<PathBuf>) -> chain_core::Result<ChainConfig> {
    match path {
        Some(path) => ChainConfig::from_file(path),
        None => ChainConfig::from_env(),
    }
}

fn print_block(block: &Block) {
    let predecessor = if block.is_genesis() {
        "None"
    } else {
        block.predecessor_hash()
    };

    println!("Index: {}", block.index());
    println!("Payload: {}", block.payload());
    println!("Created: {}", block.created_at().to_rfc3339());
    println!("Predecessor Hash: {}", predecessor);
    println!("Hash: {}", block.hash());
    println!("{}", "-".repeat(50));
}
