//! Benchmark driver binary for the order book engine.

mod bench;
mod replay;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[clap(name = "lob-bench")]
#[clap(about = "Benchmark driver for the limit order book engine")]
struct Cli {
    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the canonical random order files (1k / 10k / 100k rows)
    Generate {
        /// Write a single file with this many rows instead
        #[clap(long)]
        count: Option<usize>,

        /// Output path for --count mode
        #[clap(long, default_value = "orders.csv")]
        out: PathBuf,

        /// RNG seed
        #[clap(long, default_value_t = lob_csv::DEFAULT_SEED)]
        seed: u64,
    },

    /// Single-threaded submit latency benchmark
    Latency {
        /// Number of random orders to submit
        #[clap(long, default_value_t = 100_000)]
        orders: usize,

        /// RNG seed for the order stream
        #[clap(long, default_value_t = lob_csv::DEFAULT_SEED)]
        seed: u64,
    },

    /// Per time-in-force timing loops (GTC rest, IOC cross, FOK cross)
    OrderTypes,

    /// Best-price and depth-snapshot query benchmark on a deep book
    MarketData,

    /// Replay CSV order files through the engine
    Replay {
        /// Order files to replay, in order
        files: Vec<PathBuf>,

        /// Also render an HTML performance report
        #[clap(long)]
        html: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Command::Generate { count, out, seed } => {
            if let Some(count) = count {
                lob_csv::generate_file(&out, count, seed)?;
                info!(path = %out.display(), count, seed, "wrote order file");
            } else {
                for (name, count) in [
                    ("orders_small.csv", 1_000),
                    ("orders_medium.csv", 10_000),
                    ("orders_large.csv", 100_000),
                ] {
                    lob_csv::generate_file(name, count, seed)?;
                    info!(path = name, count, seed, "wrote order file");
                }
            }
        }
        Command::Latency { orders, seed } => bench::run_latency(orders, seed),
        Command::OrderTypes => bench::run_order_types(),
        Command::MarketData => bench::run_market_data(),
        Command::Replay { files, html } => replay::run(&files, html.as_deref())?,
    }

    Ok(())
}
