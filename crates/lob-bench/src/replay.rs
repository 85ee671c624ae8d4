//! CSV replay: feed order files through the engine and measure.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use lob_core::OrderBook;
use lob_csv::read_orders;

use crate::bench::{seed_liquidity, LatencySummary, FIRST_STREAM_ID};
use crate::report::{render_html, RunReport};

/// Replay each file into a fresh, liquidity-seeded engine. With `html`
/// set, also render the combined performance report.
pub fn run(files: &[PathBuf], html: Option<&Path>) -> Result<()> {
    anyhow::ensure!(!files.is_empty(), "no order files given");

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        reports.push(replay_file(file)?);
    }

    if let Some(path) = html {
        let page = render_html(&reports);
        std::fs::write(path, page)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "wrote HTML report");
    }

    Ok(())
}

fn replay_file(path: &Path) -> Result<RunReport> {
    info!(file = %path.display(), "replaying order file");

    let reader = BufReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    );
    let parsed = read_orders(reader)?;
    if parsed.skipped > 0 {
        warn!(skipped = parsed.skipped, "dropped malformed rows");
    }
    anyhow::ensure!(
        !parsed.orders.is_empty(),
        "{} contains no valid orders",
        path.display()
    );

    let mut book = OrderBook::with_capacity(parsed.orders.len() + 128);
    seed_liquidity(&mut book);

    let mut latencies = Vec::with_capacity(parsed.orders.len());
    let mut fills = Vec::with_capacity(32);
    let mut total_fills = 0u64;
    let mut rejected = 0u64;

    let start = Instant::now();
    for (i, csv_order) in parsed.orders.iter().enumerate() {
        let order = csv_order.into_order(FIRST_STREAM_ID + i as u64);

        fills.clear();
        let begin = Instant::now();
        let admitted = book.submit(order, Some(&mut fills));
        let elapsed = begin.elapsed();

        latencies.push(elapsed.as_nanos() as u64);
        total_fills += fills.len() as u64;
        if !admitted {
            rejected += 1;
        }
    }
    let total_micros = start.elapsed().as_micros() as u64;

    let summary = LatencySummary::from_samples(&mut latencies, total_micros, total_fills);
    summary.print(&format!("REPLAY {}", path.display()));
    println!("Rejected (FOK/validation): {rejected}");
    println!("Resting orders after run:  {}", book.order_count());
    println!();

    Ok(RunReport {
        file: path.display().to_string(),
        skipped_rows: parsed.skipped as u64,
        rejected,
        resting_after: book.order_count(),
        summary,
    })
}
