//! Single-threaded benchmark runs.
//!
//! All timing is per-submit wall clock around the engine call; the
//! engine itself never touches a clock.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use lob_core::{Order, OrderBook, Side, TimeInForce, TICK_PRECISION};

/// Ids 1..=100 hold the seeded liquidity; benchmark streams start here.
pub const FIRST_STREAM_ID: u64 = 1_000;

/// Pre-populate 50 bid and 50 ask levels around $520.
///
/// Bids $520.00 stepping down a dime per level, asks $520.01 stepping
/// up, sizes growing away from the touch.
pub fn seed_liquidity(book: &mut OrderBook) {
    let mut id = 1u64;
    for i in 0..50i64 {
        let price = (52_000 - i * 10) * TICK_PRECISION / 100;
        let quantity = 100 + i as u32 * 5;
        book.submit(Order::limit(id, Side::Buy, price, quantity), None);
        id += 1;
    }
    for i in 0..50i64 {
        let price = (52_001 + i * 10) * TICK_PRECISION / 100;
        let quantity = 100 + i as u32 * 5;
        book.submit(Order::limit(id, Side::Sell, price, quantity), None);
        id += 1;
    }
}

/// Percentile summary of per-operation latencies.
#[derive(Debug, Clone, Serialize)]
pub struct LatencySummary {
    pub operations: u64,
    pub fills: u64,
    pub total_micros: u64,
    pub avg_ns: f64,
    pub median_ns: u64,
    pub min_ns: u64,
    pub max_ns: u64,
    pub p95_ns: u64,
    pub p99_ns: u64,
    pub throughput_per_sec: f64,
}

impl LatencySummary {
    /// Sorts the sample buffer in place.
    pub fn from_samples(samples: &mut [u64], total_micros: u64, fills: u64) -> Self {
        if samples.is_empty() {
            return LatencySummary {
                operations: 0,
                fills,
                total_micros,
                avg_ns: 0.0,
                median_ns: 0,
                min_ns: 0,
                max_ns: 0,
                p95_ns: 0,
                p99_ns: 0,
                throughput_per_sec: 0.0,
            };
        }
        samples.sort_unstable();
        let operations = samples.len() as u64;
        let sum: u64 = samples.iter().sum();

        let pct = |p: f64| samples[((samples.len() as f64 * p) as usize).min(samples.len() - 1)];

        LatencySummary {
            operations,
            fills,
            total_micros,
            avg_ns: sum as f64 / operations as f64,
            median_ns: samples[samples.len() / 2],
            min_ns: samples[0],
            max_ns: samples[samples.len() - 1],
            p95_ns: pct(0.95),
            p99_ns: pct(0.99),
            throughput_per_sec: operations as f64 * 1e6 / total_micros as f64,
        }
    }

    pub fn print(&self, title: &str) {
        println!("=== {title} ===");
        println!("Operations:  {}", self.operations);
        println!("Fills:       {}", self.fills);
        println!("Total time:  {} us", self.total_micros);
        println!(
            "Throughput:  {:.0} ops/sec",
            self.throughput_per_sec
        );
        println!("Latency:");
        println!("  avg:    {:.2} ns ({:.3} us)", self.avg_ns, self.avg_ns / 1_000.0);
        println!("  median: {} ns", self.median_ns);
        println!("  min:    {} ns", self.min_ns);
        println!("  max:    {} ns", self.max_ns);
        println!("  p95:    {} ns", self.p95_ns);
        println!("  p99:    {} ns", self.p99_ns);
    }
}

fn random_order(rng: &mut StdRng, id: u64) -> Order {
    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
    let price = rng.gen_range(50_000..55_000i64) * TICK_PRECISION / 100;
    let quantity = rng.gen_range(1..=1_000u32);
    Order::limit(id, side, price, quantity)
}

/// Submit `orders` random limit orders against seeded liquidity and
/// report per-submit latency percentiles.
pub fn run_latency(orders: usize, seed: u64) {
    info!(orders, seed, "running single-threaded latency benchmark");

    let mut book = OrderBook::with_capacity(orders + 128);
    seed_liquidity(&mut book);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut latencies = Vec::with_capacity(orders);
    let mut fills = Vec::with_capacity(32);
    let mut total_fills = 0u64;

    let start = Instant::now();
    for i in 0..orders {
        let order = random_order(&mut rng, FIRST_STREAM_ID + i as u64);

        fills.clear();
        let begin = Instant::now();
        book.submit(order, Some(&mut fills));
        let elapsed = begin.elapsed();

        latencies.push(elapsed.as_nanos() as u64);
        total_fills += fills.len() as u64;
    }
    let total_micros = start.elapsed().as_micros() as u64;

    let summary = LatencySummary::from_samples(&mut latencies, total_micros, total_fills);
    summary.print("SINGLE-THREADED LATENCY BENCHMARK");

    println!();
    println!("Resting orders: {}", book.order_count());
    println!("Engine orders processed: {}", book.stats().orders_processed());
    println!("Engine fills generated:  {}", book.stats().fills_generated());
}

/// Time 10k submissions of each time-in-force flavor.
pub fn run_order_types() {
    const ITERATIONS: usize = 10_000;

    info!(iterations = ITERATIONS, "running order-type benchmark");

    let mut book = OrderBook::with_capacity(ITERATIONS * 2);
    seed_liquidity(&mut book);
    let mut next_id = FIRST_STREAM_ID;

    // GTC rests below the market.
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        book.submit(
            Order::limit(next_id, Side::Buy, 510 * TICK_PRECISION, 10),
            None,
        );
        next_id += 1;
    }
    let gtc_micros = start.elapsed().as_micros();

    // IOC crosses the touch.
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        book.submit(
            Order::limit(next_id, Side::Buy, 52_010 * TICK_PRECISION / 100, 5)
                .with_tif(TimeInForce::Ioc),
            None,
        );
        next_id += 1;
    }
    let ioc_micros = start.elapsed().as_micros();

    // FOK hits the resting bids.
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        book.submit(
            Order::limit(next_id, Side::Sell, 510 * TICK_PRECISION, 5)
                .with_tif(TimeInForce::Fok),
            None,
        );
        next_id += 1;
    }
    let fok_micros = start.elapsed().as_micros();

    println!("=== ORDER TYPE BENCHMARK ({ITERATIONS} orders each) ===");
    for (name, micros) in [("GTC", gtc_micros), ("IOC", ioc_micros), ("FOK", fok_micros)] {
        println!(
            "  {name}: {micros} us ({:.3} us/order)",
            micros as f64 / ITERATIONS as f64
        );
    }
}

/// Populate a deep book and time the read-side queries.
pub fn run_market_data() {
    const LEVELS: i64 = 1_000;
    const ORDERS_PER_LEVEL: usize = 10;
    const QUERIES: usize = 100_000;
    const SNAPSHOTS: usize = 1_000;

    info!(levels = LEVELS, "running market-data benchmark");

    let mut book = OrderBook::with_capacity((LEVELS as usize) * ORDERS_PER_LEVEL * 2);
    let mut id = 1u64;
    for level in 0..LEVELS {
        for _ in 0..ORDERS_PER_LEVEL {
            book.submit(
                Order::limit(id, Side::Buy, (50_000 - level) * TICK_PRECISION / 100, 100),
                None,
            );
            book.submit(
                Order::limit(id + 1, Side::Sell, (50_001 + level) * TICK_PRECISION / 100, 100),
                None,
            );
            id += 2;
        }
    }

    println!("Book populated with {} resting orders", book.order_count());

    let start = Instant::now();
    let mut checksum = 0i64;
    for _ in 0..QUERIES {
        checksum = checksum.wrapping_add(book.best_bid()).wrapping_add(book.best_ask());
    }
    let query_nanos = start.elapsed().as_nanos();
    std::hint::black_box(checksum);

    println!("Best bid/ask queries:");
    println!("  {QUERIES} queries in {} us", query_nanos / 1_000);
    println!("  {:.2} ns per query", query_nanos as f64 / QUERIES as f64);

    let start = Instant::now();
    for _ in 0..SNAPSHOTS {
        let bids = book.top_levels(Side::Buy, 10);
        let asks = book.top_levels(Side::Sell, 10);
        std::hint::black_box((bids, asks));
    }
    let snap_micros = start.elapsed().as_micros();

    println!("Depth snapshots (10 levels/side):");
    println!("  {SNAPSHOTS} snapshots in {snap_micros} us");
    println!("  {:.2} us per snapshot", snap_micros as f64 / SNAPSHOTS as f64);
}
