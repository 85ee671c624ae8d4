//! Fixed-point price and quantity model.
//!
//! All prices inside the engine are integer ticks: the decimal price
//! multiplied by [`TICK_PRECISION`]. Comparisons, arithmetic and storage
//! happen on ticks only; floating point appears at the API boundary when
//! a human-readable price is needed.

/// Integer-encoded price: decimal price x [`TICK_PRECISION`].
pub type Tick = i64;

/// Order quantity in whole shares / contracts.
pub type Quantity = u32;

/// Ticks per whole currency unit (4 decimal places).
pub const TICK_PRECISION: i64 = 10_000;

/// Sentinel returned by the legacy best-price accessors on an empty side.
pub const NO_PRICE: Tick = 0;

/// Convert a decimal price to ticks, rounding to the nearest tick.
pub fn ticks_from_price(price: f64) -> Tick {
    (price * TICK_PRECISION as f64).round() as Tick
}

/// Convert ticks back to a decimal price for display.
pub fn price_from_ticks(tick: Tick) -> f64 {
    tick as f64 / TICK_PRECISION as f64
}
