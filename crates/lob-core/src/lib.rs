//! lob-core
//!
//! Price-time priority limit order book for a single instrument:
//! - fixed-point price/quantity model (integer ticks, no floats in the
//!   hot path)
//! - per-price FIFO queues with O(1) interior removal
//! - ordered side books with O(1) best-price access and depth snapshots
//! - matching engine with GTC / IOC / FOK and Limit / Market semantics,
//!   order-indexed O(1) cancellation, and relaxed-atomic statistics
//!
//! The engine is a pure in-memory library: no I/O, no logging, no
//! threads. Mutating calls must be serialized by the caller.

pub mod error;
pub mod level;
pub mod order;
pub mod order_book;
pub mod order_type;
pub mod price;
pub mod side;
pub mod side_book;
pub mod stats;

pub use error::Reject;
pub use order::{Fill, Order};
pub use order_book::OrderBook;
pub use order_type::{OrderType, TimeInForce};
pub use price::{price_from_ticks, ticks_from_price, Quantity, Tick, NO_PRICE, TICK_PRECISION};
pub use side::Side;
pub use side_book::{LevelSnapshot, SideBook};
pub use stats::Stats;
