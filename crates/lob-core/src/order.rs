//! Order and fill records exchanged with the engine.

use crate::order_type::{OrderType, TimeInForce};
use crate::price::{Quantity, Tick};
use crate::side::Side;

/// An order handed to [`OrderBook::submit`](crate::OrderBook::submit).
///
/// The caller assigns the id; it must be nonzero and must not collide
/// with an order currently resting in the book. The engine takes
/// ownership of the value; once submitted, resting state belongs to the
/// book exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// Caller-assigned unique id. Zero is invalid.
    pub id: u64,
    pub side: Side,
    /// Limit price in ticks. Ignored for Market orders.
    pub price: Tick,
    /// Quantity to trade; must be nonzero.
    pub quantity: Quantity,
    pub order_type: OrderType,
    pub tif: TimeInForce,
    /// Opaque account tag; stored, never interpreted.
    pub account: u32,
    /// Caller-supplied timestamp used for tie-breaking. Zero lets the
    /// engine assign its own monotonic sequence number.
    pub timestamp: u64,
}

impl Order {
    /// Convenience constructor for a GTC limit order.
    pub fn limit(id: u64, side: Side, price: Tick, quantity: Quantity) -> Self {
        Order {
            id,
            side,
            price,
            quantity,
            order_type: OrderType::Limit,
            tif: TimeInForce::Gtc,
            account: 0,
            timestamp: 0,
        }
    }

    /// Convenience constructor for a market order (always IOC).
    pub fn market(id: u64, side: Side, quantity: Quantity) -> Self {
        Order {
            id,
            side,
            price: 0,
            quantity,
            order_type: OrderType::Market,
            tif: TimeInForce::Ioc,
            account: 0,
            timestamp: 0,
        }
    }

    /// Same order with a different time-in-force.
    pub fn with_tif(mut self, tif: TimeInForce) -> Self {
        self.tif = tif;
        self
    }
}

/// One matched quantity between an aggressor and a resting maker.
///
/// A single submission emits zero or more fills, in price-priority then
/// time-priority order. The price is always the maker's resting price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub aggressor_id: u64,
    pub maker_id: u64,
    /// Execution price in ticks (the maker's resting price).
    pub price: Tick,
    pub quantity: Quantity,
    /// Engine sequence clock at execution time.
    pub timestamp: u64,
}
