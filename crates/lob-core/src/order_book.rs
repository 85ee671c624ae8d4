//! Single-instrument order book with price-time priority matching.
//!
//! One instance per instrument:
//! - Bids: descending by price (best = highest).
//! - Asks: ascending by price (best = lowest).
//! - FIFO (time priority) within each price level.
//!
//! Resting orders live in a slab arena; each level queue is a doubly
//! linked list of arena slots and the order-id index maps id to a stable
//! locator, so cancellation unlinks in O(1) without scanning.
//!
//! All mutating operations must be serialized by the caller; only the
//! [`Stats`] block is safe to read from other threads.

use hashbrown::HashMap;
use slab::Slab;

use crate::error::Reject;
use crate::level::OrderNode;
use crate::order::{Fill, Order};
use crate::order_type::{OrderType, TimeInForce};
use crate::price::{Quantity, Tick, NO_PRICE};
use crate::side::Side;
use crate::side_book::{LevelSnapshot, SideBook};
use crate::stats::Stats;

/// Where a resting order lives: its side, its level's price, and its
/// arena slot. Stable for the lifetime of the order.
#[derive(Debug, Clone, Copy)]
struct Locator {
    side: Side,
    price: Tick,
    slot: usize,
}

/// Price-time priority limit order book for a single instrument.
#[derive(Debug, Clone)]
pub struct OrderBook {
    bids: SideBook,
    asks: SideBook,
    arena: Slab<OrderNode>,
    index: HashMap<u64, Locator>,
    /// Monotonic sequence clock: stamps fills and breaks timestamp ties.
    seq: u64,
    stats: Stats,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the arena and order index for an expected resting-order
    /// count. Exceeding the hint grows; it never fails.
    pub fn with_capacity(hint: usize) -> Self {
        OrderBook {
            bids: SideBook::new(Side::Buy),
            asks: SideBook::new(Side::Sell),
            arena: Slab::with_capacity(hint),
            index: HashMap::with_capacity(hint),
            seq: 0,
            stats: Stats::default(),
        }
    }

    /// Submit an order. Emitted fills are appended to `fills` when a
    /// buffer is supplied (price priority first, then time priority).
    ///
    /// Returns `true` for every admitted outcome, including a pure rest
    /// with no fills. Returns `false`, with zero state change, for
    /// validation failures and FOK orders that cannot fill entirely.
    pub fn submit(&mut self, order: Order, fills: Option<&mut Vec<Fill>>) -> bool {
        self.try_submit(order, fills).is_ok()
    }

    /// [`submit`](Self::submit) with the reject reason.
    pub fn try_submit(
        &mut self,
        order: Order,
        fills: Option<&mut Vec<Fill>>,
    ) -> Result<(), Reject> {
        self.validate(&order)?;

        // FOK: dry-run the opposite side before touching anything.
        if order.tif == TimeInForce::Fok {
            let opposite = match order.side {
                Side::Buy => &self.asks,
                Side::Sell => &self.bids,
            };
            let need = order.quantity as u64;
            if opposite.matchable_up_to(order.price, need) < need {
                return Err(Reject::InsufficientLiquidity);
            }
        }

        self.seq += 1;
        let now = self.seq;

        let remaining = self.execute(&order, fills, now);

        // GTC limit residual rests; IOC / Market residual is discarded.
        if remaining > 0 && order.order_type == OrderType::Limit && order.tif == TimeInForce::Gtc {
            self.rest(&order, remaining, now);
        }

        self.stats.record_order();
        Ok(())
    }

    /// Cancel a resting order by id.
    ///
    /// Returns `false` for any id not currently resting, including ids
    /// that already filled or were already cancelled. No fills are
    /// emitted and a miss changes nothing.
    pub fn cancel(&mut self, id: u64) -> bool {
        let Some(loc) = self.index.remove(&id) else {
            return false;
        };

        let book = match loc.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let level = book
            .level_mut(loc.price)
            .expect("order index points at a missing level");

        let remaining = self.arena[loc.slot].remaining;
        level.unlink(&mut self.arena, loc.slot);
        self.arena.remove(loc.slot);

        let emptied = level.is_empty();
        book.sub_volume(remaining as u64);
        if emptied {
            book.remove_level(loc.price);
        }
        true
    }

    /// Best bid price, or `0` when there are no bids (legacy sentinel).
    pub fn best_bid(&self) -> Tick {
        self.bids.best().unwrap_or(NO_PRICE)
    }

    /// Best ask price, or `0` when there are no asks (legacy sentinel).
    pub fn best_ask(&self) -> Tick {
        self.asks.best().unwrap_or(NO_PRICE)
    }

    /// Option-typed best bid.
    pub fn bid(&self) -> Option<Tick> {
        self.bids.best()
    }

    /// Option-typed best ask.
    pub fn ask(&self) -> Option<Tick> {
        self.asks.best()
    }

    /// Snapshot the best `depth` levels of one side, best first.
    pub fn top_levels(&self, side: Side, depth: usize) -> Vec<LevelSnapshot> {
        match side {
            Side::Buy => self.bids.top_levels(depth),
            Side::Sell => self.asks.top_levels(depth),
        }
    }

    /// Number of orders currently resting.
    pub fn order_count(&self) -> u64 {
        self.index.len() as u64
    }

    /// Total resting quantity on one side.
    pub fn total_volume(&self, side: Side) -> u64 {
        match side {
            Side::Buy => self.bids.total_volume(),
            Side::Sell => self.asks.total_volume(),
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn validate(&self, order: &Order) -> Result<(), Reject> {
        if order.quantity == 0 {
            return Err(Reject::ZeroQuantity);
        }
        if order.id == 0 {
            return Err(Reject::ZeroId);
        }
        if self.index.contains_key(&order.id) {
            return Err(Reject::DuplicateId(order.id));
        }
        if order.order_type == OrderType::Market && order.tif != TimeInForce::Ioc {
            return Err(Reject::InvalidTimeInForce);
        }
        Ok(())
    }

    /// Cross the aggressor against the opposite side, draining levels in
    /// priority order. Returns the unmatched remainder.
    fn execute(&mut self, order: &Order, mut fills: Option<&mut Vec<Fill>>, now: u64) -> Quantity {
        let OrderBook {
            bids,
            asks,
            arena,
            index,
            stats,
            ..
        } = self;
        let book = match order.side {
            Side::Buy => asks,
            Side::Sell => bids,
        };

        let mut remaining = order.quantity;

        while remaining > 0 {
            let Some(best) = book.best() else { break };
            let acceptable = match order.order_type {
                OrderType::Market => true,
                OrderType::Limit => match order.side {
                    Side::Buy => best <= order.price,
                    Side::Sell => best >= order.price,
                },
            };
            if !acceptable {
                break;
            }

            let Some(level) = book.level_mut(best) else { break };
            let mut matched_here: u64 = 0;

            // Drain the level head-first.
            while remaining > 0 {
                let Some(slot) = level.front() else { break };

                let node = &mut arena[slot];
                let take = remaining.min(node.remaining);
                let maker_id = node.id;
                node.remaining -= take;
                let maker_done = node.remaining == 0;

                level.reduce(take);
                matched_here += take as u64;
                remaining -= take;

                if let Some(out) = fills.as_mut() {
                    out.push(Fill {
                        aggressor_id: order.id,
                        maker_id,
                        price: best,
                        quantity: take,
                        timestamp: now,
                    });
                }
                stats.record_fill();

                if maker_done {
                    level.unlink(arena, slot);
                    arena.remove(slot);
                    index.remove(&maker_id);
                }
            }

            let emptied = level.is_empty();
            book.sub_volume(matched_here);
            if emptied {
                book.remove_level(best);
            }
        }

        remaining
    }

    /// Admit a residual to its own side and record it in the index.
    fn rest(&mut self, order: &Order, remaining: Quantity, now: u64) {
        let timestamp = if order.timestamp == 0 {
            now
        } else {
            order.timestamp
        };
        let slot = self.arena.insert(OrderNode {
            id: order.id,
            remaining,
            account: order.account,
            timestamp,
            prev: None,
            next: None,
        });

        let book = match order.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book.get_or_create(order.price).push_back(&mut self.arena, slot);
        book.add_volume(remaining);

        self.index.insert(
            order.id,
            Locator {
                side: order.side,
                price: order.price,
                slot,
            },
        );
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
