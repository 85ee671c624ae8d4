//! Property tests: structural invariants, conservation of quantity, and
//! price-time priority under randomized operation sequences.
//!
//! A side model tracks the remaining quantity of every resting order
//! from the emitted fills alone, then is reconciled against the book's
//! own accounting after every operation.

use std::collections::HashMap;

use proptest::prelude::*;

use lob_core::{Fill, Order, OrderBook, Side, TimeInForce};

#[derive(Debug, Clone)]
enum Op {
    Limit { buy: bool, price_step: i64, qty: u32, tif: u8 },
    Market { buy: bool, qty: u32 },
    Cancel { back: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), 0i64..20, 1u32..100, 0u8..3).prop_map(|(buy, price_step, qty, tif)| {
            Op::Limit { buy, price_step, qty, tif }
        }),
        (any::<bool>(), 1u32..100).prop_map(|(buy, qty)| Op::Market { buy, qty }),
        (0usize..64).prop_map(|back| Op::Cancel { back }),
    ]
}

fn side_of(buy: bool) -> Side {
    if buy {
        Side::Buy
    } else {
        Side::Sell
    }
}

fn tif_of(code: u8) -> TimeInForce {
    match code {
        0 => TimeInForce::Gtc,
        1 => TimeInForce::Ioc,
        _ => TimeInForce::Fok,
    }
}

/// Ledger of quantity as the model sees it.
#[derive(Default)]
struct Ledger {
    submitted: u64,
    filled: u64,
    discarded: u64,
    rejected_fok: u64,
    cancelled: u64,
    resting: HashMap<u64, u32>,
}

impl Ledger {
    fn apply_fills(&mut self, fills: &[Fill]) -> u64 {
        let mut aggressor_total = 0u64;
        for fill in fills {
            aggressor_total += fill.quantity as u64;
            self.filled += fill.quantity as u64;
            let maker = self
                .resting
                .get_mut(&fill.maker_id)
                .expect("fill names a maker the model is not tracking");
            *maker -= fill.quantity;
            if *maker == 0 {
                self.resting.remove(&fill.maker_id);
            }
        }
        aggressor_total
    }

    fn resting_total(&self) -> u64 {
        self.resting.values().map(|&q| q as u64).sum()
    }
}

fn check_structure(book: &OrderBook, ledger: &Ledger) {
    assert_eq!(book.order_count(), ledger.resting.len() as u64);

    let volume = book.total_volume(Side::Buy) + book.total_volume(Side::Sell);
    assert_eq!(volume, ledger.resting_total());

    for side in [Side::Buy, Side::Sell] {
        let levels = book.top_levels(side, usize::MAX);
        let level_sum: u64 = levels.iter().map(|l| l.quantity).sum();
        assert_eq!(level_sum, book.total_volume(side));
        assert!(levels.iter().all(|l| l.count > 0 && l.quantity > 0));
    }

    if let (Some(bid), Some(ask)) = (book.bid(), book.ask()) {
        assert!(bid < ask, "book crossed at rest: bid {bid} >= ask {ask}");
    }

    // Conservation: everything admitted is accounted for exactly once on
    // each side of every fill.
    assert_eq!(
        ledger.submitted,
        2 * ledger.filled
            + ledger.resting_total()
            + ledger.discarded
            + ledger.cancelled
            + ledger.rejected_fok
    );
}

proptest! {
    #[test]
    fn random_operations_preserve_invariants(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut book = OrderBook::with_capacity(64);
        let mut ledger = Ledger::default();
        let mut ids: Vec<u64> = Vec::new();
        let mut next_id = 1u64;
        let mut fills = Vec::new();

        for op in ops {
            fills.clear();
            match op {
                Op::Limit { buy, price_step, qty, tif } => {
                    let id = next_id;
                    next_id += 1;
                    let price = 1_000_000 + price_step * 10_000;
                    let order = Order::limit(id, side_of(buy), price, qty).with_tif(tif_of(tif));
                    let admitted = book.submit(order, Some(&mut fills));

                    ledger.submitted += qty as u64;
                    match tif_of(tif) {
                        TimeInForce::Fok if !admitted => {
                            ledger.rejected_fok += qty as u64;
                            prop_assert!(fills.is_empty());
                        }
                        _ => {
                            prop_assert!(admitted);
                            let matched = ledger.apply_fills(&fills);
                            let leftover = qty as u64 - matched;
                            match tif_of(tif) {
                                TimeInForce::Gtc => {
                                    if leftover > 0 {
                                        ledger.resting.insert(id, leftover as u32);
                                        ids.push(id);
                                    }
                                }
                                TimeInForce::Ioc => ledger.discarded += leftover,
                                TimeInForce::Fok => prop_assert_eq!(leftover, 0),
                            }
                        }
                    }
                    if tif_of(tif) == TimeInForce::Fok && !fills.is_empty() {
                        // accepted FOK never rests
                        prop_assert!(!ledger.resting.contains_key(&id));
                    }
                }
                Op::Market { buy, qty } => {
                    let id = next_id;
                    next_id += 1;
                    let admitted = book.submit(Order::market(id, side_of(buy), qty), Some(&mut fills));
                    prop_assert!(admitted);
                    ledger.submitted += qty as u64;
                    let matched = ledger.apply_fills(&fills);
                    ledger.discarded += qty as u64 - matched;
                }
                Op::Cancel { back } => {
                    if ids.is_empty() {
                        prop_assert!(!book.cancel(9_999_999));
                        continue;
                    }
                    let id = ids[back % ids.len()];
                    let hit = book.cancel(id);
                    prop_assert_eq!(hit, ledger.resting.contains_key(&id));
                    if hit {
                        let remaining = ledger.resting.remove(&id).unwrap_or(0);
                        ledger.cancelled += remaining as u64;
                    }
                }
            }

            check_structure(&book, &ledger);
        }
    }

    #[test]
    fn fills_follow_price_then_time_priority(
        makers in prop::collection::vec((0i64..8, 1u32..50), 1..40),
        taker_qty in 1u32..1500,
    ) {
        let mut book = OrderBook::new();
        for (i, (step, qty)) in makers.iter().enumerate() {
            let price = 1_000_000 + step * 10_000;
            book.submit(Order::limit(i as u64 + 1, Side::Sell, price, *qty), None);
        }

        let mut fills = Vec::new();
        book.submit(Order::market(1_000_000, Side::Buy, taker_qty), Some(&mut fills));

        // Prices never improve backwards.
        for pair in fills.windows(2) {
            prop_assert!(pair[0].price <= pair[1].price);
            if pair[0].price == pair[1].price {
                // Sequential ids were inserted in id order at each price.
                prop_assert!(pair[0].maker_id < pair[1].maker_id);
            }
        }

        let total: u64 = fills.iter().map(|f| f.quantity as u64).sum();
        prop_assert!(total <= taker_qty as u64);
    }

    #[test]
    fn rejected_fok_changes_nothing(
        makers in prop::collection::vec((0i64..5, 1u32..30), 0..10),
        extra in 1u32..100,
    ) {
        let mut book = OrderBook::new();
        for (i, (step, qty)) in makers.iter().enumerate() {
            book.submit(
                Order::limit(i as u64 + 1, Side::Buy, 1_000_000 - step * 10_000, *qty),
                None,
            );
        }

        let available = book.total_volume(Side::Buy);
        let bids_before = book.top_levels(Side::Buy, usize::MAX);
        let fills_before = book.stats().fills_generated();
        let orders_before = book.stats().orders_processed();

        // Ask for strictly more than the whole side holds, priced to
        // reach every level.
        let qty = (available + extra as u64).min(u32::MAX as u64) as u32;
        let mut fills = Vec::new();
        let admitted = book.submit(
            Order::limit(777_777, Side::Sell, 900_000, qty).with_tif(TimeInForce::Fok),
            Some(&mut fills),
        );

        prop_assert!(!admitted);
        prop_assert!(fills.is_empty());
        prop_assert_eq!(book.top_levels(Side::Buy, usize::MAX), bids_before);
        prop_assert_eq!(book.stats().fills_generated(), fills_before);
        prop_assert_eq!(book.stats().orders_processed(), orders_before);
        prop_assert_eq!(book.order_count() as usize, makers.len());
    }
}
