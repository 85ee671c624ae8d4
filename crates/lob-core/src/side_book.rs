//! One side of the book: an ordered map from price tick to price level.
//!
//! Bids rank descending (best = highest key), asks ascending (best =
//! lowest key). `BTreeMap` gives O(log P) get-or-create and O(1)-ish
//! first/last-key access for the best price; the total resting volume is
//! maintained incrementally so volume queries never walk the levels.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Rev;

use crate::level::PriceLevel;
use crate::price::{Quantity, Tick};
use crate::side::Side;

/// Value snapshot of one level, safe to hold across book mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub price: Tick,
    pub quantity: u64,
    pub count: u32,
}

/// All resting liquidity on one side of the instrument.
#[derive(Debug, Clone)]
pub struct SideBook {
    side: Side,
    levels: BTreeMap<Tick, PriceLevel>,
    volume: u64,
}

impl SideBook {
    pub fn new(side: Side) -> Self {
        SideBook {
            side,
            levels: BTreeMap::new(),
            volume: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Best price: max key for bids, min key for asks.
    pub fn best(&self) -> Option<Tick> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Number of populated price levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Total resting quantity across all levels on this side.
    pub fn total_volume(&self) -> u64 {
        self.volume
    }

    pub(crate) fn get_or_create(&mut self, price: Tick) -> &mut PriceLevel {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
    }

    pub(crate) fn level_mut(&mut self, price: Tick) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    pub(crate) fn remove_level(&mut self, price: Tick) {
        self.levels.remove(&price);
    }

    pub(crate) fn add_volume(&mut self, qty: Quantity) {
        self.volume += qty as u64;
    }

    pub(crate) fn sub_volume(&mut self, qty: u64) {
        self.volume -= qty;
    }

    /// Walk levels in priority order (best first).
    pub fn levels(&self) -> Levels<'_> {
        match self.side {
            Side::Buy => Levels::Desc(self.levels.values().rev()),
            Side::Sell => Levels::Asc(self.levels.values()),
        }
    }

    /// Snapshot the best `depth` levels. Stops early when the side has
    /// fewer levels.
    pub fn top_levels(&self, depth: usize) -> Vec<LevelSnapshot> {
        self.levels()
            .take(depth)
            .map(|level| LevelSnapshot {
                price: level.price(),
                quantity: level.total_quantity(),
                count: level.count(),
            })
            .collect()
    }

    /// Quantity an aggressor limited to `limit` could take from this
    /// side, capped at `need`.
    ///
    /// Pure preflight walk for FOK: no allocation, no mutation, early
    /// exit once `need` is covered or prices stop being acceptable.
    pub fn matchable_up_to(&self, limit: Tick, need: u64) -> u64 {
        let mut available: u64 = 0;
        for level in self.levels() {
            let acceptable = match self.side {
                // Aggressor is a seller hitting bids at or above its limit.
                Side::Buy => level.price() >= limit,
                // Aggressor is a buyer lifting asks at or below its limit.
                Side::Sell => level.price() <= limit,
            };
            if !acceptable {
                break;
            }
            available += level.total_quantity();
            if available >= need {
                return need;
            }
        }
        available
    }
}

/// Priority-order iterator over a side's levels.
pub enum Levels<'a> {
    Asc(btree_map::Values<'a, Tick, PriceLevel>),
    Desc(Rev<btree_map::Values<'a, Tick, PriceLevel>>),
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a PriceLevel;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Levels::Asc(it) => it.next(),
            Levels::Desc(it) => it.next(),
        }
    }
}
