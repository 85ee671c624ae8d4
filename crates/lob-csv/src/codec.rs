//! CSV line parser for the benchmark order-flow format.
//!
//! Input format (one order per line):
//!
//! `SIDE,PRICE,QUANTITY,TYPE,TIF`
//!
//! - `SIDE`     : `BUY` or `SELL`
//! - `PRICE`    : decimal price, converted to ticks and rounded
//! - `QUANTITY` : decimal integer, nonzero
//! - `TYPE`     : `LIMIT` or `MARKET`
//! - `TIF`      : `GTC`, `IOC` or `FOK`
//!
//! Blank lines, `#` comments and the header line are skipped, and so is
//! any malformed row; bad data never aborts a replay.

use std::io::{self, BufRead};

use thiserror::Error;

use lob_core::{ticks_from_price, Order, OrderType, Quantity, Side, Tick, TimeInForce};

/// Expected header line.
pub const CSV_HEADER: &str = "SIDE,PRICE,QUANTITY,TYPE,TIF";

/// A parsed row. Carries no id; [`CsvOrder::into_order`] attaches one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOrder {
    pub side: Side,
    pub price: Tick,
    pub quantity: Quantity,
    pub order_type: OrderType,
    pub tif: TimeInForce,
}

impl CsvOrder {
    /// Build an engine order with a consumer-assigned id.
    pub fn into_order(self, id: u64) -> Order {
        Order {
            id,
            side: self.side,
            price: self.price,
            quantity: self.quantity,
            order_type: self.order_type,
            tif: self.tif,
            account: 0,
            timestamp: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid side {0:?}")]
    InvalidSide(String),

    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    #[error("invalid quantity {0:?}")]
    InvalidQuantity(String),

    #[error("invalid order type {0:?}")]
    InvalidType(String),

    #[error("invalid time-in-force {0:?}")]
    InvalidTif(String),
}

/// Parse a single data row.
pub fn parse_line(line: &str) -> Result<CsvOrder, CsvError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(CsvError::FieldCount(fields.len()));
    }

    let side = match fields[0] {
        "BUY" => Side::Buy,
        "SELL" => Side::Sell,
        other => return Err(CsvError::InvalidSide(other.to_string())),
    };

    let price: f64 = fields[1]
        .parse()
        .ok()
        .filter(|p: &f64| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| CsvError::InvalidPrice(fields[1].to_string()))?;

    let quantity: Quantity = fields[2]
        .parse()
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| CsvError::InvalidQuantity(fields[2].to_string()))?;

    let order_type = match fields[3] {
        "LIMIT" => OrderType::Limit,
        "MARKET" => OrderType::Market,
        other => return Err(CsvError::InvalidType(other.to_string())),
    };

    let tif = match fields[4] {
        "GTC" => TimeInForce::Gtc,
        "IOC" => TimeInForce::Ioc,
        "FOK" => TimeInForce::Fok,
        other => return Err(CsvError::InvalidTif(other.to_string())),
    };

    Ok(CsvOrder {
        side,
        price: ticks_from_price(price),
        quantity,
        order_type,
        tif,
    })
}

/// Result of reading a whole order file.
#[derive(Debug, Default)]
pub struct ParsedOrders {
    pub orders: Vec<CsvOrder>,
    /// Malformed data rows that were dropped.
    pub skipped: usize,
}

/// Read every order from a CSV stream, skipping the header, blank
/// lines, comments and malformed rows.
pub fn read_orders<R: BufRead>(reader: R) -> io::Result<ParsedOrders> {
    let mut parsed = ParsedOrders::default();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.eq_ignore_ascii_case(CSV_HEADER)
        {
            continue;
        }
        match parse_line(trimmed) {
            Ok(order) => parsed.orders.push(order),
            Err(_) => parsed.skipped += 1,
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_a_limit_row() {
        let order = parse_line("BUY,520.25,100,LIMIT,GTC").unwrap();
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.price, 5_202_500);
        assert_eq!(order.quantity, 100);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.tif, TimeInForce::Gtc);
    }

    #[test]
    fn parses_a_market_row() {
        let order = parse_line("SELL,0,25,MARKET,IOC").unwrap();
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.price, 0);
        assert_eq!(order.order_type, OrderType::Market);
    }

    #[test]
    fn rejects_malformed_rows() {
        assert_eq!(parse_line("BUY,520.25,100,LIMIT").unwrap_err(), CsvError::FieldCount(4));
        assert!(matches!(
            parse_line("HOLD,520.25,100,LIMIT,GTC").unwrap_err(),
            CsvError::InvalidSide(_)
        ));
        assert!(matches!(
            parse_line("BUY,abc,100,LIMIT,GTC").unwrap_err(),
            CsvError::InvalidPrice(_)
        ));
        assert!(matches!(
            parse_line("BUY,520.25,0,LIMIT,GTC").unwrap_err(),
            CsvError::InvalidQuantity(_)
        ));
        assert!(matches!(
            parse_line("BUY,520.25,100,STOP,GTC").unwrap_err(),
            CsvError::InvalidType(_)
        ));
        assert!(matches!(
            parse_line("BUY,520.25,100,LIMIT,DAY").unwrap_err(),
            CsvError::InvalidTif(_)
        ));
    }

    #[test]
    fn reader_skips_header_comments_and_bad_rows() {
        let data = "\
SIDE,PRICE,QUANTITY,TYPE,TIF
# seeded liquidity follows
BUY,520.25,100,LIMIT,GTC

SELL,519.90,oops,LIMIT,IOC
SELL,521.00,40,LIMIT,FOK
";
        let parsed = read_orders(Cursor::new(data)).unwrap();
        assert_eq!(parsed.orders.len(), 2);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.orders[1].tif, TimeInForce::Fok);
    }

    #[test]
    fn row_converts_into_engine_order() {
        let order = parse_line("BUY,500.00,10,LIMIT,IOC").unwrap().into_order(7);
        assert_eq!(order.id, 7);
        assert_eq!(order.price, 5_000_000);
        assert_eq!(order.timestamp, 0);
    }
}
