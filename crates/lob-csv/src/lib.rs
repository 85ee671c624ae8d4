//! lob-csv
//!
//! The fixed CSV order-flow format used by the benchmark harness:
//!
//! ```text
//! SIDE,PRICE,QUANTITY,TYPE,TIF
//! BUY,520.25,100,LIMIT,GTC
//! SELL,519.90,40,LIMIT,IOC
//! ```
//!
//! - [`codec`]    : line parser (malformed rows are skipped, never fatal)
//! - [`generate`] : fixed-seed random order-file generator
//!
//! Rows carry no order id; consumers assign ids when converting to
//! engine orders.

pub mod codec;
pub mod generate;

pub use codec::{parse_line, read_orders, CsvError, CsvOrder, ParsedOrders, CSV_HEADER};
pub use generate::{generate_file, write_orders, DEFAULT_SEED};
