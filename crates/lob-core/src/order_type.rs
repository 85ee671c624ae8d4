//! Order type (Market vs Limit) and time-in-force.

/// Order type.
///
/// A Market order ignores its price field and crosses against whatever
/// liquidity the opposite side holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderType {
    Limit,
    Market,
}

/// Time-in-force policy applied by submit.
///
/// - `Gtc`: rest any unmatched residual until filled or cancelled.
/// - `Ioc`: match what is possible now, discard the rest.
/// - `Fok`: fill the entire quantity atomically or reject with no effect.
///
/// Market orders are implicitly IOC; Market + GTC and Market + FOK are
/// rejected at submit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
}
