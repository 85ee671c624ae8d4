//! Reject reasons for order submission.

use thiserror::Error;

/// Why a submission was refused. Every reject is a total no-op: no
/// fills, no resting order, no counter movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reject {
    #[error("order quantity must be nonzero")]
    ZeroQuantity,

    #[error("order id must be nonzero")]
    ZeroId,

    #[error("order id {0} is already resting")]
    DuplicateId(u64),

    #[error("market orders must be immediate-or-cancel")]
    InvalidTimeInForce,

    /// FOK preflight found less liquidity than the order's quantity.
    #[error("insufficient liquidity to fill the entire quantity")]
    InsufficientLiquidity,
}
