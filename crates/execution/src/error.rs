// In crates/execution/src/error.rs

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A buy order costs more (notional plus commission) than the available cash.
    /// Raised before any portfolio mutation.
    #[error("insufficient funds: available ${available:.2}, required ${required:.2}")]
    InsufficientFunds { available: Decimal, required: Decimal },

    #[error("Execution failed: {reason}")]
    ExecutionFailed { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
