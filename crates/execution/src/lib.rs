// In crates/execution/src/lib.rs

use core_types::{Order, Trade};
pub mod commission;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod simulated;
pub mod types;

// Re-export public types
pub use commission::CommissionModel;
pub use error::{Error, Result};
pub use ids::{ClockIdGenerator, SequenceIdGenerator, TradeIdGenerator};
pub use ledger::{FillEffect, apply_fill};
pub use simulated::SimulatedExecutor;
pub use types::Portfolio;

/// The universal interface for an execution handler.
///
/// An `Executor` takes an `Order` produced by the driver and applies it to the
/// portfolio it is handed, returning the immutable `Trade` record on success.
/// A rejected order must leave the portfolio untouched.
pub trait Executor {
    /// The name of the executor (e.g., "SimulatedExecutor").
    fn name(&self) -> &'static str;

    /// Executes a given order against `portfolio`.
    ///
    /// # Returns
    ///
    /// The `Trade` on success, or an `Error` if the order was rejected
    /// (e.g. `Error::InsufficientFunds` for an unaffordable buy).
    fn execute(&mut self, order: &Order, portfolio: &mut Portfolio) -> Result<Trade>;
}
