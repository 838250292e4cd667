// In crates/risk/src/lib.rs

use chrono::{DateTime, Utc};
use core_types::{Order, Position, Signal, Symbol};
use rust_decimal::Decimal;
pub mod simple_manager;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use simple_manager::SimpleRiskManager;
pub use types::SimpleRiskSettings;

/// The universal interface for a risk management module.
///
/// A `RiskManager` decides whether a strategy `Signal` is actionable given the
/// current position, and if so sizes it into an `Order`.
pub trait RiskManager: Sync {
    /// The name of the risk management strategy.
    fn name(&self) -> &'static str;

    /// Evaluates a signal against the current cash and position.
    ///
    /// # Arguments
    ///
    /// * `signal`: The `Signal` produced by a strategy; its price is the order price.
    /// * `symbol`: The instrument being traded.
    /// * `cash`: The portfolio's available cash.
    /// * `time`: Timestamp stamped on the resulting order.
    /// * `open_position`: The currently open position for `symbol`, if any.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Order))`: The signal is actionable.
    /// * `Ok(None)`: Nothing to do (`Hold`, or an exit with nothing to exit).
    /// * `Err(Error::Vetoed)`: The signal is rejected by a sizing rule.
    fn evaluate(
        &self,
        signal: &Signal,
        symbol: &Symbol,
        cash: Decimal,
        time: DateTime<Utc>,
        open_position: Option<&Position>,
    ) -> Result<Option<Order>>;

    /// The order placed on every sample when no strategy is configured.
    fn baseline_order(&self, symbol: &Symbol, price: Decimal, time: DateTime<Utc>) -> Result<Order>;
}
