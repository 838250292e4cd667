// In crates/strategies/src/lib.rs

use core_types::Signal;
use rust_decimal::Decimal;
pub mod bollinger;
pub mod error;
pub mod factory;
pub mod types;

pub use error::{Error, Result};
pub use factory::create_strategy;

/// The universal interface for a trading strategy.
///
/// A strategy is a stateful entity: every call to `signal` feeds the price into its
/// rolling state *and* returns a decision, so calling it twice with the same price is
/// not idempotent.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn signal(&mut self, price: Decimal) -> Signal;
}
