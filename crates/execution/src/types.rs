// In crates/execution/src/types.rs

use core_types::{Position, Symbol};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Represents the state of the simulated trading portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    /// The cash balance the portfolio started with.
    pub initial_capital: Decimal,

    /// The current cash balance (e.g., in USDT).
    pub cash: Decimal,

    /// A map holding the currently open positions, keyed by symbol.
    pub positions: HashMap<Symbol, Position>,

    /// Cash plus mark-to-market value of positions, as of the last `mark_to_market`.
    pub equity: Decimal,
}

impl Portfolio {
    /// Creates a new portfolio with an initial cash balance.
    pub fn new(initial_cash: Decimal) -> Self {
        Self {
            initial_capital: initial_cash,
            cash: initial_cash,
            positions: HashMap::new(),
            equity: initial_cash,
        }
    }

    pub fn position(&self, symbol: &Symbol) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Signed quantity held for `symbol`, zero when flat.
    pub fn position_quantity(&self, symbol: &Symbol) -> Decimal {
        self.position(symbol).map_or(Decimal::ZERO, |p| p.quantity)
    }

    /// Recomputes equity from cash and the given mark prices and returns it.
    ///
    /// Positions whose symbol has no entry in `prices` contribute nothing. This is a
    /// known approximation: with a single instrument per run it never triggers.
    /// A mark whose value overflows leaves the previous equity in place.
    pub fn mark_to_market(&mut self, prices: &HashMap<Symbol, Decimal>) -> Decimal {
        let marked = self
            .positions
            .iter()
            .filter_map(|(symbol, pos)| prices.get(symbol).map(|price| pos.quantity.checked_mul(*price)))
            .try_fold(self.cash, |equity, value| equity.checked_add(value?));

        match marked {
            Some(equity) => self.equity = equity,
            None => tracing::warn!(equity = %self.equity, "Mark-to-market overflowed; keeping previous equity."),
        }
        self.equity
    }
}
