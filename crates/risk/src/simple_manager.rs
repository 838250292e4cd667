// In crates/risk/src/simple_manager.rs

use crate::types::SimpleRiskSettings;
use crate::{Error, Result, RiskManager};
use chrono::{DateTime, Utc};
use core_types::{Action, Order, Position, Side, Signal, Symbol};
use rust_decimal::Decimal;

/// A risk manager that commits a fixed budget to every entry.
///
/// Rules:
/// 1. Entries (`Buy`) are only taken when flat or short and when cash covers the budget;
///    the quantity is `position_size / price`.
/// 2. `Sell` and `ExitLong` close the whole long; `ExitShort` covers the whole short.
/// 3. Exits with nothing to exit, and `Hold`, produce no order.
#[derive(Debug)]
pub struct SimpleRiskManager {
    /// The configuration for this risk manager instance.
    settings: SimpleRiskSettings,
}

impl SimpleRiskManager {
    /// Creates a new `SimpleRiskManager` instance from its settings.
    pub fn new(settings: SimpleRiskSettings) -> Self {
        Self { settings }
    }

    fn entry_quantity(&self, price: Decimal) -> Result<Decimal> {
        if price <= Decimal::ZERO {
            return Err(Error::Vetoed {
                reason: format!("cannot size an entry at non-positive price {price}"),
            });
        }
        self.settings
            .position_size
            .checked_div(price)
            .ok_or_else(|| Error::Vetoed {
                reason: format!("entry quantity overflows at price {price}"),
            })
    }
}

impl RiskManager for SimpleRiskManager {
    fn name(&self) -> &'static str {
        "SimpleRiskManager"
    }

    fn evaluate(
        &self,
        signal: &Signal,
        symbol: &Symbol,
        cash: Decimal,
        time: DateTime<Utc>,
        open_position: Option<&Position>,
    ) -> Result<Option<Order>> {
        let current = open_position.map_or(Decimal::ZERO, |p| p.quantity);
        let order = |side: Side, quantity: Decimal| Order {
            symbol: symbol.clone(),
            quantity,
            price: signal.price,
            side,
            time,
        };

        match signal.action {
            Action::Hold => Ok(None),

            Action::Buy => {
                // No pyramiding: only enter from flat or short.
                if current > Decimal::ZERO {
                    return Ok(None);
                }
                if cash < self.settings.position_size {
                    return Err(Error::Vetoed {
                        reason: format!(
                            "cash {cash:.2} is below the position budget {:.2}",
                            self.settings.position_size
                        ),
                    });
                }
                let quantity = self.entry_quantity(signal.price)?;
                Ok(Some(order(Side::Buy, quantity)))
            }

            Action::Sell | Action::ExitLong => {
                if current > Decimal::ZERO {
                    Ok(Some(order(Side::Sell, current)))
                } else {
                    Ok(None)
                }
            }

            Action::ExitShort => {
                if current < Decimal::ZERO {
                    Ok(Some(order(Side::Buy, current.abs())))
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn baseline_order(&self, symbol: &Symbol, price: Decimal, time: DateTime<Utc>) -> Result<Order> {
        Ok(Order {
            symbol: symbol.clone(),
            quantity: self.entry_quantity(price)?,
            price,
            side: Side::Buy,
            time,
        })
    }
}
