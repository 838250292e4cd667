// In crates/execution/src/simulated.rs

use crate::commission::CommissionModel;
use crate::ids::TradeIdGenerator;
use crate::ledger::apply_fill;
use crate::types::Portfolio;
use crate::{Error, Executor, Result};
use core_types::{Order, Side, Trade};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Fills every order in full at its own price, charging a flat-rate commission.
///
/// There is no slippage and no margin model: sells (including opening shorts) are
/// always accepted, buys must be covered by cash.
pub struct SimulatedExecutor {
    commission: CommissionModel,
    ids: Arc<dyn TradeIdGenerator>,
}

impl SimulatedExecutor {
    pub fn new(commission: CommissionModel, ids: Arc<dyn TradeIdGenerator>) -> Self {
        Self { commission, ids }
    }

    pub fn commission_model(&self) -> &CommissionModel {
        &self.commission
    }

    fn validate(order: &Order) -> Result<()> {
        if order.quantity <= Decimal::ZERO {
            return Err(Error::ExecutionFailed {
                reason: format!("order quantity must be positive, got {}", order.quantity),
            });
        }
        if order.price <= Decimal::ZERO {
            return Err(Error::ExecutionFailed {
                reason: format!("order price must be positive, got {}", order.price),
            });
        }
        Ok(())
    }

    fn overflow(order: &Order) -> Error {
        Error::ExecutionFailed {
            reason: format!("order value overflows: {} {} @ {}", order.side, order.quantity, order.price),
        }
    }
}

impl Executor for SimulatedExecutor {
    fn name(&self) -> &'static str {
        "SimulatedExecutor"
    }

    fn execute(&mut self, order: &Order, portfolio: &mut Portfolio) -> Result<Trade> {
        Self::validate(order)?;

        // --- 1. Costs ---
        let notional = order.notional().ok_or_else(|| Self::overflow(order))?;
        let commission = self
            .commission
            .commission(order.price, order.quantity)
            .ok_or_else(|| Self::overflow(order))?;

        // --- 2. Cash (every check runs before anything is mutated) ---
        let cash = match order.side {
            Side::Buy => {
                let required = notional.checked_add(commission).ok_or_else(|| Self::overflow(order))?;
                if portfolio.cash < required {
                    return Err(Error::InsufficientFunds {
                        available: portfolio.cash,
                        required,
                    });
                }
                portfolio.cash - required
            }
            Side::Sell => (notional - commission)
                .checked_add(portfolio.cash)
                .ok_or_else(|| Self::overflow(order))?,
        };

        // --- 3. Position, then cash ---
        let effect = apply_fill(&mut portfolio.positions, order)?;
        portfolio.cash = cash;

        let trade = Trade {
            id: self.ids.next_id(),
            symbol: order.symbol.clone(),
            price: order.price,
            quantity: order.quantity,
            time: order.time,
            side: order.side,
            commission,
        };
        tracing::debug!(
            id = %trade.id,
            side = %trade.side,
            price = %trade.price,
            quantity = %trade.quantity,
            %commission,
            ?effect,
            cash = %portfolio.cash,
            "Order filled."
        );
        Ok(trade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequenceIdGenerator;
    use core_types::{Symbol, timestamp_from_millis};
    use rust_decimal_macros::dec;

    fn executor() -> SimulatedExecutor {
        SimulatedExecutor::new(
            CommissionModel::new(dec!(0.0005)),
            Arc::new(SequenceIdGenerator::new()),
        )
    }

    fn order(side: Side, quantity: Decimal, price: Decimal) -> Order {
        Order {
            symbol: Symbol::from("BTCUSDT"),
            quantity,
            price,
            side,
            time: timestamp_from_millis(1_000),
        }
    }

    #[test]
    fn buy_debits_notional_and_commission() {
        let mut portfolio = Portfolio::new(dec!(100));
        let trade = executor()
            .execute(&order(Side::Buy, dec!(5), dec!(10)), &mut portfolio)
            .unwrap();

        assert_eq!(trade.commission, dec!(0.025));
        assert_eq!(trade.id.0, "trade_1");
        assert!(trade.is_buy());
        assert_eq!(portfolio.cash, dec!(49.975));
        assert_eq!(portfolio.position_quantity(&Symbol::from("BTCUSDT")), dec!(5));
    }

    #[test]
    fn closing_sell_credits_proceeds_net_of_commission() {
        let mut executor = executor();
        let mut portfolio = Portfolio::new(dec!(100));
        executor.execute(&order(Side::Buy, dec!(5), dec!(10)), &mut portfolio).unwrap();
        let cash_before = portfolio.cash;

        let trade = executor
            .execute(&order(Side::Sell, dec!(5), dec!(12)), &mut portfolio)
            .unwrap();

        let expected_fee = executor.commission_model().commission(dec!(12), dec!(5)).unwrap();
        assert_eq!(trade.commission, expected_fee);
        assert_eq!(portfolio.cash, cash_before + dec!(60) - expected_fee);
        assert!(portfolio.positions.is_empty());
    }

    #[test]
    fn unaffordable_buy_is_rejected_without_side_effects() {
        let mut portfolio = Portfolio::new(dec!(50));
        let before = portfolio.clone();

        let err = executor()
            .execute(&order(Side::Buy, dec!(5), dec!(10)), &mut portfolio)
            .unwrap_err();

        assert_eq!(
            err,
            Error::InsufficientFunds {
                available: dec!(50),
                required: dec!(50.025),
            }
        );
        assert_eq!(portfolio, before);
    }

    #[test]
    fn short_sale_needs_no_cash() {
        let mut portfolio = Portfolio::new(Decimal::ZERO);
        executor()
            .execute(&order(Side::Sell, dec!(2), dec!(10)), &mut portfolio)
            .unwrap();

        assert_eq!(portfolio.cash, dec!(19.99));
        assert_eq!(portfolio.position_quantity(&Symbol::from("BTCUSDT")), dec!(-2));
    }

    #[test]
    fn overflowing_order_is_rejected_without_side_effects() {
        let mut portfolio = Portfolio::new(dec!(100));
        let before = portfolio.clone();

        let result = executor().execute(&order(Side::Sell, dec!(2), Decimal::MAX), &mut portfolio);

        assert!(matches!(result, Err(Error::ExecutionFailed { .. })));
        assert_eq!(portfolio, before);
    }

    #[test]
    fn zero_quantity_order_is_rejected() {
        let mut portfolio = Portfolio::new(dec!(100));
        let result = executor().execute(&order(Side::Sell, Decimal::ZERO, dec!(10)), &mut portfolio);

        assert!(matches!(result, Err(Error::ExecutionFailed { .. })));
        assert!(portfolio.positions.is_empty());
    }
}
