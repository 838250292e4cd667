// In crates/backtester/src/logger.rs

use chrono::{DateTime, Utc};
use core_types::{EquityPoint, Trade};
use rust_decimal::Decimal;

use crate::types::BacktestResult;

/// A logger responsible for recording trades and equity changes during a backtest.
#[derive(Debug, Default)]
pub struct TradeLogger {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl TradeLogger {
    /// Creates a new, empty logger sized for `samples` price points.
    pub fn with_capacity(samples: usize) -> Self {
        Self {
            trades: Vec::new(),
            equity_curve: Vec::with_capacity(samples),
        }
    }

    /// Records a point in the equity curve.
    pub fn record_equity(&mut self, time: i64, equity: Decimal) {
        self.equity_curve.push(EquityPoint { time, equity });
    }

    /// Appends an executed trade to the log.
    pub fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Consumes the logger into the run's result.
    pub fn finish(
        self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        final_equity: Decimal,
    ) -> BacktestResult {
        BacktestResult {
            trades: self.trades,
            start_time,
            end_time,
            final_equity,
            equity_curve: self.equity_curve,
            price_data: None,
        }
    }
}
