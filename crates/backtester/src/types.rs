// In crates/backtester/src/types.rs

use chrono::{DateTime, Utc};
use core_types::{EquityPoint, PricePoint, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Parameters of a single backtest run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BacktestSettings {
    /// Starting cash balance. Must be positive.
    #[serde(default = "default_initial_cash")]
    pub initial_cash: Decimal,
    /// Commission as a fraction of notional (0.0005 = 5 bps).
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
    /// Quote currency committed to every entry.
    #[serde(default = "default_position_size")]
    pub position_size: Decimal,
    #[serde(default = "default_symbol")]
    pub symbol: String,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            initial_cash: default_initial_cash(),
            commission_rate: default_commission_rate(),
            position_size: default_position_size(),
            symbol: default_symbol(),
        }
    }
}

fn default_initial_cash() -> Decimal {
    dec!(100)
}

fn default_commission_rate() -> Decimal {
    dec!(0.0005)
}

fn default_position_size() -> Decimal {
    dec!(50)
}

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    /// Wall-clock time the run started.
    pub start_time: DateTime<Utc>,
    /// Wall-clock time the run finished.
    pub end_time: DateTime<Utc>,
    /// Equity as of the last mark-to-market.
    pub final_equity: Decimal,
    pub equity_curve: Vec<EquityPoint>,
    /// The input series, echoed back for charting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_data: Option<Vec<PricePoint>>,
}

impl BacktestResult {
    pub fn with_price_data(mut self, prices: Vec<PricePoint>) -> Self {
        self.price_data = Some(prices);
        self
    }
}
