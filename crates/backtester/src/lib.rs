pub mod error;
pub mod logger;
pub mod types;

pub use error::{Error, Result};
pub use logger::TradeLogger;
pub use types::{BacktestResult, BacktestSettings};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use core_types::{PricePoint, Symbol, timestamp_from_millis};
use execution::{CommissionModel, Executor, Portfolio, SimulatedExecutor, TradeIdGenerator};
use risk::{RiskManager, SimpleRiskManager, SimpleRiskSettings};
use rust_decimal::Decimal;
use strategies::Strategy;
use tracing::{debug, info, warn};

/// The main engine for running historical backtests.
///
/// A `Backtester` owns its portfolio for the whole run; build a fresh one per run.
pub struct Backtester {
    /// The symbol to be tested.
    pub symbol: Symbol,
    /// The strategy under test. `None` selects the buy-every-sample baseline.
    pub strategy: Option<Box<dyn Strategy + Send>>,
    /// The risk manager instance.
    pub risk_manager: Box<dyn RiskManager + Send + Sync>,
    /// The execution simulator.
    pub executor: Box<dyn Executor + Send>,
    portfolio: Portfolio,
}

impl Backtester {
    pub fn new(
        symbol: Symbol,
        strategy: Option<Box<dyn Strategy + Send>>,
        risk_manager: Box<dyn RiskManager + Send + Sync>,
        executor: Box<dyn Executor + Send>,
        portfolio: Portfolio,
    ) -> Self {
        Self {
            symbol,
            strategy,
            risk_manager,
            executor,
            portfolio,
        }
    }

    /// Wires the simulated executor and fixed-budget risk manager from `settings`.
    pub fn from_settings(
        settings: &BacktestSettings,
        strategy: Option<Box<dyn Strategy + Send>>,
        ids: Arc<dyn TradeIdGenerator>,
    ) -> Result<Self> {
        if settings.initial_cash <= Decimal::ZERO {
            return Err(Error::InvalidSettings(format!(
                "initial cash must be positive, got {}",
                settings.initial_cash
            )));
        }
        if settings.position_size <= Decimal::ZERO {
            return Err(Error::InvalidSettings(format!(
                "position size must be positive, got {}",
                settings.position_size
            )));
        }
        if settings.commission_rate < Decimal::ZERO {
            return Err(Error::InvalidSettings(format!(
                "commission rate must not be negative, got {}",
                settings.commission_rate
            )));
        }

        let risk_manager = SimpleRiskManager::new(SimpleRiskSettings {
            position_size: settings.position_size,
        });
        let executor = SimulatedExecutor::new(CommissionModel::new(settings.commission_rate), ids);

        Ok(Self::new(
            Symbol(settings.symbol.clone()),
            strategy,
            Box::new(risk_manager),
            Box::new(executor),
            Portfolio::new(settings.initial_cash),
        ))
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Replays `data` (ascending by time) through the strategy and the portfolio.
    pub fn run(&mut self, data: &[PricePoint]) -> BacktestResult {
        let start_time = Utc::now();
        let mut logger = TradeLogger::with_capacity(data.len());
        let mut marks: HashMap<Symbol, Decimal> = HashMap::with_capacity(1);
        let mut rejected = 0usize;

        info!(
            symbol = %self.symbol,
            samples = data.len(),
            strategy = self.strategy.as_ref().map_or("baseline", |s| s.name()),
            risk_manager = self.risk_manager.name(),
            executor = self.executor.name(),
            initial_cash = %self.portfolio.cash,
            "Starting backtest."
        );

        for point in data {
            let time = timestamp_from_millis(point.time);

            // --- 1. Mark to market ---
            marks.insert(self.symbol.clone(), point.price);
            let equity = self.portfolio.mark_to_market(&marks);
            logger.record_equity(point.time, equity);

            // --- 2. Ask the strategy and size the decision ---
            let decision = match self.strategy.as_mut() {
                Some(strategy) => {
                    let signal = strategy.signal(point.price);
                    self.risk_manager.evaluate(
                        &signal,
                        &self.symbol,
                        self.portfolio.cash,
                        time,
                        self.portfolio.position(&self.symbol),
                    )
                }
                None => self
                    .risk_manager
                    .baseline_order(&self.symbol, point.price, time)
                    .map(Some),
            };

            let order = match decision {
                Ok(Some(order)) => order,
                Ok(None) => continue,
                Err(e) => {
                    debug!(%time, error = %e, "Risk manager vetoed the signal.");
                    continue;
                }
            };

            // --- 3. Execute ---
            match self.executor.execute(&order, &mut self.portfolio) {
                Ok(trade) => logger.record_trade(trade),
                Err(e @ execution::Error::InsufficientFunds { .. }) => {
                    rejected += 1;
                    debug!(%time, side = %order.side, error = %e, "Skipping sample.");
                }
                Err(e) => {
                    rejected += 1;
                    warn!(%time, side = %order.side, error = %e, "Order execution failed.");
                }
            }
        }

        let final_equity = self.portfolio.equity;
        info!(
            trades = logger.trades.len(),
            rejected,
            %final_equity,
            cash = %self.portfolio.cash,
            "Backtest finished."
        );

        logger.finish(start_time, Utc::now(), final_equity)
    }
}
