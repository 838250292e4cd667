// In crates/strategies/src/bollinger.rs

use crate::types::BollingerSettings;
use crate::{Error, Result, Strategy};
use core_types::{Action, Signal};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use ta::Next;
use ta::indicators::BollingerBands as Bands;

/// Largest accepted window. The bands allocate the whole window up front.
pub const MAX_PERIOD: usize = 1_000_000;

/// Mean-reversion on Bollinger Bands computed over the last `period` prices.
///
/// Decision order once the window is full:
/// below the lower band → BUY, above the upper band → SELL,
/// at or above the mean → EXIT_LONG, at or below the mean → EXIT_SHORT.
#[derive(Debug)]
pub struct BollingerBands {
    settings: BollingerSettings,
    bands: Bands,
    // Prices seen so far, saturating at `period`.
    seen: usize,
}

impl BollingerBands {
    /// Creates a new `BollingerBands` strategy instance from its settings.
    pub fn new(settings: BollingerSettings) -> Result<Self> {
        if settings.period < 1 {
            return Err(Error::InvalidParameters("period must be greater than 0".to_string()));
        }
        if settings.period > MAX_PERIOD {
            return Err(Error::InvalidParameters(format!(
                "period must be at most {MAX_PERIOD}, got {}",
                settings.period
            )));
        }
        if !settings.std_dev.is_finite() || settings.std_dev < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "std_dev must be a non-negative number, got {}",
                settings.std_dev
            )));
        }

        let bands = Bands::new(settings.period, settings.std_dev)
            .map_err(|e| Error::InvalidParameters(format!("{e:?}")))?;

        Ok(Self {
            settings,
            bands,
            seen: 0,
        })
    }

    pub fn settings(&self) -> &BollingerSettings {
        &self.settings
    }
}

impl Strategy for BollingerBands {
    fn name(&self) -> &'static str {
        "BollingerBands"
    }

    fn signal(&mut self, price: Decimal) -> Signal {
        let value = price.to_f64().unwrap_or(0.0);
        let bands = self.bands.next(value);
        self.seen = (self.seen + 1).min(self.settings.period);

        // Not enough data yet.
        if self.seen < self.settings.period {
            return Signal::hold(price);
        }

        let action = if value < bands.lower {
            Action::Buy
        } else if value > bands.upper {
            Action::Sell
        } else if value >= bands.average {
            Action::ExitLong
        } else if value <= bands.average {
            Action::ExitShort
        } else {
            Action::Hold
        };

        Signal::new(action, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn strategy(period: usize, std_dev: f64) -> BollingerBands {
        BollingerBands::new(BollingerSettings { period, std_dev }).unwrap()
    }

    fn actions(strategy: &mut BollingerBands, prices: &[Decimal]) -> Vec<Action> {
        prices.iter().map(|p| strategy.signal(*p).action).collect()
    }

    #[test]
    fn holds_until_window_is_full() {
        let mut bb = strategy(3, 1.0);
        assert_eq!(actions(&mut bb, &[dec!(10), dec!(10)]), vec![Action::Hold, Action::Hold]);
    }

    #[test]
    fn walks_through_every_band_decision() {
        let mut bb = strategy(3, 1.0);
        let got = actions(
            &mut bb,
            &[dec!(10), dec!(10), dec!(10), dec!(7), dec!(13), dec!(9)],
        );
        assert_eq!(
            got,
            vec![
                Action::Hold,
                Action::Hold,
                // flat window: price sits on the mean
                Action::ExitLong,
                // [10, 10, 7]: mean 9, lower ≈ 7.59
                Action::Buy,
                // [10, 7, 13]: mean 10, upper ≈ 12.45
                Action::Sell,
                // [7, 13, 9]: mean ≈ 9.67, inside the bands
                Action::ExitShort,
            ]
        );
    }

    #[test]
    fn signal_echoes_price() {
        let mut bb = strategy(1, 1.0);
        let signal = bb.signal(dec!(42.5));
        assert_eq!(signal.price, dec!(42.5));
    }

    #[test]
    fn rejects_zero_period() {
        let result = BollingerBands::new(BollingerSettings { period: 0, std_dev: 1.0 });
        assert!(matches!(result, Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn rejects_oversized_period() {
        let result = BollingerBands::new(BollingerSettings { period: 100_000_000_000_000, std_dev: 1.0 });
        assert!(matches!(result, Err(Error::InvalidParameters(_))));

        assert!(BollingerBands::new(BollingerSettings { period: MAX_PERIOD, std_dev: 1.0 }).is_ok());
    }

    #[test]
    fn rejects_negative_width() {
        let result = BollingerBands::new(BollingerSettings { period: 20, std_dev: -2.0 });
        assert!(matches!(result, Err(Error::InvalidParameters(_))));
    }
}
