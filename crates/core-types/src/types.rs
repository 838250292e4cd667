// In crates/core-types/src/types.rs

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Converts a millisecond epoch timestamp into a UTC datetime.
///
/// Out-of-range values map to the Unix epoch rather than failing, since they can only
/// originate from garbled input rows.
pub fn timestamp_from_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).single().unwrap_or_default()
}

/// A trading instrument identifier, e.g. `BTCUSDT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The direction of an order or fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Applies the side to an unsigned quantity: buys add, sells subtract.
    pub fn signed(self, quantity: Decimal) -> Decimal {
        match self {
            Side::Buy => quantity,
            Side::Sell => -quantity,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// The decision a strategy can take on a single price sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Sell,
    ExitLong,
    ExitShort,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::ExitLong => "EXIT_LONG",
            Action::ExitShort => "EXIT_SHORT",
            Action::Hold => "HOLD",
        };
        f.write_str(name)
    }
}

/// A strategy's output for one price sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: Action,
    pub price: Decimal,
}

impl Signal {
    pub fn new(action: Action, price: Decimal) -> Self {
        Self { action, price }
    }

    pub fn hold(price: Decimal) -> Self {
        Self::new(Action::Hold, price)
    }
}

/// One sample of the input price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub price: Decimal,
}

/// One sample of the equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub equity: Decimal,
}

/// A market instruction produced by the driver and consumed by an executor.
///
/// `quantity` is always a positive magnitude; direction lives in `side`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub symbol: Symbol,
    pub quantity: Decimal,
    pub price: Decimal,
    pub side: Side,
    pub time: DateTime<Utc>,
}

impl Order {
    /// Price times quantity, before commission. `None` when the product overflows.
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(self.quantity)
    }
}

/// The open position for one instrument.
///
/// `quantity` is signed: positive for long, negative for short. A stored position never
/// has a zero quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    pub quantity: Decimal,
    pub avg_entry_price: Decimal,
    pub open_time: DateTime<Utc>,
}

impl Position {
    pub fn is_long(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    pub fn is_short(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    pub fn market_value(&self, current_price: Decimal) -> Decimal {
        self.quantity * current_price
    }

    pub fn unrealized_pnl(&self, current_price: Decimal) -> Decimal {
        self.quantity * (current_price - self.avg_entry_price)
    }
}

/// Unique identifier of an executed trade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub String);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable record of an accepted order.
///
/// Serialized with `quantity` as `qty` and an `is_buy` flag next to `side`, which chart
/// clients read to place entry markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: TradeId,
    pub symbol: Symbol,
    pub price: Decimal,
    pub quantity: Decimal,
    pub time: DateTime<Utc>,
    pub side: Side,
    pub commission: Decimal,
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }
}

impl Serialize for Trade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Trade", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("symbol", &self.symbol)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("qty", &self.quantity)?;
        state.serialize_field("time", &self.time)?;
        state.serialize_field("side", &self.side)?;
        state.serialize_field("is_buy", &self.is_buy())?;
        state.serialize_field("commission", &self.commission)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn side_signs_quantity() {
        assert_eq!(Side::Buy.signed(dec!(2.5)), dec!(2.5));
        assert_eq!(Side::Sell.signed(dec!(2.5)), dec!(-2.5));
    }

    #[test]
    fn action_serializes_in_wire_format() {
        let json = serde_json::to_string(&Action::ExitShort).unwrap();
        assert_eq!(json, "\"EXIT_SHORT\"");
        assert_eq!(Action::ExitLong.to_string(), "EXIT_LONG");
    }

    #[test]
    fn short_position_values() {
        let pos = Position {
            symbol: Symbol::from("BTCUSDT"),
            quantity: dec!(-2),
            avg_entry_price: dec!(10),
            open_time: timestamp_from_millis(0),
        };
        assert!(pos.is_short());
        assert_eq!(pos.market_value(dec!(8)), dec!(-16));
        assert_eq!(pos.unrealized_pnl(dec!(8)), dec!(4));
    }

    #[test]
    fn trade_serializes_side_and_buy_flag() {
        let trade = Trade {
            id: TradeId("trade_1".into()),
            symbol: Symbol::from("BTCUSDT"),
            price: dec!(10),
            quantity: dec!(5),
            time: timestamp_from_millis(0),
            side: Side::Sell,
            commission: dec!(0.025),
        };

        let json = serde_json::to_value(&trade).unwrap();

        assert_eq!(json["qty"], serde_json::json!(5.0));
        assert_eq!(json["side"], "SELL");
        assert_eq!(json["is_buy"], false);
        assert!(json.get("quantity").is_none());
    }

    #[test]
    fn millis_round_trip_through_chrono() {
        let ts = timestamp_from_millis(1_758_326_400_123);
        assert_eq!(ts.timestamp_millis(), 1_758_326_400_123);
    }
}
