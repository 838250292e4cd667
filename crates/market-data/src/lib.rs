//! Ingestion of Binance-style tick trade dumps.
//!
//! Files are CSV with a header row and the columns
//! `id, price, qty, quote_qty, time, is_buyer_maker`; `time` is in epoch milliseconds.
//! Parsing is lenient: short rows are ignored and rows whose price or time does not
//! parse are skipped and counted, never failing the load.

pub mod error;
pub mod loader;
pub mod types;

pub use error::{Error, Result};
pub use loader::{available_hours, load_prices, load_prices_by_hour};
pub use types::{DEFAULT_HOUR_LIMIT, DEFAULT_LIMIT, HourInfo};
