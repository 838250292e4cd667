// In crates/execution/src/ids.rs

use chrono::Utc;
use core_types::TradeId;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// A source of unique trade identifiers.
///
/// Implementations are shared behind an `Arc` and may be called from several
/// concurrent backtest runs.
pub trait TradeIdGenerator: Send + Sync {
    fn next_id(&self) -> TradeId;
}

fn system_clock_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MIN)
}

/// Clock-derived identifiers (`trade_<nanos>`), strictly increasing.
///
/// When the clock has not advanced past the last issued value (same tick, or a clock
/// that went backwards) the next value is `last + 1`.
#[derive(Debug)]
pub struct ClockIdGenerator {
    last: AtomicI64,
    clock: fn() -> i64,
}

impl ClockIdGenerator {
    pub fn new() -> Self {
        Self::with_clock(system_clock_nanos)
    }

    /// Uses `clock` (nanoseconds) instead of the system clock.
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self {
            last: AtomicI64::new(i64::MIN),
            clock,
        }
    }

    fn next_value(&self) -> i64 {
        let now = (self.clock)();
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = if now > last { now } else { last + 1 };
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

impl Default for ClockIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeIdGenerator for ClockIdGenerator {
    fn next_id(&self) -> TradeId {
        TradeId(format!("trade_{}", self.next_value()))
    }
}

/// Deterministic identifiers `trade_1`, `trade_2`, ... for reproducible runs.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    next: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeIdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> TradeId {
        TradeId(format!("trade_{}", self.next.fetch_add(1, Ordering::Relaxed)))
    }
}
