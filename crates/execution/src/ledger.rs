// In crates/execution/src/ledger.rs

use crate::{Error, Result};
use core_types::{Order, Position, Symbol};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// What a fill did to the position it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillEffect {
    /// No position existed; a new one was opened at the fill price.
    Opened,
    /// The position grew in its current direction; the entry price was blended.
    Increased,
    /// The position shrank but kept its direction; the remainder is re-based at the fill price.
    Reduced,
    /// The position netted to exactly zero and was removed.
    Closed,
    /// The fill overshot the close and reversed the direction.
    Flipped,
}

/// Applies a filled order to the position book using weighted-average cost accounting.
///
/// Invariants:
/// - the stored quantity is the signed sum of all fills (buys positive, sells negative);
/// - a position that nets to zero is removed, never stored with a zero quantity;
/// - a flip re-bases the whole new quantity at the fill price and restarts `open_time`;
/// - a partial reduction re-bases the remainder at the fill price and keeps `open_time`;
/// - on error the book is left untouched.
pub fn apply_fill(positions: &mut HashMap<Symbol, Position>, order: &Order) -> Result<FillEffect> {
    let delta = order.side.signed(order.quantity);

    let existing = match positions.get_mut(&order.symbol) {
        Some(existing) => existing,
        None => {
            positions.insert(
                order.symbol.clone(),
                Position {
                    symbol: order.symbol.clone(),
                    quantity: delta,
                    avg_entry_price: order.price,
                    open_time: order.time,
                },
            );
            return Ok(FillEffect::Opened);
        }
    };

    let current = existing.quantity;
    let new_quantity = current.checked_add(delta).ok_or_else(|| overflow(order))?;

    if new_quantity.is_zero() {
        positions.remove(&order.symbol);
        return Ok(FillEffect::Closed);
    }

    let was_long = current > Decimal::ZERO;
    let is_long = new_quantity > Decimal::ZERO;
    let same_direction = (delta > Decimal::ZERO) == was_long;

    let effect = if was_long != is_long {
        existing.avg_entry_price = order.price;
        existing.open_time = order.time;
        FillEffect::Flipped
    } else if same_direction {
        existing.avg_entry_price = blend(existing.avg_entry_price, current, order.price, delta, new_quantity)
            .ok_or_else(|| overflow(order))?;
        FillEffect::Increased
    } else {
        existing.avg_entry_price = order.price;
        FillEffect::Reduced
    };

    existing.quantity = new_quantity;
    Ok(effect)
}

fn blend(avg: Decimal, current: Decimal, price: Decimal, delta: Decimal, new_quantity: Decimal) -> Option<Decimal> {
    let held = avg.checked_mul(current.abs())?;
    let added = price.checked_mul(delta.abs())?;
    held.checked_add(added)?.checked_div(new_quantity.abs())
}

fn overflow(order: &Order) -> Error {
    Error::ExecutionFailed {
        reason: format!(
            "position for {} overflows applying {} {} @ {}",
            order.symbol, order.side, order.quantity, order.price
        ),
    }
}
