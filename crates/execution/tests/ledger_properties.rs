//! Property tests for the position ledger and the executor's cash accounting.
//!
//! 1. Quantity conservation: stored quantity is the signed sum of fills, absent iff zero
//! 2. Cost basis: two same-direction fills blend to the weighted mean, in either order
//! 3. Flips and partial reductions re-base at the reducing fill's price
//! 4. Cash never goes negative after an accepted buy; rejected buys change nothing

use core_types::{Order, Side, Symbol, timestamp_from_millis};
use execution::{
    CommissionModel, Error, Executor, Portfolio, SequenceIdGenerator, SimulatedExecutor, apply_fill,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|q| Decimal::new(q, 2))
}

fn arb_price() -> impl Strategy<Value = Decimal> {
    (100i64..50_000).prop_map(|p| Decimal::new(p, 2))
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn fill(side: Side, quantity: Decimal, price: Decimal, step: i64) -> Order {
    Order {
        symbol: Symbol::from("BTCUSDT"),
        quantity,
        price,
        side,
        time: timestamp_from_millis(step),
    }
}

fn symbol() -> Symbol {
    Symbol::from("BTCUSDT")
}

proptest! {
    #[test]
    fn quantity_is_signed_sum_of_fills(
        fills in prop::collection::vec((arb_side(), arb_quantity(), arb_price()), 1..40)
    ) {
        let mut book = HashMap::new();
        let mut expected = Decimal::ZERO;

        for (step, (side, quantity, price)) in fills.into_iter().enumerate() {
            apply_fill(&mut book, &fill(side, quantity, price, step as i64)).unwrap();
            expected += side.signed(quantity);

            match book.get(&symbol()) {
                Some(pos) => {
                    prop_assert_eq!(pos.quantity, expected);
                    prop_assert!(!pos.quantity.is_zero());
                }
                None => prop_assert!(expected.is_zero()),
            }
        }
    }

    #[test]
    fn same_direction_fills_blend_order_independently(
        side in arb_side(),
        q1 in arb_quantity(),
        q2 in arb_quantity(),
        p1 in arb_price(),
        p2 in arb_price(),
    ) {
        let mut forward = HashMap::new();
        apply_fill(&mut forward, &fill(side, q1, p1, 0)).unwrap();
        apply_fill(&mut forward, &fill(side, q2, p2, 1)).unwrap();

        let mut backward = HashMap::new();
        apply_fill(&mut backward, &fill(side, q2, p2, 0)).unwrap();
        apply_fill(&mut backward, &fill(side, q1, p1, 1)).unwrap();

        let expected = (p1 * q1 + p2 * q2) / (q1 + q2);
        prop_assert_eq!(forward[&symbol()].avg_entry_price, expected);
        prop_assert_eq!(backward[&symbol()].avg_entry_price, expected);
    }

    #[test]
    fn flip_resets_average_to_fill_price(
        opening in arb_quantity(),
        overshoot in arb_quantity(),
        p1 in arb_price(),
        p2 in arb_price(),
    ) {
        let mut book = HashMap::new();
        apply_fill(&mut book, &fill(Side::Buy, opening, p1, 0)).unwrap();
        apply_fill(&mut book, &fill(Side::Sell, opening + overshoot, p2, 1)).unwrap();

        let pos = &book[&symbol()];
        prop_assert_eq!(pos.quantity, -overshoot);
        prop_assert_eq!(pos.avg_entry_price, p2);
    }

    #[test]
    fn partial_reduction_rebases_at_fill_price(
        remaining in arb_quantity(),
        reduction in arb_quantity(),
        p1 in arb_price(),
        p2 in arb_price(),
    ) {
        let mut book = HashMap::new();
        apply_fill(&mut book, &fill(Side::Buy, remaining + reduction, p1, 0)).unwrap();
        apply_fill(&mut book, &fill(Side::Sell, reduction, p2, 1)).unwrap();

        let pos = &book[&symbol()];
        prop_assert_eq!(pos.quantity, remaining);
        prop_assert_eq!(pos.avg_entry_price, p2);
        prop_assert_eq!(pos.open_time, timestamp_from_millis(0));
    }

    #[test]
    fn accepted_buys_never_overdraw_cash(
        cash in (0i64..20_000).prop_map(|c| Decimal::new(c, 2)),
        orders in prop::collection::vec((arb_side(), arb_quantity(), arb_price()), 1..20),
    ) {
        let mut executor = SimulatedExecutor::new(
            CommissionModel::new(dec!(0.0005)),
            Arc::new(SequenceIdGenerator::new()),
        );
        let mut portfolio = Portfolio::new(cash);

        for (step, (side, quantity, price)) in orders.into_iter().enumerate() {
            let before = portfolio.clone();
            match executor.execute(&fill(side, quantity, price, step as i64), &mut portfolio) {
                Ok(_) if side == Side::Buy => prop_assert!(portfolio.cash >= Decimal::ZERO),
                Ok(_) => {}
                Err(Error::InsufficientFunds { .. }) => prop_assert_eq!(&portfolio, &before),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}

#[test]
fn round_trip_commission_identity() {
    let model = CommissionModel::new(dec!(0.0005));
    for (entry, exit, qty) in [(dec!(10), dec!(12), dec!(5)), (dec!(0.5), dec!(0.25), dec!(1000))] {
        assert_eq!(
            model.total_commission(entry, exit, qty).unwrap(),
            model.commission(entry, qty).unwrap() + model.commission(exit, qty).unwrap()
        );
    }
}
