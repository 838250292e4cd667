// In crates/execution/src/commission.rs

use rust_decimal::Decimal;

/// A flat-rate commission schedule.
///
/// The rate is a fraction of notional, e.g. `0.0005` for 5 basis points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionModel {
    rate: Decimal,
}

impl CommissionModel {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Commission for a single fill, or `None` when it is not representable.
    pub fn commission(&self, price: Decimal, quantity: Decimal) -> Option<Decimal> {
        price.checked_mul(quantity)?.checked_mul(self.rate)
    }

    /// Commission for a round trip: an entry and an exit leg, each quoted at its own price.
    pub fn total_commission(&self, entry_price: Decimal, exit_price: Decimal, quantity: Decimal) -> Option<Decimal> {
        self.commission(entry_price, quantity)?
            .checked_add(self.commission(exit_price, quantity)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn five_basis_points_on_fifty_dollars() {
        let model = CommissionModel::new(dec!(0.0005));
        assert_eq!(model.commission(dec!(10), dec!(5)), Some(dec!(0.025)));
    }

    #[test]
    fn zero_rate_is_free() {
        let model = CommissionModel::new(Decimal::ZERO);
        assert_eq!(model.commission(dec!(123.45), dec!(7)), Some(Decimal::ZERO));
    }

    #[test]
    fn round_trip_is_sum_of_legs() {
        let model = CommissionModel::new(dec!(0.001));
        let total = model.total_commission(dec!(10), dec!(12.5), dec!(3)).unwrap();
        let legs = model.commission(dec!(10), dec!(3)).unwrap() + model.commission(dec!(12.5), dec!(3)).unwrap();
        assert_eq!(total, legs);
        assert_eq!(total, dec!(0.0675));
    }

    #[test]
    fn overflowing_notional_has_no_commission() {
        let model = CommissionModel::new(dec!(0.0005));
        assert_eq!(model.commission(Decimal::MAX, dec!(2)), None);
        assert_eq!(model.total_commission(dec!(10), Decimal::MAX, dec!(2)), None);
    }
}
