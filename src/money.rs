//! Monetary amounts.
//!
//! Amounts are held as fixed precision `Decimal`s rather than floats, rounded to two decimal places
//! once on the way in so that what is stored is exactly what gets written back out. The wrapper
//! itself accepts negative values, since a checking account balance may be overdrawn; rejecting
//! negative *transaction* amounts is the job of the deposit and withdraw entry points.
use rust_decimal::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Number of decimal places kept and rendered.
const DECIMAL_PLACES: u32 = 2;

/// An immutable amount of money. Arithmetic returns a new value, or `None` when the result
/// does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MonetaryValue(Decimal);

impl MonetaryValue {
    pub const ZERO: MonetaryValue = MonetaryValue(Decimal::ZERO);

    /// Rounds `amount` to two decimal places (banker's rounding).
    pub fn new(amount: Decimal) -> MonetaryValue {
        MonetaryValue(amount.round_dp(DECIMAL_PLACES))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn checked_add(self, other: MonetaryValue) -> Option<MonetaryValue> {
        self.0.checked_add(other.0).map(MonetaryValue::new)
    }

    pub fn checked_sub(self, other: MonetaryValue) -> Option<MonetaryValue> {
        self.0.checked_sub(other.0).map(MonetaryValue::new)
    }

    /// Adds, clamping at the largest representable amount.
    pub fn saturating_add(self, other: MonetaryValue) -> MonetaryValue {
        MonetaryValue::new(self.0.saturating_add(other.0))
    }
}

impl From<Decimal> for MonetaryValue {
    fn from(amount: Decimal) -> Self {
        MonetaryValue::new(amount)
    }
}

/// Always renders exactly two decimal digits, e.g. `250.00` or `-25.00`.
impl fmt::Display for MonetaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.0.round_dp(DECIMAL_PLACES);
        rounded.rescale(DECIMAL_PLACES);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        write!(f, "{}", rounded)
    }
}

/// Parses a plain decimal literal such as `150.0` or `-25`, rounding it to two places. The sign
/// is not checked here.
impl FromStr for MonetaryValue {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(MonetaryValue::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn renders_two_decimal_places() {
        assert_eq!(MonetaryValue::new(dec!(250)).to_string(), "250.00");
        assert_eq!(MonetaryValue::new(dec!(150.5)).to_string(), "150.50");
        assert_eq!(MonetaryValue::new(dec!(-25.0)).to_string(), "-25.00");
        assert_eq!(MonetaryValue::new(dec!(10.125)).to_string(), "10.12");
        assert_eq!(MonetaryValue::new(dec!(-0.001)).to_string(), "0.00");
    }

    #[test]
    fn arithmetic_returns_new_values() {
        let a = MonetaryValue::new(dec!(200.0));
        let b = MonetaryValue::new(dec!(225.0));
        assert_eq!(a.checked_sub(b), Some(MonetaryValue::new(dec!(-25.0))));
        assert_eq!(a.checked_add(b), Some(MonetaryValue::new(dec!(425.0))));
        assert_eq!(a, MonetaryValue::new(dec!(200)));
    }

    #[test]
    fn arithmetic_reports_overflow() {
        let max = MonetaryValue::new(Decimal::MAX);
        let one = MonetaryValue::new(dec!(1));
        assert_eq!(max.checked_add(one), None);
        assert_eq!(MonetaryValue::new(Decimal::MIN).checked_sub(one), None);
        assert_eq!(max.saturating_add(one), max);
    }

    #[test]
    fn amounts_are_rounded_on_the_way_in() {
        assert_eq!(MonetaryValue::new(dec!(10.125)), MonetaryValue::new(dec!(10.12)));
        assert_eq!(
            "10.125".parse::<MonetaryValue>().unwrap().amount(),
            dec!(10.12)
        );
        assert_eq!(MonetaryValue::new(dec!(0.005)), MonetaryValue::ZERO);
        let reparsed: MonetaryValue = MonetaryValue::new(dec!(10.125)).to_string().parse().unwrap();
        assert_eq!(reparsed, MonetaryValue::new(dec!(10.125)));
    }

    #[test]
    fn negative_values_are_allowed() {
        let overdrawn: MonetaryValue = "-25.00".parse().unwrap();
        assert!(overdrawn.is_negative());
        assert!(overdrawn < MonetaryValue::ZERO);
        assert!(!MonetaryValue::ZERO.is_negative());
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!("12abc".parse::<MonetaryValue>().is_err());
        assert!("".parse::<MonetaryValue>().is_err());
    }
}
