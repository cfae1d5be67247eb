use crate::utils::error::{ArcadeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative amount of money stored as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);
    /// Largest whole-dollar amount a single entry may carry.
    pub const MAX_ENTRY_DOLLARS: u64 = 1_000_000_000;

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// Converts a typed-in dollar amount, rejecting anything above `MAX_ENTRY_DOLLARS`.
    pub fn try_dollars(dollars: u64) -> Result<Self> {
        if dollars > Self::MAX_ENTRY_DOLLARS {
            return Err(ArcadeError::InvalidAmount {
                input: dollars.to_string(),
            });
        }
        dollars
            .checked_mul(100)
            .map(Money)
            .ok_or_else(|| ArcadeError::InvalidAmount {
                input: dollars.to_string(),
            })
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> Result<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| ArcadeError::InvalidAmount {
                input: other.to_string(),
            })
    }

    pub fn checked_sub(self, other: Money) -> Result<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| ArcadeError::InsufficientFunds {
                requested: other.to_string(),
                available: self.to_string(),
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        // 總額封頂，不溢位
        iter.fold(Money::ZERO, |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::dollars(1234).to_string(), "$1234.00");
        assert_eq!(Money::from_cents(6750).to_string(), "$67.50");
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let balance = Money::dollars(20);
        assert_eq!(balance.checked_sub(Money::dollars(20)).unwrap(), Money::ZERO);
        assert!(matches!(
            balance.checked_sub(Money::dollars(21)),
            Err(ArcadeError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn sums_ledger_values() {
        let total: Money = [Money::dollars(5), Money::dollars(10)].into_iter().sum();
        assert_eq!(total, Money::dollars(15));
    }

    #[test]
    fn entry_amounts_are_capped() {
        assert_eq!(
            Money::try_dollars(Money::MAX_ENTRY_DOLLARS).unwrap(),
            Money::from_cents(Money::MAX_ENTRY_DOLLARS * 100)
        );
        assert!(matches!(
            Money::try_dollars(Money::MAX_ENTRY_DOLLARS + 1),
            Err(ArcadeError::InvalidAmount { .. })
        ));
        assert!(Money::try_dollars(999_999_999_999_999_999).is_err());
    }

    #[test]
    fn huge_totals_saturate_instead_of_overflowing() {
        let huge = Money::from_cents(u64::MAX - 10);
        let total: Money = [huge, huge, Money::dollars(1)].into_iter().sum();
        assert_eq!(total, Money::from_cents(u64::MAX));
    }

    #[test]
    fn addition_past_the_limit_is_an_error() {
        let huge = Money::from_cents(u64::MAX - 10);
        assert!(matches!(
            huge.checked_add(Money::dollars(1)),
            Err(ArcadeError::InvalidAmount { .. })
        ));
    }
}
