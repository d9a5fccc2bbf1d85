//! Account entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountNumber;

use super::error::AccountError;

/// An account and its current balance.
///
/// `version` is the optimistic-concurrency counter maintained by the store;
/// an update only lands if the stored version still matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    number: AccountNumber,
    balance: Decimal,
    version: i64,
}

impl Account {
    /// Rebuilds an account from its stored state.
    #[must_use]
    pub const fn restore(number: AccountNumber, balance: Decimal, version: i64) -> Self {
        Self {
            number,
            balance,
            version,
        }
    }

    /// The store-assigned account number.
    #[must_use]
    pub const fn number(&self) -> AccountNumber {
        self.number
    }

    /// The current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// The version this value was loaded at.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Adds `amount` to the balance.
    pub fn credit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::NegativeAmount(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::Overflow(self.number))?;
        Ok(())
    }

    /// Subtracts `amount` from the balance.
    ///
    /// Affordability is not checked here; callers run
    /// [`is_affordable`](Self::is_affordable) first.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::NegativeAmount(amount));
        }
        if self.balance < Decimal::ZERO {
            return Err(AccountError::NegativeBalance {
                number: self.number,
                balance: self.balance,
            });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(AccountError::Overflow(self.number))?;
        Ok(())
    }

    /// True iff the balance is strictly positive and covers `amount`.
    #[must_use]
    pub fn is_affordable(&self, amount: Decimal) -> bool {
        self.balance > Decimal::ZERO && self.balance >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account::restore(AccountNumber::new(1), balance, 0)
    }

    #[test]
    fn test_credit_increases_balance() {
        let mut acc = account(dec!(1.00));
        acc.credit(dec!(10.00)).unwrap();
        assert_eq!(acc.balance(), dec!(11.00));
    }

    #[test]
    fn test_credit_past_decimal_max_overflows() {
        let mut acc = account(Decimal::MAX);
        assert_eq!(
            acc.credit(dec!(10)),
            Err(AccountError::Overflow(AccountNumber::new(1)))
        );
        assert_eq!(acc.balance(), Decimal::MAX);
    }

    #[test]
    fn test_credit_rejects_negative_amount() {
        let mut acc = account(dec!(1.00));
        assert_eq!(
            acc.credit(dec!(-1)),
            Err(AccountError::NegativeAmount(dec!(-1)))
        );
        assert_eq!(acc.balance(), dec!(1.00));
    }

    #[test]
    fn test_debit_decreases_balance() {
        let mut acc = account(dec!(123.00));
        acc.debit(dec!(10.00)).unwrap();
        assert_eq!(acc.balance(), dec!(113.00));
    }

    #[test]
    fn test_debit_rejects_negative_amount() {
        let mut acc = account(dec!(5));
        assert!(matches!(
            acc.debit(dec!(-0.01)),
            Err(AccountError::NegativeAmount(_))
        ));
        assert_eq!(acc.balance(), dec!(5));
    }

    #[test]
    fn test_debit_rejects_negative_balance() {
        let mut acc = account(dec!(-3));
        assert!(matches!(
            acc.debit(dec!(1)),
            Err(AccountError::NegativeBalance { .. })
        ));
        assert_eq!(acc.balance(), dec!(-3));
    }

    #[test]
    fn test_debit_does_not_check_affordability() {
        let mut acc = account(dec!(1));
        acc.debit(dec!(5)).unwrap();
        assert_eq!(acc.balance(), dec!(-4));
    }

    #[test]
    fn test_is_affordable() {
        assert!(account(dec!(100)).is_affordable(dec!(100)));
        assert!(account(dec!(100)).is_affordable(dec!(0.01)));
        assert!(!account(dec!(100)).is_affordable(dec!(100.01)));
    }

    #[test]
    fn test_zero_or_negative_balance_never_affords() {
        assert!(!account(Decimal::ZERO).is_affordable(Decimal::ZERO));
        assert!(!account(dec!(-1)).is_affordable(Decimal::ZERO));
        assert!(!account(dec!(-1)).is_affordable(dec!(-5)));
    }

    fn balance_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Debiting the whole balance leaves exactly zero.
        #[test]
        fn prop_debit_full_balance_leaves_zero(balance in balance_strategy()) {
            let mut acc = account(balance);
            prop_assert!(acc.is_affordable(balance));
            acc.debit(balance).unwrap();
            prop_assert_eq!(acc.balance(), Decimal::ZERO);
        }

        /// Anything above the balance is never affordable.
        #[test]
        fn prop_more_than_balance_is_not_affordable(
            balance in balance_strategy(),
            excess in 1i64..1_000_000i64,
        ) {
            let acc = account(balance);
            prop_assert!(!acc.is_affordable(balance + Decimal::new(excess, 2)));
        }

        /// A debit followed by a credit of the same amount restores the balance.
        #[test]
        fn prop_debit_then_credit_is_identity(
            balance in balance_strategy(),
            amount in balance_strategy(),
        ) {
            let mut acc = account(balance);
            acc.debit(amount).unwrap();
            acc.credit(amount).unwrap();
            prop_assert_eq!(acc.balance(), balance);
        }
    }
}
