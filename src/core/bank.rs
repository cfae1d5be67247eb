use crate::domain::model::Money;
use crate::utils::error::{ArcadeError, Result};
use crate::utils::validation::{is_alpha_between, is_digits};

pub const USERNAME_MAX_LEN: usize = 10;
pub const PIN_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub username: String,
    pin: String,
    pub balance: Money,
}

impl Customer {
    pub fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin
    }
}

pub fn is_username_valid(username: &str) -> bool {
    is_alpha_between(username, 1, USERNAME_MAX_LEN)
}

pub fn is_pin_valid(pin: &str) -> bool {
    pin.len() == PIN_LEN && is_digits(pin)
}

/// Parses a whole-dollar amount. It must be all digits, greater than zero,
/// at most `Money::MAX_ENTRY_DOLLARS`, and no larger than `max` when a cap is given.
pub fn parse_amount(input: &str, max: Option<Money>) -> Result<Money> {
    let input = input.trim();
    if !is_digits(input) {
        return Err(ArcadeError::InvalidAmount {
            input: input.to_string(),
        });
    }
    let dollars: u64 = input.parse().map_err(|_| ArcadeError::InvalidAmount {
        input: input.to_string(),
    })?;
    let amount = Money::try_dollars(dollars).map_err(|_| ArcadeError::InvalidAmount {
        input: input.to_string(),
    })?;
    if amount.is_zero() {
        return Err(ArcadeError::InvalidAmount {
            input: input.to_string(),
        });
    }
    if let Some(max) = max {
        if amount > max {
            return Err(ArcadeError::InsufficientFunds {
                requested: amount.to_string(),
                available: max.to_string(),
            });
        }
    }
    Ok(amount)
}

pub fn is_amount_valid(input: &str, max: Option<Money>) -> bool {
    parse_amount(input, max).is_ok()
}

#[derive(Debug, Clone, Default)]
pub struct Bank {
    customers: Vec<Customer>,
    starting_balance: Money,
}

impl Bank {
    pub fn new(starting_balance: Money) -> Self {
        Self {
            customers: Vec::new(),
            starting_balance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn customer(&self, username: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.username == username)
    }

    pub fn exists(&self, username: &str, pin: &str) -> bool {
        self.customers
            .iter()
            .any(|c| c.username == username && c.pin_matches(pin))
    }

    pub fn register(&mut self, username: &str, pin: &str) -> Result<&Customer> {
        if !is_username_valid(username) {
            return Err(ArcadeError::ValidationError {
                message: "The username must consist of 1-10 letters.".to_string(),
            });
        }
        if !is_pin_valid(pin) {
            return Err(ArcadeError::ValidationError {
                message: "The PIN must contain exactly four digits.".to_string(),
            });
        }
        if self.exists(username, pin) {
            return Err(ArcadeError::DuplicateAccount {
                username: username.to_string(),
            });
        }

        tracing::info!("Registered customer `{}`", username);
        self.customers.push(Customer {
            username: username.to_string(),
            pin: pin.to_string(),
            balance: self.starting_balance,
        });
        Ok(&self.customers[self.customers.len() - 1])
    }

    /// Returns the index of the customer with these exact credentials.
    pub fn authenticate(&self, username: &str, pin: &str) -> Option<usize> {
        self.customers
            .iter()
            .position(|c| c.username == username && c.pin_matches(pin))
    }

    pub fn get(&self, idx: usize) -> Result<&Customer> {
        self.customers
            .get(idx)
            .ok_or_else(|| ArcadeError::UnknownAccount {
                username: format!("#{}", idx),
            })
    }

    fn get_mut(&mut self, idx: usize) -> Result<&mut Customer> {
        self.customers
            .get_mut(idx)
            .ok_or_else(|| ArcadeError::UnknownAccount {
                username: format!("#{}", idx),
            })
    }

    /// Case-insensitive lookup used for transfer recipients.
    pub fn find(&self, username: &str) -> Option<usize> {
        let wanted = username.trim().to_lowercase();
        self.customers
            .iter()
            .position(|c| c.username.to_lowercase() == wanted)
    }

    pub fn deposit(&mut self, idx: usize, amount: Money) -> Result<Money> {
        let customer = self.get_mut(idx)?;
        customer.balance = customer.balance.checked_add(amount)?;
        tracing::debug!("Deposit of {} for `{}`", amount, customer.username);
        Ok(customer.balance)
    }

    pub fn withdraw(&mut self, idx: usize, amount: Money) -> Result<Money> {
        let customer = self.get_mut(idx)?;
        customer.balance = customer.balance.checked_sub(amount)?;
        tracing::debug!("Withdrawal of {} for `{}`", amount, customer.username);
        Ok(customer.balance)
    }

    /// Moves `amount` from `from` to `to` after re-checking the sender's PIN.
    /// Either both balances change or neither does.
    pub fn transfer(&mut self, from: usize, to: usize, amount: Money, pin: &str) -> Result<()> {
        if from == to {
            return Err(ArcadeError::ValidationError {
                message: "You cannot transfer funds to yourself.".to_string(),
            });
        }
        let sender = self.get(from)?;
        if !sender.pin_matches(pin) {
            return Err(ArcadeError::Unauthorized {
                message: "Invalid PIN. Transaction canceled.".to_string(),
            });
        }
        let new_sender = sender.balance.checked_sub(amount)?;
        let new_recipient = self.get(to)?.balance.checked_add(amount)?;

        self.get_mut(from)?.balance = new_sender;
        self.get_mut(to)?.balance = new_recipient;
        tracing::info!("Transferred {} from #{} to #{}", amount, from, to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_with(names: &[(&str, &str)]) -> Bank {
        let mut bank = Bank::new(Money::ZERO);
        for (name, pin) in names {
            bank.register(name, pin).unwrap();
        }
        bank
    }

    #[test]
    fn test_is_amount_valid() {
        assert!(is_amount_valid("100", None));
        assert!(is_amount_valid("250", Some(Money::dollars(500))));
        assert!(is_amount_valid("500", Some(Money::dollars(500))));
        assert!(!is_amount_valid("fifty", None));
        assert!(!is_amount_valid("-20", None));
        assert!(!is_amount_valid("0", None));
        assert!(!is_amount_valid("12.75", None));
        assert!(!is_amount_valid("1000", Some(Money::dollars(500))));
    }

    #[test]
    fn oversized_amounts_are_invalid() {
        assert!(is_amount_valid("1000000000", None));
        assert!(!is_amount_valid("1000000001", None));
        assert!(matches!(
            parse_amount("999999999999999999", None),
            Err(ArcadeError::InvalidAmount { .. })
        ));
        // 超過 u64 範圍
        assert!(!is_amount_valid("99999999999999999999999", None));
    }

    #[test]
    fn deposit_overflow_leaves_balance_untouched() {
        let mut bank = Bank::new(Money::from_cents(u64::MAX - 50));
        bank.register("Jovan", "0911").unwrap();
        let idx = bank.authenticate("Jovan", "0911").unwrap();

        assert!(matches!(
            bank.deposit(idx, Money::dollars(1)),
            Err(ArcadeError::InvalidAmount { .. })
        ));
        assert_eq!(bank.get(idx).unwrap().balance, Money::from_cents(u64::MAX - 50));
    }

    #[test]
    fn test_credentials_rules() {
        assert!(is_username_valid("Jonathan"));
        assert!(!is_username_valid("Jonathan99"));
        assert!(!is_username_valid("Bartholomew"));
        assert!(is_pin_valid("0917"));
        assert!(!is_pin_valid("917"));
        assert!(!is_pin_valid("09171"));
        assert!(!is_pin_valid("09a7"));
    }

    #[test]
    fn duplicate_credentials_are_rejected() {
        let mut bank = bank_with(&[("Jonathan", "0917")]);
        assert!(matches!(
            bank.register("Jonathan", "0917"),
            Err(ArcadeError::DuplicateAccount { .. })
        ));
        // 同名不同 PIN 允許
        assert!(bank.register("Jonathan", "1111").is_ok());
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn withdraw_cannot_overdraw() {
        let mut bank = bank_with(&[("Jovan", "0911")]);
        let idx = bank.authenticate("Jovan", "0911").unwrap();
        bank.deposit(idx, Money::dollars(40)).unwrap();
        assert!(bank.withdraw(idx, Money::dollars(41)).is_err());
        assert_eq!(bank.withdraw(idx, Money::dollars(40)).unwrap(), Money::ZERO);
    }

    #[test]
    fn transfer_moves_funds_atomically() {
        let mut bank = bank_with(&[("Alice", "5678"), ("Bob", "1234")]);
        let alice = bank.authenticate("Alice", "5678").unwrap();
        let bob = bank.find("bob").unwrap();
        bank.deposit(alice, Money::dollars(5000)).unwrap();

        assert!(matches!(
            bank.transfer(alice, bob, Money::dollars(500), "0000"),
            Err(ArcadeError::Unauthorized { .. })
        ));
        assert!(bank.transfer(alice, bob, Money::dollars(6000), "5678").is_err());
        assert_eq!(bank.get(bob).unwrap().balance, Money::ZERO);

        bank.transfer(alice, bob, Money::dollars(500), "5678").unwrap();
        assert_eq!(bank.get(alice).unwrap().balance, Money::dollars(4500));
        assert_eq!(bank.get(bob).unwrap().balance, Money::dollars(500));
    }
}
