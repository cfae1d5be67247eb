use crate::core::report;
use crate::domain::model::Money;
use crate::utils::error::{ArcadeError, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

pub const USERNAME_MAX_LEN: usize = 10;
pub const PASSWORD_MIN_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Standard,
    Admin,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub uid: Uuid,
    pub username: String,
    password: String,
    pub role: Role,
    pub donations: Vec<Uuid>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Donation {
    pub uid: Uuid,
    pub donor: String,
    #[serde(serialize_with = "serialize_money")]
    pub value: Money,
    pub created_at: DateTime<Local>,
}

fn serialize_money<S: serde::Serializer>(value: &Money, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&value.to_string())
}

impl Donation {
    pub fn timestamp(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Normalizes and checks a username: 1-10 characters, stored lowercase.
pub fn normalize_username(input: &str) -> Result<String> {
    let username = input.trim().to_lowercase();
    let len = username.chars().count();
    if len == 0 || len > USERNAME_MAX_LEN {
        return Err(ArcadeError::ValidationError {
            message: "The username cannot be over 10 characters.".to_string(),
        });
    }
    Ok(username)
}

pub fn check_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ArcadeError::ValidationError {
            message: "The password must be at least 5 characters. Please try again.".to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    UnknownUser,
    WrongPassword(String),
}

#[derive(Debug, Default)]
pub struct DonationDesk {
    accounts: Vec<Account>,
    ledger: Vec<Donation>,
}

impl DonationDesk {
    /// Creates a desk seeded with one administrator.
    pub fn with_admin(username: &str, password: &str) -> Result<Self> {
        let mut desk = Self::default();
        let username = normalize_username(username)?;
        check_password(password)?;
        desk.accounts.push(Account {
            uid: Uuid::new_v4(),
            username,
            password: password.to_string(),
            role: Role::Admin,
            donations: Vec::new(),
        });
        Ok(desk)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn ledger(&self) -> &[Donation] {
        &self.ledger
    }

    pub fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    fn account_mut(&mut self, username: &str) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.username == username)
            .ok_or_else(|| ArcadeError::UnknownAccount {
                username: username.to_string(),
            })
    }

    pub fn is_registered(&self, username: &str) -> bool {
        self.account(&username.to_lowercase()).is_some()
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<&Account> {
        let username = normalize_username(username)?;
        check_password(password)?;
        if self.is_registered(&username) {
            return Err(ArcadeError::DuplicateAccount { username });
        }
        tracing::info!("Registered donor `{}`", username);
        self.accounts.push(Account {
            uid: Uuid::new_v4(),
            username,
            password: password.to_string(),
            role: Role::Standard,
            donations: Vec::new(),
        });
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn login(&self, username: &str, password: &str) -> std::result::Result<&Account, LoginError> {
        let username = username.trim().to_lowercase();
        match self.account(&username) {
            Some(account) if account.password_matches(password) => Ok(account),
            Some(_) => Err(LoginError::WrongPassword(username)),
            None => Err(LoginError::UnknownUser),
        }
    }

    pub fn donate(&mut self, donor: &str, value: Money) -> Result<&Donation> {
        if value.is_zero() {
            return Err(ArcadeError::InvalidAmount {
                input: value.to_string(),
            });
        }
        let donation = Donation {
            uid: Uuid::new_v4(),
            donor: donor.to_string(),
            value,
            created_at: Local::now(),
        };
        self.account_mut(donor)?.donations.push(donation.uid);
        tracing::info!("Donation of {} by `{}`", value, donor);
        self.ledger.push(donation);
        Ok(&self.ledger[self.ledger.len() - 1])
    }

    /// A donor's donations in the order they were made, following the account's own record.
    pub fn donations_by<'a>(&'a self, donor: &str) -> impl Iterator<Item = &'a Donation> + 'a {
        let uids: &'a [Uuid] = self
            .account(donor)
            .map(|a| a.donations.as_slice())
            .unwrap_or_default();
        uids.iter()
            .filter_map(move |uid| self.ledger.iter().find(|d| d.uid == *uid))
    }

    fn require_admin(&self, admin: &str, admin_password: &str) -> Result<()> {
        match self.account(admin) {
            Some(a) if a.is_admin() && a.password_matches(admin_password) => Ok(()),
            Some(a) if a.is_admin() => Err(ArcadeError::Unauthorized {
                message: "Invalid admin password! The transaction has been cancelled.".to_string(),
            }),
            _ => Err(ArcadeError::Unauthorized {
                message: "You must be an administrator to access this feature.".to_string(),
            }),
        }
    }

    pub fn change_password(
        &mut self,
        admin: &str,
        admin_password: &str,
        target: &str,
        new_password: &str,
    ) -> Result<()> {
        self.require_admin(admin, admin_password)?;
        check_password(new_password)?;
        let account = self.account_mut(target)?;
        account.password = new_password.to_string();
        tracing::info!("Password changed for `{}` by `{}`", target, admin);
        Ok(())
    }

    /// Renders the whole ledger as `csv` or `json`.
    pub fn export_ledger(&self, format: &str) -> Result<Vec<u8>> {
        report::render(format, &self.ledger)
    }

    pub fn admin_count(&self) -> usize {
        self.accounts.iter().filter(|a| a.is_admin()).count()
    }

    /// Flips the role of `target`. Demoting the last remaining admin is refused.
    pub fn toggle_role(&mut self, admin: &str, admin_password: &str, target: &str) -> Result<Role> {
        self.require_admin(admin, admin_password)?;
        let current = self
            .account(target)
            .map(|a| a.role)
            .ok_or_else(|| ArcadeError::UnknownAccount {
                username: target.to_string(),
            })?;
        if current == Role::Admin && self.admin_count() <= 1 {
            return Err(ArcadeError::LastAdmin);
        }
        let account = self.account_mut(target)?;
        account.role = match current {
            Role::Admin => Role::Standard,
            Role::Standard => Role::Admin,
        };
        tracing::info!("Role of `{}` is now {:?}", target, account.role);
        Ok(account.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> DonationDesk {
        DonationDesk::with_admin("admin", "password123").unwrap()
    }

    #[test]
    fn usernames_are_lowercased_and_bounded() {
        assert_eq!(normalize_username("Alice").unwrap(), "alice");
        assert!(normalize_username("").is_err());
        assert!(normalize_username("abcdefghijk").is_err());
        assert!(check_password("abcd").is_err());
        assert!(check_password("abcde").is_ok());
    }

    #[test]
    fn login_distinguishes_unknown_and_wrong_password() {
        let mut desk = desk();
        desk.register("Alice", "secret1").unwrap();
        assert!(desk.login("ALICE", "secret1").is_ok());
        assert_eq!(
            desk.login("alice", "nope").unwrap_err(),
            LoginError::WrongPassword("alice".to_string())
        );
        assert_eq!(desk.login("bob", "secret1").unwrap_err(), LoginError::UnknownUser);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut desk = desk();
        desk.register("alice", "secret1").unwrap();
        assert!(matches!(
            desk.register("Alice", "other12"),
            Err(ArcadeError::DuplicateAccount { .. })
        ));
    }

    #[test]
    fn donations_are_tracked_per_donor() {
        let mut desk = desk();
        desk.register("alice", "secret1").unwrap();
        desk.donate("alice", Money::dollars(25)).unwrap();
        desk.donate("admin", Money::dollars(5)).unwrap();
        desk.donate("alice", Money::dollars(10)).unwrap();

        let mine: Money = desk.donations_by("alice").map(|d| d.value).sum();
        assert_eq!(mine, Money::dollars(35));
        assert_eq!(desk.account("alice").unwrap().donations.len(), 2);
        let values: Vec<Money> = desk.donations_by("alice").map(|d| d.value).collect();
        assert_eq!(values, vec![Money::dollars(25), Money::dollars(10)]);
        assert_eq!(desk.donations_by("ghost").count(), 0);
        assert_eq!(desk.ledger().len(), 3);
        assert!(desk.donate("ghost", Money::dollars(1)).is_err());
    }

    #[test]
    fn admin_changes_password_with_confirmation() {
        let mut desk = desk();
        desk.register("alice", "secret1").unwrap();
        assert!(matches!(
            desk.change_password("admin", "wrong", "alice", "newpass"),
            Err(ArcadeError::Unauthorized { .. })
        ));
        desk.change_password("admin", "password123", "alice", "newpass").unwrap();
        assert!(desk.login("alice", "newpass").is_ok());
    }

    #[test]
    fn last_admin_cannot_be_demoted() {
        let mut desk = desk();
        desk.register("alice", "secret1").unwrap();
        assert!(matches!(
            desk.toggle_role("admin", "password123", "admin"),
            Err(ArcadeError::LastAdmin)
        ));

        assert_eq!(desk.toggle_role("admin", "password123", "alice").unwrap(), Role::Admin);
        assert_eq!(desk.admin_count(), 2);
        assert_eq!(desk.toggle_role("alice", "secret1", "admin").unwrap(), Role::Standard);
        assert!(matches!(
            desk.toggle_role("admin", "password123", "alice"),
            Err(ArcadeError::Unauthorized { .. })
        ));
    }

    #[test]
    fn ledger_exports_as_csv() {
        let mut desk = desk();
        desk.donate("admin", Money::dollars(25)).unwrap();
        let csv = String::from_utf8(desk.export_ledger("csv").unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("uid,donor,value,created_at"));
        assert!(lines.next().unwrap().contains(",admin,$25.00,"));
    }
}
