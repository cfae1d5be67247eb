use crate::app::menu::{boxed, center, choose_key, prompt_until, say_all, MENU_WIDTH};
use crate::app::sessions::ExportPlan;
use crate::config::toml_config::ArcadeConfig;
use crate::core::donations::{self, DonationDesk, LoginError, Role};
use crate::domain::model::Money;
use crate::domain::ports::{Console, Session, Storage};
use crate::utils::error::{ArcadeError, Result};
use crate::utils::validation::is_digits;
use async_trait::async_trait;

struct MenuItem {
    key: &'static str,
    label: &'static str,
    needs_login: bool,
    needs_admin: bool,
}

const HOMEPAGE: &[MenuItem] = &[
    MenuItem { key: "1", label: "Login", needs_login: false, needs_admin: false },
    MenuItem { key: "2", label: "Register", needs_login: false, needs_admin: false },
    MenuItem { key: "3", label: "Show All Donations", needs_login: false, needs_admin: false },
    MenuItem { key: "4", label: "Make Donation", needs_login: true, needs_admin: false },
    MenuItem { key: "5", label: "View My Donations", needs_login: true, needs_admin: false },
    MenuItem { key: "6", label: "Logout", needs_login: true, needs_admin: false },
    MenuItem { key: "S", label: "Administrative Settings", needs_login: true, needs_admin: true },
    MenuItem { key: "Q", label: "Exit", needs_login: false, needs_admin: false },
];

const ADMIN_MENU: &[(&str, &str)] = &[
    ("1", "Change User Password"),
    ("2", "Change User Privileges"),
    ("Q", "Return to Main Menu"),
];

/// DonateMe: a small donations desk with standard users and admins.
pub struct DonationsSession<S: Storage> {
    desk: DonationDesk,
    active: Option<String>,
    export: Option<ExportPlan<S>>,
}

impl<S: Storage> DonationsSession<S> {
    pub fn new(desk: DonationDesk) -> Self {
        Self {
            desk,
            active: None,
            export: None,
        }
    }

    pub fn from_config(config: &ArcadeConfig) -> Result<Self> {
        let desk = DonationDesk::with_admin(
            &config.donations.admin_username,
            &config.donations.admin_password,
        )?;
        Ok(Self::new(desk))
    }

    pub fn with_export(mut self, plan: ExportPlan<S>) -> Self {
        self.export = Some(plan);
        self
    }

    pub fn desk(&self) -> &DonationDesk {
        &self.desk
    }

    pub fn active_user(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn is_admin(&self) -> bool {
        self.active
            .as_deref()
            .and_then(|name| self.desk.account(name))
            .is_some_and(|account| account.is_admin())
    }

    fn homepage(&self) -> Vec<String> {
        let visible: Vec<(&str, &str)> = HOMEPAGE
            .iter()
            .filter(|item| !item.needs_login || self.active.is_some())
            .filter(|item| !item.needs_admin || self.is_admin())
            .map(|item| (item.key, item.label))
            .collect();
        let status = match &self.active {
            Some(name) => format!("Logged in as: {}", name),
            None => "You must login to make a donation or view your donations.".to_string(),
        };
        boxed("DonateMe Homepage", &visible, Some(&status))
    }

    async fn read_username(console: &mut dyn Console) -> Result<String> {
        prompt_until(console, "Enter a username: ", |answer| {
            donations::normalize_username(answer).map_err(|e| e.user_friendly_message())
        })
        .await
    }

    async fn read_password(console: &mut dyn Console) -> Result<String> {
        prompt_until(console, "Enter a password: ", |answer| {
            donations::check_password(answer)
                .map(|_| answer.to_string())
                .map_err(|e| e.user_friendly_message())
        })
        .await
    }

    async fn login(&mut self, console: &mut dyn Console) -> Result<()> {
        let username = console.read_line("Enter a username: ").await?;
        let password = console.read_line("Enter a password: ").await?;
        console.blank();
        match self.desk.login(&username, &password) {
            Ok(account) => {
                console.say(&format!("Welcome back {}!", account.username));
                self.active = Some(account.username.clone());
            }
            Err(LoginError::WrongPassword(name)) => {
                console.say(&format!("Incorrect password for `{}`.", name));
                self.active = None;
            }
            Err(LoginError::UnknownUser) => {
                console.say("User not found. Please register.");
                self.active = None;
            }
        }
        Ok(())
    }

    async fn register(&mut self, console: &mut dyn Console) -> Result<()> {
        let username = Self::read_username(console).await?;
        if self.desk.is_registered(&username) {
            console.say("Username already registered.");
            return Ok(());
        }
        let password = Self::read_password(console).await?;
        let registered = self.desk.register(&username, &password)?.username.clone();
        console.blank();
        console.say(&format!("Username {} registered!", registered));
        if !self.is_admin() {
            self.active = Some(registered);
        }
        Ok(())
    }

    fn list_donations(&self, console: &mut dyn Console, mine: bool) {
        let header = if mine { "My Donations" } else { "All Donations" };
        console.blank();
        console.say(&center(&format!(" {} ", header), MENU_WIDTH, '-'));
        console.blank();
        if self.desk.ledger().is_empty() {
            console.say("Currently, there are no donations.");
            console.blank();
            return;
        }

        let active = self.active.as_deref();
        let shown: Vec<_> = match active {
            Some(donor) if mine => self.desk.donations_by(donor).collect(),
            _ => self.desk.ledger().iter().collect(),
        };
        for donation in &shown {
            let who = if Some(donation.donor.as_str()) == active {
                "You".to_string()
            } else {
                donation.donor.clone()
            };
            console.say(&format!(
                "{} donated {} (Timestamp: {})",
                who,
                donation.value,
                donation.timestamp()
            ));
        }
        let total: Money = shown.iter().map(|d| d.value).sum();
        console.blank();
        console.say(&format!("TOTAL = {}", total));
        console.blank();
    }

    async fn donate(&mut self, console: &mut dyn Console, donor: &str) -> Result<()> {
        let amount = prompt_until(console, "Enter amount to donate: ", |answer| {
            let answer = answer.trim();
            match answer.parse::<u64>() {
                Ok(dollars) if is_digits(answer) && dollars > 0 => Money::try_dollars(dollars).map_err(|_| {
                    format!(
                        "A single donation cannot exceed ${}. Please try again.",
                        Money::MAX_ENTRY_DOLLARS
                    )
                }),
                _ => Err("You must enter a positive number as the donation amount. Please try again.".to_string()),
            }
        })
        .await?;
        self.desk.donate(donor, amount)?;
        console.blank();
        console.say("Thank you for your donation!");
        Ok(())
    }

    async fn confirm_admin(console: &mut dyn Console) -> Result<String> {
        console
            .read_line("Enter your administrative password to confirm the change: ")
            .await
    }

    async fn change_password(&mut self, console: &mut dyn Console, admin: &str) -> Result<()> {
        let target = Self::read_username(console).await?;
        if self.desk.account(&target).is_none() {
            console.say(&format!("There is no user named `{}` in the system.", target));
            return Ok(());
        }
        let password = Self::read_password(console).await?;
        let confirmation = Self::confirm_admin(console).await?;
        console.blank();
        match self.desk.change_password(admin, &confirmation, &target, &password) {
            Ok(()) => console.say(&format!("The password for `{}` has been changed.", target)),
            Err(ArcadeError::Unauthorized { message }) => console.say(&message),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn change_privileges(&mut self, console: &mut dyn Console, admin: &str) -> Result<()> {
        let target = Self::read_username(console).await?;
        let current = match self.desk.account(&target) {
            Some(account) => account.role,
            None => {
                console.say(&format!("There is no user named `{}` in the system.", target));
                return Ok(());
            }
        };
        console.say(&match current {
            Role::Admin => format!("`{}` will be changed from an admin to a standard user.", target),
            Role::Standard => format!("`{}` will be changed from a standard user to an admin.", target),
        });
        let confirmation = Self::confirm_admin(console).await?;
        console.blank();
        match self.desk.toggle_role(admin, &confirmation, &target) {
            Ok(Role::Admin) => console.say(&format!("The user `{}` has been promoted to an admin.", target)),
            Ok(Role::Standard) => console.say(&format!("The admin `{}` has been demoted to a standard user.", target)),
            Err(ArcadeError::Unauthorized { message }) => console.say(&message),
            Err(e @ ArcadeError::LastAdmin) => console.say(&e.user_friendly_message()),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn admin_settings(&mut self, console: &mut dyn Console, admin: &str) -> Result<()> {
        loop {
            say_all(console, boxed("Administrative Settings", ADMIN_MENU, None));
            let choice = choose_key(console, "Choose an option: ", &["1", "2", "Q"]).await?;
            console.blank();
            match choice.as_str() {
                "1" => self.change_password(console, admin).await?,
                "2" => self.change_privileges(console, admin).await?,
                _ => return Ok(()),
            }
            console.blank();
            if !self.is_admin() {
                return Ok(());
            }
        }
    }

    async fn finish(&self, console: &mut dyn Console) -> Result<()> {
        console.say("Thank you for using this application. Have a great day!");
        if let Some(plan) = &self.export {
            plan.write(console, "donations", self.desk.ledger()).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<S: Storage> Session for DonationsSession<S> {
    fn name(&self) -> &'static str {
        "donations"
    }

    async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        let keys: Vec<&str> = HOMEPAGE.iter().map(|item| item.key).collect();
        loop {
            say_all(console, self.homepage());
            let choice = choose_key(console, "Choose an option: ", &keys).await?;
            console.blank();

            let Some(item) = HOMEPAGE.iter().find(|item| item.key == choice) else {
                continue;
            };
            if item.needs_login && self.active.is_none() {
                console.say(&format!(
                    "You selected `{}`, however, you must be logged in to access this feature. Please select another option.",
                    item.label
                ));
                console.blank();
                continue;
            }
            if item.needs_admin && !self.is_admin() {
                console.say(&format!(
                    "You selected `{}`, however, you must be an administrator to access this feature. Please select another option.",
                    item.label
                ));
                console.blank();
                continue;
            }

            let active = self.active.clone().unwrap_or_default();
            match item.key {
                "1" => self.login(console).await?,
                "2" => self.register(console).await?,
                "3" => self.list_donations(console, false),
                "4" => self.donate(console, &active).await?,
                "5" => self.list_donations(console, true),
                "6" => {
                    self.active = None;
                    console.say("You have successfully logged out.");
                }
                "S" => self.admin_settings(console, &active).await?,
                _ => return self.finish(console).await,
            }
            console.blank();
        }
    }
}
