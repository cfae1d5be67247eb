use crate::app::menu::{ask_yes_no, boxed, choose_key, prompt_until, say_all};
use crate::config::toml_config::ArcadeConfig;
use crate::core::bank::{self, Bank};
use crate::domain::ports::{Console, Session};
use crate::utils::error::{ArcadeError, Result};
use async_trait::async_trait;

const MAIN_MENU: &[(&str, &str)] = &[
    ("1", "New Registration"),
    ("2", "User Login"),
    ("3", "Exit Application"),
];

const USER_MENU: &[(&str, &str)] = &[
    ("1", "View Balance"),
    ("2", "Deposit Funds"),
    ("3", "Withdraw Funds"),
    ("4", "Transfer Funds"),
    ("5", "Logout"),
];

/// Automated teller machine: register, log in, move money around.
pub struct AtmSession {
    bank: Bank,
    max_login_attempts: u32,
}

impl AtmSession {
    pub fn new(bank: Bank, max_login_attempts: u32) -> Self {
        Self {
            bank,
            max_login_attempts,
        }
    }

    pub fn from_config(config: &ArcadeConfig) -> Self {
        Self::new(
            Bank::new(config.bank.starting_balance()),
            config.bank.max_login_attempts,
        )
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    async fn register(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            let username = prompt_until(console, "Enter a name to register: ", |answer| {
                let answer = answer.trim();
                if bank::is_username_valid(answer) {
                    Ok(answer.to_string())
                } else {
                    Err("The username must consist of 1-10 letters. Please try again.".to_string())
                }
            })
            .await?;
            let pin = prompt_until(console, "Enter a pin: ", |answer| {
                let answer = answer.trim();
                if bank::is_pin_valid(answer) {
                    Ok(answer.to_string())
                } else {
                    Err("The PIN must contain exactly four digits. Please try again.".to_string())
                }
            })
            .await?;
            console.blank();

            match self.bank.register(&username, &pin) {
                Ok(customer) => {
                    console.say(&format!(
                        "{} has been registered with a starting balance of {}.",
                        customer.username, customer.balance
                    ));
                    return Ok(());
                }
                Err(ArcadeError::DuplicateAccount { .. }) => {
                    console.say("A user with these credentials already exists in the system.");
                    match ask_yes_no(console, "Do you want to try again? (y/n) ", 1).await? {
                        Some(true) => console.blank(),
                        Some(false) => {
                            console.say("Please login with an existing set of credentials.");
                            return Ok(());
                        }
                        None => return Ok(()),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn login(&self, console: &mut dyn Console) -> Result<Option<usize>> {
        let mut failures = 0;
        loop {
            console.say("USER LOGIN");
            let username = console.read_line("Enter name: ").await?;
            let pin = console.read_line("Enter PIN: ").await?;
            console.blank();

            if let Some(idx) = self.bank.authenticate(username.trim(), pin.trim()) {
                console.say("Login successful!");
                console.blank();
                return Ok(Some(idx));
            }

            console.say("Invalid credentials!");
            console.blank();
            failures += 1;
            tracing::warn!("Failed login attempt {} for `{}`", failures, username.trim());
            if failures >= self.max_login_attempts {
                console.say(&format!("You had {} unsuccessful login attempts.", failures));
                let choice = console
                    .read_line("Enter `Q` to quit to the main menu, otherwise hit any other key to continue: ")
                    .await?;
                console.blank();
                if choice.trim().eq_ignore_ascii_case("q") {
                    return Ok(None);
                }
            }
        }
    }

    fn show_balance(&self, console: &mut dyn Console, idx: usize) -> Result<()> {
        let customer = self.bank.get(idx)?;
        console.say(&format!("Current Balance: {}", customer.balance));
        Ok(())
    }

    async fn deposit(&mut self, console: &mut dyn Console, idx: usize) -> Result<()> {
        loop {
            let amount = prompt_until(console, "Enter a whole dollar amount to deposit: ", |answer| {
                bank::parse_amount(answer, None)
                    .map_err(|_| "The deposit amount is invalid. Please try again.".to_string())
            })
            .await?;
            match self.bank.deposit(idx, amount) {
                Ok(_) => return self.show_balance(console, idx),
                Err(ArcadeError::InvalidAmount { .. }) => {
                    tracing::warn!("Deposit of {} would overflow account #{}", amount, idx);
                    console.say("This deposit would exceed the maximum account balance. Please try a smaller amount.");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn withdraw(&mut self, console: &mut dyn Console, idx: usize) -> Result<()> {
        let balance = self.bank.get(idx)?.balance;
        let amount = prompt_until(console, "Enter a whole dollar amount to withdraw: ", |answer| {
            bank::parse_amount(answer, Some(balance)).map_err(|_| {
                format!(
                    "The requested withdrawal amount must be a positive value that does not exceed your current balance ({}).",
                    balance
                )
            })
        })
        .await?;
        self.bank.withdraw(idx, amount)?;
        self.show_balance(console, idx)
    }

    async fn transfer(&mut self, console: &mut dyn Console, idx: usize) -> Result<()> {
        let sender = self.bank.get(idx)?.clone();
        let recipient = console.read_line("Enter the recipient's name: ").await?;
        let to = match self.bank.find(&recipient) {
            Some(to) if to != idx => to,
            _ => {
                console.say("Operation cancelled! User does not exist.");
                return Ok(());
            }
        };
        let recipient = self.bank.get(to)?.username.clone();

        let answer = console
            .read_line(&format!("Enter an amount to transfer to {}: ", recipient))
            .await?;
        let amount = match bank::parse_amount(&answer, Some(sender.balance)) {
            Ok(amount) => amount,
            Err(_) => {
                console.say("Operation cancelled! Amount invalid.");
                return Ok(());
            }
        };

        console.say(&format!("You are transferring {} to {}", amount, recipient));
        console.say("Authentication required");
        let pin = console.read_line("Enter your PIN: ").await?;
        match self.bank.transfer(idx, to, amount, pin.trim()) {
            Ok(()) => console.say("Transfer authorized"),
            Err(ArcadeError::Unauthorized { message }) => console.say(&message),
            Err(e) => return Err(e),
        }
        console.blank();
        for customer in [self.bank.get(idx)?, self.bank.get(to)?] {
            console.say(&format!("{}'s balance: {}", customer.username, customer.balance));
        }
        Ok(())
    }

    async fn user_loop(&mut self, console: &mut dyn Console, idx: usize) -> Result<()> {
        loop {
            let username = self.bank.get(idx)?.username.clone();
            say_all(
                console,
                boxed("User Menu", USER_MENU, Some(&format!("User: {}", username))),
            );
            let choice = choose_key(console, "Choose an option: ", &["1", "2", "3", "4", "5"]).await?;
            console.blank();

            if matches!(choice.as_str(), "3" | "4") && self.bank.get(idx)?.balance.is_zero() {
                console.say("You have insufficient funds to make any withdrawal. Please select another option.");
                console.blank();
                continue;
            }
            if let Some((_, label)) = USER_MENU.iter().find(|(key, _)| *key == choice) {
                console.say(&format!("You have selected `{}`", label));
                console.blank();
            }

            match choice.as_str() {
                "1" => self.show_balance(console, idx)?,
                "2" => self.deposit(console, idx).await?,
                "3" => self.withdraw(console, idx).await?,
                "4" => self.transfer(console, idx).await?,
                _ => {
                    console.say(&format!("Goodbye {}!", username));
                    console.blank();
                    return Ok(());
                }
            }
            console.blank();
        }
    }
}

#[async_trait]
impl Session for AtmSession {
    fn name(&self) -> &'static str {
        "atm"
    }

    async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            say_all(console, boxed("Main Menu", MAIN_MENU, None));
            let choice = choose_key(console, "Choose an option: ", &["1", "2", "3"]).await?;
            console.blank();

            match choice.as_str() {
                "1" => {
                    console.say("You have selected `New Registration`");
                    console.blank();
                    self.register(console).await?;
                }
                "2" if self.bank.is_empty() => {
                    console.say("Currently there are no users enrolled in the system. Please `Register` or `Exit` the application.");
                }
                "2" => {
                    if let Some(idx) = self.login(console).await? {
                        self.user_loop(console, idx).await?;
                    }
                }
                _ => {
                    console.say("Thank you for using this ATM service.");
                    return Ok(());
                }
            }
            console.blank();
        }
    }
}
