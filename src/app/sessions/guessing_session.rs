use crate::app::menu::{boxed, choose_key, prompt_until, say_all};
use crate::config::toml_config::{ArcadeConfig, GuessingConfig};
use crate::core::guessing::{self, Feedback, NumberHunt, Purse, SearchTrace};
use crate::domain::ports::{Console, Session};
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;

const MAIN_MENU: &[(&str, &str)] = &[
    ("1", "Guess Methods"),
    ("2", "Gamble Against the Computer"),
    ("Q", "Quit"),
];

const METHODS: &[(&str, &str)] = &[
    ("1", "User Input"),
    ("2", "Linear Search"),
    ("3", "Binary Search"),
];

/// Number guessing: play it yourself, watch a search algorithm, or bet on one.
pub struct GuessingSession {
    settings: GuessingConfig,
    rng: StdRng,
}

impl GuessingSession {
    pub fn new(settings: GuessingConfig, rng: StdRng) -> Self {
        Self { settings, rng }
    }

    pub fn from_config(config: &ArcadeConfig, rng: StdRng) -> Self {
        Self::new(config.guessing.clone(), rng)
    }

    async fn read_parameters(console: &mut dyn Console) -> Result<(u32, i64, i64)> {
        let tries = prompt_until(console, "Enter the number of tries: ", |answer| {
            guessing::parse_parameter(answer, None)
        })
        .await?;
        let start = prompt_until(console, "Enter the lower bound of the guess interval: ", |answer| {
            guessing::parse_parameter(answer, None)
        })
        .await?;
        let stop = prompt_until(console, "Enter the upper bound of the guess interval: ", |answer| {
            guessing::parse_parameter(answer, Some(start))
        })
        .await?;
        Ok((u32::try_from(tries).unwrap_or(u32::MAX), start, stop))
    }

    async fn choose_method(console: &mut dyn Console) -> Result<usize> {
        say_all(console, boxed("Random Number Guess Methods", METHODS, None));
        let method = prompt_until(
            console,
            "Select the corresponding number of the desired guess method for the options listed: ",
            |answer| match answer.trim() {
                "1" => Ok(0),
                "2" => Ok(1),
                "3" => Ok(2),
                _ => Err("You selected an invalid option. Try again.".to_string()),
            },
        )
        .await?;
        console.say(&format!("You chose '{}' as your guess method.", METHODS[method].1));
        console.blank();
        Ok(method)
    }

    async fn user_guess(console: &mut dyn Console, secret: i64, tries: u32, start: i64, stop: i64) -> Result<bool> {
        let mut hunt = NumberHunt::new(secret, start, stop, tries);
        while !hunt.is_over() {
            console.say(&format!("Number of tries left: {}", hunt.tries_left()));
            let input = console
                .read_line(&format!("Guess a number between {} and {}: ", start, stop))
                .await?;
            let feedback = hunt.submit(&input);
            console.say(&feedback.to_string());
            if !feedback.consumes_try() && feedback != Feedback::Correct {
                console.blank();
            }
        }
        if !hunt.is_solved() {
            console.say(&format!("Tough luck! The correct number was {}.", hunt.secret()));
        }
        Ok(hunt.is_solved())
    }

    fn show_trace(console: &mut dyn Console, trace: &SearchTrace) {
        say_all(console, &trace.lines);
    }

    async fn method_selector(&mut self, console: &mut dyn Console) -> Result<bool> {
        let (tries, start, stop) = Self::read_parameters(console).await?;
        console.blank();
        let method = Self::choose_method(console).await?;
        let secret = self.rng.gen_range(start..=stop);
        tracing::debug!("Secret number {} in [{}, {}] with {} tries", secret, start, stop, tries);

        let found = match method {
            0 => Self::user_guess(console, secret, tries, start, stop).await?,
            1 => {
                let trace = guessing::linear_search(secret, tries, start, stop);
                Self::show_trace(console, &trace);
                trace.found
            }
            _ => {
                let trace = guessing::binary_search(secret, tries, start, stop);
                Self::show_trace(console, &trace);
                trace.found
            }
        };
        Ok(found)
    }

    async fn gamble(&mut self, console: &mut dyn Console) -> Result<u64> {
        let mut purse = Purse::new(
            self.settings.starting_purse,
            self.settings.max_bet,
            self.settings.goal,
        );
        let tries = self.settings.computer_tries;

        while purse.is_playing() {
            console.say(&format!("ROUND {:02}", purse.rounds() + 1));
            console.say("The computer will guess a random number using a 'Linear Search' algorithm.");
            let prediction = prompt_until(
                console,
                "Do you think the computer will guess the correct number? (y/n): ",
                |answer| {
                    guessing::parse_prediction(answer)
                        .ok_or_else(|| "Invalid selection. Please choose 'y' or 'n'.".to_string())
                },
            )
            .await?;
            let prompt = format!("Enter a whole dollar amount to wager up to ${}: ", purse.bet_cap());
            let bet = prompt_until(console, &prompt, |answer| purse.parse_bet(answer)).await?;
            console.blank();

            let start = self.rng.gen_range(1..=100_i64);
            let stop = start + 2 * i64::from(tries);
            let secret = self.rng.gen_range(start..=stop);
            let trace = guessing::linear_search(secret, tries, start, stop);
            Self::show_trace(console, &trace);

            purse.settle(prediction, trace.found, bet);
            console.say(&format!("Total Winnings: ${}", purse.winnings()));
            console.blank();
        }
        console.say(&purse.summary());
        tracing::info!("🎰 Gamble finished after {} rounds with ${}", purse.rounds(), purse.winnings());
        Ok(purse.winnings())
    }
}

#[async_trait]
impl Session for GuessingSession {
    fn name(&self) -> &'static str {
        "guessing"
    }

    async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            say_all(console, boxed("Random Number Guess Games", MAIN_MENU, None));
            let choice = choose_key(console, "Choose an option: ", &["1", "2", "Q"]).await?;
            console.blank();
            match choice.as_str() {
                "1" => {
                    let found = self.method_selector(console).await?;
                    tracing::info!("🔢 Guess round finished, number found: {}", found);
                }
                "2" => {
                    self.gamble(console).await?;
                }
                _ => {
                    console.say("Thanks for playing!");
                    return Ok(());
                }
            }
            console.blank();
        }
    }
}
