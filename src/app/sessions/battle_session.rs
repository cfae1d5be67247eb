use crate::app::menu::{ask_yes_no, say_all};
use crate::config::toml_config::ArcadeConfig;
use crate::core::battle::{self, Character, Selection};
use crate::domain::ports::{Console, Session};
use crate::utils::error::{ArcadeError, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The Menace of Mordor: choose a hero, fight a random villain, maybe play again.
pub struct BattleSession {
    heroes: Vec<Character>,
    villains: Vec<Character>,
    replay_attempts: u32,
    rng: StdRng,
}

impl BattleSession {
    pub fn new(heroes: Vec<Character>, villains: Vec<Character>, replay_attempts: u32, rng: StdRng) -> Self {
        Self {
            heroes,
            villains,
            replay_attempts,
            rng,
        }
    }

    pub fn from_config(config: &ArcadeConfig, rng: StdRng) -> Self {
        Self::new(
            config.battle.heroes.clone(),
            config.battle.villains.clone(),
            config.battle.replay_attempts,
            rng,
        )
    }

    async fn choose_hero(&self, console: &mut dyn Console) -> Result<Option<Character>> {
        loop {
            say_all(console, battle::roster_lines(&self.heroes));
            let choice = console
                .read_line("Choose your character (or enter `Q` to quit): ")
                .await?;
            console.blank();
            match battle::select(&self.heroes, &choice) {
                Selection::Pick(idx) => {
                    let hero = self.heroes[idx].clone();
                    console.say("The stats for your selected character are shown below:");
                    say_all(console, hero.details());
                    console.blank();
                    return Ok(Some(hero));
                }
                Selection::Quit => {
                    console.say("You have selected to `QUIT`. Thanks for using the app!");
                    return Ok(None);
                }
                Selection::Unknown => {
                    console.say("Unknown character. Try again.");
                    console.blank();
                }
            }
        }
    }
}

#[async_trait]
impl Session for BattleSession {
    fn name(&self) -> &'static str {
        "battle"
    }

    async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            say_all(console, battle::title_screen());
            console.blank();

            let hero = match self.choose_hero(console).await? {
                Some(hero) => hero,
                None => return Ok(()),
            };
            let villain = self
                .villains
                .choose(&mut self.rng)
                .cloned()
                .ok_or_else(|| ArcadeError::MissingConfigError {
                    field: "battle.villains".to_string(),
                })?;
            tracing::info!("⚔️ {} versus {}", hero.name, villain.name);

            say_all(console, battle::banner(&hero, &villain));
            console.blank();

            let report = battle::battle(&hero, &villain, &mut self.rng);
            for strike in &report.strikes {
                say_all(console, strike.lines());
                console.blank();
            }
            console.say(&format!("The {} has lost the battle.", report.loser.name));
            console.blank();

            let again = ask_yes_no(
                console,
                "Would you like to play again? (y/n): ",
                self.replay_attempts,
            )
            .await?;
            if again != Some(true) {
                break;
            }
            console.blank();
        }
        console.say("Thanks for using the app!");
        Ok(())
    }
}
