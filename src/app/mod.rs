pub mod console;
pub mod menu;
pub mod sessions;
pub mod words;

use crate::config::cli::LocalStorage;
use crate::config::toml_config::ArcadeConfig;
use crate::domain::ports::{Console, Session};
use crate::utils::error::{ArcadeError, Result};
use sessions::{
    seeded_rng, AtmSession, BattleSession, DonationsSession, ExportPlan, GuessingSession,
    HangmanSession,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    Battle,
    Atm,
    Donations,
    Guessing,
    Hangman,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Game::Battle => "battle",
            Game::Atm => "atm",
            Game::Donations => "donations",
            Game::Guessing => "guessing",
            Game::Hangman => "hangman",
        };
        write!(f, "{}", name)
    }
}

/// Builds the session for `game`. With `export` set, reports go to `export.output_path`.
pub fn build_session(game: Game, config: &ArcadeConfig, export: bool) -> Result<Box<dyn Session>> {
    let rng = seeded_rng(config.general.seed);
    let plan = export.then(|| {
        ExportPlan::new(
            LocalStorage::new(config.export.output_path.clone()),
            config.export.formats.clone(),
        )
    });

    let session: Box<dyn Session> = match game {
        Game::Battle => Box::new(BattleSession::from_config(config, rng)),
        Game::Atm => Box::new(AtmSession::from_config(config)),
        Game::Guessing => Box::new(GuessingSession::from_config(config, rng)),
        Game::Donations => {
            let session = DonationsSession::from_config(config)?;
            match plan {
                Some(plan) => Box::new(session.with_export(plan)),
                None => Box::new(session),
            }
        }
        Game::Hangman => {
            // 字典與逐字稿路徑相對於工作目錄
            let session = HangmanSession::from_config(config, LocalStorage::new(".".to_string()), rng);
            match plan {
                Some(plan) => Box::new(session.with_export(plan)),
                None => Box::new(session),
            }
        }
    };
    Ok(session)
}

/// Runs one session to completion. Running out of input ends it quietly.
pub struct ArcadeEngine {
    session: Box<dyn Session>,
}

impl ArcadeEngine {
    pub fn new(session: Box<dyn Session>) -> Self {
        Self { session }
    }

    pub async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        let name = self.session.name();
        tracing::info!("🚀 Starting {} session", name);

        match self.session.run(console).await {
            Ok(()) => {
                tracing::info!("✅ {} session finished", name);
                Ok(())
            }
            Err(ArcadeError::InputClosed) => {
                tracing::info!("📭 Input closed, ending {} session", name);
                console.blank();
                console.say(&ArcadeError::InputClosed.user_friendly_message());
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    "❌ {} session failed: {} (Category: {:?}, Severity: {:?})",
                    name,
                    e,
                    e.category(),
                    e.severity()
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::console::ScriptedConsole;

    #[tokio::test]
    async fn engine_treats_end_of_input_as_a_clean_exit() {
        let config = ArcadeConfig::default();
        let mut engine = ArcadeEngine::new(build_session(Game::Atm, &config, false).unwrap());
        let mut console = ScriptedConsole::new(["1"]);

        engine.run(&mut console).await.unwrap();
        assert!(console.contains("No more input. Goodbye!"));
    }

    #[test]
    fn every_game_builds_from_defaults() {
        let config = ArcadeConfig::default();
        for game in [Game::Battle, Game::Atm, Game::Donations, Game::Guessing, Game::Hangman] {
            let session = build_session(game, &config, true).unwrap();
            assert_eq!(session.name(), game.to_string());
        }
    }
}
