pub mod atm_session;
pub mod battle_session;
pub mod donations_session;
pub mod guessing_session;
pub mod hangman_session;

pub use atm_session::AtmSession;
pub use battle_session::BattleSession;
pub use donations_session::DonationsSession;
pub use guessing_session::GuessingSession;
pub use hangman_session::HangmanSession;

use crate::core::report;
use crate::domain::ports::{Console, Storage};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Fixed seed for reproducible runs, entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            tracing::debug!("🎲 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Where and how a session writes its report when it ends.
#[derive(Debug, Clone)]
pub struct ExportPlan<S: Storage> {
    pub storage: S,
    pub formats: Vec<String>,
}

impl<S: Storage> ExportPlan<S> {
    pub fn new(storage: S, formats: Vec<String>) -> Self {
        Self { storage, formats }
    }

    pub async fn write<T: Serialize + Sync>(
        &self,
        console: &mut dyn Console,
        stem: &str,
        rows: &[T],
    ) -> Result<Vec<String>> {
        let written = report::write_exports(&self.storage, stem, rows, &self.formats).await?;
        for path in &written {
            console.say(&format!("📁 Report saved to: {}", path));
        }
        Ok(written)
    }
}
