use crate::app::menu::{choose_number, numbered, say_all, title};
use crate::app::sessions::ExportPlan;
use crate::app::words::{DefaultWords, DictionaryWords, TranscriptWords};
use crate::config::toml_config::ArcadeConfig;
use crate::core::clock::{time_label, RoundClock};
use crate::core::hangman::{
    self, GuessCheck, Mode, Outcome, Round, RoundEnd, Scoreboard, SourceKind,
};
use crate::domain::ports::{Console, Session, Storage, WordSupply};
use crate::utils::error::{ArcadeError, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;

const OPTIONS: &[(&str, &str)] = &[
    ("start", "start a new game"),
    ("rules", "show the rules"),
    ("end", "end the application"),
];

const GUESS_PROMPT: &str = "Enter a single letter in the target word, or enter the entire word itself: ";

/// Hangman with standard, timed and speech modes, plus a running scoreboard.
pub struct HangmanSession<S: Storage> {
    modes: Vec<Mode>,
    dictionary: Box<dyn WordSupply>,
    speech: Box<dyn WordSupply>,
    scoreboard: Scoreboard,
    text_width: usize,
    rng: StdRng,
    export: Option<ExportPlan<S>>,
}

impl<S: Storage> HangmanSession<S> {
    pub fn new(
        modes: Vec<Mode>,
        dictionary: Box<dyn WordSupply>,
        speech: Box<dyn WordSupply>,
        text_width: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            modes,
            dictionary,
            speech,
            scoreboard: Scoreboard::default(),
            text_width,
            rng,
            export: None,
        }
    }

    pub fn with_export(mut self, plan: ExportPlan<S>) -> Self {
        self.export = Some(plan);
        self
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    async fn choose_mode(&self, console: &mut dyn Console) -> Result<Mode> {
        say_all(console, title("game modes"));
        console.blank();
        let items: Vec<(&str, &str)> = self.modes.iter().map(|m| (m.name, m.label)).collect();
        say_all(console, numbered(&items));
        let idx = choose_number(console, self.modes.len()).await?;
        let mode = self.modes[idx].clone();
        console.blank();
        console.say(&format!(
            "You have selected the `{}` game mode.",
            hangman::title_case(mode.name)
        ));
        Ok(mode)
    }

    /// Picks from the mode's source, falling back to the built-in list.
    async fn mystery_word(&mut self, console: &mut dyn Console, mode: &Mode) -> Result<String> {
        let supply: &dyn WordSupply = match mode.source {
            SourceKind::Default => &DefaultWords,
            SourceKind::Dictionary => self.dictionary.as_ref(),
            SourceKind::Speech => self.speech.as_ref(),
        };

        let mut words = match supply.words(mode.min_word_length).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("⚠️ The {} is unavailable: {}", supply.describe(), e);
                if mode.source == SourceKind::Speech {
                    console.say(&e.user_friendly_message());
                }
                Vec::new()
            }
        };
        if words.is_empty() && mode.source != SourceKind::Default {
            tracing::warn!(
                "⚠️ No {}+ letter words from the {}, using built-in words",
                mode.min_word_length,
                supply.describe()
            );
            words = DefaultWords.words(mode.min_word_length).await?;
        }
        if words.is_empty() {
            words = DefaultWords.words(0).await?;
        }

        hangman::pick_word(&words, &mut self.rng).ok_or_else(|| ArcadeError::WordSourceError {
            message: "No mystery word is available.".to_string(),
        })
    }

    async fn play(&mut self, console: &mut dyn Console, round: &mut Round, clock: &RoundClock) -> Result<RoundEnd> {
        console.blank();
        console.blank();
        say_all(console, round.board());
        loop {
            let guess = loop {
                console.blank();
                match clock.read(console, GUESS_PROMPT).await? {
                    None => {
                        console.say("Time's Up!");
                        return Ok(RoundEnd::TimedOut);
                    }
                    Some(input) => match round.check(&input) {
                        GuessCheck::Invalid => continue,
                        GuessCheck::Repeated => console.say("You already used this guess."),
                        GuessCheck::Fresh(guess) => break guess,
                    },
                }
            };

            console.blank();
            let reaction = if round.grade(&guess).is_correct() {
                hangman::praise(&mut self.rng)
            } else {
                hangman::taunt(&mut self.rng)
            };
            console.say(reaction);
            console.blank();
            console.blank();
            say_all(console, round.board());

            if round.is_won() {
                return Ok(RoundEnd::Won);
            }
            if round.is_lost() {
                return Ok(RoundEnd::Lost);
            }
        }
    }

    async fn start_game(&mut self, console: &mut dyn Console) -> Result<()> {
        let mode = self.choose_mode(console).await?;
        console.blank();

        let word = self.mystery_word(console, &mode).await?;
        let mut round = Round::new(&word, mode.max_errors);
        console.say(&format!(
            "The mystery word contains {} letters.",
            round.word_len()
        ));

        let mut clock = if mode.has_timer {
            console.say(&format!(
                "You will have {} to complete the game.",
                time_label(mode.time_limit)
            ));
            console.say("Good luck.");
            RoundClock::timed(mode.time_limit)
        } else {
            RoundClock::untimed()
        };

        let end = self.play(console, &mut round, &clock).await?;
        clock.stop();
        let duration = clock.elapsed();
        tracing::info!("🎮 {} round ended: {:?} after {:?}", mode.name, end, duration);

        console.blank();
        say_all(console, hangman::result_lines(&mode, round.word(), end, duration));
        self.scoreboard.record(Outcome::new(&mode, &round, end, duration));
        console.blank();
        say_all(console, self.scoreboard.summary());
        Ok(())
    }

    async fn show_rules(&self, console: &mut dyn Console) -> Result<()> {
        let mode = self.choose_mode(console).await?;
        console.blank();
        say_all(console, title("rules"));
        console.blank();
        for (heading, lines) in mode.rules(self.text_width) {
            console.say(&format!("{}:", heading));
            say_all(console, lines);
            console.blank();
        }
        Ok(())
    }

    async fn finish(&self, console: &mut dyn Console) -> Result<()> {
        console.say("I hope you enjoyed this game. Have a great day!");
        if let Some(plan) = &self.export {
            let rows: Vec<_> = self.scoreboard.history().iter().map(Outcome::row).collect();
            plan.write(console, "hangman_history", &rows).await?;
        }
        Ok(())
    }
}

impl<S: Storage + Clone + 'static> HangmanSession<S> {
    /// Dictionary and transcript words are read through `storage`.
    pub fn from_config(config: &ArcadeConfig, storage: S, rng: StdRng) -> Self {
        let hangman = &config.hangman;
        Self::new(
            hangman::default_modes(hangman.max_errors, hangman.time_limit()),
            Box::new(DictionaryWords::new(storage.clone(), hangman.dictionary_path.clone())),
            Box::new(TranscriptWords::new(storage, hangman.transcript_path.clone())),
            config.general.text_width,
            rng,
        )
    }
}

#[async_trait]
impl<S: Storage> Session for HangmanSession<S> {
    fn name(&self) -> &'static str {
        "hangman"
    }

    async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            say_all(console, title("hangman"));
            console.blank();
            say_all(console, numbered(OPTIONS));
            let choice = choose_number(console, OPTIONS.len()).await?;
            console.say(&format!(
                "You have chosen to `{}`",
                hangman::title_case(OPTIONS[choice].1)
            ));
            console.blank();

            match choice {
                0 => self.start_game(console).await?,
                1 => self.show_rules(console).await?,
                _ => return self.finish(console).await,
            }

            console.blank();
            console.say(&format!("<*x{}x*>", "=".repeat(self.text_width)));
            console.blank();
        }
    }
}
