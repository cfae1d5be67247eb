use async_trait::async_trait;
use small_arcade::app::console::ScriptedConsole;
use small_arcade::app::sessions::{seeded_rng, ExportPlan, HangmanSession};
use small_arcade::core::hangman::{default_modes, Mode, RoundEnd, SourceKind, DEFAULT_WORDS};
use small_arcade::domain::ports::{Console, Session, WordSupply};
use small_arcade::utils::error::{ArcadeError, Result};
use small_arcade::LocalStorage;
use std::collections::VecDeque;
use std::time::Duration;
use tempfile::TempDir;

struct FixedWords(&'static str);

#[async_trait]
impl WordSupply for FixedWords {
    fn describe(&self) -> &'static str {
        "fixed word"
    }

    async fn words(&self, _min_len: usize) -> Result<Vec<String>> {
        Ok(vec![self.0.to_string()])
    }
}

struct SilentWords;

#[async_trait]
impl WordSupply for SilentWords {
    fn describe(&self) -> &'static str {
        "silent microphone"
    }

    async fn words(&self, _min_len: usize) -> Result<Vec<String>> {
        Err(ArcadeError::WordSourceError {
            message: "I cannot hear anything.".to_string(),
        })
    }
}

/// Scripted answers where `None` leaves the prompt waiting forever.
struct StallingConsole {
    answers: VecDeque<Option<&'static str>>,
    output: Vec<String>,
}

impl StallingConsole {
    fn new(answers: Vec<Option<&'static str>>) -> Self {
        Self {
            answers: answers.into(),
            output: Vec::new(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

#[async_trait]
impl Console for StallingConsole {
    async fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.output.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Some(answer)) => Ok(answer.to_string()),
            Some(None) => std::future::pending().await,
            None => Err(ArcadeError::InputClosed),
        }
    }

    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}

fn session(modes: Vec<Mode>, word: &'static str) -> HangmanSession<LocalStorage> {
    HangmanSession::new(
        modes,
        Box::new(FixedWords(word)),
        Box::new(SilentWords),
        80,
        seeded_rng(Some(3)),
    )
}

fn modes() -> Vec<Mode> {
    default_modes(6, Duration::from_secs(180))
}

#[tokio::test]
async fn test_standard_game_is_won_letter_by_letter() {
    let mut hangman = session(modes(), "abracadabra");
    let mut console = ScriptedConsole::new([
        "1", "1", "z", "Z", "1", "ab", "a", "b", "r", "c", "d", "3",
    ]);

    hangman.run(&mut console).await.unwrap();

    assert!(console.contains("You have selected the `Standard` game mode."));
    assert!(console.contains("The mystery word contains 11 letters."));
    assert_eq!(console.count("You already used this guess."), 1);
    assert!(console.contains("Misses: Z"));
    assert!(console.contains("Word:   A B R A C A D A B R A"));
    assert!(console.contains("The correct word was `ABRACADABRA`."));
    assert!(console.contains("Congratulations. You won the game!"));
    assert!(console.contains("| Standard Mode: 01 of 01 |"));
    assert!(console.contains("I hope you enjoyed this game. Have a great day!"));

    let history = hangman.scoreboard().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].end, RoundEnd::Won);
    assert_eq!(history[0].tries(), 6);
}

#[tokio::test]
async fn test_six_misses_lose_the_round() {
    let mut hangman = session(modes(), "abracadabra");
    let mut console = ScriptedConsole::new(["1", "1", "e", "f", "g", "h", "i", "j", "3"]);

    hangman.run(&mut console).await.unwrap();

    assert!(console.contains("Misses: E, F, G, H, I, J"));
    assert!(console.contains("Whomp whomp. You lose! Better luck next time."));
    assert!(console.contains("| Standard Mode: 00 of 01 |"));
}

#[tokio::test]
async fn test_whole_word_guess_solves_the_round() {
    let mut hangman = session(modes(), "abracadabra");
    let mut console = ScriptedConsole::new(["1", "1", "ABRACADABRA", "3"]);

    hangman.run(&mut console).await.unwrap();

    assert!(console.contains("Congratulations. You won the game!"));
    assert_eq!(hangman.scoreboard().history()[0].tries(), 1);
}

#[tokio::test]
async fn test_speech_source_failure_falls_back_to_builtin_words() {
    let mut hangman = session(modes(), "abracadabra");
    let mut console = ScriptedConsole::new(["1", "3"]);

    let err = hangman.run(&mut console).await.unwrap_err();

    assert!(matches!(err, ArcadeError::InputClosed));
    assert!(console.contains("I cannot hear anything."));
    assert!(console.contains("The mystery word contains"));
}

#[tokio::test]
async fn test_rules_screen_lists_mode_parameters() {
    let mut hangman = session(modes(), "abracadabra");
    let mut console = ScriptedConsole::new(["2", "1", "3"]);

    hangman.run(&mut console).await.unwrap();

    assert!(console.contains("Game Mode:"));
    assert!(console.contains("STANDARD -- Traditional Game"));
    assert!(console.contains("Objective:"));
    assert!(console.contains("Word Source: Dictionary | Timed?: False | Minimum Word Length: 10"));
    assert!(hangman.scoreboard().history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timed_round_is_cut_off_when_time_runs_out() {
    let mut hangman = session(modes(), "abracadabra");
    let mut console = StallingConsole::new(vec![
        Some("1"),
        Some("2"),
        Some("e"),
        None,
        Some("3"),
    ]);

    hangman.run(&mut console).await.unwrap();

    assert!(console.contains("You will have 3 minutes and 0 seconds to complete the game."));
    assert!(console.contains("Time's Up!"));
    assert!(console.contains("You ran out of time! Tough luck."));
    assert!(console.contains("Game Duration: 3 minutes and 0 seconds"));
    assert!(console.contains("Timed Mode: 00 of 01"));

    let history = hangman.scoreboard().history();
    assert_eq!(history[0].end, RoundEnd::TimedOut);
    assert_eq!(history[0].duration, Duration::from_secs(180));
    // 計時模式用內建字庫
    assert!(DEFAULT_WORDS.contains(&history[0].word.as_str()));
}

#[tokio::test(start_paused = true)]
async fn test_timed_round_won_before_the_deadline() {
    let quick = Mode {
        name: "timed",
        label: "just in time",
        objective: "Beat the clock.",
        source: SourceKind::Dictionary,
        min_word_length: 3,
        has_timer: true,
        max_errors: 6,
        time_limit: Duration::from_secs(60),
    };
    let mut hangman = session(vec![quick], "cab");
    let mut console = ScriptedConsole::new(["1", "1", "cab", "3"]);

    hangman.run(&mut console).await.unwrap();

    assert!(console.contains("You will have 1 minutes and 0 seconds to complete the game."));
    assert!(console.contains("Congratulations. You finished...JUST IN TIME!!!"));
    assert!(console.contains("Game Duration: 0 minutes and 0 seconds"));
    assert!(!console.contains("Time's Up!"));
}

#[tokio::test]
async fn test_history_is_exported_on_exit() {
    let temp_dir = TempDir::new().unwrap();
    let plan = ExportPlan::new(
        LocalStorage::new(temp_dir.path().to_str().unwrap().to_string()),
        vec!["csv".to_string()],
    );
    let mut hangman = session(modes(), "abracadabra").with_export(plan);
    let mut console = ScriptedConsole::new(["1", "1", "abracadabra", "3"]);

    hangman.run(&mut console).await.unwrap();

    assert!(console.contains("📁 Report saved to: hangman_history.csv"));
    let csv = std::fs::read_to_string(temp_dir.path().join("hangman_history.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("timestamp,mode,victorious,end,word,tries,attempts,hits,misses,duration_seconds")
    );
    let row = lines.next().unwrap();
    assert!(row.contains(",standard,true,won,abracadabra,1,abracadabra,"));
}
