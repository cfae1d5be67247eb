use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_WORDS: &[&str] = &[
    "resurrection", "osphresiology", "establishment", "ridiculous", "collection",
    "querimonious", "experimentation", "zealotry", "international", "vastation",
    "gemelliparous", "kyriolexy", "totalitarianism", "kaleidophone", "nephralgia",
    "juxtaposition", "decalescence", "calorifacient", "loquacious", "uniphonous",
    "abscissa", "differentiation", "kettlestitch", "halitosis", "logarithmic",
    "ultracrepidate", "biloquist", "quadrennium", "gawdelpus", "acritochromacy",
    "ethereal", "jactitation", "delaminate", "zwitterion", "oppignorate",
    "whippletree", "xenobiotic", "otorhinolaryngology", "eldritch", "transient",
    "oligarchy", "naturalism", "inconsequential", "grandisonant", "reverberate",
    "capricious", "hematology", "whimsical", "xylography", "balatron",
    "disenfranchise", "neomorphic", "wrackful",
];

pub const GAMEPLAY: &str = "The mystery word is depicted by a row of dashes, representing each letter of the word. Guess a letter that occurs in the mystery word. If it is correct, all occurences will be displayed. If it is incorrect, a body part will appear in the diagram. The game is won by guessing all correct letters in the mystery word before the diagram is complete.";

const PRAISE: &[&str] = &["Success!", "Fantastic!", "Awesome!", "Phenomenal!"];
const TAUNT: &[&str] = &[
    "Tough luck.",
    "Bollocks, you can do better.",
    "Are you serious?!",
    "Aww... so close.",
];

/// Gallows stages indexed by the number of misses.
const BODY: [[&str; 5]; 7] = [
    ["     ", "     ", "     ", "     ", "     "],
    ["  O  ", "     ", "     ", "     ", "     "],
    ["  O  ", "  |  ", "  |  ", "     ", "     "],
    ["\\ O  ", " \\|  ", "  |  ", "     ", "     "],
    ["\\ O /", " \\|/ ", "  |  ", "     ", "     "],
    ["\\ O /", " \\|/ ", "  |  ", " /   ", "/    "],
    ["\\ O /", " \\|/ ", "  |  ", " / \\ ", "/   \\"],
];

pub const MAX_STAGE: usize = BODY.len() - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Default,
    Dictionary,
    Speech,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceKind::Default => "Default",
            SourceKind::Dictionary => "Dictionary",
            SourceKind::Speech => "Speech",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone)]
pub struct Mode {
    pub name: &'static str,
    pub label: &'static str,
    pub objective: &'static str,
    pub source: SourceKind,
    pub min_word_length: usize,
    pub has_timer: bool,
    pub max_errors: usize,
    pub time_limit: Duration,
}

impl Mode {
    pub fn rules(&self, width: usize) -> Vec<(String, Vec<String>)> {
        vec![
            (
                "Game Mode".to_string(),
                vec![format!("{} -- {}", self.name.to_uppercase(), title_case(self.label))],
            ),
            ("Objective".to_string(), wrap(self.objective, width)),
            ("Gameplay".to_string(), wrap(GAMEPLAY, width)),
            (
                "Parameters".to_string(),
                vec![format!(
                    "Word Source: {} | Timed?: {} | Minimum Word Length: {}",
                    self.source,
                    if self.has_timer { "True" } else { "False" },
                    self.min_word_length
                )],
            ),
        ]
    }
}

pub fn default_modes(max_errors: usize, time_limit: Duration) -> Vec<Mode> {
    vec![
        Mode {
            name: "standard",
            label: "traditional game",
            objective: "Determine the mystery word before reaching the maximum number of errors.",
            source: SourceKind::Dictionary,
            min_word_length: 10,
            has_timer: false,
            max_errors,
            time_limit,
        },
        Mode {
            name: "timed",
            label: "just in time",
            objective: "Determine the mystery word before the time limit expires.",
            source: SourceKind::Default,
            min_word_length: 8,
            has_timer: true,
            max_errors,
            time_limit,
        },
        Mode {
            name: "speech",
            label: "listen up!",
            objective: "Determine a mystery word that is randomly chosen from an audio clip of the user's speech.",
            source: SourceKind::Speech,
            min_word_length: 8,
            has_timer: false,
            max_errors,
            time_limit,
        },
    ]
}

pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Greedy word wrap at `width` columns.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Dictionary entries: at least `min_len` letters and a lowercase first letter (skips proper nouns).
pub fn filter_dictionary(text: &str, min_len: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|w| w.chars().count() >= min_len)
        .filter(|w| w.chars().next().is_some_and(|c| c.is_lowercase()))
        .filter(|w| w.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_string)
        .collect()
}

/// Spoken transcript: lowercase words of at least `min_len` letters, punctuation stripped.
pub fn filter_transcript(text: &str, min_len: usize) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| w.chars().count() >= min_len)
        .collect()
}

pub fn default_words(min_len: usize) -> Vec<String> {
    DEFAULT_WORDS
        .iter()
        .filter(|w| w.len() >= min_len)
        .map(|w| w.to_string())
        .collect()
}

pub fn pick_word<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Option<String> {
    words.choose(rng).map(|w| w.to_lowercase())
}

pub fn praise<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PRAISE.choose(rng).copied().unwrap_or("Success!")
}

pub fn taunt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TAUNT.choose(rng).copied().unwrap_or("Tough luck.")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessCheck {
    Invalid,
    Repeated,
    Fresh(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Hit,
    Solved,
    Miss,
}

impl Grade {
    pub fn is_correct(self) -> bool {
        !matches!(self, Grade::Miss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundEnd {
    Won,
    Lost,
    TimedOut,
}

/// State of one game of hangman.
#[derive(Debug, Clone)]
pub struct Round {
    word: String,
    max_errors: usize,
    current: String,
    attempts: Vec<String>,
    hits: Vec<String>,
    misses: Vec<String>,
    revealed: Vec<Option<char>>,
}

impl Round {
    pub fn new(word: &str, max_errors: usize) -> Self {
        let word = word.to_lowercase();
        let revealed = vec![None; word.chars().count()];
        Self {
            word,
            max_errors,
            current: String::new(),
            attempts: Vec::new(),
            hits: Vec::new(),
            misses: Vec::new(),
            revealed,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn word_len(&self) -> usize {
        self.revealed.len()
    }

    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }

    pub fn hits(&self) -> &[String] {
        &self.hits
    }

    pub fn misses(&self) -> &[String] {
        &self.misses
    }

    /// A guess is a single letter or a whole word of the same length, not seen before.
    pub fn check(&self, input: &str) -> GuessCheck {
        let guess = input.trim().to_lowercase();
        let len = guess.chars().count();
        let alphabetic = !guess.is_empty() && guess.chars().all(|c| c.is_alphabetic());
        if !alphabetic || !(len == 1 || len == self.word_len()) {
            return GuessCheck::Invalid;
        }
        if self.hits.contains(&guess) || self.misses.contains(&guess) {
            return GuessCheck::Repeated;
        }
        GuessCheck::Fresh(guess)
    }

    pub fn grade(&mut self, guess: &str) -> Grade {
        let guess = guess.to_lowercase();
        self.current = guess.clone();
        self.attempts.push(guess.clone());

        if guess.chars().count() == 1 && self.word.contains(guess.as_str()) {
            let letter = guess.chars().next();
            for (slot, c) in self.revealed.iter_mut().zip(self.word.chars()) {
                if Some(c) == letter {
                    *slot = Some(c);
                }
            }
            self.hits.push(guess);
            Grade::Hit
        } else if guess == self.word {
            self.hits = self.word.chars().map(String::from).collect();
            self.revealed = self.word.chars().map(Some).collect();
            Grade::Solved
        } else {
            self.misses.push(guess);
            Grade::Miss
        }
    }

    pub fn is_won(&self) -> bool {
        let letters: HashSet<char> = self.word.chars().collect();
        let hit: HashSet<char> = self.hits.iter().flat_map(|h| h.chars()).collect();
        letters.is_subset(&hit)
    }

    pub fn is_lost(&self) -> bool {
        self.misses.len() >= self.max_errors
    }

    pub fn is_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    pub fn hit_string(&self) -> String {
        self.revealed
            .iter()
            .map(|slot| match slot {
                Some(c) => c.to_uppercase().to_string(),
                None => "_".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn miss_string(&self) -> String {
        self.misses.join(", ").to_uppercase()
    }

    pub fn board(&self) -> Vec<String> {
        let stage = &BODY[self.misses.len().min(MAX_STAGE)];
        let post = format!("{:<6}", "||");
        vec![
            format!("{:>11}", format!("{}[]", "_".repeat(5))),
            format!("{:^9}{}Word:   {}", "I", post, self.hit_string()),
            format!("{:^9}{}", "I", post),
            format!("{:^9}{}", stage[0], post),
            format!("{:^9}{}Guess:  {}", stage[1], post, self.current.to_uppercase()),
            format!("{:^9}{}", stage[2], post),
            format!("{:^9}{}", stage[3], post),
            format!("{:^9}{}Misses: {}", stage[4], post, self.miss_string()),
            format!("{}{}", " ".repeat(9), post),
            format!("{}{}", " ".repeat(9), post),
            format!("[{}[]", "=".repeat(8)),
        ]
    }
}

pub fn result_lines(mode: &Mode, word: &str, end: RoundEnd, duration: Duration) -> Vec<String> {
    let verdict = match end {
        RoundEnd::Won if mode.has_timer => "Congratulations. You finished...JUST IN TIME!!!",
        RoundEnd::Won => "Congratulations. You won the game!",
        RoundEnd::TimedOut => "You ran out of time! Tough luck.",
        RoundEnd::Lost => "Whomp whomp. You lose! Better luck next time.",
    };
    vec![
        format!("The correct word was `{}`.", word.to_uppercase()),
        verdict.to_string(),
        format!("Game Duration: {}", crate::core::clock::time_label(duration)),
    ]
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub timestamp: DateTime<Local>,
    pub end: RoundEnd,
    pub mode: String,
    pub word: String,
    pub attempts: Vec<String>,
    pub hits: Vec<String>,
    pub misses: Vec<String>,
    pub duration: Duration,
}

impl Outcome {
    pub fn new(mode: &Mode, round: &Round, end: RoundEnd, duration: Duration) -> Self {
        Self {
            timestamp: Local::now(),
            end,
            mode: mode.name.to_string(),
            word: round.word().to_string(),
            attempts: round.attempts().to_vec(),
            hits: round.hits().to_vec(),
            misses: round.misses().to_vec(),
            duration,
        }
    }

    pub fn is_victorious(&self) -> bool {
        self.end == RoundEnd::Won
    }

    pub fn tries(&self) -> usize {
        self.attempts.len()
    }

    pub fn row(&self) -> OutcomeRow {
        OutcomeRow {
            timestamp: self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            mode: self.mode.clone(),
            victorious: self.is_victorious(),
            end: self.end,
            word: self.word.clone(),
            tries: self.tries(),
            attempts: self.attempts.join(" "),
            hits: self.hits.join(" "),
            misses: self.misses.join(" "),
            duration_seconds: self.duration.as_secs(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Victorious?: {:<5} | Game Mode: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            if self.is_victorious() { "True" } else { "False" },
            title_case(&self.mode)
        )
    }
}

/// Flat export row for one finished game.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeRow {
    pub timestamp: String,
    pub mode: String,
    pub victorious: bool,
    pub end: RoundEnd,
    pub word: String,
    pub tries: usize,
    pub attempts: String,
    pub hits: String,
    pub misses: String,
    pub duration_seconds: u64,
}

/// Session history plus the per-mode victory tally.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    history: Vec<Outcome>,
    tally: Vec<(String, Vec<bool>)>,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: Outcome) {
        let won = outcome.is_victorious();
        match self.tally.iter_mut().find(|(mode, _)| *mode == outcome.mode) {
            Some((_, results)) => results.push(won),
            None => self.tally.push((outcome.mode.clone(), vec![won])),
        }
        self.history.push(outcome);
    }

    pub fn history(&self) -> &[Outcome] {
        &self.history
    }

    pub fn wins(&self, mode: &str) -> Option<(usize, usize)> {
        self.tally
            .iter()
            .find(|(m, _)| m == mode)
            .map(|(_, r)| (r.iter().filter(|w| **w).count(), r.len()))
    }

    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{:^27}", "Gameplay Summary"),
            format!("/{}\\", "-".repeat(25)),
        ];
        for (mode, results) in &self.tally {
            let wins = results.iter().filter(|w| **w).count();
            lines.push(format!(
                "| {:>8} Mode: {:02} of {:02} |",
                title_case(mode),
                wins,
                results.len()
            ));
        }
        lines.push(format!("\\{}/", "_".repeat(25)));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Mode {
        default_modes(6, Duration::from_secs(180)).remove(0)
    }

    #[test]
    fn guesses_must_be_letters_or_full_words() {
        let mut round = Round::new("eldritch", 6);
        assert_eq!(round.check("e"), GuessCheck::Fresh("e".to_string()));
        assert_eq!(round.check("E"), GuessCheck::Fresh("e".to_string()));
        assert_eq!(round.check("el"), GuessCheck::Invalid);
        assert_eq!(round.check("3"), GuessCheck::Invalid);
        assert_eq!(round.check(""), GuessCheck::Invalid);
        assert_eq!(round.check("whatever"), GuessCheck::Fresh("whatever".to_string()));

        round.grade("e");
        round.grade("z");
        assert_eq!(round.check("e"), GuessCheck::Repeated);
        assert_eq!(round.check("z"), GuessCheck::Repeated);
    }

    #[test]
    fn letter_hits_reveal_every_occurrence() {
        let mut round = Round::new("abscissa", 6);
        assert_eq!(round.grade("s"), Grade::Hit);
        assert_eq!(round.hit_string(), "_ _ S _ _ S S _");
        assert_eq!(round.grade("q"), Grade::Miss);
        assert_eq!(round.miss_string(), "Q");
        assert!(!round.is_over());
    }

    #[test]
    fn whole_word_guess_solves_round() {
        let mut round = Round::new("ethereal", 6);
        round.grade("t");
        assert_eq!(round.grade("ethereal"), Grade::Solved);
        assert!(round.is_won());
        assert_eq!(round.hit_string(), "E T H E R E A L");
    }

    #[test]
    fn wrong_word_guess_is_a_miss() {
        let mut round = Round::new("ethereal", 6);
        assert_eq!(round.grade("eternity"), Grade::Miss);
        assert_eq!(round.misses(), &["eternity".to_string()]);
    }

    #[test]
    fn all_letters_win_and_max_misses_lose() {
        let mut round = Round::new("abscissa", 2);
        for letter in ["a", "b", "s", "c", "i"] {
            round.grade(letter);
        }
        assert!(round.is_won());

        let mut losing = Round::new("abscissa", 2);
        losing.grade("x");
        assert!(!losing.is_lost());
        losing.grade("y");
        assert!(losing.is_lost());
        assert_eq!(losing.attempts().len(), 2);
    }

    #[test]
    fn board_draws_stage_for_misses() {
        let mut round = Round::new("balatron", 6);
        let clean = round.board();
        assert_eq!(clean.len(), 11);
        assert_eq!(clean[0], "    _____[]");
        assert_eq!(clean[1], "    I    ||    Word:   _ _ _ _ _ _ _ _");

        round.grade("x");
        let board = round.board();
        assert_eq!(board[3], "    O    ||    ");
        assert_eq!(board[4], "         ||    Guess:  X");
        assert_eq!(board[7], "         ||    Misses: X");
        assert_eq!(board[10], "[========[]");
    }

    #[test]
    fn dictionary_filter_skips_short_and_capitalized() {
        let text = "Aaronic\nabscissa\ncat\nzwitterion\nO'Brien\nxylography's\n";
        assert_eq!(
            filter_dictionary(text, 8),
            vec!["abscissa".to_string(), "zwitterion".to_string()]
        );
    }

    #[test]
    fn transcript_filter_strips_punctuation() {
        let text = "Honestly, the EXPERIMENT was ridiculous!";
        assert_eq!(
            filter_transcript(text, 8),
            vec!["honestly".to_string(), "experiment".to_string(), "ridiculous".to_string()]
        );
    }

    #[test]
    fn default_words_respect_min_length() {
        assert!(default_words(10).iter().all(|w| w.len() >= 10));
        assert_eq!(default_words(8).len(), DEFAULT_WORDS.len());
    }

    #[test]
    fn results_reflect_mode_and_ending() {
        let timed = default_modes(6, Duration::from_secs(180)).remove(1);
        let lines = result_lines(&timed, "eldritch", RoundEnd::Won, Duration::from_secs(75));
        assert_eq!(lines[0], "The correct word was `ELDRITCH`.");
        assert_eq!(lines[1], "Congratulations. You finished...JUST IN TIME!!!");
        assert_eq!(lines[2], "Game Duration: 1 minutes and 15 seconds");

        let lost = result_lines(&standard(), "eldritch", RoundEnd::Lost, Duration::ZERO);
        assert_eq!(lost[1], "Whomp whomp. You lose! Better luck next time.");
    }

    #[test]
    fn scoreboard_tallies_per_mode() {
        let mode = standard();
        let mut board = Scoreboard::default();
        let mut won = Round::new("abc", 6);
        won.grade("abc");
        board.record(Outcome::new(&mode, &won, RoundEnd::Won, Duration::ZERO));
        board.record(Outcome::new(&mode, &Round::new("abc", 6), RoundEnd::Lost, Duration::ZERO));

        assert_eq!(board.wins("standard"), Some((1, 2)));
        let summary = board.summary();
        assert_eq!(summary[2], "| Standard Mode: 01 of 02 |");
        assert_eq!(summary[1].len(), 27);
        assert_eq!(board.history()[0].row().tries, 1);
    }

    #[test]
    fn rules_wrap_to_width() {
        let rules = standard().rules(40);
        assert_eq!(rules[0].1[0], "STANDARD -- Traditional Game");
        assert!(rules[2].1.iter().all(|l| l.len() <= 40));
        assert!(rules[3].1[0].starts_with("Word Source: Dictionary | Timed?: False"));
    }
}
