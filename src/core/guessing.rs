use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    NotANumber,
    OutOfRange,
    Repeated,
    Higher,
    Lower,
    Correct,
}

impl Feedback {
    /// Whether the guess used up one of the player's tries.
    pub fn consumes_try(self) -> bool {
        matches!(self, Feedback::Higher | Feedback::Lower)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Feedback::NotANumber => "This is not a number. Try again.",
            Feedback::OutOfRange => "Your guess is out of range.",
            Feedback::Repeated => "You already guessed this number.",
            Feedback::Higher => "Guess higher!",
            Feedback::Lower => "Guess lower!",
            Feedback::Correct => "You guessed the correct number!",
        };
        write!(f, "{}", text)
    }
}

/// Player-driven round: guess a secret number in `[start, stop]` within a number of tries.
#[derive(Debug, Clone)]
pub struct NumberHunt {
    secret: i64,
    start: i64,
    stop: i64,
    tries_left: u32,
    guesses: Vec<i64>,
    solved: bool,
}

impl NumberHunt {
    pub fn new(secret: i64, start: i64, stop: i64, tries: u32) -> Self {
        Self {
            secret,
            start,
            stop,
            tries_left: tries,
            guesses: Vec::new(),
            solved: false,
        }
    }

    pub fn secret(&self) -> i64 {
        self.secret
    }

    pub fn tries_left(&self) -> u32 {
        self.tries_left
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_over(&self) -> bool {
        self.solved || self.tries_left == 0
    }

    pub fn submit(&mut self, input: &str) -> Feedback {
        let guess = match input.trim().parse::<i64>() {
            Ok(n) => n,
            Err(_) => return Feedback::NotANumber,
        };
        if !(self.start..=self.stop).contains(&guess) {
            return Feedback::OutOfRange;
        }
        if self.guesses.contains(&guess) {
            return Feedback::Repeated;
        }
        if guess == self.secret {
            self.solved = true;
            return Feedback::Correct;
        }
        self.guesses.push(guess);
        self.tries_left = self.tries_left.saturating_sub(1);
        if guess < self.secret {
            Feedback::Higher
        } else {
            Feedback::Lower
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTrace {
    pub lines: Vec<String>,
    pub found: bool,
}

/// The program counts up from `start`, spending one try per probe.
pub fn linear_search(secret: i64, tries: u32, start: i64, stop: i64) -> SearchTrace {
    let mut lines = vec![format!("The number for the program to guess is {}", secret)];
    let mut tries = tries;
    for guess in start..=stop {
        if tries == 0 {
            break;
        }
        lines.push(format!("Number of tries left: {}", tries));
        tries -= 1;
        lines.push(format!("The program is guessing... {}", guess));
        if guess == secret {
            lines.push("The program has guessed the correct number!".to_string());
            return SearchTrace { lines, found: true };
        }
    }
    lines.push("The program failed to guess the correct number.".to_string());
    SearchTrace {
        lines,
        found: false,
    }
}

/// The program bisects `[start, stop]`, spending one try per missed probe.
pub fn binary_search(secret: i64, tries: u32, start: i64, stop: i64) -> SearchTrace {
    let mut lines = vec![format!("Random number to find: {}", secret)];
    let (mut lo, mut hi) = (start, stop);
    let mut tries = tries;
    while lo <= hi {
        let pivot = lo + (hi - lo) / 2;
        if pivot == secret {
            lines.push(format!("Found it! {}", secret));
            return SearchTrace { lines, found: true };
        }
        if tries == 0 {
            break;
        }
        if pivot > secret {
            lines.push("Guessing lower!".to_string());
            hi = pivot - 1;
        } else {
            lines.push("Guessing higher!".to_string());
            lo = pivot + 1;
        }
        tries -= 1;
    }
    lines.push("Your program failed to find the number.".to_string());
    SearchTrace {
        lines,
        found: false,
    }
}

/// Parses a non-negative parameter; `lower_bound` makes it an exclusive floor.
pub fn parse_parameter(input: &str, lower_bound: Option<i64>) -> Result<i64, String> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| "This is not a number.".to_string())?;
    if let Some(lower) = lower_bound {
        if lower >= value {
            return Err(format!(
                "The upper bound must be greater than the lower bound ({}).",
                lower
            ));
        }
    }
    if value < 0 {
        return Err("This is not a positive integer.".to_string());
    }
    Ok(value)
}

pub fn parse_prediction(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().chars().next() {
        Some('y') => Some(true),
        Some('n') => Some(false),
        _ => None,
    }
}

/// Winnings for the betting game against the computer's linear search.
#[derive(Debug, Clone)]
pub struct Purse {
    winnings: u64,
    max_bet: u64,
    goal: u64,
    rounds: u32,
}

impl Purse {
    pub fn new(winnings: u64, max_bet: u64, goal: u64) -> Self {
        Self {
            winnings,
            max_bet,
            goal,
            rounds: 0,
        }
    }

    pub fn winnings(&self) -> u64 {
        self.winnings
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn bet_cap(&self) -> u64 {
        self.winnings.min(self.max_bet)
    }

    pub fn is_playing(&self) -> bool {
        self.winnings > 0 && self.winnings < self.goal
    }

    pub fn parse_bet(&self, input: &str) -> Result<u64, String> {
        let wager: i64 = input
            .trim()
            .parse()
            .map_err(|_| "This is not an integer.".to_string())?;
        let cap = self.bet_cap();
        if wager <= 0 || wager as u64 > cap {
            return Err(format!(
                "You cannot bet $0 or less, nor more than ${}.",
                cap
            ));
        }
        Ok(wager as u64)
    }

    /// A correct prediction pays double the bet; a wrong one loses it.
    pub fn settle(&mut self, prediction: bool, computer_found: bool, bet: u64) {
        self.rounds += 1;
        if prediction == computer_found {
            self.winnings += bet * 2;
        } else {
            self.winnings = self.winnings.saturating_sub(bet);
        }
        tracing::debug!(
            "Round {} settled: predicted {}, actual {}, winnings ${}",
            self.rounds,
            prediction,
            computer_found,
            self.winnings
        );
    }

    pub fn summary(&self) -> String {
        if self.winnings >= self.goal {
            format!(
                "Congratulations! You played {} rounds and earned a total of ${}.",
                self.rounds, self.winnings
            )
        } else {
            format!(
                "Tough luck. You played {} {}... and you have nothing to show for it.",
                self.rounds,
                if self.rounds > 1 { "rounds" } else { "round" }
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_guesses_do_not_cost_tries() {
        let mut hunt = NumberHunt::new(7, 0, 10, 3);
        assert_eq!(hunt.submit("seven"), Feedback::NotANumber);
        assert_eq!(hunt.submit("11"), Feedback::OutOfRange);
        assert_eq!(hunt.tries_left(), 3);
        assert_eq!(hunt.submit("3"), Feedback::Higher);
        assert_eq!(hunt.submit("3"), Feedback::Repeated);
        assert_eq!(hunt.tries_left(), 2);
        assert_eq!(hunt.submit("9"), Feedback::Lower);
        assert_eq!(hunt.submit("7"), Feedback::Correct);
        assert!(hunt.is_solved());
        assert!(hunt.is_over());
    }

    #[test]
    fn hunt_ends_when_tries_run_out() {
        let mut hunt = NumberHunt::new(10, 0, 10, 2);
        hunt.submit("1");
        hunt.submit("2");
        assert!(hunt.is_over());
        assert!(!hunt.is_solved());
    }

    #[test]
    fn linear_search_respects_tries() {
        let found = linear_search(3, 5, 0, 10);
        assert!(found.found);
        assert!(found.lines.contains(&"The program is guessing... 3".to_string()));

        let missed = linear_search(8, 5, 0, 10);
        assert!(!missed.found);
        assert_eq!(
            missed.lines.last().unwrap(),
            "The program failed to guess the correct number."
        );
    }

    #[test]
    fn binary_search_finds_within_log_tries() {
        for secret in 0..=100 {
            assert!(binary_search(secret, 7, 0, 100).found, "secret {}", secret);
        }
        assert!(!binary_search(1, 1, 0, 100).found);
        // 第一個探測點即命中時不消耗次數
        assert!(binary_search(50, 0, 0, 100).found);
    }

    #[test]
    fn parameters_must_be_ordered_and_non_negative() {
        assert_eq!(parse_parameter("5", None), Ok(5));
        assert!(parse_parameter("five", None).is_err());
        assert!(parse_parameter("-1", None).is_err());
        assert_eq!(
            parse_parameter("3", Some(3)).unwrap_err(),
            "The upper bound must be greater than the lower bound (3)."
        );
        assert_eq!(parse_parameter("4", Some(3)), Ok(4));
    }

    #[test]
    fn purse_pays_double_for_correct_prediction() {
        let mut purse = Purse::new(10, 10, 50);
        assert_eq!(purse.bet_cap(), 10);
        assert!(purse.parse_bet("0").is_err());
        assert!(purse.parse_bet("11").is_err());
        assert_eq!(purse.parse_bet("4"), Ok(4));

        purse.settle(true, true, 4);
        assert_eq!(purse.winnings(), 18);
        purse.settle(false, true, 8);
        assert_eq!(purse.winnings(), 10);
        assert_eq!(purse.rounds(), 2);
        assert!(purse.is_playing());
    }

    #[test]
    fn purse_stops_at_goal_or_zero() {
        let mut purse = Purse::new(3, 10, 50);
        assert_eq!(purse.bet_cap(), 3);
        purse.settle(true, false, 3);
        assert!(!purse.is_playing());
        assert!(purse.summary().starts_with("Tough luck. You played 1 round..."));

        let mut rich = Purse::new(45, 10, 50);
        rich.settle(false, false, 5);
        assert!(!rich.is_playing());
        assert!(rich.summary().starts_with("Congratulations!"));
    }

    #[test]
    fn predictions_use_first_letter() {
        assert_eq!(parse_prediction("Yes"), Some(true));
        assert_eq!(parse_prediction("n"), Some(false));
        assert_eq!(parse_prediction(""), None);
        assert_eq!(parse_prediction("maybe"), None);
    }
}
