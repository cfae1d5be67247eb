use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub hp: i64,
    pub damage: i64,
}

impl Character {
    pub fn new(name: &str, hp: i64, damage: i64) -> Self {
        Self {
            name: name.to_string(),
            hp,
            damage,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    fn attributes(&self) -> [(&'static str, String); 3] {
        [
            ("NAME", self.name.clone()),
            ("HP", self.hp.to_string()),
            ("DAMAGE", self.damage.to_string()),
        ]
    }

    /// `NAME   : Wizard` style listing of every attribute.
    pub fn details(&self) -> Vec<String> {
        let attrs = self.attributes();
        let width = attrs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        attrs
            .iter()
            .map(|(k, v)| format!("{:<width$} : {}", k, v, width = width))
            .collect()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub fn default_heroes() -> Vec<Character> {
    vec![
        Character::new("Wizard", 70, 150),
        Character::new("Elf", 100, 100),
        Character::new("Human", 150, 20),
        Character::new("Orc", 90, 110),
    ]
}

pub fn default_villains() -> Vec<Character> {
    vec![Character::new("Dragon", 300, 50)]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Pick(usize),
    Quit,
    Unknown,
}

/// Resolves a roster choice typed as a 1-based number or a name (case-insensitive).
pub fn select(roster: &[Character], choice: &str) -> Selection {
    let choice = choice.trim().to_lowercase();
    if choice == "q" {
        return Selection::Quit;
    }
    if let Some(idx) = roster.iter().position(|c| c.name.to_lowercase() == choice) {
        return Selection::Pick(idx);
    }
    match choice.parse::<usize>() {
        Ok(n) if (1..=roster.len()).contains(&n) => Selection::Pick(n - 1),
        _ => Selection::Unknown,
    }
}

pub fn roster_lines(roster: &[Character]) -> Vec<String> {
    roster
        .iter()
        .enumerate()
        .map(|(idx, c)| format!("{})  {}", idx + 1, c.name))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strike {
    Hit {
        attacker: String,
        defender: String,
        remaining: i64,
    },
    Miss {
        attacker: String,
    },
}

impl Strike {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Strike::Hit {
                attacker,
                defender,
                remaining,
            } => vec![
                format!("The {} damaged the {}!", attacker, defender),
                format!("The {}'s hitpoints are now {}!", defender, remaining),
            ],
            Strike::Miss { attacker } => vec![format!("The {} missed!", attacker)],
        }
    }
}

/// One attack: a fair coin decides whether the defender loses `attacker.damage` hp.
pub fn strike<R: Rng + ?Sized>(attacker: &Character, defender: &mut Character, rng: &mut R) -> Strike {
    if rng.gen_bool(0.5) {
        defender.hp -= attacker.damage;
        Strike::Hit {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            remaining: defender.hp,
        }
    } else {
        Strike::Miss {
            attacker: attacker.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BattleReport {
    pub strikes: Vec<Strike>,
    pub winner: Character,
    pub loser: Character,
}

impl BattleReport {
    pub fn hero_won(&self, hero: &Character) -> bool {
        self.winner.name == hero.name
    }
}

/// Hero strikes first and the two sides alternate until one reaches hp <= 0.
/// Works on copies so roster entries keep their starting stats.
pub fn battle<R: Rng + ?Sized>(hero: &Character, villain: &Character, rng: &mut R) -> BattleReport {
    let mut hero = hero.clone();
    let mut villain = villain.clone();
    let mut strikes = Vec::new();

    loop {
        strikes.push(strike(&hero, &mut villain, rng));
        if villain.is_defeated() {
            tracing::debug!("{} defeated after {} strikes", villain.name, strikes.len());
            return BattleReport {
                strikes,
                winner: hero,
                loser: villain,
            };
        }

        strikes.push(strike(&villain, &mut hero, rng));
        if hero.is_defeated() {
            tracing::debug!("{} defeated after {} strikes", hero.name, strikes.len());
            return BattleReport {
                strikes,
                winner: villain,
                loser: hero,
            };
        }
    }
}

/// Side-by-side HERO | VILLAIN attribute table.
pub fn banner(hero: &Character, villain: &Character) -> Vec<String> {
    let left = hero.details();
    let right = villain.details();
    let h_width = left.iter().map(|l| l.len()).max().unwrap_or(0);
    let v_width = right.iter().map(|l| l.len()).max().unwrap_or(0);

    let h_title = [
        format!("/*{}*\\", "=".repeat(6)),
        "|  HERO  |".to_string(),
        format!("\\*{}*/", "=".repeat(6)),
    ];
    let v_title = [
        format!("/*{}*\\", "=".repeat(9)),
        "|  VILLAIN  |".to_string(),
        format!("\\*{}*/", "=".repeat(9)),
    ];

    let mut lines = Vec::new();
    for (h, v) in h_title.iter().zip(v_title.iter()) {
        lines.push(format!(
            "{:^hw$}  |  {:^vw$}",
            h,
            v,
            hw = h_width,
            vw = v_width
        ));
    }
    lines.push(format!("{:hw$}  |", "", hw = h_width));
    for (h, v) in left.iter().zip(right.iter()) {
        lines.push(format!("{:<hw$}  |  {}", h, v, hw = h_width));
    }
    lines
}

pub fn title_screen() -> Vec<String> {
    [
        "/*========*\\",
        "|   THE    |",
        "|  MENACE  |",
        "|    OF    |",
        "|  MORDOR  |",
        "\\*========*/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
