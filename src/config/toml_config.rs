use crate::core::battle::{default_heroes, default_villains, Character};
use crate::core::report::SUPPORTED_FORMATS;
use crate::domain::model::Money;
use crate::utils::error::{ArcadeError, Result};
use crate::utils::validation::{
    validate_formats, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub battle: BattleConfig,
    pub bank: BankConfig,
    pub donations: DonationsConfig,
    pub guessing: GuessingConfig,
    pub hangman: HangmanConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub seed: Option<u64>,
    pub text_width: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: None,
            text_width: 80,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub heroes: Vec<Character>,
    pub villains: Vec<Character>,
    pub replay_attempts: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            heroes: default_heroes(),
            villains: default_villains(),
            replay_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Whole dollars credited to every new customer.
    pub starting_balance: u64,
    pub max_login_attempts: u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            starting_balance: 0,
            max_login_attempts: 3,
        }
    }
}

impl BankConfig {
    pub fn starting_balance(&self) -> Money {
        Money::dollars(self.starting_balance)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationsConfig {
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for DonationsConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "password123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessingConfig {
    pub starting_purse: u64,
    pub max_bet: u64,
    pub goal: u64,
    pub computer_tries: u32,
}

impl Default for GuessingConfig {
    fn default() -> Self {
        Self {
            starting_purse: 10,
            max_bet: 10,
            goal: 50,
            computer_tries: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HangmanConfig {
    pub time_limit_seconds: u64,
    pub max_errors: usize,
    pub dictionary_path: String,
    pub transcript_path: Option<String>,
}

impl Default for HangmanConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 180,
            max_errors: 6,
            dictionary_path: "/usr/share/dict/words".to_string(),
            transcript_path: None,
        }
    }
}

impl HangmanConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            formats: vec!["csv".to_string()],
        }
    }
}

impl ArcadeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ArcadeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ArcadeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 沒有指定檔案時使用預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Self::from_file(path)
            }
            None => {
                tracing::debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${ARCADE_ADMIN_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ArcadeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ArcadeError::ConfigError {
            message: format!("TOML serialization error: {}", e),
        })
    }

    /// TOML for `show-config`, with the admin password masked.
    pub fn to_masked_toml_string(&self) -> Result<String> {
        let mut masked = self.clone();
        masked.donations.admin_password = "********".to_string();
        masked.to_toml_string()
    }

    fn validate_roster(field: &str, roster: &[Character]) -> Result<()> {
        if roster.is_empty() {
            return Err(ArcadeError::MissingConfigError {
                field: field.to_string(),
            });
        }
        for character in roster {
            validate_non_empty_string(&format!("{}.name", field), &character.name)?;
            validate_range(&format!("{}.hp", field), character.hp, 1, 10_000)?;
            validate_range(&format!("{}.damage", field), character.damage, 1, 10_000)?;
        }
        Ok(())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_range("general.text_width", self.general.text_width, 20, 200)?;

        let valid_log_formats = ["compact", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ArcadeError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: format!("Valid formats: {}", valid_log_formats.join(", ")),
            });
        }

        Self::validate_roster("battle.heroes", &self.battle.heroes)?;
        Self::validate_roster("battle.villains", &self.battle.villains)?;
        validate_positive_number("battle.replay_attempts", self.battle.replay_attempts as u64, 1)?;

        validate_positive_number("bank.max_login_attempts", self.bank.max_login_attempts as u64, 1)?;

        crate::core::donations::normalize_username(&self.donations.admin_username).map_err(|_| {
            ArcadeError::InvalidConfigValueError {
                field: "donations.admin_username".to_string(),
                value: self.donations.admin_username.clone(),
                reason: "Must be 1-10 characters".to_string(),
            }
        })?;
        crate::core::donations::check_password(&self.donations.admin_password).map_err(|_| {
            ArcadeError::InvalidConfigValueError {
                field: "donations.admin_password".to_string(),
                value: "********".to_string(),
                reason: "Must be at least 5 characters".to_string(),
            }
        })?;

        validate_positive_number("guessing.max_bet", self.guessing.max_bet, 1)?;
        validate_positive_number("guessing.computer_tries", self.guessing.computer_tries as u64, 1)?;
        validate_positive_number("guessing.starting_purse", self.guessing.starting_purse, 1)?;
        if self.guessing.goal <= self.guessing.starting_purse {
            return Err(ArcadeError::InvalidConfigValueError {
                field: "guessing.goal".to_string(),
                value: self.guessing.goal.to_string(),
                reason: "Goal must be greater than the starting purse".to_string(),
            });
        }

        validate_range(
            "hangman.max_errors",
            self.hangman.max_errors,
            1,
            crate::core::hangman::MAX_STAGE,
        )?;
        validate_positive_number("hangman.time_limit_seconds", self.hangman.time_limit_seconds, 1)?;
        validate_path("hangman.dictionary_path", &self.hangman.dictionary_path)?;
        if let Some(transcript) = &self.hangman.transcript_path {
            validate_path("hangman.transcript_path", transcript)?;
        }

        validate_path("export.output_path", &self.export.output_path)?;
        validate_formats("export.formats", &self.export.formats, SUPPORTED_FORMATS)?;

        Ok(())
    }
}

impl Validate for ArcadeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
