use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcadeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value `{value}` for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Input stream closed")]
    InputClosed,

    #[error("Word source unavailable: {message}")]
    WordSourceError { message: String },

    #[error("Invalid amount: {input}")]
    InvalidAmount { input: String },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: String, available: String },

    #[error("Unknown account: {username}")]
    UnknownAccount { username: String },

    #[error("Account already exists: {username}")]
    DuplicateAccount { username: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("At least one administrator must remain")]
    LastAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    System,
    Configuration,
    Input,
    Ledger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ArcadeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ArcadeError::IoError(_)
            | ArcadeError::SerializationError(_)
            | ArcadeError::CsvError(_) => ErrorCategory::System,
            ArcadeError::ConfigError { .. }
            | ArcadeError::InvalidConfigValueError { .. }
            | ArcadeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ArcadeError::ValidationError { .. }
            | ArcadeError::InputClosed
            | ArcadeError::WordSourceError { .. } => ErrorCategory::Input,
            ArcadeError::InvalidAmount { .. }
            | ArcadeError::InsufficientFunds { .. }
            | ArcadeError::UnknownAccount { .. }
            | ArcadeError::DuplicateAccount { .. }
            | ArcadeError::Unauthorized { .. }
            | ArcadeError::LastAdmin => ErrorCategory::Ledger,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 輸入流結束視為正常離開
            ArcadeError::InputClosed => ErrorSeverity::Low,
            ArcadeError::WordSourceError { .. } => ErrorSeverity::Low,
            ArcadeError::ValidationError { .. } => ErrorSeverity::Medium,
            ArcadeError::ConfigError { .. }
            | ArcadeError::InvalidConfigValueError { .. }
            | ArcadeError::MissingConfigError { .. } => ErrorSeverity::High,
            ArcadeError::InvalidAmount { .. }
            | ArcadeError::InsufficientFunds { .. }
            | ArcadeError::UnknownAccount { .. }
            | ArcadeError::DuplicateAccount { .. }
            | ArcadeError::Unauthorized { .. }
            | ArcadeError::LastAdmin => ErrorSeverity::Medium,
            ArcadeError::IoError(_)
            | ArcadeError::SerializationError(_)
            | ArcadeError::CsvError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ArcadeError::IoError(e) => format!("A file or terminal operation failed ({})", e),
            ArcadeError::SerializationError(_) | ArcadeError::CsvError(_) => {
                "The session report could not be written".to_string()
            }
            ArcadeError::ConfigError { message } => format!("Configuration problem: {}", message),
            ArcadeError::InvalidConfigValueError { field, reason, .. } => {
                format!("The setting `{}` is invalid: {}", field, reason)
            }
            ArcadeError::MissingConfigError { field } => {
                format!("The setting `{}` is required", field)
            }
            ArcadeError::ValidationError { message } => message.clone(),
            ArcadeError::InputClosed => "No more input. Goodbye!".to_string(),
            ArcadeError::WordSourceError { message } => message.clone(),
            ArcadeError::InvalidAmount { .. } => "The amount is invalid.".to_string(),
            ArcadeError::InsufficientFunds { available, .. } => format!(
                "The requested amount exceeds the available balance ({}).",
                available
            ),
            ArcadeError::UnknownAccount { username } => {
                format!("There is no user named `{}` in the system.", username)
            }
            ArcadeError::DuplicateAccount { .. } => {
                "A user with these credentials already exists in the system.".to_string()
            }
            ArcadeError::Unauthorized { message } => message.clone(),
            ArcadeError::LastAdmin => {
                "This transaction cannot be completed since there must be at least one admin in the system."
                    .to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::System => "Check file permissions and the export output path",
            ErrorCategory::Configuration => "Fix the TOML file passed with --config, or remove it to use defaults",
            ErrorCategory::Input => "Check the input script or keep typing at the prompt",
            ErrorCategory::Ledger => "Review the account details and try the transaction again",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
