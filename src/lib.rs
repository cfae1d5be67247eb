pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::{build_session, ArcadeEngine, Game};
pub use config::{cli::LocalStorage, toml_config::ArcadeConfig};
pub use domain::model::Money;
pub use utils::error::{ArcadeError, Result};
