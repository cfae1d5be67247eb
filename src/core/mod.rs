pub mod bank;
pub mod battle;
pub mod clock;
pub mod donations;
pub mod guessing;
pub mod hangman;
pub mod report;

pub use crate::domain::model::Money;
pub use crate::domain::ports::{Console, Session, Storage, WordSupply};
pub use crate::utils::error::Result;
