//! Error types for GuhaNav

use thiserror::Error;

/// GuhaNav error type
#[derive(Error, Debug)]
pub enum GuhaError {
    /// Non-adjacent or out-of-bounds move attempt. A cost penalty has
    /// already been charged; world state is otherwise unchanged.
    #[error("invalid move to ({0}, {1})")]
    InvalidMove(usize, usize),

    /// The agent stepped (or was forced) onto a hazard. Terminal for the
    /// run; the death penalty has been applied.
    #[error("fatal hazard contact at ({0}, {1})")]
    HazardContact(usize, usize),

    /// Satisfiability oracle failure. Fatal, never retried.
    #[error("oracle query failed: {0}")]
    Oracle(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for GuhaError {
    fn from(e: toml::de::Error) -> Self {
        GuhaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuhaError>;
