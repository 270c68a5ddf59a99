use std::{env, fs::File, path::PathBuf};

use thiserror::Error;

use crate::quiz::{BankError, QuestionBank};

pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";
pub const BANK_PATH_VAR: &str = "QUIZ_BANK_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TELOXIDE_TOKEN is not set")]
    MissingToken,
    #[error("failed to open question bank {path}: {source}")]
    OpenBank {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid question bank {path}: {source}")]
    InvalidBank { path: PathBuf, source: BankError },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Question bank file; the built-in bank is used when absent.
    pub bank_path: Option<PathBuf>,
}

impl BotConfig {
    /// Reads settings from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // The token itself is read by `Bot::from_env`; we only fail early without it.
        match lookup(TOKEN_VAR) {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingToken),
        }

        let bank_path = lookup(BANK_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { bank_path })
    }

    pub fn load_bank(&self) -> Result<QuestionBank, ConfigError> {
        let Some(path) = &self.bank_path else {
            return Ok(QuestionBank::general_knowledge());
        };

        let file = File::open(path).map_err(|source| ConfigError::OpenBank {
            path: path.clone(),
            source,
        })?;
        QuestionBank::from_reader(file).map_err(|source| ConfigError::InvalidBank {
            path: path.clone(),
            source,
        })
    }
}
