use crate::config::ConfigError;
use crate::directory::DirectoryError;
use crate::history::HistoryError;
use crate::prompt::SelectError;
use crate::switcher::SwitchError;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const USAGE_EXIT: u8 = 1;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Switch(#[from] SwitchError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Every failure kind gets its own exit status.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => USAGE_EXIT,
            Self::Config(_) => 3,
            Self::Directory(_) => 4,
            Self::History(_) => 5,
            Self::Switch(err) => match err {
                SwitchError::Config(_) => 3,
                SwitchError::Directory(_) => 4,
                SwitchError::History(_) => 5,
                SwitchError::NoHistory => 6,
                SwitchError::NoMatch(_) => 7,
                SwitchError::NotImplemented(_) => 8,
            },
            Self::Select(_) => 9,
            Self::Output(_) => 10,
        }
    }
}
