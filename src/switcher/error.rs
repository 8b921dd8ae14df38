use crate::config::ConfigError;
use crate::directory::DirectoryError;
use crate::history::HistoryError;
use thiserror::Error;

pub type SwitchResult<T> = Result<T, SwitchError>;

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("No previous project recorded, nothing to swap back to")]
    NoHistory,
    #[error("No project matches '{0}'")]
    NoMatch(String),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}
