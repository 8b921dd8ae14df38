use std::io;
use thiserror::Error;

pub type SelectResult<T> = Result<T, SelectError>;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("fzf executable not found")]
    FzfNotInstalled,
    #[error("fzf exited with code {0:?}")]
    FzfFailure(Option<i32>),
    #[error("Failed to run fzf: {0}")]
    Io(#[from] io::Error),
    #[error("Project prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),
}
