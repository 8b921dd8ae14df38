mod error;
mod fzf;
mod select;

pub use error::*;
pub use fzf::*;
pub use select::*;

use crate::config::ProjectId;

pub trait InteractiveSelector {
    /// `None` when the user backs out without choosing.
    fn select(&self, candidates: &[ProjectId]) -> SelectResult<Option<ProjectId>>;
}

/// Prefers `fzf` when it is installed, otherwise falls back to an inline prompt.
pub fn detect() -> Box<dyn InteractiveSelector> {
    match std::env::var_os("PATH") {
        Some(path) if find_in_path(FZF, &path).is_some() => Box::new(FzfSelector),
        _ => Box::new(PromptSelector),
    }
}
