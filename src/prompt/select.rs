use super::{InteractiveSelector, SelectResult};
use crate::config::ProjectId;
use inquire::{InquireError, Select};

/// Inline fuzzy prompt used when `fzf` is not available.
pub struct PromptSelector;

impl InteractiveSelector for PromptSelector {
    fn select(&self, candidates: &[ProjectId]) -> SelectResult<Option<ProjectId>> {
        if candidates.is_empty() {
            return Ok(None);
        }

        match Select::new("Project", candidates.to_vec()).prompt() {
            Ok(choice) => Ok(Some(choice)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
