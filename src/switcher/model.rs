use super::{SwitchError, SwitchResult};
use crate::config::ProjectId;
use crate::history::HistoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchState {
    #[default]
    Idle,
    Resolving,
    Switching,
    Failed,
}

/// Everything the switcher can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchRequest {
    /// Exact id or a substring of one.
    To(String),
    SwapBack,
    Rename { new: String, old: String },
    Delete(Vec<String>),
}

impl SwitchRequest {
    /// Fails for requests that have no implementation yet, without touching anything.
    pub fn ensure_supported(&self) -> SwitchResult<()> {
        match self {
            Self::Rename { .. } => Err(SwitchError::NotImplemented("rename")),
            Self::Delete(_) => Err(SwitchError::NotImplemented("delete")),
            Self::To(_) | Self::SwapBack => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct SwitchOutcome {
    pub previous: Option<ProjectId>,
    pub current: ProjectId,
    /// Set when the config was switched but the previous project could not be recorded.
    pub history_warning: Option<HistoryError>,
}

impl SwitchOutcome {
    pub fn changed(&self) -> bool {
        self.previous.as_ref() != Some(&self.current)
    }
}
