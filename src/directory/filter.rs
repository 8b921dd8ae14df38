use super::ProjectEntry;

pub const DEFAULT_MARKER: &str = "System project";

/// Decides which API entries count as switchable projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    DescriptionPrefix(String),
}

impl ProjectFilter {
    /// An empty marker accepts everything.
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            "" => Self::All,
            marker => Self::DescriptionPrefix(marker.to_owned()),
        }
    }

    pub fn accepts(&self, entry: &ProjectEntry) -> bool {
        match self {
            Self::All => true,
            Self::DescriptionPrefix(prefix) => entry
                .description
                .as_deref()
                .unwrap_or_default()
                .starts_with(prefix.as_str()),
        }
    }
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self::from_marker(DEFAULT_MARKER)
    }
}
