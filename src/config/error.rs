use super::ServerId;
use std::{io, path::PathBuf};
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to determine home directory for the Rancher CLI config")]
    MissingHomeDir,
    #[error("Rancher CLI config not found at {0}. Run `rancher login` first.")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Malformed config {path}: {reason}")]
    Malformed { path: PathBuf, reason: &'static str },
    #[error("No current server is set in the Rancher CLI config")]
    NoCurrentServer,
    #[error("Server '{0}' not found in the Rancher CLI config")]
    UnknownServer(ServerId),
    #[error("Server '{server}' has no '{field}' set")]
    MissingField {
        server: ServerId,
        field: &'static str,
    },
    #[error("No active project is set for server '{0}'")]
    NoActiveProject(ServerId),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
