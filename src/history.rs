use crate::atomic::write_atomic;
use crate::config::ProjectId;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const HISTORY_FILE: &str = "history";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Could not determine cache directory for rancherns")]
    MissingCacheDir,
    #[error("Failed to read history file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write history file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Remembers the project that was active before the last switch.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> HistoryResult<Option<ProjectId>> {
        let payload = match fs::read_to_string(&self.path) {
            Ok(payload) => payload,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let value = payload.trim();
        if value.is_empty() {
            return Ok(None);
        }

        Ok(Some(ProjectId::from(value)))
    }

    /// Returns `false` when `project` was already stored and nothing was written.
    pub fn write(&self, project: &ProjectId) -> HistoryResult<bool> {
        // An unreadable file is simply overwritten.
        if let Ok(Some(current)) = self.read() {
            if &current == project {
                return Ok(false);
            }
        }

        let write_err = |source: io::Error| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        write_atomic(&self.path, format!("{project}\n").as_bytes()).map_err(write_err)?;

        tracing::debug!(project = %project, path = %self.path.display(), "history updated");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_absent_file_is_none() {
        let dir = TempDir::new().unwrap();
        let history = HistoryFile::new(dir.path().join(HISTORY_FILE));

        assert_eq!(history.read().unwrap(), None);
    }

    #[test]
    fn test_read_blank_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(HISTORY_FILE);
        fs::write(&path, "  \n").unwrap();

        assert_eq!(HistoryFile::new(path).read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let history = HistoryFile::new(dir.path().join("nested").join(HISTORY_FILE));
        let project = ProjectId::from("c-m8x2k:p-7lqvd");

        assert!(history.write(&project).unwrap());
        assert_eq!(history.read().unwrap(), Some(project));
        assert_eq!(
            fs::read_to_string(history.path()).unwrap(),
            "c-m8x2k:p-7lqvd\n"
        );
    }

    #[test]
    fn test_write_same_value_is_skipped() {
        let dir = TempDir::new().unwrap();
        let history = HistoryFile::new(dir.path().join(HISTORY_FILE));
        let project = ProjectId::from("c-m8x2k:p-7lqvd");

        assert!(history.write(&project).unwrap());
        assert!(!history.write(&project).unwrap());
        assert!(history.write(&ProjectId::from("c-m8x2k:p-other")).unwrap());
    }

    #[test]
    fn test_read_error_other_than_not_found() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as text.
        let path = dir.path().join(HISTORY_FILE);
        fs::create_dir(&path).unwrap();

        assert!(matches!(
            HistoryFile::new(path).read(),
            Err(HistoryError::Read { .. })
        ));
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let history = HistoryFile::new(blocker.join(HISTORY_FILE));

        let result = history.write(&ProjectId::from("c-1:p-1"));
        assert!(matches!(result, Err(HistoryError::Write { .. })));
    }
}
