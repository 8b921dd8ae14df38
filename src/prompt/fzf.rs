use super::{InteractiveSelector, SelectError, SelectResult};
use crate::config::ProjectId;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub const FZF: &str = "fzf";

const NO_MATCH: i32 = 1;
const INTERRUPTED: i32 = 130;

/// Pipes the candidates through an `fzf` subprocess.
pub struct FzfSelector;

impl InteractiveSelector for FzfSelector {
    fn select(&self, candidates: &[ProjectId]) -> SelectResult<Option<ProjectId>> {
        let spawned = Command::new(FZF)
            .args(["--no-multi", "--prompt", "project> "])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => match err.kind() {
                io::ErrorKind::NotFound => return Err(SelectError::FzfNotInstalled),
                _ => return Err(SelectError::Io(err)),
            },
        };

        if let Some(mut stdin) = child.stdin.take() {
            let written = candidates
                .iter()
                .try_for_each(|candidate| writeln!(stdin, "{candidate}"));

            // fzf may exit before reading everything.
            if let Err(err) = written {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    return Err(SelectError::Io(err));
                }
            }
        }

        let output = child.wait_with_output()?;

        match output.status.code() {
            Some(0) => Ok(parse_choice(&output.stdout)),
            Some(NO_MATCH) | Some(INTERRUPTED) => Ok(None),
            code => Err(SelectError::FzfFailure(code)),
        }
    }
}

fn parse_choice(stdout: &[u8]) -> Option<ProjectId> {
    let choice = String::from_utf8_lossy(stdout);
    let choice = choice.trim();

    match choice {
        "" => None,
        choice => Some(ProjectId::from(choice)),
    }
}

pub fn find_in_path(name: &str, path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice(b"c-1:p-alpha\n"), Some(ProjectId::from("c-1:p-alpha")));
        assert_eq!(parse_choice(b"\n"), None);
        assert_eq!(parse_choice(b""), None);
    }

    #[test]
    fn test_find_in_path() {
        let empty = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        fs::write(bin.path().join(FZF), "").unwrap();

        let path = std::env::join_paths([empty.path(), bin.path()]).unwrap();
        assert_eq!(find_in_path(FZF, &path), Some(bin.path().join(FZF)));

        let path = std::env::join_paths([empty.path()]).unwrap();
        assert_eq!(find_in_path(FZF, &path), None);
    }
}
