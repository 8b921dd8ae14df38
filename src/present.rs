use crate::config::{ConfigStore, ProjectId, ServerContext};
use crate::directory::ProjectSource;
use crate::error::Result;
use owo_colors::OwoColorize;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub project: ProjectId,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPolicy {
    Highlight,
    Plain,
}

impl ColorPolicy {
    /// Forcing wins, then a terminal without `NO_COLOR`, otherwise plain.
    pub fn resolve(force: bool, is_terminal: bool, no_color: bool) -> Self {
        if force || (is_terminal && !no_color) {
            Self::Highlight
        } else {
            Self::Plain
        }
    }
}

/// Listing order is kept; at most one row is active.
pub fn render<S: ProjectSource + ?Sized>(
    store: &ConfigStore,
    source: &S,
    server: &ServerContext,
) -> Result<Vec<Row>> {
    let active = store.active_project(&server.id)?;

    let rows = source
        .list(server)?
        .map(|project| Row {
            active: active.as_ref() == Some(&project),
            project,
        })
        .collect();

    Ok(rows)
}

pub fn print(out: &mut impl Write, rows: &[Row], policy: ColorPolicy) -> io::Result<()> {
    for row in rows {
        match (row.active, policy) {
            (true, ColorPolicy::Highlight) => {
                writeln!(out, "{}", row.project.as_str().black().on_yellow())?
            }
            _ => writeln!(out, "{}", row.project)?,
        }
    }
    Ok(())
}

pub fn success(policy: ColorPolicy, message: &str) -> String {
    match policy {
        ColorPolicy::Highlight => format!("{} {message}", "✔".green()),
        ColorPolicy::Plain => format!("✔ {message}"),
    }
}

pub fn warning(policy: ColorPolicy, message: &str) -> String {
    match policy {
        ColorPolicy::Highlight => format!("{} {message}", "warning:".yellow().bold()),
        ColorPolicy::Plain => format!("warning: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DirectoryResult, Projects};
    use std::fs;
    use tempfile::TempDir;

    struct Listing(Vec<&'static str>);

    impl ProjectSource for Listing {
        fn list(&self, _server: &ServerContext) -> DirectoryResult<Projects> {
            let ids: Vec<ProjectId> = self.0.iter().map(|p| ProjectId::from(*p)).collect();
            Ok(Projects::new(ids))
        }
    }

    fn rows(items: &[(&str, bool)]) -> Vec<Row> {
        items
            .iter()
            .map(|(project, active)| Row {
                project: ProjectId::from(*project),
                active: *active,
            })
            .collect()
    }

    #[test]
    fn test_render_marks_active_project() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cli2.json");
        fs::write(
            &path,
            r#"{"Servers":{"local":{"url":"https://rancher.test","project":"c-1:p-b"}},"CurrentServer":"local"}"#,
        )
        .unwrap();
        let store = ConfigStore::new(path);
        let server = store.server_context().unwrap();

        let listing = Listing(vec!["c-1:p-a", "c-1:p-b", "c-1:p-c"]);
        let rendered = render(&store, &listing, &server).unwrap();

        assert_eq!(
            rendered,
            rows(&[("c-1:p-a", false), ("c-1:p-b", true), ("c-1:p-c", false)])
        );
    }

    #[test]
    fn test_color_policy_precedence() {
        assert_eq!(ColorPolicy::resolve(true, false, true), ColorPolicy::Highlight);
        assert_eq!(ColorPolicy::resolve(false, true, false), ColorPolicy::Highlight);
        assert_eq!(ColorPolicy::resolve(false, true, true), ColorPolicy::Plain);
        assert_eq!(ColorPolicy::resolve(false, false, false), ColorPolicy::Plain);
    }

    #[test]
    fn test_print_plain() {
        let mut out = Vec::new();
        print(&mut out, &rows(&[("a", false), ("b", true)]), ColorPolicy::Plain).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_print_highlights_only_active_row() {
        let mut out = Vec::new();
        print(&mut out, &rows(&[("a", false), ("b", true)]), ColorPolicy::Highlight).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a");
        assert!(lines[1].contains('\u{1b}'));
        assert!(lines[1].contains('b'));
    }
}
