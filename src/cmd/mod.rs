pub mod project;

use crate::error::{Error, Result};
use crate::switcher::SwitchRequest;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "rancherns",
    version,
    about = "Switch between Rancher projects",
    after_help = "EXAMPLES:\n  \
        rancherns              list projects, or pick one interactively\n  \
        rancherns <NAME>       switch to a project (exact or partial id)\n  \
        rancherns -            switch back to the previous project\n  \
        rancherns -c           show the active project"
)]
pub struct Cli {
    /// Show the active project
    #[arg(short, long, conflicts_with_all = ["delete", "target"])]
    pub current: bool,

    /// Delete projects
    #[arg(short, long, value_name = "NAME", num_args = 1.., conflicts_with = "target")]
    pub delete: Option<Vec<String>>,

    /// Project to switch to, `-` for the previous one, or NEW=OLD to rename
    #[arg(value_name = "NAME")]
    pub target: Option<String>,
}

/// A clap error carrying the usage line, for argument problems found after parsing.
pub fn usage_error(message: &str) -> clap::Error {
    Cli::command().error(ErrorKind::InvalidValue, message)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No arguments: pick interactively when possible, otherwise list.
    Browse,
    Current,
    Request(SwitchRequest),
}

impl TryFrom<Cli> for Action {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.current {
            return Ok(Action::Current);
        }

        if let Some(names) = cli.delete {
            return Ok(Action::Request(SwitchRequest::Delete(names)));
        }

        let Some(target) = cli.target else {
            return Ok(Action::Browse);
        };

        if target == "-" {
            return Ok(Action::Request(SwitchRequest::SwapBack));
        }

        match target.split_once('=') {
            Some((new, old)) if !new.is_empty() && !old.is_empty() => {
                Ok(Action::Request(SwitchRequest::Rename {
                    new: new.to_owned(),
                    old: old.to_owned(),
                }))
            }
            Some(_) => Err(Error::Usage(format!(
                "Invalid rename '{target}', expected NEW=OLD"
            ))),
            None => Ok(Action::Request(SwitchRequest::To(target))),
        }
    }
}
