mod atomic;
mod cmd;
mod config;
mod directory;
mod error;
mod history;
mod present;
mod prompt;
mod settings;
mod switcher;

use clap::Parser;
use clap::error::ErrorKind;
use cmd::{Action, Cli};
use error::{Error, USAGE_EXIT};
use settings::Settings;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RANCHERNS_LOG";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("rancherns=error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(USAGE_EXIT),
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(message)) => {
            let _ = cmd::usage_error(&message).print();
            ExitCode::from(USAGE_EXIT)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let action = Action::try_from(cli)?;
    if let Action::Request(request) = &action {
        request.ensure_supported()?;
    }

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, ?action, "starting");

    cmd::project::handle(action, &settings)
}
