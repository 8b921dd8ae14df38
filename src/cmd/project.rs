use super::Action;
use crate::config::{ConfigError, ConfigStore, ServerContext};
use crate::directory::{ProjectSource, RancherApi};
use crate::error::Result;
use crate::history::HistoryFile;
use crate::present::{self, ColorPolicy};
use crate::prompt::{self, InteractiveSelector};
use crate::settings::Settings;
use crate::switcher::{ContextSwitcher, SwitchOutcome, SwitchRequest};
use std::io::{self, IsTerminal};

pub fn handle(action: Action, settings: &Settings) -> Result<()> {
    let policy = ColorPolicy::resolve(
        settings.force_color,
        io::stdout().is_terminal(),
        settings.no_color,
    );

    let store = ConfigStore::new(&settings.config_path);
    let history = HistoryFile::new(&settings.history_path);
    let source = RancherApi::new(settings.filter.clone())?;
    let mut switcher = ContextSwitcher::new(&store, &history, &source);
    tracing::debug!(
        config = %store.path().display(),
        history = %history.path().display(),
        "using files"
    );

    match action {
        // Both fail before the config is even read.
        Action::Request(SwitchRequest::Rename { new, old }) => {
            switcher.rename(&new, &old)?;
            Ok(())
        }
        Action::Request(SwitchRequest::Delete(names)) => {
            switcher.delete(&names)?;
            Ok(())
        }
        Action::Request(request) => {
            let server = store.server_context()?;
            let outcome = switcher.apply(&server, request);
            tracing::debug!(state = ?switcher.state(), "switch finished");
            report(&outcome?, policy);
            Ok(())
        }
        Action::Current => {
            let server = store.current_server()?;
            let active = store
                .active_project(&server)?
                .ok_or(ConfigError::NoActiveProject(server))?;
            println!("{active}");
            Ok(())
        }
        Action::Browse => {
            let server = store.server_context()?;

            if settings.ignore_selector || !interactive() {
                return list(&store, &source, &server, policy);
            }

            let selector = prompt::detect();
            choose(&mut switcher, selector.as_ref(), &server, policy)
        }
    }
}

fn interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn list<S: ProjectSource + ?Sized>(
    store: &ConfigStore,
    source: &S,
    server: &ServerContext,
    policy: ColorPolicy,
) -> Result<()> {
    let rows = present::render(store, source, server)?;
    let mut out = io::stdout().lock();
    present::print(&mut out, &rows, policy)?;
    Ok(())
}

fn choose<S: ProjectSource + ?Sized>(
    switcher: &mut ContextSwitcher<'_, S>,
    selector: &dyn InteractiveSelector,
    server: &ServerContext,
    policy: ColorPolicy,
) -> Result<()> {
    let candidates = switcher.candidates(server)?;

    let Some(choice) = selector.select(&candidates)? else {
        tracing::debug!("selection cancelled");
        return Ok(());
    };

    let outcome = switcher.switch_to(server, &choice)?;
    report(&outcome, policy);
    Ok(())
}

fn report(outcome: &SwitchOutcome, policy: ColorPolicy) {
    let message = match outcome.changed() {
        true => format!("Active project is \"{}\".", outcome.current),
        false => format!("Already on project \"{}\".", outcome.current),
    };
    println!("{}", present::success(policy, &message));

    if let Some(err) = &outcome.history_warning {
        eprintln!(
            "{}",
            present::warning(policy, &format!("could not record previous project: {err}"))
        );
    }
}
