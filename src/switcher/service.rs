use super::{SwitchError, SwitchOutcome, SwitchRequest, SwitchResult, SwitchState};
use crate::config::{ConfigStore, ProjectId, ServerContext};
use crate::directory::ProjectSource;
use crate::history::HistoryFile;

/// Reads the active project, writes the new one and records the old one
/// for `swap_back`. History is only touched after the config write succeeds.
pub struct ContextSwitcher<'a, S: ?Sized> {
    store: &'a ConfigStore,
    history: &'a HistoryFile,
    source: &'a S,
    state: SwitchState,
}

impl<'a, S: ProjectSource + ?Sized> ContextSwitcher<'a, S> {
    pub fn new(store: &'a ConfigStore, history: &'a HistoryFile, source: &'a S) -> Self {
        Self {
            store,
            history,
            source,
            state: SwitchState::Idle,
        }
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn apply(
        &mut self,
        server: &ServerContext,
        request: SwitchRequest,
    ) -> SwitchResult<SwitchOutcome> {
        match request {
            SwitchRequest::To(input) => {
                let target = self.resolve_target(server, &input)?;
                self.switch_to(server, &target)
            }
            SwitchRequest::SwapBack => self.swap_back(server),
            SwitchRequest::Rename { new, old } => self.rename(&new, &old),
            SwitchRequest::Delete(names) => self.delete(&names),
        }
    }

    pub fn candidates(&self, server: &ServerContext) -> SwitchResult<Vec<ProjectId>> {
        Ok(self.source.list(server)?.collect())
    }

    /// Exact match wins; otherwise the first listed project containing `input`.
    pub fn resolve_target(
        &mut self,
        server: &ServerContext,
        input: &str,
    ) -> SwitchResult<ProjectId> {
        self.transition(SwitchState::Resolving);
        let result = self.find_target(server, input);
        self.settle(result)
    }

    fn find_target(&self, server: &ServerContext, input: &str) -> SwitchResult<ProjectId> {
        if input.is_empty() {
            return Err(SwitchError::NoMatch(String::new()));
        }

        let mut first_partial = None;

        for project in self.source.list(server)? {
            if project.as_str() == input {
                return Ok(project);
            }
            if first_partial.is_none() && project.as_str().contains(input) {
                first_partial = Some(project);
            }
        }

        first_partial.ok_or_else(|| SwitchError::NoMatch(input.to_owned()))
    }

    pub fn switch_to(
        &mut self,
        server: &ServerContext,
        target: &ProjectId,
    ) -> SwitchResult<SwitchOutcome> {
        self.transition(SwitchState::Resolving);
        let result = self.perform_switch(server, target);
        self.settle(result)
    }

    fn perform_switch(
        &mut self,
        server: &ServerContext,
        target: &ProjectId,
    ) -> SwitchResult<SwitchOutcome> {
        let previous = self.store.active_project(&server.id)?;

        self.transition(SwitchState::Switching);
        self.store.set_active_project(&server.id, target)?;

        let history_warning = match &previous {
            Some(prev) if prev != target => self.history.write(prev).err(),
            _ => None,
        };

        if let Some(err) = &history_warning {
            tracing::warn!(
                error = %err,
                "switched project but could not record the previous one"
            );
        }

        Ok(SwitchOutcome {
            previous,
            current: target.clone(),
            history_warning,
        })
    }

    pub fn swap_back(&mut self, server: &ServerContext) -> SwitchResult<SwitchOutcome> {
        self.transition(SwitchState::Resolving);

        let previous = self
            .history
            .read()
            .map_err(SwitchError::from)
            .and_then(|previous| previous.ok_or(SwitchError::NoHistory));
        let previous = self.settle(previous)?;

        self.switch_to(server, &previous)
    }

    pub fn rename(&mut self, _new: &str, _old: &str) -> SwitchResult<SwitchOutcome> {
        self.settle(Err(SwitchError::NotImplemented("rename")))
    }

    pub fn delete(&mut self, _names: &[String]) -> SwitchResult<SwitchOutcome> {
        self.settle(Err(SwitchError::NotImplemented("delete")))
    }

    fn settle<T>(&mut self, result: SwitchResult<T>) -> SwitchResult<T> {
        let next = match result {
            Ok(_) => SwitchState::Idle,
            Err(_) => SwitchState::Failed,
        };
        self.transition(next);
        result
    }

    fn transition(&mut self, next: SwitchState) {
        tracing::trace!(from = ?self.state, to = ?next, "switcher state");
        self.state = next;
    }
}
