#[cfg(test)]
#[path = "prompt_session_test.rs"]
mod tests;

use std::time::Instant;

use anyhow::Result;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::ClipboardBox;
use crate::domain::models::Command;
use crate::domain::models::GenerationError;
use crate::domain::models::GenerationRequest;
use crate::domain::models::GenerationResult;
use crate::domain::models::Notice;
use crate::domain::models::PromptTab;
use crate::domain::models::SessionState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A generation request was handed to the actions service.
    Dispatched,
    /// The command was empty. A validation notice was shown instead.
    Rejected,
    /// A generation is already in flight, or the key wasn't Enter.
    Ignored,
}

/// Owns everything the user sees besides the input box. All mutation happens
/// on the UI loop, either from a key press or from a generation response
/// arriving as an event.
pub struct PromptSession {
    state: SessionState,
    notices: Vec<Notice>,
    clipboard: ClipboardBox,
    last_request_id: u64,
    pending_request_id: Option<u64>,
}

impl PromptSession {
    pub fn new(clipboard: ClipboardBox) -> PromptSession {
        return PromptSession {
            state: SessionState::Idle,
            notices: vec![],
            clipboard,
            last_request_id: 0,
            pending_request_id: None,
        };
    }

    pub fn state(&self) -> &SessionState {
        return &self.state;
    }

    pub fn is_loading(&self) -> bool {
        return self.state.is_loading();
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        return self.state.result();
    }

    pub fn submit(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<SubmitOutcome> {
        if self.state.is_loading() {
            tracing::debug!("Ignoring submit while a generation is in flight");
            return Ok(SubmitOutcome::Ignored);
        }

        let command = match Command::parse(text) {
            Ok(command) => command,
            Err(err) => {
                self.notify(Notice::error(&err.to_string()));
                return Ok(SubmitOutcome::Rejected);
            }
        };

        let request_id = self.last_request_id + 1;
        tracing::debug!(id = request_id, command = %command, "Submitting command");
        tx.send(Action::GenerationRequest(GenerationRequest::new(
            request_id, command,
        )))?;

        self.last_request_id = request_id;
        self.pending_request_id = Some(request_id);
        self.state = SessionState::Loading;

        return Ok(SubmitOutcome::Dispatched);
    }

    pub fn submit_on_enter_key(
        &mut self,
        input: &Input,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<SubmitOutcome> {
        if !matches!(input.key, Key::Enter) || self.state.is_loading() {
            return Ok(SubmitOutcome::Ignored);
        }

        return self.submit(text, tx);
    }

    pub fn handle_generation_response(
        &mut self,
        request_id: u64,
        result: Result<GenerationResult, GenerationError>,
    ) {
        if self.pending_request_id != Some(request_id) {
            tracing::warn!(
                id = request_id,
                pending = ?self.pending_request_id,
                "Dropping response for a request that is no longer pending"
            );
            return;
        }
        self.pending_request_id = None;

        match result {
            Ok(generation) => {
                tracing::debug!(id = request_id, "Generation succeeded");
                self.state = SessionState::Success(generation);
                self.notify(Notice::success("Prompt generated successfully!"));
            }
            Err(err) => {
                tracing::error!(id = request_id, error = ?err, "Generation failed");
                let message = err.to_string();
                self.notify(Notice::error(&message));
                self.state = SessionState::Failed(message);
            }
        }
    }

    /// Never fails. Clipboard errors only surface as a notice.
    pub fn copy_to_clipboard(&mut self, text: &str, label: &str) {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.notify(Notice::success(&format!("{label} copied to clipboard!")));
            }
            Err(err) => {
                tracing::warn!(error = ?err, label, "Clipboard write failed");
                self.notify(Notice::error(&format!(
                    "Unable to copy {label} to clipboard: {err}"
                )));
            }
        }
    }

    pub fn copy_active_prompt(&mut self, tab: PromptTab) {
        let text = match self.state.result() {
            Some(generation) => generation.prompt(tab).to_string(),
            None => {
                self.notify(Notice::info("Generate a prompt before copying it."));
                return;
            }
        };

        self.copy_to_clipboard(&text, tab.copy_label());
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        return &self.notices;
    }

    pub fn active_notice(&self) -> Option<&Notice> {
        let now = Instant::now();
        return self.notices.last().filter(|notice| {
            return !notice.is_expired(now);
        });
    }

    pub fn prune_notices(&mut self) {
        let now = Instant::now();
        self.notices.retain(|notice| {
            return !notice.is_expired(now);
        });
    }
}
