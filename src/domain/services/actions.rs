#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::BackendHandle;
use crate::domain::models::Event;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Notice;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Generate prompts for the current command.
- Tab - Switch between the structured and system prompt.
- CTRL+Y - Copy the prompt currently shown to your clipboard.
- CTRL+E - Fill the input with the next example command.
- Up arrow / Down arrow - Scroll the prompt.
- CTRL+U / CTRL+D - Page up / Page down.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

async fn health_check(backend: BackendHandle, tx: mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = backend.health_check().await {
        tx.send(Event::BackendNotice(Notice::error(&format!(
            "The prompt generation service isn't reachable, generating will likely fail. Error: {err}"
        ))))?;
    }

    return Ok(());
}

async fn generate(
    backend: BackendHandle,
    request: GenerationRequest,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = backend.generate(&request).await;
    if let Err(err) = &res {
        tracing::error!(id = request.id, error = ?err, "Generation request failed");
    }

    tx.send(Event::GenerationResponse(request.id, res))?;

    return Ok(());
}

/// Performs the network side of actions requested by the UI. Each request runs
/// on its own worker so the UI loop never waits on the network, and its
/// outcome comes back as an `Event`.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendHandle,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            let worker_backend = backend.clone();

            match action {
                Action::HealthCheck() => {
                    tokio::spawn(async move {
                        return health_check(worker_backend, worker_tx).await;
                    });
                }
                Action::GenerationRequest(request) => {
                    tokio::spawn(async move {
                        return generate(worker_backend, request, worker_tx).await;
                    });
                }
            }
        }

        return Ok(());
    }
}
