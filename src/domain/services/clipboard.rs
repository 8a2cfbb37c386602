#[cfg(test)]
#[path = "clipboard_test.rs"]
mod tests;

use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

const REPLY_TIMEOUT: Duration = Duration::from_secs(1);

type ClipboardRequest = (String, std_mpsc::SyncSender<Result<()>>);

static SENDER: OnceCell<mpsc::UnboundedSender<ClipboardRequest>> = OnceCell::new();

async fn serve<F>(rx: &mut mpsc::UnboundedReceiver<ClipboardRequest>, mut write: F)
where
    F: FnMut(String) -> Result<()>,
{
    while let Some((text, reply)) = rx.recv().await {
        let res = write(text);
        if let Err(err) = &res {
            tracing::error!(error = ?err, "Failed to write to clipboard");
        }

        // The caller may have stopped waiting.
        let _ = reply.send(res);
    }
}

/// Blocks until the service reports whether the write landed.
fn request(tx: &mpsc::UnboundedSender<ClipboardRequest>, text: String) -> Result<()> {
    let (reply_tx, reply_rx) = std_mpsc::sync_channel::<Result<()>>(1);
    if tx.send((text, reply_tx)).is_err() {
        return Err(anyhow!("Clipboard service has stopped."));
    }

    match reply_rx.recv_timeout(REPLY_TIMEOUT) {
        Ok(res) => return res,
        Err(err) => return Err(anyhow!("Clipboard service did not answer: {err}")),
    }
}

/// Owns the platform clipboard on a single background task. Some platforms
/// drop clipboard contents when the owning handle goes away, so the handle
/// lives as long as the application.
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<ClipboardRequest>();
        if SENDER.set(tx).is_err() {
            return Err(anyhow!("Clipboard service is already running."));
        }
        let mut clipboard = arboard::Clipboard::new()?;

        serve(&mut rx, |text| {
            clipboard.set_text(text)?;
            return Ok(());
        })
        .await;

        return Ok(());
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    pub fn set(text: String) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            return request(tx, text);
        }

        return Err(anyhow!("Clipboard service is not initialized."));
    }
}
