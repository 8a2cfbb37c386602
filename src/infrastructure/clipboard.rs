use anyhow::Result;

use crate::domain::models::ClipboardWriter;
use crate::domain::services::clipboard::ClipboardService;

/// Hands text to the background clipboard service.
#[derive(Default)]
pub struct SystemClipboard {}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        ClipboardService::set(text.to_string())?;
        return Ok(());
    }
}
