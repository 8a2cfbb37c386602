use anyhow::Result;

/// Write-only access to the platform clipboard.
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<()>;
}

pub type ClipboardBox = Box<dyn ClipboardWriter + Send + Sync>;
