#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE_ROWS: u16 = 10;

/// Scroll offset of the result pane, measured in rendered rows. Lengths are
/// refreshed on every draw, so the offset never runs past the last row.
#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
}

impl Scroll {
    pub fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn up_page(&mut self) {
        self.position = self.position.saturating_sub(PAGE_ROWS);
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
    }

    pub fn down_page(&mut self) {
        self.position = self
            .position
            .saturating_add(PAGE_ROWS)
            .min(self.max_position());
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn set_state(&mut self, list_length: usize, viewport_length: u16) {
        self.list_length = u16::try_from(list_length).unwrap_or(u16::MAX);
        self.viewport_length = viewport_length;
        self.position = self.position.min(self.max_position());
    }

    pub fn scrollbar_state(&self) -> ScrollbarState {
        return ScrollbarState::default()
            .content_length(self.max_position().saturating_add(1))
            .viewport_content_length(self.viewport_length)
            .position(self.position);
    }
}
