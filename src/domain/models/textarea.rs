use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub const EXAMPLE_COMMANDS: [&str; 4] = [
    "Write a product description",
    "Create a meeting agenda",
    "Analyze customer feedback",
    "Generate social media content",
];

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title("Enter a command (e.g. Write a blog post about AI)")
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }

    pub fn with_text(text: &str) -> tui_textarea::TextArea<'a> {
        let mut textarea = TextArea::default();
        textarea.insert_str(text);

        return textarea;
    }
}
