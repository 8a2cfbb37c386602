#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum PromptTab {
    #[default]
    #[strum(serialize = "Structured Prompt")]
    Structured,
    #[strum(serialize = "System Prompt")]
    System,
}

impl PromptTab {
    pub fn toggle(&self) -> PromptTab {
        match self {
            PromptTab::Structured => return PromptTab::System,
            PromptTab::System => return PromptTab::Structured,
        }
    }

    /// Name used in clipboard notices.
    pub fn copy_label(&self) -> &'static str {
        match self {
            PromptTab::Structured => return "Structured prompt",
            PromptTab::System => return "System prompt",
        }
    }
}
