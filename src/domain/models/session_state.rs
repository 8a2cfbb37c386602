use super::GenerationResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Success(GenerationResult),
    Failed(String),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        return matches!(self, SessionState::Loading);
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        if let SessionState::Success(result) = self {
            return Some(result);
        }

        return None;
    }
}
