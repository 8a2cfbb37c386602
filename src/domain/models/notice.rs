#[cfg(test)]
#[path = "notice_test.rs"]
mod tests;

use std::time::Duration;
use std::time::Instant;

pub const NOTICE_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeType {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    ntype: NoticeType,
    created_at: Instant,
}

impl Notice {
    pub fn new(ntype: NoticeType, text: &str) -> Notice {
        return Notice {
            text: text.to_string(),
            ntype,
            created_at: Instant::now(),
        };
    }

    pub fn info(text: &str) -> Notice {
        return Notice::new(NoticeType::Info, text);
    }

    pub fn success(text: &str) -> Notice {
        return Notice::new(NoticeType::Success, text);
    }

    pub fn error(text: &str) -> Notice {
        return Notice::new(NoticeType::Error, text);
    }

    pub fn notice_type(&self) -> NoticeType {
        return self.ntype;
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        return now.saturating_duration_since(self.created_at) >= NOTICE_LIFETIME;
    }
}
