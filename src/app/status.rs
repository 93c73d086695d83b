use std::{collections::VecDeque, fmt, time::Duration};

pub const READY_STATUS: &str = "Ready.";

/// Notices kept before the oldest is dropped.
pub const NOTICE_LOG_LIMIT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Set for notices that dismiss themselves.
    pub dismiss_after: Option<Duration>,
}

/// Bounded log of user-facing notices, newest last.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    notices: VecDeque<Notice>,
    success_dismiss: Duration,
}

impl StatusLine {
    pub fn new(success_dismiss: Duration) -> Self {
        Self {
            notices: VecDeque::with_capacity(NOTICE_LOG_LIMIT),
            success_dismiss,
        }
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let dismiss_after = (level == NoticeLevel::Success).then_some(self.success_dismiss);
        if self.notices.len() == NOTICE_LOG_LIMIT {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            level,
            message: message.into(),
            dismiss_after,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn prompt_saved(&mut self, updated: bool) {
        let verb = if updated { "updated" } else { "created" };
        self.success(format!("Prompt {verb} successfully!"));
    }

    pub fn prompt_deleted(&mut self) {
        self.success("Prompt deleted successfully.");
    }

    pub fn schema_saved(&mut self) {
        self.success("Schema saved successfully!");
    }

    pub fn schema_unchanged(&mut self) {
        self.info("No changes detected in the schema.");
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.back()
    }

    pub fn message(&self) -> &str {
        self.latest()
            .map(|notice| notice.message.as_str())
            .unwrap_or(READY_STATUS)
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Hands out pending notices, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}
