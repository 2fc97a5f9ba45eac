//! User-facing notices raised by document operations.
//!
//! The headless host has no widget layer, so notices queue here and the
//! host drains and presents them. `Blocking` stands in for a modal message
//! box in a full host: the user has to acknowledge it before continuing.

use crate::constants::MAX_PENDING_NOTICES;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Severity of a notice, which decides how a host presents it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    /// Modal; the host interrupts the user with it
    Blocking,
}

impl NoticeLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "ℹ",
            NoticeLevel::Warning => "⚠",
            NoticeLevel::Blocking => "✗",
        }
    }
}

/// One queued notice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Queue of pending notices, oldest first.
#[derive(Debug, Default)]
pub struct NoticeManager {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message.into())
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Warning, message.into())
    }

    pub fn blocking(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Blocking, message.into())
    }

    fn push(&mut self, level: NoticeLevel, message: String) -> u64 {
        if level == NoticeLevel::Blocking {
            warn!(notice = %message, "blocking notice raised");
        }
        if self.notices.len() == MAX_PENDING_NOTICES {
            self.notices.remove(0);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice { id, level, message });
        id
    }

    pub fn count(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take every pending notice, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn remove(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
