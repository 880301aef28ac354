//! Transient notifications.

use arrayvec::ArrayVec;

use crate::types::{NoticeLevel, NOTICE_TTL_MS};

/// Notices shown at once; pushing more evicts the oldest.
pub const MAX_NOTICES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub remaining_ms: u32,
}

#[derive(Debug, Default)]
pub struct Notices {
    items: ArrayVec<Notice, MAX_NOTICES>,
    next_id: u64,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` for [`NOTICE_TTL_MS`] and mirror it to the log.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let message = message.into();
        match level {
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(kind = level.as_str(), "{message}")
            }
            NoticeLevel::Error => tracing::warn!(kind = level.as_str(), "{message}"),
        }

        if self.items.is_full() {
            self.items.remove(0);
        }
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            level,
            message,
            remaining_ms: NOTICE_TTL_MS,
        });
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Error, message)
    }

    /// Age every notice by `elapsed_ms` and drop the expired ones.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for n in self.items.iter_mut() {
            n.remaining_ms = n.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.items.retain(|n| n.remaining_ms > 0);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_expire_after_ttl() {
        let mut notices = Notices::new();
        notices.info("hello");
        notices.tick(NOTICE_TTL_MS - 1);
        assert_eq!(notices.len(), 1);
        notices.tick(1);
        assert!(notices.is_empty());
    }

    #[test]
    fn oldest_is_evicted_when_full() {
        let mut notices = Notices::new();
        for i in 0..MAX_NOTICES + 2 {
            notices.info(format!("n{i}"));
        }
        assert_eq!(notices.len(), MAX_NOTICES);
        let first = notices.iter().next().unwrap();
        assert_eq!(first.message, "n2");
        assert_eq!(notices.latest().unwrap().message, format!("n{}", MAX_NOTICES + 1));
    }

    #[test]
    fn ids_are_monotonic() {
        let mut notices = Notices::new();
        let a = notices.error("a");
        let b = notices.success("b");
        assert!(b > a);
        assert_eq!(notices.latest().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn staggered_expiry() {
        let mut notices = Notices::new();
        notices.info("old");
        notices.tick(3000);
        notices.info("new");
        notices.tick(2000);
        let left: Vec<_> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(left, vec!["new"]);
    }

    #[test]
    fn reverse_iteration_is_newest_first() {
        let mut notices = Notices::new();
        notices.info("first");
        notices.error("second");
        let newest: Vec<_> = notices.iter().rev().map(|n| n.message.as_str()).collect();
        assert_eq!(newest, vec!["second", "first"]);
    }
}
