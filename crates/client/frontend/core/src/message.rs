//! Shared message log primitives for CLI and future UIs.
use std::collections::VecDeque;

use board_core::NoticeTone;

/// Severity level for UI messages produced from runtime events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Positive,
    Negative,
    Warning,
}

impl From<NoticeTone> for MessageLevel {
    fn from(tone: NoticeTone) -> Self {
        match tone {
            NoticeTone::Info => MessageLevel::Info,
            NoticeTone::Positive => MessageLevel::Positive,
            NoticeTone::Negative => MessageLevel::Negative,
        }
    }
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug)]
pub struct MessageEntry {
    pub text: String,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        self.push(MessageEntry::new(message, MessageLevel::Info));
    }

    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_entry_when_full() {
        let mut log = MessageLog::new(2);
        log.push_text("first");
        log.push_text("second");
        log.push_text("third");

        let texts: Vec<_> = log.recent(5).map(|entry| entry.text.as_str()).collect();
        assert_eq!(texts, ["third", "second"]);
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let mut log = MessageLog::new(0);
        log.push_text("only");
        log.push_text("latest");
        assert_eq!(log.len(), 1);
    }
}
