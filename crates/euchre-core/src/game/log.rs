use std::collections::VecDeque;

/// Human-readable table events, capped at the last 20 entries.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    entries: VecDeque<String>,
}

impl GameLog {
    pub const MAX_ENTRIES: usize = 20;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::MAX_ENTRIES),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::GameLog;

    #[test]
    fn oldest_entries_are_evicted_first() {
        let mut log = GameLog::new();
        for n in 0..25 {
            log.push(format!("event {n}"));
        }
        assert_eq!(log.len(), GameLog::MAX_ENTRIES);
        assert_eq!(log.iter().next(), Some("event 5"));
        assert_eq!(log.iter().last(), Some("event 24"));
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut log = GameLog::new();
        log.push("first");
        log.push("second");
        let entries = log.to_vec();
        assert_eq!(entries, vec!["first".to_string(), "second".to_string()]);
    }
}
