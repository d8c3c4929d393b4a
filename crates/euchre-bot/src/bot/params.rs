/// Thresholds driving the bidding heuristics. Counts include the left bower
/// as trump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotParams {
    /// Trump count that orders up or calls on its own.
    pub solo_count: u8,
    /// Trump count required alongside a left bower or trump ace.
    pub support_count: u8,
    /// Trump count required (with both bowers) before going alone.
    pub alone_count: u8,
}

impl BotParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let count = |raw: Option<String>, fallback: u8| {
            raw.and_then(|value| value.trim().parse::<u8>().ok())
                .filter(|count| (1..=6).contains(count))
                .unwrap_or(fallback)
        };

        Self {
            solo_count: count(read("EUCHRE_BID_SOLO_COUNT"), defaults.solo_count),
            support_count: count(read("EUCHRE_BID_SUPPORT_COUNT"), defaults.support_count),
            alone_count: count(read("EUCHRE_BID_ALONE_COUNT"), defaults.alone_count),
        }
    }
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            solo_count: 3,
            support_count: 2,
            alone_count: 4,
        }
    }
}
