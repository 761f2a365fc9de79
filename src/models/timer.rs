use serde_derive::{Deserialize, Serialize};

/// A persisted countdown tied to a Discord message. Immutable once created;
/// the only lifecycle transition is deletion (cancel or expiry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub timer_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub text: String,
    /// Seconds since the Unix epoch.
    pub target_timestamp: i64,
    /// UTC offset in hours, kept for display formatting only.
    pub tz_offset: i8,
    /// Whether the countdown message was pinned at creation.
    pub pinned: bool,
}

/// On-disk layout of the timer file.
#[derive(Debug, Serialize, Deserialize)]
pub struct TimerFile {
    pub next_timer_id: u64,
    pub timers: Vec<Timer>,
}

impl Default for TimerFile {
    fn default() -> Self {
        Self {
            next_timer_id: 1,
            timers: Vec::new(),
        }
    }
}
