use std::sync::Mutex;

use poise::serenity_prelude::{ChannelId, CreateEmbed, Http};
use time::{Date, OffsetDateTime, Time};
use tokio::time::Duration;
use tracing::warn;

/// How often the daily jobs re-check whether their fire time has passed.
pub const DAILY_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Duplicate-send guard for a once-per-day job. Holds the last calendar day
/// content went out; process-lifetime only, so a restart clears it and the
/// first poll after startup doubles as the catch-up pass.
#[derive(Debug, Default)]
pub struct DailyGuard {
    last_sent: Mutex<Option<Date>>,
}

impl DailyGuard {
    /// True when `now` is past today's fire time and nothing was sent today.
    pub fn should_send(&self, now: OffsetDateTime, fire_at: Time) -> bool {
        if now.time() < fire_at {
            return false;
        }
        *self.last_sent.lock().unwrap() != Some(now.date())
    }

    pub fn mark_sent(&self, day: Date) {
        *self.last_sent.lock().unwrap() = Some(day);
    }
}

/// Send one embed to every destination channel; failures are logged and do
/// not stop the remaining sends.
pub async fn broadcast_embed<F>(http: &Http, channels: &[u64], build: F)
where
    F: Fn(&mut CreateEmbed) -> &mut CreateEmbed + Send + Sync,
{
    for &channel_id in channels {
        let result = ChannelId(channel_id)
            .send_message(http, |message| message.embed(|e| build(e)))
            .await;
        if let Err(e) = result {
            warn!("Failed to send daily embed to channel {channel_id}: {e}");
        }
    }
}

/// Send plain messages to every destination channel, same failure policy.
pub async fn broadcast_messages(http: &Http, channels: &[u64], messages: &[String]) {
    for &channel_id in channels {
        for message in messages {
            let result = ChannelId(channel_id)
                .send_message(http, |m| m.content(message))
                .await;
            if let Err(e) = result {
                warn!("Failed to send daily message to channel {channel_id}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{datetime, time};

    use super::*;

    const FIRE_AT: Time = time!(10:00);

    #[test]
    fn holds_before_fire_time() {
        let guard = DailyGuard::default();
        assert!(!guard.should_send(datetime!(2025-06-15 09:59 +3), FIRE_AT));
    }

    #[test]
    fn fires_once_per_day() {
        let guard = DailyGuard::default();
        let now = datetime!(2025-06-15 10:00 +3);

        assert!(guard.should_send(now, FIRE_AT));
        guard.mark_sent(now.date());
        assert!(!guard.should_send(now, FIRE_AT));
        // Still guarded later the same day.
        assert!(!guard.should_send(datetime!(2025-06-15 18:30 +3), FIRE_AT));
        // A new day passes the guard again.
        assert!(guard.should_send(datetime!(2025-06-16 10:00 +3), FIRE_AT));
    }

    #[test]
    fn catch_up_after_restart() {
        // Fresh guard (as after a restart) well past the fire time: exactly
        // one send is allowed.
        let guard = DailyGuard::default();
        let now = datetime!(2025-06-15 16:45 +3);

        assert!(guard.should_send(now, FIRE_AT));
        guard.mark_sent(now.date());
        assert!(!guard.should_send(now, FIRE_AT));
    }
}
