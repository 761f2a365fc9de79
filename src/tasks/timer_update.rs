use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use poise::serenity_prelude::{async_trait, ChannelId, CreateEmbed, Http, MessageId};
use time::OffsetDateTime;
use tokio::time::Duration;
use tracing::{debug, warn};

use crate::{
    ctx_data::CtxData,
    models::timer::Timer,
    tasks::Task,
    utils::{choose_update_interval, format_remaining, COLOUR_GREEN, COLOUR_ORANGE},
};

/// Tick rate while no timer is registered.
const IDLE_INTERVAL: Duration = Duration::from_secs(1);

/// What one pass over the registry did. Updated/expired/skipped are disjoint
/// per timer ID.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub updated: Vec<u64>,
    pub expired: Vec<u64>,
    pub skipped: Vec<u64>,
}

impl TickReport {
    fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.expired.is_empty() && self.skipped.is_empty()
    }
}

/// Per-timer decision for one tick, taken before any message traffic.
#[derive(Debug, PartialEq, Eq)]
enum TimerPhase {
    /// Target reached, switch to the terminal embed and drop the record.
    Expired,
    /// Still counting down, with this many seconds left.
    Running(i64),
}

fn classify(timer: &Timer, now: i64) -> TimerPhase {
    let remaining = timer.target_timestamp - now;
    if remaining <= 0 {
        TimerPhase::Expired
    } else {
        TimerPhase::Running(remaining)
    }
}

/// Next tick interval for the whole loop: a step function of the minimum
/// remaining time across all running timers.
fn next_interval(timers: &[Timer], now: i64) -> Duration {
    timers
        .iter()
        .map(|t| t.target_timestamp - now)
        .filter(|remaining| *remaining > 0)
        .min()
        .map(choose_update_interval)
        .unwrap_or(IDLE_INTERVAL)
}

fn countdown_embed<'a>(
    embed: &'a mut CreateEmbed,
    text: &str,
    remaining: i64,
) -> &'a mut CreateEmbed {
    embed
        .title(format!("⏳ Timer: {text}"))
        .description(format!("Time left:\n\n**{}**", format_remaining(remaining)))
        .colour(COLOUR_ORANGE)
}

fn finished_embed<'a>(embed: &'a mut CreateEmbed, text: &str) -> &'a mut CreateEmbed {
    embed
        .title("🎊 The event has started!")
        .description(text.to_string())
        .colour(COLOUR_GREEN)
}

/// Single loop servicing every date timer: re-renders countdown messages,
/// fires completion handling, and adapts its own tick rate.
pub struct TimerUpdateTask {
    ctx_data: Arc<CtxData>,
    http: Arc<Http>,
    interval_ms: AtomicU64,
}

impl TimerUpdateTask {
    pub fn new(ctx_data: Arc<CtxData>, http: Arc<Http>) -> Self {
        Self {
            ctx_data,
            http,
            interval_ms: AtomicU64::new(IDLE_INTERVAL.as_millis() as u64),
        }
    }

    fn delete_timer(&self, timer_id: u64) {
        let mut store = self.ctx_data.timers.lock().unwrap();
        if let Err(e) = store.delete(timer_id) {
            warn!("Failed to persist removal of timer {timer_id}: {e}");
        }
    }

    /// Terminal transition: swap the countdown for the "started" embed,
    /// unpin, drop the record. Expiry is only reached through a resolvable
    /// message, mirroring the per-timer skip policy.
    async fn expire(&self, timer: &Timer) -> bool {
        let channel = ChannelId(timer.channel_id);
        let message_id = MessageId(timer.message_id);

        let edited = channel
            .edit_message(&self.http, message_id, |m| {
                m.embed(|e| finished_embed(e, &timer.text))
            })
            .await;
        if let Err(e) = edited {
            warn!("Timer {}: failed to finalize message: {e}", timer.timer_id);
            return false;
        }

        if timer.pinned {
            if let Err(e) = channel.unpin(&self.http, message_id).await {
                warn!("Timer {}: failed to unpin message: {e}", timer.timer_id);
            }
        }

        self.delete_timer(timer.timer_id);
        true
    }

    async fn tick(&self) -> TickReport {
        let timers = {
            let store = self.ctx_data.timers.lock().unwrap();
            store.all()
        };
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let mut report = TickReport::default();
        for timer in &timers {
            let channel = ChannelId(timer.channel_id);
            let message_id = MessageId(timer.message_id);

            // Message deleted or channel inaccessible: leave the timer alone
            // until the next tick.
            if let Err(e) = channel.message(&self.http, message_id).await {
                warn!("Timer {}: message lookup failed: {e}", timer.timer_id);
                report.skipped.push(timer.timer_id);
                continue;
            }

            let remaining = match classify(timer, now) {
                TimerPhase::Expired => {
                    if self.expire(timer).await {
                        report.expired.push(timer.timer_id);
                    } else {
                        report.skipped.push(timer.timer_id);
                    }
                    continue;
                }
                TimerPhase::Running(remaining) => remaining,
            };

            let edited = channel
                .edit_message(&self.http, message_id, |m| {
                    m.embed(|e| countdown_embed(e, &timer.text, remaining))
                })
                .await;
            match edited {
                Ok(_) => report.updated.push(timer.timer_id),
                Err(e) => {
                    warn!("Timer {}: failed to edit message: {e}", timer.timer_id);
                    report.skipped.push(timer.timer_id);
                }
            }
        }

        let interval = next_interval(&timers, now);
        self.interval_ms
            .store(interval.as_millis() as u64, Ordering::Relaxed);

        report
    }
}

#[async_trait]
impl Task for TimerUpdateTask {
    fn get_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    async fn work(&self) {
        let report = self.tick().await;
        if !report.is_empty() {
            debug!(
                "Timer tick: {} updated, {} expired, {} skipped",
                report.updated.len(),
                report.expired.len(),
                report.skipped.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(id: u64, target: i64) -> Timer {
        Timer {
            timer_id: id,
            channel_id: 1,
            message_id: 1,
            text: "t".into(),
            target_timestamp: target,
            tz_offset: 0,
            pinned: false,
        }
    }

    #[test]
    fn classification_boundary() {
        // Reaching the target exactly counts as expired, not a 0s update.
        assert_eq!(classify(&timer(1, 1000), 1000), TimerPhase::Expired);
        assert_eq!(classify(&timer(1, 900), 1000), TimerPhase::Expired);
        assert_eq!(classify(&timer(1, 1001), 1000), TimerPhase::Running(1));
        assert_eq!(classify(&timer(1, 1700), 1000), TimerPhase::Running(700));
    }

    #[test]
    fn idle_interval_with_no_timers() {
        assert_eq!(next_interval(&[], 1000), IDLE_INTERVAL);
    }

    #[test]
    fn interval_follows_minimum_remaining() {
        let timers = vec![timer(1, 1000 + 700), timer(2, 1000 + 15)];
        // The 15s timer dictates the pace, not the 700s one.
        assert_eq!(next_interval(&timers, 1000), Duration::from_secs(1));
    }

    #[test]
    fn expired_timers_do_not_drive_interval() {
        let timers = vec![timer(1, 900), timer(2, 1000 + 700)];
        assert_eq!(next_interval(&timers, 1000), Duration::from_secs(30));
        // Only expired timers left: idle pace.
        assert_eq!(next_interval(&[timer(1, 900)], 1000), IDLE_INTERVAL);
    }
}
