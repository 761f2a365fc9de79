use std::{fs, sync::Arc};

use anyhow::{Context as _, Result as AnyResult};
use itertools::Itertools;
use poise::serenity_prelude::{async_trait, Http};
use time::{macros::time, Date, Time};
use tokio::time::Duration;
use tracing::{info, warn};

use crate::{
    ctx_data::CtxData,
    holidays::{flags, parse_mmdd},
    models::event::{GuildEvent, CATEGORY_BIRTHDAY, CATEGORY_CHALLENGE, CATEGORY_HERO},
    tasks::{
        daily::{broadcast_messages, DailyGuard, DAILY_POLL_INTERVAL},
        Task,
    },
};

const FIRE_AT: Time = time!(10:05);

/// True when `today` falls on the event date: "MM-DD" for a single day,
/// "MM-DD:MM-DD" for a range, possibly wrapping the year boundary.
pub(crate) fn date_matches(spec: &str, today: Date) -> AnyResult<bool> {
    let today_md = today.month() as u16 * 100 + today.day() as u16;

    let Some((start, end)) = spec.split_once(':') else {
        let (month, day) = parse_mmdd(spec)?;
        return Ok(today_md == month as u16 * 100 + day as u16);
    };

    let (sm, sd) = parse_mmdd(start)?;
    let (em, ed) = parse_mmdd(end)?;
    let start_md = sm as u16 * 100 + sd as u16;
    let end_md = em as u16 * 100 + ed as u16;

    if end_md < start_md {
        // Range wraps through New Year.
        Ok(today_md >= start_md || today_md <= end_md)
    } else {
        Ok(start_md <= today_md && today_md <= end_md)
    }
}

fn category_emoji(category: &str, fallback: &'static str) -> &'static str {
    flags::CATEGORY_EMOJIS
        .get(category)
        .copied()
        .unwrap_or(fallback)
}

/// Build the day's messages from the event list. Empty means nothing to send.
pub(crate) fn build_messages(events: &[GuildEvent], today: Date) -> Vec<String> {
    let on_today = |category: &str| -> Vec<&GuildEvent> {
        events
            .iter()
            .filter(|e| e.has_category(category))
            .filter(|e| date_matches(&e.date, today).unwrap_or(false))
            .collect()
    };

    let mut messages = Vec::new();

    if !on_today(CATEGORY_CHALLENGE).is_empty() {
        messages.push(format!(
            "{} **MURLOC CHALLENGE IS ACTIVE!**",
            category_emoji(CATEGORY_CHALLENGE, "🔥")
        ));
    }

    for hero in on_today(CATEGORY_HERO) {
        let flag = flags::country_flag(&hero.countries.clone().into_vec());
        messages.push(format!(
            "{} {flag} **MURLOC HERO:** {}",
            category_emoji(CATEGORY_HERO, "🏆"),
            hero.name
        ));
    }

    let birthdays = on_today(CATEGORY_BIRTHDAY);
    if !birthdays.is_empty() {
        let names = birthdays.iter().map(|e| e.name.as_str()).join(", ");
        messages.push(format!(
            "{} **MURLOC BIRTHDAYS TODAY:**\n{names}",
            category_emoji(CATEGORY_BIRTHDAY, "🎂")
        ));
    }

    messages
}

fn load_events(path: &str) -> AnyResult<Vec<GuildEvent>> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("invalid events file {path}"))
}

/// Posts birthday / challenge / hero announcements once per day.
pub struct DailyEventsTask {
    ctx_data: Arc<CtxData>,
    http: Arc<Http>,
    guard: DailyGuard,
}

impl DailyEventsTask {
    pub fn new(ctx_data: Arc<CtxData>, http: Arc<Http>) -> Self {
        Self {
            ctx_data,
            http,
            guard: DailyGuard::default(),
        }
    }
}

#[async_trait]
impl Task for DailyEventsTask {
    fn get_interval(&self) -> Duration {
        DAILY_POLL_INTERVAL
    }

    async fn work(&self) {
        let now = self.ctx_data.now_local();
        if !self.guard.should_send(now, FIRE_AT) {
            return;
        }

        let today = now.date();
        let events = match load_events(&self.ctx_data.settings.data.events_file) {
            Ok(events) => events,
            Err(e) => {
                warn!("Failed to load guild events: {e}");
                self.guard.mark_sent(today);
                return;
            }
        };

        let messages = build_messages(&events, today);
        if messages.is_empty() {
            info!("No birthday / challenge events today.");
            self.guard.mark_sent(today);
            return;
        }

        let channels = &self.ctx_data.settings.daily_channels.events;
        broadcast_messages(&self.http, channels, &messages).await;

        self.guard.mark_sent(today);
        info!("Guild events sent for {today}.");
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn single_day_match() {
        assert!(date_matches("06-15", date!(2025 - 06 - 15)).unwrap());
        assert!(!date_matches("06-15", date!(2025 - 06 - 16)).unwrap());
    }

    #[test]
    fn plain_range_match() {
        assert!(date_matches("06-10:06-20", date!(2025 - 06 - 15)).unwrap());
        assert!(date_matches("06-10:06-20", date!(2025 - 06 - 10)).unwrap());
        assert!(date_matches("06-10:06-20", date!(2025 - 06 - 20)).unwrap());
        assert!(!date_matches("06-10:06-20", date!(2025 - 06 - 21)).unwrap());
    }

    #[test]
    fn year_wrapping_range() {
        assert!(date_matches("12-19:01-20", date!(2025 - 12 - 25)).unwrap());
        assert!(date_matches("12-19:01-20", date!(2026 - 01 - 05)).unwrap());
        assert!(!date_matches("12-19:01-20", date!(2025 - 06 - 15)).unwrap());
    }

    #[test]
    fn bad_spec_is_an_error() {
        assert!(date_matches("June 15", date!(2025 - 06 - 15)).is_err());
    }

    #[test]
    fn builds_all_message_kinds() {
        let events: Vec<GuildEvent> = serde_json::from_str(
            r#"[
                {"date": "06-01:06-30", "name": "Summer grind", "category": "Challenge"},
                {"date": "06-15", "name": "Gurgl", "categories": ["Hero"], "countries": ["world"]},
                {"date": "06-15", "name": "Mrgl", "categories": ["Birthday"]},
                {"date": "06-15", "name": "Blurp", "categories": ["Birthday"]},
                {"date": "07-01", "name": "Not today", "categories": ["Birthday"]}
            ]"#,
        )
        .unwrap();

        let messages = build_messages(&events, date!(2025 - 06 - 15));
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("CHALLENGE"));
        assert!(messages[1].contains("Gurgl"));
        assert!(messages[2].contains("Mrgl, Blurp"));
    }

    #[test]
    fn quiet_day_builds_nothing() {
        let events: Vec<GuildEvent> = serde_json::from_str(
            r#"[{"date": "07-01", "name": "Later", "categories": ["Birthday"]}]"#,
        )
        .unwrap();

        assert!(build_messages(&events, date!(2025 - 06 - 15)).is_empty());
    }
}
