use std::sync::Arc;

use poise::serenity_prelude::{async_trait, Http};
use time::{macros::time, Time};
use tokio::time::Duration;
use tracing::{info, warn};

use crate::{
    ctx_data::CtxData,
    holidays::{flags, holidays_on, load_all_holidays},
    tasks::{
        daily::{broadcast_embed, DailyGuard, DAILY_POLL_INTERVAL},
        Task,
    },
    utils::COLOUR_GREEN,
};

const FIRE_AT: Time = time!(10:01);

/// Posts today's holidays (static files plus computed Easters) once per day.
pub struct DailyHolidaysTask {
    ctx_data: Arc<CtxData>,
    http: Arc<Http>,
    guard: DailyGuard,
}

impl DailyHolidaysTask {
    pub fn new(ctx_data: Arc<CtxData>, http: Arc<Http>) -> Self {
        Self {
            ctx_data,
            http,
            guard: DailyGuard::default(),
        }
    }
}

#[async_trait]
impl Task for DailyHolidaysTask {
    fn get_interval(&self) -> Duration {
        DAILY_POLL_INTERVAL
    }

    async fn work(&self) {
        let now = self.ctx_data.now_local();
        if !self.guard.should_send(now, FIRE_AT) {
            return;
        }

        let today = now.date();
        let dir = &self.ctx_data.settings.data.holidays_dir;
        let all = match load_all_holidays(dir, today) {
            Ok(all) => all,
            Err(e) => {
                warn!("Failed to load holidays: {e}");
                self.guard.mark_sent(today);
                return;
            }
        };

        let fields: Vec<(String, String)> = holidays_on(&all, today)
            .into_iter()
            .map(|h| {
                let name = format!("{} {}", flags::country_flag(&h.countries), h.name);
                let value = flags::category_line(&h.categories).unwrap_or_else(|| " ".to_string());
                (name, value)
            })
            .collect();

        if fields.is_empty() {
            info!("No holidays today.");
            self.guard.mark_sent(today);
            return;
        }

        let channels = &self.ctx_data.settings.daily_channels.holidays;
        broadcast_embed(&self.http, channels, |e| {
            e.title("🎉 Today's Holidays").colour(COLOUR_GREEN);
            e.fields(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone(), false)),
            )
        })
        .await;

        self.guard.mark_sent(today);
        info!("Holidays sent for {today}.");
    }
}
