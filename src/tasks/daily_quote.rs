use std::sync::Arc;

use poise::serenity_prelude::{async_trait, Http};
use time::{macros::time, Time};
use tokio::time::Duration;
use tracing::{info, warn};

use crate::{
    commands::quote::quote_embed,
    ctx_data::CtxData,
    tasks::{
        daily::{broadcast_embed, DailyGuard, DAILY_POLL_INTERVAL},
        Task,
    },
};

const FIRE_AT: Time = time!(10:00);

/// Posts one random quote per day to the configured channels.
pub struct DailyQuoteTask {
    ctx_data: Arc<CtxData>,
    http: Arc<Http>,
    guard: DailyGuard,
}

impl DailyQuoteTask {
    pub fn new(ctx_data: Arc<CtxData>, http: Arc<Http>) -> Self {
        Self {
            ctx_data,
            http,
            guard: DailyGuard::default(),
        }
    }
}

#[async_trait]
impl Task for DailyQuoteTask {
    fn get_interval(&self) -> Duration {
        DAILY_POLL_INTERVAL
    }

    async fn work(&self) {
        let now = self.ctx_data.now_local();
        if !self.guard.should_send(now, FIRE_AT) {
            return;
        }

        let channels = &self.ctx_data.settings.daily_channels.quote;
        if channels.is_empty() {
            info!("No quote channels configured, skipping daily quote.");
            self.guard.mark_sent(now.date());
            return;
        }

        match self.ctx_data.quotes.random() {
            Some((text, source)) => {
                broadcast_embed(&self.http, channels, |e| quote_embed(e, text, source)).await;
                info!("Daily quote sent for {}.", now.date());
            }
            None => warn!("Quotes file is empty, nothing to send."),
        }

        self.guard.mark_sent(now.date());
    }
}
