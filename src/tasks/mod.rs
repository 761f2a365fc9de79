use std::sync::Arc;

use poise::serenity_prelude::{async_trait, Http};
use tokio::time::{sleep, Duration};

use crate::{
    ctx_data::CtxData,
    tasks::{
        daily_events::DailyEventsTask, daily_holidays::DailyHolidaysTask,
        daily_quote::DailyQuoteTask, timer_update::TimerUpdateTask,
    },
};

pub mod daily;
mod daily_events;
mod daily_holidays;
mod daily_quote;
mod timer_update;

#[async_trait]
pub trait Task: Send + Sync {
    /// Time to sleep before the next `work` call; re-read after every tick.
    fn get_interval(&self) -> Duration;
    async fn work(&self);
}

fn get_tasks(ctx_data: &Arc<CtxData>, http: Arc<Http>) -> Vec<Box<dyn Task>> {
    let features = &ctx_data.settings.features;
    let mut tasks: Vec<Box<dyn Task>> = Vec::new();

    if features.timers {
        tasks.push(Box::new(TimerUpdateTask::new(ctx_data.clone(), http.clone())));
    }
    if features.daily_quote {
        tasks.push(Box::new(DailyQuoteTask::new(ctx_data.clone(), http.clone())));
    }
    if features.daily_holidays {
        tasks.push(Box::new(DailyHolidaysTask::new(
            ctx_data.clone(),
            http.clone(),
        )));
    }
    if features.daily_events {
        tasks.push(Box::new(DailyEventsTask::new(ctx_data.clone(), http)));
    }

    tasks
}

/// Spawn every enabled background task. The first `work` call happens right
/// away, which is what lets the daily jobs catch up after a restart.
pub fn start_tasks(ctx_data: &Arc<CtxData>, http: Arc<Http>) {
    for task in get_tasks(ctx_data, http) {
        tokio::task::spawn(async move {
            loop {
                task.work().await;
                sleep(task.get_interval()).await;
            }
        });
    }
}
