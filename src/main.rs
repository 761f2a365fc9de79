use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude::GatewayIntents;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{ctx_data::CtxData, settings::Settings};

mod commands;
mod ctx_data;
mod framework;
mod handler;
mod holidays;
mod models;
mod settings;
mod tasks;
mod timers;
mod utils;

pub type Error = anyhow::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;
pub type Data = Arc<CtxData>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().context("invalid configuration")?;
    let token = settings.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(framework::on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handler::handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .token(token)
        .intents(GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT)
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("{} is connected!", ready.user.name);

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    "Registered commands: {:?}",
                    framework
                        .options()
                        .commands
                        .iter()
                        .map(|c| c.name.as_str())
                        .collect::<Vec<_>>()
                );

                let data = Arc::new(CtxData::new(settings)?);
                tasks::start_tasks(&data, ctx.http.clone());

                Ok(data)
            })
        })
        .build()
        .await
        .context("failed to build Discord client")?;

    framework.start().await.context("client error")?;

    Ok(())
}
