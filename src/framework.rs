use tracing::debug;

use crate::{Data, Error};

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    // Many errors can occur; we only customize the interesting ones and
    // forward the rest to the default handler
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        poise::FrameworkError::Command { error, ctx } => {
            debug!("Error in command `{}`: {:?}", ctx.command().name, error,);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                debug!("Error while handling error: {}", e)
            }
        }
    }
}
