use poise::serenity_prelude as serenity;
use serenity::{CreateEmbed, InteractionResponseType, MessageComponentInteraction};

use crate::{commands::more_button, utils::COLOUR_BLUE, Context, Data, Result};

pub const QUOTE_MORE_ID: &str = "quote-more";

pub(crate) fn quote_embed<'a>(
    embed: &'a mut CreateEmbed,
    text: &str,
    source: &str,
) -> &'a mut CreateEmbed {
    embed
        .title("🎮 GAME QUOTE")
        .description(text)
        .colour(COLOUR_BLUE)
        .footer(|f| f.text(source))
}

/// Send a random game quote with its source.
#[poise::command(prefix_command, slash_command)]
pub async fn quote(ctx: Context<'_>) -> Result<()> {
    let Some((text, source)) = ctx.data().quotes.random() else {
        ctx.say("❌ Quotes file is empty 😢").await?;
        return Ok(());
    };

    ctx.send(|reply| {
        reply
            .embed(|e| quote_embed(e, text, source))
            .components(|c| more_button(c, QUOTE_MORE_ID))
    })
    .await?;

    Ok(())
}

/// "More" button under a quote embed: another quote, another button.
pub async fn send_more(
    ctx: &serenity::Context,
    component: &MessageComponentInteraction,
    data: &Data,
) -> Result<()> {
    let Some((text, source)) = data.quotes.random() else {
        return Ok(());
    };

    component
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message
                        .embed(|e| quote_embed(e, text, source))
                        .components(|c| more_button(c, QUOTE_MORE_ID))
                })
        })
        .await?;

    Ok(())
}
