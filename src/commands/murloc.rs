use poise::serenity_prelude as serenity;
use serenity::{CreateEmbed, InteractionResponseType, MessageComponentInteraction};

use crate::{commands::more_button, utils::COLOUR_BLUE, Context, Data, Result};

pub const MURLOC_MORE_ID: &str = "murloc-more";

pub(crate) fn murloc_embed<'a>(embed: &'a mut CreateEmbed, phrase: &str) -> &'a mut CreateEmbed {
    embed
        .title("🐸 Murloc AI Wisdom 🧠")
        .description(phrase)
        .colour(COLOUR_BLUE)
        .footer(|f| f.text("🐸 Mrrglglglgl! 🐸"))
}

/// Generate and send murloc wisdom.
#[poise::command(prefix_command, slash_command)]
pub async fn murloc_ai(ctx: Context<'_>) -> Result<()> {
    let Some(phrase) = ctx.data().murloc.phrase() else {
        ctx.say("❌ Murloc AI data is missing.").await?;
        return Ok(());
    };

    ctx.send(|reply| {
        reply
            .embed(|e| murloc_embed(e, &phrase))
            .components(|c| more_button(c, MURLOC_MORE_ID))
    })
    .await?;

    Ok(())
}

pub async fn send_more(
    ctx: &serenity::Context,
    component: &MessageComponentInteraction,
    data: &Data,
) -> Result<()> {
    let Some(phrase) = data.murloc.phrase() else {
        return Ok(());
    };

    component
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message
                        .embed(|e| murloc_embed(e, &phrase))
                        .components(|c| more_button(c, MURLOC_MORE_ID))
                })
        })
        .await?;

    Ok(())
}
