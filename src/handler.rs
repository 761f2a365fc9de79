use poise::{serenity_prelude as serenity, Event};

use crate::{
    commands::{murloc, quote},
    Data, Error, Result,
};

/// Gateway events outside the command flow. Only the "More" buttons under
/// quote and murloc embeds are of interest.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &Event<'_>,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<()> {
    if let Event::InteractionCreate { interaction } = event {
        if let serenity::Interaction::MessageComponent(component) = interaction {
            match component.data.custom_id.as_str() {
                quote::QUOTE_MORE_ID => quote::send_more(ctx, component, data).await?,
                murloc::MURLOC_MORE_ID => murloc::send_more(ctx, component, data).await?,
                _ => {}
            }
        }
    }

    Ok(())
}
