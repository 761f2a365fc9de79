use poise::serenity_prelude::{ButtonStyle, CreateComponents};

use crate::{Data, Error};

pub mod cancel;
pub mod help;
pub mod holidays;
pub mod murloc;
pub mod quote;
pub mod timer;
pub mod timer_date;

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        quote::quote(),
        murloc::murloc_ai(),
        timer::timer(),
        timer_date::timerdate(),
        cancel::timers(),
        cancel::cancel(),
        cancel::cancelall(),
        holidays::holidays(),
        help::help(),
    ]
}

/// Single "More" button row used by the quote and murloc embeds.
pub(crate) fn more_button<'a>(
    components: &'a mut CreateComponents,
    custom_id: &str,
) -> &'a mut CreateComponents {
    let custom_id = custom_id.to_string();
    components.create_action_row(|row| {
        row.create_button(|button| {
            button
                .custom_id(custom_id)
                .label("More")
                .style(ButtonStyle::Primary)
        })
    })
}
