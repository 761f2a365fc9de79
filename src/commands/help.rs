use crate::{utils::COLOUR_BLURPLE, Context, Result};

/// Show the command reference.
#[poise::command(prefix_command, slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<()> {
    ctx.send(|reply| {
        reply.embed(|e| {
            e.title("📘 Murbot – Command List")
                .colour(COLOUR_BLURPLE)
                .field(
                    "🎮 Quotes",
                    "**!quote** — Random game quote\n**!murloc_ai** — Generate Murloc AI wisdom",
                    false,
                )
                .field(
                    "⏱ Simple Timer",
                    "`!timer 10m text`\nSupports: `10s`, `5m`, `1h`, `1h20m`\n\
                     Example: `!timer 30s Time to fight!`",
                    false,
                )
                .field(
                    "🎯 Date Timer (GMT + optional pin)",
                    "`!timerdate DD.MM.YYYY HH:MM +TZ text --pin`\n\
                     Example: `!timerdate 31.12.2025 23:59 +3 New Year! --pin`\n\n\
                     Countdown format: days / hours / minutes / seconds.\n\
                     `--pin` is optional.",
                    false,
                )
                .field(
                    "🎉 Holidays",
                    "`!holidays` — Shows the next upcoming holiday across all JSON files.\n\
                     Includes: world, country-specific, religious, and dynamic holidays.",
                    false,
                )
                .field(
                    "🛑 Timer Management",
                    "`!timers` — List active timers\n`!cancel <ID>` — Cancel one timer\n\
                     `!cancelall` — Delete all timers in this channel",
                    false,
                )
                .footer(|f| f.text("Murloc Edition 🐸"))
        })
    })
    .await?;

    Ok(())
}
