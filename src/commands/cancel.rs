use time::{macros::format_description, OffsetDateTime, UtcOffset};

use crate::{Context, Result};

/// List all active timers in this channel.
#[poise::command(prefix_command, slash_command)]
pub async fn timers(ctx: Context<'_>) -> Result<()> {
    let channel_timers = {
        let store = ctx.data().timers.lock().unwrap();
        store.in_channel(ctx.channel_id().0)
    };

    if channel_timers.is_empty() {
        ctx.say("🔔 No timers set in this channel.").await?;
        return Ok(());
    }

    let format = format_description!("[day].[month].[year] [hour]:[minute]");
    let mut lines = vec!["📌 **Active Timers:**".to_string(), String::new()];
    for timer in channel_timers {
        let offset = UtcOffset::from_hms(timer.tz_offset, 0, 0)?;
        let target = OffsetDateTime::from_unix_timestamp(timer.target_timestamp)?.to_offset(offset);
        lines.push(format!(
            "• ID **{}** — {}\n  Date: **{} (GMT{:+})**\n",
            timer.timer_id,
            timer.text,
            target.format(&format)?,
            timer.tz_offset,
        ));
    }

    ctx.say(lines.join("\n")).await?;

    Ok(())
}

/// Cancel a timer by its ID.
#[poise::command(prefix_command, slash_command)]
pub async fn cancel(
    ctx: Context<'_>,
    #[description = "Timer ID"] timer_id: u64,
) -> Result<()> {
    let removed = {
        let mut store = ctx.data().timers.lock().unwrap();
        store.delete(timer_id)?
    };

    if removed {
        ctx.say(format!("🛑 Timer **{timer_id}** has been canceled."))
            .await?;
    } else {
        ctx.say("❌ No timer found with this ID.").await?;
    }

    Ok(())
}

/// Cancel all timers in the current channel. Each deletion is independent;
/// there is no rollback.
#[poise::command(prefix_command, slash_command)]
pub async fn cancelall(ctx: Context<'_>) -> Result<()> {
    let removed = {
        let mut store = ctx.data().timers.lock().unwrap();
        let ids: Vec<u64> = store
            .in_channel(ctx.channel_id().0)
            .into_iter()
            .map(|t| t.timer_id)
            .collect();
        for &id in &ids {
            store.delete(id)?;
        }
        ids.len()
    };

    if removed == 0 {
        ctx.say("🔕 There are no active timers in this channel.")
            .await?;
    } else {
        ctx.say(format!("🛑 Removed **{removed}** timer(s).")).await?;
    }

    Ok(())
}
