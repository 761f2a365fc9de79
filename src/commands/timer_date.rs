use anyhow::{bail, Result as AnyResult};
use time::{macros::format_description, Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::{
    utils::{format_remaining, COLOUR_ORANGE},
    Context, Result,
};

const DEFAULT_TEXT: &str = "⏰ Time is up!";
const USAGE: &str =
    "❌ Invalid format.\nExample:\n`!timerdate 31.12.2025 23:59 +3 New Year! --pin`";

/// Strip a trailing `--pin` (or bare `pin`) marker from the timer text.
pub(crate) fn split_pin_flag(text: &str) -> (String, bool) {
    let raw = text.trim();
    if let Some(stripped) = raw.strip_suffix("--pin") {
        (stripped.trim().to_string(), true)
    } else if let Some(stripped) = raw.strip_suffix("pin") {
        (stripped.trim().to_string(), true)
    } else {
        (raw.to_string(), false)
    }
}

/// Parse `DD.MM.YYYY`, `HH:MM` and a `+3`/`-5` style offset into an absolute
/// target moment.
pub(crate) fn parse_target(
    date: &str,
    time_str: &str,
    gmt: &str,
) -> AnyResult<(OffsetDateTime, i8)> {
    if !(gmt.starts_with('+') || gmt.starts_with('-')) {
        bail!("GMT must be in the format `+3` or `-5`");
    }
    let offset_hours: i8 = gmt.parse()?;
    let offset = UtcOffset::from_hms(offset_hours, 0, 0)?;

    let date_format = format_description!("[day].[month].[year]");
    let time_format = format_description!("[hour]:[minute]");
    let date = Date::parse(date, &date_format)?;
    let time = Time::parse(time_str, &time_format)?;

    Ok((
        PrimitiveDateTime::new(date, time).assume_offset(offset),
        offset_hours,
    ))
}

/// Create a date-based timer with a live-updating countdown message.
#[poise::command(prefix_command, slash_command)]
pub async fn timerdate(
    ctx: Context<'_>,
    #[description = "Date, DD.MM.YYYY"] date: String,
    #[description = "Time, HH:MM"] time: String,
    #[description = "GMT offset, +3 or -5"] gmt: String,
    #[description = "Timer text; append --pin to pin the countdown"]
    #[rest]
    text: Option<String>,
) -> Result<()> {
    if !ctx.data().settings.features.timers {
        ctx.say("❌ Date timers are disabled in this deployment.")
            .await?;
        return Ok(());
    }

    let (raw_text, should_pin) = split_pin_flag(text.as_deref().unwrap_or(""));
    let text = if raw_text.is_empty() {
        DEFAULT_TEXT.to_string()
    } else {
        raw_text
    };

    let (target, tz_offset) = match parse_target(&date, &time, &gmt) {
        Ok(parsed) => parsed,
        Err(_) => {
            ctx.say(USAGE).await?;
            return Ok(());
        }
    };

    let remaining = target.unix_timestamp() - OffsetDateTime::now_utc().unix_timestamp();
    if remaining <= 0 {
        ctx.say("❌ This date has already passed in the specified GMT.")
            .await?;
        return Ok(());
    }

    let handle = ctx
        .send(|reply| {
            reply.embed(|e| {
                e.title(format!("⏳ Timer: {text}"))
                    .description(format!(
                        "Date: **{date} {time} (GMT{gmt})**\nRemaining: **{}**",
                        format_remaining(remaining)
                    ))
                    .colour(COLOUR_ORANGE)
            })
        })
        .await?;
    let message = handle.message().await?;

    if should_pin {
        if let Err(e) = message.pin(ctx).await {
            ctx.say(format!("⚠️ Could not pin the message: {e}"))
                .await?;
        }
    }

    let timer_id = {
        let mut store = ctx.data().timers.lock().unwrap();
        store.create(
            message.channel_id.0,
            message.id.0,
            text,
            target.unix_timestamp(),
            tz_offset,
            should_pin,
        )?
    };

    ctx.say(format!("✅ Timer created! ID: **{timer_id}**"))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn pin_flag_variants() {
        assert_eq!(split_pin_flag("New Year! --pin"), ("New Year!".into(), true));
        assert_eq!(split_pin_flag("New Year! pin"), ("New Year!".into(), true));
        assert_eq!(split_pin_flag("New Year!"), ("New Year!".into(), false));
        assert_eq!(split_pin_flag("--pin"), (String::new(), true));
        assert_eq!(split_pin_flag(""), (String::new(), false));
    }

    #[test]
    fn parses_full_target() {
        let (target, tz) = parse_target("31.12.2025", "23:59", "+3").unwrap();
        assert_eq!(target, datetime!(2025-12-31 23:59 +3));
        assert_eq!(tz, 3);

        let (target, tz) = parse_target("01.07.2026", "09:00", "-5").unwrap();
        assert_eq!(target, datetime!(2026-07-01 09:00 -5));
        assert_eq!(tz, -5);
    }

    #[test]
    fn rejects_bad_offset() {
        assert!(parse_target("31.12.2025", "23:59", "3").is_err());
        assert!(parse_target("31.12.2025", "23:59", "+x").is_err());
    }

    #[test]
    fn rejects_bad_date_or_time() {
        assert!(parse_target("2025-12-31", "23:59", "+3").is_err());
        assert!(parse_target("32.01.2025", "23:59", "+3").is_err());
        assert!(parse_target("31.12.2025", "25:00", "+3").is_err());
    }
}
