use anyhow::{bail, Result as AnyResult};
use lazy_static::lazy_static;
use poise::serenity_prelude::Mentionable;
use regex::Regex;
use tokio::time::{sleep, Duration};

use crate::{
    utils::{COLOUR_GREEN, COLOUR_ORANGE},
    Context, Result,
};

const DEFAULT_TEXT: &str = "⏰ Time's up!";

lazy_static! {
    static ref DURATION_RE: Regex = Regex::new(r"^(?:\d+[hms])*(?:\d+)?$").unwrap();
    static ref SEGMENT_RE: Regex = Regex::new(r"(\d+)([hms]?)").unwrap();
}

/// Parse a duration like `10s`, `5m`, `2h`, `1h20m` or `90` into seconds.
/// A bare number (leading or trailing) is taken as minutes.
pub fn parse_duration(input: &str) -> AnyResult<u64> {
    let value = input.trim().to_lowercase();
    if value.is_empty() || !DURATION_RE.is_match(&value) {
        bail!("invalid duration {input:?}, expected e.g. 10s, 5m, 1h20m or 90");
    }

    let mut total: u64 = 0;
    for caps in SEGMENT_RE.captures_iter(&value) {
        let number: u64 = caps[1].parse()?;
        let seconds = match &caps[2] {
            "h" => number.checked_mul(3600),
            "m" => number.checked_mul(60),
            "s" => Some(number),
            _ => number.checked_mul(60),
        };
        total = seconds
            .and_then(|s| total.checked_add(s))
            .ok_or_else(|| anyhow::anyhow!("duration {input:?} is too large"))?;
    }

    Ok(total)
}

/// Start a simple countdown: announce, wait, announce again.
#[poise::command(prefix_command, slash_command)]
pub async fn timer(
    ctx: Context<'_>,
    #[description = "Duration, e.g. 10s, 5m, 1h20m"] duration: String,
    #[description = "Message to post when the timer ends"]
    #[rest]
    text: Option<String>,
) -> Result<()> {
    let text = text.unwrap_or_else(|| DEFAULT_TEXT.to_string());

    let total_seconds = match parse_duration(&duration) {
        Ok(seconds) => seconds,
        Err(e) => {
            ctx.say(format!("❌ Error: {e}")).await?;
            return Ok(());
        }
    };

    let author = ctx.author().mention();
    ctx.send(|reply| {
        reply.embed(|e| {
            e.title("⏱ Timer started!")
                .description(format!(
                    "{author}\nDuration: **{total_seconds} sec**\nMessage: {text}"
                ))
                .colour(COLOUR_ORANGE)
        })
    })
    .await?;

    // No cancellation: once started, the countdown runs to the end.
    sleep(Duration::from_secs(total_seconds)).await;

    ctx.channel_id()
        .send_message(ctx, |message| {
            message.embed(|e| {
                e.title("⏰ Timer finished!")
                    .description(format!("{author}\n{text}"))
                    .colour(COLOUR_GREEN)
            })
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_is_minutes() {
        assert_eq!(parse_duration("90").unwrap(), 5400);
        assert_eq!(parse_duration("1").unwrap(), 60);
    }

    #[test]
    fn single_units() {
        assert_eq!(parse_duration("10s").unwrap(), 10);
        assert_eq!(parse_duration("5m").unwrap(), 300);
        assert_eq!(parse_duration("2h").unwrap(), 7200);
    }

    #[test]
    fn mixed_units() {
        assert_eq!(parse_duration("1h20m").unwrap(), 4800);
        assert_eq!(parse_duration("2h5m30s").unwrap(), 7530);
    }

    #[test]
    fn trailing_bare_number_is_minutes() {
        assert_eq!(parse_duration("1h20").unwrap(), 4800);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("ten minutes").is_err());
    }

    #[test]
    fn oversized_durations_are_rejected() {
        assert!(parse_duration("6000000000000000000h").is_err());
        assert!(parse_duration("18446744073709551615s1s").is_err());
        // Largest representable second count still parses.
        assert_eq!(
            parse_duration("18446744073709551615s").unwrap(),
            u64::MAX
        );
    }
}
