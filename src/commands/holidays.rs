use itertools::Itertools;
use tracing::warn;

use crate::{
    holidays::{flags, load_all_holidays, next_for_source, DYNAMIC_SOURCE},
    models::holiday::ResolvedHoliday,
    Context, Result,
};

const EMBED_COLOUR: u32 = 0x00AEEF;

fn holiday_field(holiday: &ResolvedHoliday) -> String {
    let flag = flags::country_flag(&holiday.countries);
    let date_line = format!(
        "📅 {:02}-{:02}",
        holiday.occurrence.month() as u8,
        holiday.occurrence.day()
    );
    match flags::category_line(&holiday.categories) {
        Some(category) => format!("{flag} **{}**\n{category}\n{date_line}", holiday.name),
        None => format!("{flag} **{}**\n{date_line}", holiday.name),
    }
}

/// Show the nearest upcoming holiday for each data source.
#[poise::command(prefix_command, slash_command, aliases("holiday", "holydays"))]
pub async fn holidays(ctx: Context<'_>) -> Result<()> {
    let today = ctx.data().now_local().date();
    let dir = &ctx.data().settings.data.holidays_dir;

    let all = match load_all_holidays(dir, today) {
        Ok(all) => all,
        Err(e) => {
            warn!("Failed to load holidays from {dir:?}: {e:#}");
            let reply = if std::path::Path::new(dir).is_dir() {
                format!("❌ Error: could not read holiday data: {e}")
            } else {
                "❌ Error: holidays folder not found on server.".to_string()
            };
            ctx.say(reply).await?;
            return Ok(());
        }
    };

    // Dynamic holidays first, then the data files alphabetically.
    let mut sources = vec![DYNAMIC_SOURCE.to_string()];
    sources.extend(
        all.iter()
            .map(|h| h.source.clone())
            .filter(|s| s != DYNAMIC_SOURCE)
            .unique()
            .sorted_by_key(|s| s.to_lowercase()),
    );

    let fields: Vec<(String, String)> = sources
        .into_iter()
        .map(|source| {
            let value = next_for_source(&all, &source)
                .map(holiday_field)
                .unwrap_or_else(|| "❌ No upcoming holidays".to_string());
            (format!("📁 {source}"), value)
        })
        .collect();

    ctx.send(|reply| {
        reply.embed(|e| {
            e.title("📅 Nearest Holidays by Source").colour(EMBED_COLOUR);
            e.fields(fields.into_iter().map(|(name, value)| (name, value, false)))
        })
    })
    .await?;

    Ok(())
}
