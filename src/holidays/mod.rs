use std::{fs, path::Path};

use anyhow::{anyhow, Context as _};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use time::{Date, Duration, Month};
use tracing::warn;

use crate::{
    models::holiday::{HolidayEntry, ResolvedHoliday},
    Result,
};

pub mod flags;

/// Source tag attached to computed (non-file) holidays.
pub const DYNAMIC_SOURCE: &str = "dynamic";

lazy_static! {
    static ref MMDD_RE: Regex = Regex::new(r"^(\d{2})-(\d{2})$").unwrap();
}

/// Parse a year-agnostic "MM-DD" date.
pub fn parse_mmdd(value: &str) -> Result<(u8, u8)> {
    let caps = MMDD_RE
        .captures(value.trim())
        .ok_or_else(|| anyhow!("bad MM-DD date: {value:?}"))?;
    Ok((caps[1].parse()?, caps[2].parse()?))
}

/// Map "MM-DD" to its next occurrence: this year if not yet past, otherwise
/// next year.
pub fn resolve_occurrence(month: u8, day: u8, today: Date) -> Result<Date> {
    let date = Date::from_calendar_date(today.year(), Month::try_from(month)?, day)?;
    if date < today {
        Ok(date.replace_year(today.year() + 1)?)
    } else {
        Ok(date)
    }
}

/// Western (Gregorian) Easter for `year`, via the standard congruence
/// algorithm. Always lands in March or April.
pub fn easter_western(year: i32) -> Result<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    Ok(Date::from_calendar_date(
        year,
        Month::try_from(month as u8)?,
        day as u8,
    )?)
}

/// Orthodox Easter approximated as Western Easter plus the 13-day Julian
/// calendar offset. Close enough for a chat bot, not an ecclesiastical
/// computation.
pub fn easter_orthodox(year: i32) -> Result<Date> {
    Ok(easter_western(year)? + Duration::days(13))
}

fn dynamic_entry(name: &str, tradition: &str, occurrence: Date) -> ResolvedHoliday {
    ResolvedHoliday {
        date: format!("{:02}-{:02}", occurrence.month() as u8, occurrence.day()),
        name: name.to_string(),
        countries: vec![tradition.to_string()],
        categories: vec!["Religious".to_string()],
        source: DYNAMIC_SOURCE.to_string(),
        occurrence,
    }
}

/// Next occurrences of the computed holidays (both Easters). If both have
/// already passed this year, the whole set shifts to next year.
pub fn dynamic_holidays(today: Date) -> Result<Vec<ResolvedHoliday>> {
    let mut year = today.year();
    let mut catholic = easter_western(year)?;
    let mut orthodox = easter_orthodox(year)?;

    if catholic.max(orthodox) < today {
        year += 1;
        catholic = easter_western(year)?;
        orthodox = easter_orthodox(year)?;
    }

    Ok(vec![
        dynamic_entry("Catholic Easter", "catholic", catholic),
        dynamic_entry("Orthodox Easter", "orthodox", orthodox),
    ])
}

fn resolve_entry(entry: HolidayEntry, source: &str, today: Date) -> Result<ResolvedHoliday> {
    let (month, day) = parse_mmdd(&entry.date)?;
    let occurrence = resolve_occurrence(month, day, today)?;

    Ok(ResolvedHoliday {
        date: entry.date,
        name: entry.name,
        countries: entry.countries.into_vec(),
        categories: entry.categories.into_vec(),
        source: source.to_string(),
        occurrence,
    })
}

/// Load every `*.json` file under `dir` and resolve each entry against
/// `today`. Unparseable entries are skipped with a warning.
pub fn load_static_holidays(dir: impl AsRef<Path>, today: Date) -> Result<Vec<ResolvedHoliday>> {
    let dir = dir.as_ref();
    let mut files: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("holidays directory {} not found", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut holidays = Vec::new();
    for path in files {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let entries: Vec<HolidayEntry> = serde_json::from_str(&content)
            .with_context(|| format!("invalid holiday file {}", path.display()))?;

        for entry in entries {
            match resolve_entry(entry, &source, today) {
                Ok(resolved) => holidays.push(resolved),
                Err(e) => warn!("Skipping holiday entry in {source}: {e}"),
            }
        }
    }

    Ok(holidays)
}

/// Static plus dynamic holidays, ordered by next occurrence.
pub fn load_all_holidays(dir: impl AsRef<Path>, today: Date) -> Result<Vec<ResolvedHoliday>> {
    let mut holidays = load_static_holidays(dir, today)?;
    holidays.extend(dynamic_holidays(today)?);

    Ok(holidays
        .into_iter()
        .sorted_by_key(|h| h.occurrence)
        .collect())
}

/// Holidays whose next occurrence is exactly `today`.
pub fn holidays_on(holidays: &[ResolvedHoliday], today: Date) -> Vec<&ResolvedHoliday> {
    holidays.iter().filter(|h| h.occurrence == today).collect()
}

/// Nearest upcoming holiday for one source file; entries are pre-sorted by
/// occurrence, so the first match wins.
pub fn next_for_source<'a>(
    holidays: &'a [ResolvedHoliday],
    source: &str,
) -> Option<&'a ResolvedHoliday> {
    holidays.iter().find(|h| h.source == source)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn passed_date_shifts_to_next_year() {
        let today = date!(2025 - 06 - 15);
        assert_eq!(
            resolve_occurrence(1, 1, today).unwrap(),
            date!(2026 - 01 - 01)
        );
    }

    #[test]
    fn upcoming_date_stays_in_current_year() {
        let today = date!(2025 - 06 - 15);
        assert_eq!(
            resolve_occurrence(12, 31, today).unwrap(),
            date!(2025 - 12 - 31)
        );
        // Today itself counts as upcoming.
        assert_eq!(
            resolve_occurrence(6, 15, today).unwrap(),
            date!(2025 - 06 - 15)
        );
    }

    #[test]
    fn western_easter_2024() {
        assert_eq!(easter_western(2024).unwrap(), date!(2024 - 03 - 31));
    }

    #[test]
    fn orthodox_easter_2024_rolls_into_april() {
        assert_eq!(easter_orthodox(2024).unwrap(), date!(2024 - 04 - 13));
    }

    #[test]
    fn dynamic_holidays_shift_past_year() {
        // Both Easters of 2024 are over by June.
        let list = dynamic_holidays(date!(2024 - 06 - 01)).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|h| h.occurrence.year() == 2025));

        // Between the two Easters, the orthodox one is still upcoming.
        let list = dynamic_holidays(date!(2024 - 04 - 05)).unwrap();
        assert_eq!(list[0].occurrence, date!(2024 - 03 - 31));
        assert_eq!(list[1].occurrence, date!(2024 - 04 - 13));
    }

    #[test]
    fn bad_mmdd_is_rejected() {
        assert!(parse_mmdd("13").is_err());
        assert!(parse_mmdd("2024-01-01").is_err());
        assert!(parse_mmdd("1-1").is_err());
    }
}
