use std::sync::Mutex;

use anyhow::Context as _;
use rand::seq::SliceRandom;
use time::{OffsetDateTime, UtcOffset};
use tracing::warn;

use crate::{settings::Settings, timers::TimerStore, utils::load_lines, Result};

/// Game quotes, one `text — source` line each.
#[derive(Debug)]
pub struct QuoteData {
    quotes: Vec<String>,
}

impl QuoteData {
    fn new(settings: &Settings) -> Self {
        let quotes = load_lines(&settings.data.quotes_file);
        if quotes.is_empty() {
            warn!("Quotes file {} is empty", settings.data.quotes_file);
        }
        Self { quotes }
    }

    /// Random `(text, source)` pair; the source defaults to "Unknown" when
    /// the line carries no em-dash separator.
    pub fn random(&self) -> Option<(&str, &str)> {
        let line = self.quotes.choose(&mut rand::thread_rng())?;
        Some(match line.split_once(" — ") {
            Some((text, source)) => (text.trim(), source.trim()),
            None => (line.as_str(), "Unknown"),
        })
    }
}

/// Murloc wisdom fragments: phrase = start — middle, ending.
#[derive(Debug)]
pub struct MurlocData {
    starts: Vec<String>,
    middles: Vec<String>,
    endings: Vec<String>,
}

impl MurlocData {
    fn new(settings: &Settings) -> Self {
        Self {
            starts: load_lines(&settings.data.murloc_starts_file),
            middles: load_lines(&settings.data.murloc_middles_file),
            endings: load_lines(&settings.data.murloc_endings_file),
        }
    }

    pub fn phrase(&self) -> Option<String> {
        let mut rng = rand::thread_rng();
        let a = self.starts.choose(&mut rng)?;
        let b = self.middles.choose(&mut rng)?;
        let c = self.endings.choose(&mut rng)?;
        Some(format!("{a} — {b}, {c}"))
    }
}

/// Shared state handed to every command handler and background task.
#[derive(Debug)]
pub struct CtxData {
    pub settings: Settings,
    pub timers: Mutex<TimerStore>,
    pub quotes: QuoteData,
    pub murloc: MurlocData,
    offset: UtcOffset,
}

impl CtxData {
    pub fn new(settings: Settings) -> Result<Self> {
        let offset = UtcOffset::from_hms(settings.utc_offset_hours, 0, 0)
            .context("utc_offset_hours out of range")?;
        let timers = Mutex::new(TimerStore::load(&settings.data.timers_file));
        let quotes = QuoteData::new(&settings);
        let murloc = MurlocData::new(&settings);

        Ok(Self {
            settings,
            timers,
            quotes,
            murloc,
            offset,
        })
    }

    /// Current moment in the configured display offset.
    pub fn now_local(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}
