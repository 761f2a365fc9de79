use std::env;

use config::{Config, ConfigError, Environment, File};
use glob::glob;
use serde_derive::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize, Clone)]
pub struct DataFiles {
    #[serde(default = "default_quotes_file")]
    pub quotes_file: String,
    #[serde(default = "default_murloc_starts_file")]
    pub murloc_starts_file: String,
    #[serde(default = "default_murloc_middles_file")]
    pub murloc_middles_file: String,
    #[serde(default = "default_murloc_endings_file")]
    pub murloc_endings_file: String,
    #[serde(default = "default_holidays_dir")]
    pub holidays_dir: String,
    #[serde(default = "default_events_file")]
    pub events_file: String,
    #[serde(default = "default_timers_file")]
    pub timers_file: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            quotes_file: default_quotes_file(),
            murloc_starts_file: default_murloc_starts_file(),
            murloc_middles_file: default_murloc_middles_file(),
            murloc_endings_file: default_murloc_endings_file(),
            holidays_dir: default_holidays_dir(),
            events_file: default_events_file(),
            timers_file: default_timers_file(),
        }
    }
}

/// Destination channels for the daily jobs; empty lists disable sending
/// without disabling the job itself.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DailyChannels {
    #[serde(default)]
    pub quote: Vec<u64>,
    #[serde(default)]
    pub holidays: Vec<u64>,
    #[serde(default)]
    pub events: Vec<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Features {
    #[serde(default = "default_true")]
    pub timers: bool,
    #[serde(default = "default_true")]
    pub daily_quote: bool,
    #[serde(default = "default_true")]
    pub daily_holidays: bool,
    #[serde(default = "default_true")]
    pub daily_events: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            timers: true,
            daily_quote: true,
            daily_holidays: true,
            daily_events: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub discord_token: String,
    /// Wall-clock offset used by the daily jobs and default timer display.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i8,
    #[serde(default)]
    pub data: DataFiles,
    #[serde(default)]
    pub daily_channels: DailyChannels,
    #[serde(default)]
    pub features: Features,
}

fn default_quotes_file() -> String {
    "data/quotes.txt".into()
}

fn default_murloc_starts_file() -> String {
    "data/murloc_starts.txt".into()
}

fn default_murloc_middles_file() -> String {
    "data/murloc_middles.txt".into()
}

fn default_murloc_endings_file() -> String {
    "data/murloc_endings.txt".into()
}

fn default_holidays_dir() -> String {
    "data/holidays".into()
}

fn default_events_file() -> String {
    "data/events.json".into()
}

fn default_timers_file() -> String {
    "timers.json".into()
}

fn default_utc_offset() -> i8 {
    3
}

fn default_true() -> bool {
    true
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let cwd = match env::current_dir() {
            Ok(cwd) => cwd.display().to_string(),
            Err(_) => ".".to_string(),
        };

        debug!(
            "Looking for configuration file {cwd}/config and/or configuration files in {cwd}{}",
            "/config/"
        );

        let config = Config::builder()
            .add_source(File::with_name(&format!("{cwd}/config")).required(false))
            .add_source(
                glob(&format!("{cwd}/config/*"))
                    .map_err(|e| ConfigError::Message(e.to_string()))?
                    .filter_map(|path| path.ok())
                    .map(File::from)
                    .collect::<Vec<_>>(),
            )
            .add_source(Environment::with_prefix("MRBT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
