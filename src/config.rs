//! Configuration loader plus strongly typed settings structures.
//!
//! Deserializes the TOML config we ship, extracts the embedded defaults
//! (config, tips, destination catalogue) into the data directory on first
//! run, and loads the tips and destinations the screen works with.

use crate::data::{Destination, GuestLimits, TipItem, TipsFile};
use crate::widgets::{date_range, destination_search, tip_rotator, RotationTiming};
use anyhow::{bail, Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration files at compile time
const DEFAULT_TIPS: &str = include_str!("../defaults/tips.toml");

// Embed entire directory - automatically includes all files
static DEFAULTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults");

const DATA_DIR_ENV: &str = "BOOKING_TUI_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub tips: TipsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(skip)] // Set at runtime from --data-dir / BOOKING_TUI_DIR
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub show_tips: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
            show_tips: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipsConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    /// Custom tips file; relative paths resolve against the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            fade_ms: default_fade_ms(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_nights")]
    pub default_nights: u32,
    #[serde(default = "default_max_nights")]
    pub max_nights: u32,
    #[serde(flatten)]
    pub guests: GuestLimits,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            default_nights: default_nights(),
            max_nights: default_max_nights(),
            guests: GuestLimits::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_poll_timeout_ms() -> u64 {
    16
}

fn default_interval_ms() -> u64 {
    tip_rotator::DEFAULT_INTERVAL_MS
}

fn default_fade_ms() -> u64 {
    tip_rotator::DEFAULT_FADE_MS
}

fn default_max_suggestions() -> usize {
    destination_search::DEFAULT_MAX_SUGGESTIONS
}

fn default_nights() -> u32 {
    date_range::DEFAULT_NIGHTS
}

fn default_max_nights() -> u32 {
    date_range::DEFAULT_MAX_NIGHTS
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Config {
    /// Load config for a run.
    ///
    /// `data_dir` overrides BOOKING_TUI_DIR and ~/.booking-tui. Defaults are
    /// extracted there first (only missing files are written). `config_path`
    /// overrides `<data_dir>/config.toml`. Call `validate()` once CLI
    /// overrides are applied.
    pub fn load_with_options(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::base_dir()?,
        };

        // Extract defaults on first run (idempotent - only creates missing files)
        Self::extract_defaults(&data_dir)?;

        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = Self::load_from_path(&config_path)?;
        config.data_dir = data_dir;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Reject settings the pickers cannot work with
    pub fn validate(&self) -> Result<()> {
        self.rotation_timing()?;
        if self.search.default_nights == 0 || self.search.default_nights > self.search.max_nights {
            bail!(
                "[search] default_nights must be between 1 and max_nights ({}), got {}",
                self.search.max_nights,
                self.search.default_nights
            );
        }
        let limits = &self.search.guests;
        if limits.max_adults == 0 || limits.max_rooms == 0 {
            bail!("[search] max_adults and max_rooms must be at least 1");
        }
        if self.search.max_suggestions == 0 {
            bail!("[search] max_suggestions must be at least 1");
        }
        Ok(())
    }

    pub fn rotation_timing(&self) -> Result<RotationTiming> {
        RotationTiming::new(self.tips.interval_ms, self.tips.fade_ms)
            .context("Invalid [tips] timing")
    }

    /// Base data directory (~/.booking-tui)
    /// Can be overridden with BOOKING_TUI_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".booking-tui"))
    }

    /// Extract default files into `dir`:
    /// - config.toml
    /// - tips.toml
    /// - destinations.json
    fn extract_defaults(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).context(format!("Failed to create data directory {:?}", dir))?;

        for file in DEFAULTS_DIR.files() {
            let filename = file
                .path()
                .file_name()
                .and_then(|n| n.to_str())
                .context("Invalid default filename")?;
            let target = dir.join(filename);

            if !target.exists() {
                fs::write(&target, file.contents())
                    .context(format!("Failed to write {}", filename))?;
                tracing::info!("Extracted {} to {:?}", filename, target);
            }
        }

        Ok(())
    }

    /// Path of the tips file in use
    pub fn tips_path(&self) -> PathBuf {
        match self.tips.file {
            Some(ref file) if file.is_absolute() => file.clone(),
            Some(ref file) => self.data_dir.join(file),
            None => self.data_dir.join("tips.toml"),
        }
    }

    pub fn load_tips(&self) -> Result<Vec<TipItem>> {
        load_tips_file(&self.tips_path())
    }

    pub fn load_destinations(&self) -> Result<Vec<Destination>> {
        let path = self.data_dir.join("destinations.json");
        let contents = fs::read_to_string(&path)
            .context(format!("Failed to read destinations file: {:?}", path))?;
        let destinations: Vec<Destination> = serde_json::from_str(&contents)
            .context(format!("Failed to parse destinations file: {:?}", path))?;
        tracing::debug!("Loaded {} destinations from {:?}", destinations.len(), path);
        Ok(destinations)
    }
}

/// Load a `[[tips]]` file. An empty list is an error: the rotator needs at least one tip.
pub fn load_tips_file(path: &Path) -> Result<Vec<TipItem>> {
    let contents =
        fs::read_to_string(path).context(format!("Failed to read tips file: {:?}", path))?;
    parse_tips(&contents).context(format!("Invalid tips file: {:?}", path))
}

pub fn parse_tips(contents: &str) -> Result<Vec<TipItem>> {
    let file: TipsFile = toml::from_str(contents).context("Failed to parse tips")?;
    if file.tips.is_empty() {
        bail!("no [[tips]] entries");
    }
    for (i, tip) in file.tips.iter().enumerate() {
        if tip.category.trim().is_empty() || tip.text.trim().is_empty() {
            bail!("tip #{} has an empty category or text", i + 1);
        }
    }
    Ok(file.tips)
}

/// Tips compiled into the binary
pub fn embedded_tips() -> Result<Vec<TipItem>> {
    parse_tips(DEFAULT_TIPS)
}
