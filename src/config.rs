//! Page-supplied configuration.
//!
//! The embedding page passes JSON to the constructor or drops it into a
//! `<script type="application/json" id="fx-config">` element. Every field is
//! optional.

use log::LevelFilter;
use serde::Deserialize;

use crate::content;
use crate::decor::SpawnSpec;
use crate::error::Result;
use crate::scroll::NavbarConfig;
use crate::typing::TypingTimings;

/// Id of the inline JSON config element.
pub const CONFIG_ELEMENT_ID: &str = "fx-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    #[serde(flatten)]
    pub timings: TypingTimings,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: content::TITLES.iter().map(|s| s.to_string()).collect(),
            timings: TypingTimings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatEntry {
    pub label: String,
    pub percentage: f64,
}

impl StatEntry {
    pub fn clamped(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnConfig {
    pub matrix_rain: SpawnSpec,
    pub binary_rain: SpawnSpec,
    pub tech_particles: SpawnSpec,
    pub light_particles: SpawnSpec,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            matrix_rain: SpawnSpec::new(300, 12_000, 8.0, 4.0, 5.0),
            binary_rain: SpawnSpec::new(2000, 25_000, 15.0, 10.0, 10.0),
            tech_particles: SpawnSpec::new(600, 15_000, 8.0, 6.0, 2.0),
            light_particles: SpawnSpec::new(500, 12_000, 8.0, 4.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FxConfig {
    pub typing: TypingConfig,
    pub stats: Vec<StatEntry>,
    pub navbar: NavbarConfig,
    pub spawn: SpawnConfig,
    pub log_level: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            typing: TypingConfig::default(),
            stats: content::STATS
                .iter()
                .map(|&(label, percentage)| StatEntry {
                    label: label.to_owned(),
                    percentage,
                })
                .collect(),
            navbar: NavbarConfig::default(),
            spawn: SpawnConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl FxConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
