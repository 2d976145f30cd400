// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::converter::{Converter, PayloadEncoding};
use crate::grid::GridSchema;
use crate::model::adapter::ExportOptions;
use crate::model::item::TermAnchor;
use anyhow::{Context, Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_anchor_week() -> u32 {
    8
}
fn default_anchor_date() -> NaiveDate {
    // Week 8 of the 2024/25 term starts on Monday 23 September 2024.
    NaiveDate::from_ymd_opt(2024, 9, 23).unwrap_or_default()
}

fn default_location_prefix() -> String {
    "Location: ".to_string()
}
fn default_label_selector() -> String {
    "span.labelone".to_string()
}
fn default_table_selector() -> String {
    "table.spreadsheet".to_string()
}

fn default_calendar_name() -> Option<String> {
    Some("Timetable".to_string())
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_anchor_week")]
    pub anchor_week: u32,
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate, // Format "YYYY-MM-DD"

    #[serde(default = "default_location_prefix")]
    pub location_prefix: String,
    #[serde(default = "default_label_selector")]
    pub day_label_selector: String,
    #[serde(default = "default_table_selector")]
    pub table_selector: String,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub payload_encoding: PayloadEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anchor_week: default_anchor_week(),
            anchor_date: default_anchor_date(),
            location_prefix: default_location_prefix(),
            day_label_selector: default_label_selector(),
            table_selector: default_table_selector(),
            calendar_name: default_calendar_name(),
            timezone: None,
            payload_encoding: PayloadEncoding::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can fall back to defaults.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
        Ok(())
    }

    pub fn term_anchor(&self) -> Result<TermAnchor> {
        Ok(TermAnchor::new(self.anchor_week, self.anchor_date)?)
    }

    pub fn grid_schema(&self) -> GridSchema {
        GridSchema {
            label_selector: self.day_label_selector.clone(),
            table_selector: self.table_selector.clone(),
            location_prefix: self.location_prefix.clone(),
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            calendar_name: self.calendar_name.clone(),
            timezone: self.timezone.clone(),
        }
    }

    /// Builds a converter for one run from this configuration.
    pub fn converter(&self) -> Result<Converter> {
        Ok(Converter::new(self.term_anchor()?)
            .with_schema(self.grid_schema())
            .with_export_options(self.export_options())
            .with_encoding(self.payload_encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_partial_file_uses_defaults() {
        let cfg: Config = toml::from_str("anchor_week = 1\nanchor_date = \"2025-01-06\"\n").unwrap();
        assert_eq!(cfg.anchor_week, 1);
        assert_eq!(cfg.anchor_date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(cfg.location_prefix, "Location: ");
        assert_eq!(cfg.payload_encoding, PayloadEncoding::Plain);
        assert_eq!(cfg.calendar_name.as_deref(), Some("Timetable"));
    }

    #[test]
    fn test_save_then_load() {
        let ctx = TestContext::new();
        let cfg = Config {
            timezone: Some("Europe/London".to_string()),
            payload_encoding: PayloadEncoding::Base64,
            ..Config::default()
        };
        cfg.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), cfg);
    }

    #[test]
    fn test_missing_file_is_detected() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_zero_anchor_week_is_rejected() {
        let cfg = Config {
            anchor_week: 0,
            ..Config::default()
        };
        assert!(cfg.term_anchor().is_err());
        assert!(cfg.converter().is_err());
    }
}
