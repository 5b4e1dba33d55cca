// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Bot configuration
//!
//! Settings are read from a TOML file; every field has a serde default so a
//! partial file (or no file at all) is fine. Environment variables override
//! whatever the file says, which is how hosted deployments configure the bot.
//!
//! # Example
//! ```toml
//! database_path = "maeve.db"
//! command_prefix = "!m "
//! debug_guilds = [693476909677412363]
//! items_per_page = 5
//! interest_upper_bound = 3
//! ```

use crate::book::normalizer::{
    NormalizerSettings, DEFAULT_INTEREST_UPPER_BOUND, MAX_AUTHOR_LEN, MAX_TITLE_LEN, MIN_READ_YEAR,
};
use crate::booklist::RenderSettings;
use crate::error::{MaeveError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    // Storage
    #[serde(default = "default_database_path")]
    pub database_path: String,

    // Chat surface
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Servers that get slash commands registered instantly; read only by the
    /// chat integration
    #[serde(default)]
    pub debug_guilds: Vec<u64>,
    #[serde(default = "default_view_timeout_secs")]
    pub view_timeout_secs: u64,

    // Booklist view
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_review_preview_len")]
    pub review_preview_len: usize,
    #[serde(default = "default_interest_glyph")]
    pub interest_glyph: String,
    #[serde(default = "default_year_suffix")]
    pub year_suffix: String,

    // Book field limits
    #[serde(default = "default_interest_upper_bound")]
    pub interest_upper_bound: i32,
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,
    #[serde(default = "default_max_author_len")]
    pub max_author_len: usize,
    #[serde(default = "default_min_read_year")]
    pub min_read_year: i32,
}

fn default_database_path() -> String {
    "maeve.db".to_string()
}

fn default_command_prefix() -> String {
    "!m ".to_string()
}

fn default_view_timeout_secs() -> u64 {
    60
}

fn default_items_per_page() -> usize {
    5
}

fn default_review_preview_len() -> usize {
    100
}

fn default_year_suffix() -> String {
    " г.".to_string()
}

fn default_interest_glyph() -> String {
    "📡".to_string()
}

fn default_interest_upper_bound() -> i32 {
    DEFAULT_INTEREST_UPPER_BOUND
}

fn default_max_title_len() -> usize {
    MAX_TITLE_LEN
}

fn default_max_author_len() -> usize {
    MAX_AUTHOR_LEN
}

fn default_min_read_year() -> i32 {
    MIN_READ_YEAR
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            command_prefix: default_command_prefix(),
            debug_guilds: Vec::new(),
            view_timeout_secs: default_view_timeout_secs(),
            items_per_page: default_items_per_page(),
            review_preview_len: default_review_preview_len(),
            interest_glyph: default_interest_glyph(),
            year_suffix: default_year_suffix(),
            interest_upper_bound: default_interest_upper_bound(),
            max_title_len: default_max_title_len(),
            max_author_len: default_max_author_len(),
            min_read_year: default_min_read_year(),
        }
    }
}

impl BotConfig {
    /// Load config from a TOML file, then apply environment overrides
    ///
    /// A missing file is not an error: defaults are used instead. A file that
    /// exists but does not parse is.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, |key| env::var(key).ok())
    }

    /// [`BotConfig::load`] with an explicit variable lookup
    pub fn load_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();

        let config = match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents)?;
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No config file at {:?}, using defaults + env vars", path);
                Self::default()
            }
            Err(e) => {
                return Err(MaeveError::FileIoError(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config = config.with_overrides_from(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from TOML text without touching the environment
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str::<BotConfig>(contents)?)
    }

    /// Apply `MAEVE_*` overrides read through `lookup`
    ///
    /// Values that do not parse are ignored and the current value is kept.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("MAEVE_DATABASE_PATH") {
            if !path.trim().is_empty() {
                self.database_path = path;
            }
        }
        if let Some(prefix) = lookup("MAEVE_COMMAND_PREFIX") {
            self.command_prefix = prefix;
        }
        if let Some(guilds) = lookup("MAEVE_DEBUG_GUILDS") {
            self.debug_guilds = guilds
                .split(',')
                .filter_map(|id| id.trim().parse().ok())
                .collect();
        }
        override_parsed(&lookup, "MAEVE_VIEW_TIMEOUT_SECS", &mut self.view_timeout_secs);
        override_parsed(&lookup, "MAEVE_ITEMS_PER_PAGE", &mut self.items_per_page);
        override_parsed(&lookup, "MAEVE_REVIEW_PREVIEW_LEN", &mut self.review_preview_len);
        override_parsed(&lookup, "MAEVE_INTEREST_UPPER_BOUND", &mut self.interest_upper_bound);
        self
    }

    /// Reject settings the booklist view or the normalizer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 {
            return Err(MaeveError::ConfigurationError(
                "items_per_page must be at least 1".to_string(),
            ));
        }
        if self.interest_upper_bound < 1 {
            return Err(MaeveError::ConfigurationError(format!(
                "interest_upper_bound must be at least 1, got {}",
                self.interest_upper_bound
            )));
        }
        if self.max_title_len == 0 || self.max_author_len == 0 {
            return Err(MaeveError::ConfigurationError(
                "title and author limits must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn normalizer_settings(&self) -> NormalizerSettings {
        NormalizerSettings {
            max_title_len: self.max_title_len,
            max_author_len: self.max_author_len,
            min_read_year: self.min_read_year,
            interest_upper_bound: self.interest_upper_bound,
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            review_preview_len: self.review_preview_len,
            interest_glyph: self.interest_glyph.clone(),
            year_suffix: self.year_suffix.clone(),
            ..RenderSettings::default()
        }
    }

    /// Page size for the booklist view; zero falls back to the default
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.items_per_page)
            .or_else(|| NonZeroUsize::new(default_items_per_page()))
            .unwrap_or(NonZeroUsize::MIN)
    }

    pub fn view_timeout(&self) -> Duration {
        Duration::from_secs(self.view_timeout_secs)
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).map(|raw| raw.trim().parse::<T>()) {
        Some(Ok(value)) => *slot = value,
        Some(Err(_)) => tracing::warn!("Ignoring unparseable {}", key),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::normalizer::LEGACY_INTEREST_UPPER_BOUND;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = BotConfig::from_toml_str("items_per_page = 7\n").unwrap();
        assert_eq!(config.items_per_page, 7);
        assert_eq!(config.command_prefix, "!m ");
        assert_eq!(config.interest_upper_bound, DEFAULT_INTEREST_UPPER_BOUND);
        assert_eq!(config.max_title_len, 300);
    }

    #[test]
    fn test_render_settings_follow_config() {
        let config = BotConfig::from_toml_str("year_suffix = \"\"\nreview_preview_len = 20\n").unwrap();
        let render = config.render_settings();
        assert_eq!(render.year_suffix, "");
        assert_eq!(render.review_preview_len, 20);
        assert_eq!(BotConfig::default().render_settings().year_suffix, " г.");
    }

    #[test]
    fn test_legacy_interest_scale_is_selectable() {
        let config = BotConfig::from_toml_str("interest_upper_bound = 5\n").unwrap();
        assert_eq!(
            config.normalizer_settings().interest_upper_bound,
            LEGACY_INTEREST_UPPER_BOUND
        );
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = BotConfig {
            items_per_page: 0,
            ..BotConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MaeveError::ConfigurationError(_))
        ));
        assert_eq!(config.page_size().get(), 5);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let result = BotConfig::from_toml_str("items_per_page = \"many\"");
        assert!(matches!(result, Err(MaeveError::TomlError(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig::load_with(dir.path().join("absent.toml"), |_| None).unwrap();
        assert_eq!(config.review_preview_len, 100);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maeve.toml");
        fs::write(&path, "items_per_page = 7\ndatabase_path = \"file.db\"\n").unwrap();

        let config = BotConfig::load_with(
            &path,
            vars(&[
                ("MAEVE_ITEMS_PER_PAGE", "3"),
                ("MAEVE_DATABASE_PATH", "env.db"),
                ("MAEVE_DEBUG_GUILDS", "1, 2,x"),
            ]),
        )
        .unwrap();

        assert_eq!(config.items_per_page, 3);
        assert_eq!(config.database_path, "env.db");
        assert_eq!(config.debug_guilds, vec![1, 2]);
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let config = BotConfig::from_toml_str("items_per_page = 7\n")
            .unwrap()
            .with_overrides_from(vars(&[
                ("MAEVE_ITEMS_PER_PAGE", "many"),
                ("MAEVE_INTEREST_UPPER_BOUND", "5"),
            ]));

        assert_eq!(config.items_per_page, 7);
        assert_eq!(config.interest_upper_bound, 5);
    }

    #[test]
    fn test_override_is_validated_by_load() {
        let dir = tempfile::tempdir().unwrap();
        let result = BotConfig::load_with(
            dir.path().join("absent.toml"),
            vars(&[("MAEVE_ITEMS_PER_PAGE", "0")]),
        );
        assert!(matches!(result, Err(MaeveError::ConfigurationError(_))));
    }
}
