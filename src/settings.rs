use crate::config::LifeConfig;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Contents of `config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub life: LifeSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct LifeSettings {
    pub tick: Option<f32>,    // Seconds between generations
    pub density: Option<u32>, // 1-in-N chance of starting alive
    pub seed: Option<u64>,
}

impl Settings {
    /// Load from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`; a missing or broken file falls back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termlife")
            .join("config.toml")
    }

    /// Overlay file values onto `base`, dropping values that make no sense
    pub fn apply(&self, mut base: LifeConfig) -> LifeConfig {
        if let Some(tick) = self.life.tick {
            match Duration::try_from_secs_f32(tick) {
                Ok(tick) if !tick.is_zero() => base.tick = tick,
                _ => warn!("ignoring tick = {} in config", tick),
            }
        }
        match self.life.density {
            Some(0) => warn!("ignoring density = 0 in config"),
            Some(density) => base.density = density,
            None => {}
        }
        if self.life.seed.is_some() {
            base.seed = self.life.seed;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.apply(LifeConfig::default()), LifeConfig::default());
    }

    #[test]
    fn life_table_overrides() {
        let settings = Settings::parse("[life]\ntick = 0.25\ndensity = 3\nseed = 99\n").unwrap();
        let config = settings.apply(LifeConfig::default());
        assert_eq!(config.tick, Duration::from_millis(250));
        assert_eq!(config.density, 3);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn nonsense_values_are_ignored() {
        let settings = Settings::parse("[life]\ntick = -1.0\ndensity = 0\n").unwrap();
        assert_eq!(settings.apply(LifeConfig::default()), LifeConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Settings::parse("[life\ntick = ").is_err());
    }

    #[test_log::test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/termlife/config.toml"));
        assert!(settings.life.tick.is_none());
        assert!(settings.life.density.is_none());
    }

    #[test_log::test]
    fn unreadable_file_gives_defaults() {
        // A directory exists but cannot be read as a file.
        let settings = Settings::load_from(&std::env::temp_dir());
        assert!(settings.life.seed.is_none());
    }
}
