//! TOML configuration for scripted sessions.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use quarantine_arcade_system_combo::Config as ComboConfig;
use quarantine_arcade_system_session::Config as SessionConfig;
use serde::Deserialize;

/// Top-level configuration file layout.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ArcadeConfig {
    /// Phase lengths for the session controller.
    pub(crate) session: SessionSection,
    /// Scripted player behaviour.
    pub(crate) script: ScriptSection,
}

/// `[session]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionSection {
    pub(crate) countdown_secs: f64,
    pub(crate) session_secs: f64,
    pub(crate) combo_window_secs: f64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            countdown_secs: 3.0,
            session_secs: 60.0,
            combo_window_secs: 3.0,
        }
    }
}

/// `[script]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ScriptSection {
    pub(crate) tick_ms: u64,
    pub(crate) elimination_interval_ms: u64,
    pub(crate) eliminations: u32,
    pub(crate) powerup_every: Option<u32>,
    pub(crate) pause_after_secs: Option<f64>,
    pub(crate) pause_secs: f64,
}

impl Default for ScriptSection {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            elimination_interval_ms: 800,
            eliminations: 12,
            powerup_every: None,
            pause_after_secs: None,
            pause_secs: 0.0,
        }
    }
}

impl ArcadeConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Parses configuration from TOML text.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse arcade config toml contents")
    }

    /// Validates the `[session]` table and builds the controller configuration.
    pub(crate) fn session_config(&self) -> Result<SessionConfig> {
        let countdown = seconds("session.countdown_secs", self.session.countdown_secs)?;
        let session_length = seconds("session.session_secs", self.session.session_secs)?;
        if session_length.is_zero() {
            bail!("`session.session_secs` must be greater than zero");
        }
        let window = seconds("session.combo_window_secs", self.session.combo_window_secs)?;
        if window.is_zero() {
            bail!("`session.combo_window_secs` must be greater than zero");
        }

        Ok(SessionConfig::new(
            countdown,
            session_length,
            ComboConfig::new(window),
        ))
    }
}

impl ScriptSection {
    /// Host tick length.
    pub(crate) fn tick(&self) -> Result<Duration> {
        if self.tick_ms == 0 {
            bail!("`script.tick_ms` must be greater than zero");
        }
        Ok(Duration::from_millis(self.tick_ms))
    }

    /// Scripted time between eliminations.
    pub(crate) fn elimination_interval(&self) -> Duration {
        Duration::from_millis(self.elimination_interval_ms)
    }

    /// Window of host time during which the script holds the game paused.
    pub(crate) fn pause_window(&self) -> Result<Option<(Duration, Duration)>> {
        let Some(after) = self.pause_after_secs else {
            return Ok(None);
        };
        let start = seconds("script.pause_after_secs", after)?;
        let length = seconds("script.pause_secs", self.pause_secs)?;
        let Some(end) = start.checked_add(length) else {
            bail!("`script.pause_secs` pushes the pause window past the representable range");
        };
        Ok(Some((start, end)))
    }
}

fn seconds(field: &str, value: f64) -> Result<Duration> {
    if !value.is_finite() || value < 0.0 {
        bail!("`{field}` must be a non-negative number of seconds, got {value}");
    }
    Duration::try_from_secs_f64(value)
        .with_context(|| format!("`{field}` is too large, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ArcadeConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, ArcadeConfig::default());

        let session = config.session_config().expect("default session");
        assert_eq!(session.countdown(), Duration::from_secs(3));
        assert_eq!(session.session_length(), Duration::from_secs(60));
        assert_eq!(session.combo().window(), Duration::from_secs(3));
    }

    #[test]
    fn partial_tables_fill_remaining_fields() {
        let config = ArcadeConfig::from_toml_str(
            r#"
            [session]
            session_secs = 10.5

            [script]
            eliminations = 4
            pause_after_secs = 5.0
            pause_secs = 2.0
            "#,
        )
        .expect("partial config");

        assert_eq!(config.session.countdown_secs, 3.0);
        assert_eq!(config.script.tick_ms, 100);
        assert_eq!(config.script.eliminations, 4);

        let session = config.session_config().expect("session config");
        assert_eq!(session.session_length(), Duration::from_millis(10_500));
        assert_eq!(
            config.script.pause_window().expect("pause window"),
            Some((Duration::from_secs(5), Duration::from_secs(7)))
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(ArcadeConfig::from_toml_str("[session]\nround_secs = 5.0").is_err());
    }

    #[test]
    fn rejects_negative_and_zero_lengths() {
        let negative = ArcadeConfig::from_toml_str("[session]\ncountdown_secs = -1.0")
            .expect("parses");
        let error = negative.session_config().expect_err("negative countdown");
        assert!(error.to_string().contains("session.countdown_secs"));

        let zero = ArcadeConfig::from_toml_str("[session]\nsession_secs = 0.0").expect("parses");
        assert!(zero.session_config().is_err());

        let script = ScriptSection {
            tick_ms: 0,
            ..ScriptSection::default()
        };
        assert!(script.tick().is_err());
    }

    #[test]
    fn rejects_zero_combo_window() {
        let config = ArcadeConfig::from_toml_str("[session]\ncombo_window_secs = 0.0")
            .expect("parses");
        let error = config.session_config().expect_err("zero combo window");
        assert!(error.to_string().contains("session.combo_window_secs"));
    }

    #[test]
    fn rejects_lengths_beyond_duration_range() {
        let huge = ArcadeConfig::from_toml_str("[session]\nsession_secs = 1e30").expect("parses");
        let error = huge.session_config().expect_err("oversized session");
        assert!(error.to_string().contains("session.session_secs"));

        let script = ScriptSection {
            pause_after_secs: Some(1.8e19),
            pause_secs: 1.8e19,
            ..ScriptSection::default()
        };
        let error = script.pause_window().expect_err("overflowing pause window");
        assert!(error.to_string().contains("script.pause_secs"));
    }
}
