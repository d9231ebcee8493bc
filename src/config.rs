//! # Configuration
//!
//! Kitchen settings loaded from TOML. Every section is optional and falls back to
//! the defaults below, so an empty file is a valid configuration.
//!
//! ```toml
//! mailbox_size = 64
//!
//! [shelves.hot]
//! capacity = 10
//! decay_modifier = 1.0
//!
//! [shelves.overflow]
//! capacity = 15
//! decay_modifier = 2.0
//!
//! [dispatch]
//! min_delay_ms = 2000
//! max_delay_ms = 6000
//! seed = 7
//!
//! [ingestion]
//! orders_per_second = 2.0
//!
//! [sweep]
//! interval_ms = 1000
//! ```

use crate::model::ShelfKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a [`KitchenConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid decay modifier for {shelf} shelf: {value}")]
    InvalidDecayModifier { shelf: ShelfKind, value: f64 },

    #[error("Overflow decay modifier {overflow} must exceed the {shelf} shelf's {home}")]
    OverflowModifierTooLow {
        shelf: ShelfKind,
        home: f64,
        overflow: f64,
    },

    #[error("Courier delay range is empty: min {min_ms}ms > max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    #[error("Ingestion rate must be positive: {0}")]
    InvalidIngestionRate(f64),

    #[error("Sweep interval must be positive")]
    InvalidSweepInterval,

    #[error("Mailbox size must be positive")]
    InvalidMailboxSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShelfConfig {
    pub capacity: usize,
    pub decay_modifier: f64,
}

impl ShelfConfig {
    pub fn new(capacity: usize, decay_modifier: f64) -> Self {
        Self {
            capacity,
            decay_modifier,
        }
    }
}

/// Capacity and decay modifier of each shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelvesConfig {
    pub hot: ShelfConfig,
    pub cold: ShelfConfig,
    pub frozen: ShelfConfig,
    pub overflow: ShelfConfig,
}

impl Default for ShelvesConfig {
    fn default() -> Self {
        Self {
            hot: ShelfConfig::new(10, 1.0),
            cold: ShelfConfig::new(10, 1.0),
            frozen: ShelfConfig::new(10, 1.0),
            overflow: ShelfConfig::new(15, 2.0),
        }
    }
}

impl ShelvesConfig {
    pub fn get(&self, kind: ShelfKind) -> &ShelfConfig {
        match kind {
            ShelfKind::Hot => &self.hot,
            ShelfKind::Cold => &self.cold,
            ShelfKind::Frozen => &self.frozen,
            ShelfKind::Overflow => &self.overflow,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ShelfKind::ALL {
            let value = self.get(kind).decay_modifier;
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDecayModifier { shelf: kind, value });
            }
        }
        let overflow = self.overflow.decay_modifier;
        for kind in [ShelfKind::Hot, ShelfKind::Cold, ShelfKind::Frozen] {
            let home = self.get(kind).decay_modifier;
            if overflow <= home {
                return Err(ConfigError::OverflowModifierTooLow {
                    shelf: kind,
                    home,
                    overflow,
                });
            }
        }
        Ok(())
    }
}

/// Courier arrival delays, drawn uniformly from `[min_delay_ms, max_delay_ms]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Fixes the delay sequence for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 2_000,
            max_delay_ms: 6_000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    pub orders_per_second: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            orders_per_second: 2.0,
        }
    }
}

impl IngestionConfig {
    /// Pause between consecutive orders, or `None` when the rate does not give a
    /// representable positive pause.
    pub fn try_interval(&self) -> Option<Duration> {
        let rate = self.orders_per_second;
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(1.0 / rate).ok()
    }

    /// Pause between consecutive orders. Saturates at `Duration::MAX` for rates
    /// that [`KitchenConfig::validate`] rejects.
    pub fn interval(&self) -> Duration {
        self.try_interval().unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub interval_ms: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { interval_ms: 1_000 }
    }
}

impl SweepConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    pub shelves: ShelvesConfig,
    pub dispatch: DispatchConfig,
    pub ingestion: IngestionConfig,
    pub sweep: SweepConfig,
    /// Capacity of the kitchen actor's request channel.
    pub mailbox_size: usize,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            shelves: ShelvesConfig::default(),
            dispatch: DispatchConfig::default(),
            ingestion: IngestionConfig::default(),
            sweep: SweepConfig::default(),
            mailbox_size: 64,
        }
    }
}

impl KitchenConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: KitchenConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shelves.validate()?;
        if self.dispatch.min_delay_ms > self.dispatch.max_delay_ms {
            return Err(ConfigError::InvalidDelayRange {
                min_ms: self.dispatch.min_delay_ms,
                max_ms: self.dispatch.max_delay_ms,
            });
        }
        if self.ingestion.try_interval().is_none() {
            return Err(ConfigError::InvalidIngestionRate(
                self.ingestion.orders_per_second,
            ));
        }
        if self.sweep.interval_ms == 0 {
            return Err(ConfigError::InvalidSweepInterval);
        }
        if self.mailbox_size == 0 {
            return Err(ConfigError::InvalidMailboxSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = KitchenConfig::from_toml_str("").unwrap();
        assert_eq!(config, KitchenConfig::default());
        assert_eq!(config.shelves.overflow.capacity, 15);
        assert_eq!(config.ingestion.interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_config_overrides() {
        let toml = r#"
            [shelves.hot]
            capacity = 1
            decay_modifier = 1.0

            [shelves.overflow]
            capacity = 0
            decay_modifier = 3.0

            [dispatch]
            min_delay_ms = 100
            max_delay_ms = 100
            seed = 42
        "#;
        let config = KitchenConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.shelves.hot.capacity, 1);
        assert_eq!(config.shelves.cold.capacity, 10);
        assert_eq!(config.shelves.overflow, ShelfConfig::new(0, 3.0));
        assert_eq!(config.dispatch.seed, Some(42));
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        let toml = r#"
            [shelves.cold]
            capacity = -1
            decay_modifier = 1.0
        "#;
        assert!(matches!(
            KitchenConfig::from_toml_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overflow_must_decay_faster() {
        let mut config = KitchenConfig::default();
        config.shelves.frozen.decay_modifier = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverflowModifierTooLow {
                shelf: ShelfKind::Frozen,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_modifiers_and_ranges() {
        let mut config = KitchenConfig::default();
        config.shelves.hot.decay_modifier = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDecayModifier { .. })
        ));

        let mut config = KitchenConfig::default();
        config.dispatch.min_delay_ms = 10;
        config.dispatch.max_delay_ms = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDelayRange { .. })
        ));

        let mut config = KitchenConfig::default();
        config.ingestion.orders_per_second = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIngestionRate(_))
        ));

        let mut config = KitchenConfig::default();
        config.sweep.interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSweepInterval)
        ));
    }

    #[test]
    fn test_rejects_rate_too_slow_for_a_duration() {
        let mut config = KitchenConfig::default();
        config.ingestion.orders_per_second = 1e-20;
        assert_eq!(config.ingestion.try_interval(), None);
        assert_eq!(config.ingestion.interval(), Duration::MAX);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIngestionRate(rate)) if rate == 1e-20
        ));

        config.ingestion.orders_per_second = 0.5;
        assert_eq!(config.ingestion.interval(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_mailbox() {
        let mut config = KitchenConfig::default();
        config.mailbox_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMailboxSize)
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mailbox_size = 8\n[sweep]\ninterval_ms = 250").unwrap();
        let config = KitchenConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mailbox_size, 8);
        assert_eq!(config.sweep.interval(), Duration::from_millis(250));

        assert!(matches!(
            KitchenConfig::from_file("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
