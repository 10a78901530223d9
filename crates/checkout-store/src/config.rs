//! # Checkout Configuration
//!
//! Where the data file lives, how it is rewritten, and the pricing rules.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_DATA_FILE=/srv/checkout/customers.txt                     │
//! │     CHECKOUT_ATOMIC_WRITES=false                                       │
//! │     CHECKOUT_TAX_RATE=0.13                                             │
//! │     CHECKOUT_MAX_DISCOUNT_POINTS=10000                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/checkout/checkout.toml (Linux)                           │
//! │     ~/Library/Application Support/com.checkout.checkout/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     <platform data dir>/customers.txt, 15% tax, 20 000 point cap       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [store]
//! data_file = "/srv/checkout/customers.txt"
//! atomic_writes = true
//! create_parent_dirs = true
//!
//! [pricing]
//! tax_rate = 0.15
//! max_discount_points = 20000
//! points_per_percent = 1000
//! ```

use std::path::{Path, PathBuf};

use checkout_core::PricingRules;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// File name of the customer data file inside the data directory.
pub const DEFAULT_DATA_FILE: &str = "customers.txt";

/// File name of the config file inside the config directory.
pub const DEFAULT_CONFIG_FILE: &str = "checkout.toml";

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for the flat-file customer store.
///
/// ## Example
/// ```rust
/// use checkout_store::StoreConfig;
///
/// let config = StoreConfig::new("./data/customers.txt")
///     .atomic_writes(false)
///     .create_parent_dirs(false);
/// assert!(!config.atomic_writes);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the customer data file. Created empty if missing.
    pub data_file: PathBuf,

    /// Rewrite through a temp file + rename instead of truncating in place.
    /// Default: true
    pub atomic_writes: bool,

    /// Create missing parent directories when opening the store.
    /// Default: true
    pub create_parent_dirs: bool,
}

impl StoreConfig {
    /// Creates a store configuration for the given data file.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_file: data_file.into(),
            atomic_writes: true,
            create_parent_dirs: true,
        }
    }

    /// Sets whether rewrites go through a temp file and rename.
    pub fn atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    /// Sets whether missing parent directories are created on open.
    pub fn create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Default data file location.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.checkout.checkout/customers.txt`
    /// - **Windows**: `%APPDATA%\checkout\checkout\data\customers.txt`
    /// - **Linux**: `~/.local/share/checkout/customers.txt`
    ///
    /// Falls back to `./customers.txt` when no home directory is known.
    pub fn default_data_file() -> PathBuf {
        directories::ProjectDirs::from("com", "checkout", "checkout")
            .map(|dirs| dirs.data_dir().join(DEFAULT_DATA_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(Self::default_data_file())
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Data file settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Tax and loyalty discount rules.
    #[serde(default)]
    pub pricing: PricingRules,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    ///
    /// A missing config file is not an error; an unreadable or malformed one
    /// is.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(path = %path.display(), "Loading checkout config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file. Missing sections and keys take defaults.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StoreError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.store.data_file.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig(
                "store.data_file must not be empty".into(),
            ));
        }

        let tax = self.pricing.tax_rate;
        if !tax.is_finite() || !(0.0..=1.0).contains(&tax) {
            return Err(StoreError::InvalidConfig(format!(
                "pricing.tax_rate must be between 0 and 1, got: {}",
                tax
            )));
        }

        if self.pricing.points_per_percent == 0 {
            return Err(StoreError::InvalidConfig(
                "pricing.points_per_percent must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `CHECKOUT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("CHECKOUT_DATA_FILE") {
            debug!(path = %path, "Overriding data file from environment");
            self.store.data_file = PathBuf::from(path);
        }

        if let Some(atomic) = lookup("CHECKOUT_ATOMIC_WRITES") {
            match atomic.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.store.atomic_writes = true,
                "0" | "false" | "no" => self.store.atomic_writes = false,
                _ => warn!(value = %atomic, "Unknown CHECKOUT_ATOMIC_WRITES value"),
            }
        }

        if let Some(rate) = lookup("CHECKOUT_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(r) => {
                    debug!(tax_rate = r, "Overriding tax rate from environment");
                    self.pricing.tax_rate = r;
                }
                Err(_) => warn!(value = %rate, "Invalid CHECKOUT_TAX_RATE"),
            }
        }

        if let Some(cap) = lookup("CHECKOUT_MAX_DISCOUNT_POINTS") {
            match cap.parse::<u32>() {
                Ok(c) => self.pricing.max_discount_points = c,
                Err(_) => warn!(value = %cap, "Invalid CHECKOUT_MAX_DISCOUNT_POINTS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "checkout")
            .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CheckoutConfig::default();
        assert!(config.store.atomic_writes);
        assert!(config.store.create_parent_dirs);
        assert!(config.store.data_file.ends_with(DEFAULT_DATA_FILE));
        assert_eq!(config.pricing, PricingRules::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CheckoutConfig = toml::from_str(
            r#"
            [store]
            data_file = "/srv/customers.txt"

            [pricing]
            tax_rate = 0.13
            "#,
        )
        .unwrap();

        assert_eq!(config.store.data_file, PathBuf::from("/srv/customers.txt"));
        assert!(config.store.atomic_writes);
        assert_eq!(config.pricing.tax_rate, 0.13);
        assert_eq!(config.pricing.max_discount_points, 20_000);
        assert_eq!(config.pricing.points_per_percent, 1_000);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        std::fs::write(
            &path,
            "[store]\ndata_file = \"x.txt\"\natomic_writes = false\n",
        )
        .unwrap();

        let config = CheckoutConfig::from_file(&path).unwrap();
        assert_eq!(config.store.data_file, PathBuf::from("x.txt"));
        assert!(!config.store.atomic_writes);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        std::fs::write(&path, "[pricing]\ntax_rate = \"lots\"\n").unwrap();

        let err = CheckoutConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, StoreError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = CheckoutConfig::default();
        config.apply_overrides(lookup_from(&[
            ("CHECKOUT_DATA_FILE", "/tmp/other.txt"),
            ("CHECKOUT_ATOMIC_WRITES", "false"),
            ("CHECKOUT_TAX_RATE", "0.05"),
            ("CHECKOUT_MAX_DISCOUNT_POINTS", "5000"),
        ]));

        assert_eq!(config.store.data_file, PathBuf::from("/tmp/other.txt"));
        assert!(!config.store.atomic_writes);
        assert_eq!(config.pricing.tax_rate, 0.05);
        assert_eq!(config.pricing.max_discount_points, 5000);
    }

    #[test]
    fn test_unparseable_overrides_are_ignored() {
        let mut config = CheckoutConfig::default();
        config.apply_overrides(lookup_from(&[
            ("CHECKOUT_ATOMIC_WRITES", "maybe"),
            ("CHECKOUT_TAX_RATE", "abc"),
            ("CHECKOUT_MAX_DISCOUNT_POINTS", "-1"),
        ]));

        assert_eq!(config, CheckoutConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CheckoutConfig::default();
        assert!(config.validate().is_ok());

        config.pricing.tax_rate = 1.5;
        assert!(config.validate().is_err());

        config.pricing.tax_rate = f64::NAN;
        assert!(config.validate().is_err());

        config.pricing.tax_rate = 0.15;
        config.pricing.points_per_percent = 0;
        assert!(config.validate().is_err());

        config.pricing.points_per_percent = 1_000;
        config.store.data_file = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let config = CheckoutConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[pricing]"));
    }
}
