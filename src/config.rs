use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;
use crate::logging::LogConfig;
use crate::models::Biometrics;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Biometrics used when none are given on the command line
    pub biometrics: Biometrics,

    /// Logging settings
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        AppConfig {
            metadata: ConfigMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: now,
                updated_at: now,
            },
            biometrics: Biometrics::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// Biometrics are not validated here so that a file holding bad values
    /// can still be loaded and repaired; they are checked when used or saved.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.validate()?;
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tracker")
            .join("config.toml")
    }

    /// Load configuration from `path`, or the default location, falling back to defaults
    ///
    /// A missing file is not an error; a file that exists but cannot be read
    /// or parsed is.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&config_path)
    }

    /// Check that the stored biometrics can be used by the calculators
    pub fn validate(&self) -> std::result::Result<(), TrackerError> {
        if !self.biometrics.is_valid() {
            return Err(TrackerError::Configuration(format!(
                "biometrics must be positive, got weight={} kg, height={} m",
                self.biometrics.weight_kg, self.biometrics.height_m
            )));
        }
        Ok(())
    }

    /// Rewrite the configuration file at `path`
    ///
    /// With `init` the existing file is ignored, even if it cannot be parsed,
    /// and defaults are written. Otherwise the file (or defaults when it is
    /// missing) gets the given biometrics applied. Nothing is written when the
    /// result would still be invalid.
    pub fn update_file(
        path: &Path,
        init: bool,
        weight: Option<f64>,
        height: Option<f64>,
    ) -> Result<Self> {
        let mut config = if init {
            Self::default()
        } else {
            Self::load_or_default(Some(path))?
        };

        config.biometrics = config.biometrics_with(weight, height);
        config.save_to_file(path)?;
        tracing::info!(path = %path.display(), "configuration written");

        Ok(config)
    }

    /// Biometrics with command-line overrides applied
    pub fn biometrics_with(&self, weight: Option<f64>, height: Option<f64>) -> Biometrics {
        Biometrics {
            weight_kg: weight.unwrap_or(self.biometrics.weight_kg),
            height_m: height.unwrap_or(self.biometrics.height_m),
        }
    }
}
