use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::logging::LogConfig;
use crate::models::UserData;
use crate::tables::{default_cardio_table, default_training_table, CardioTable, TrainingTable};

/// Main application configuration
///
/// Stored as TOML; every section is optional so a hand-written partial
/// file works. Table sections are overrides merged on top of the
/// built-in MET and training tables at lookup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub metadata: ConfigMetadata,

    /// Profile, multipliers, usual training block and cardio sessions
    #[serde(default)]
    pub user: UserData,

    /// Active goal key (aggressive_bulk, bulking, maintenance, cutting,
    /// aggressive_cut)
    #[serde(default = "default_goal")]
    pub goal: String,

    /// Weight store location override
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Per-activity MET overrides, merged field-by-field over the
    /// built-in cardio table
    #[serde(default)]
    pub cardio_types: CardioTable,

    /// Training style overrides, replacing built-in entries wholesale
    #[serde(default)]
    pub training_types: TrainingTable,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
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

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ConfigMetadata {
            version: "1.0".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_goal() -> String {
    "maintenance".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            metadata: ConfigMetadata::default(),
            user: UserData::default(),
            goal: default_goal(),
            store_path: None,
            cardio_types: CardioTable::new(),
            training_types: TrainingTable::new(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
                .into())
            }
            Err(err) => return Err(err.into()),
        };

        let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_content =
            toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize {
                reason: err.to_string(),
            })?;
        fs::write(&path, toml_content)?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = match Self::default_path() {
            Ok(path) => path,
            Err(_) => return Self::default(),
        };

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                match err {
                    crate::error::KcalError::Config(ConfigError::NotFound { .. }) => {
                        debug!(path = %config_path.display(), "No config file, using defaults");
                    }
                    other => {
                        warn!(error = %other, "Config unreadable, using defaults");
                    }
                }
                Self::default()
            }
        }
    }

    /// Save configuration to default location
    pub fn save(&mut self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to_file(config_path)
    }

    /// Built-in cardio table with this config's overrides applied.
    ///
    /// Overrides merge per intensity, so pinning one MET value leaves the
    /// built-in values for the other intensities intact.
    pub fn cardio_table(&self) -> CardioTable {
        let mut table = default_cardio_table();
        for (kind, overriding) in &self.cardio_types {
            let entry = table.entry(kind.clone()).or_default();
            if let Some(met) = overriding.met.light {
                entry.met.light = Some(met);
            }
            if let Some(met) = overriding.met.moderate {
                entry.met.moderate = Some(met);
            }
            if let Some(met) = overriding.met.vigorous {
                entry.met.vigorous = Some(met);
            }
        }
        table
    }

    /// Built-in training table with this config's overrides applied.
    pub fn training_table(&self) -> TrainingTable {
        let mut table = default_training_table();
        for (kind, style) in &self.training_types {
            table.insert(kind.clone(), *style);
        }
        table
    }

    /// Weight store location: the configured override, or
    /// `weights.json` next to the config file.
    pub fn resolved_store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("weights.json")),
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(home.join(".kcalrs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, TrainingProfile};
    use crate::tables::{CardioType, MetValues, TrainingType};
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(config.goal, deserialized.goal);
        assert_eq!(config.user.profile, deserialized.user.profile);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
            goal = "cutting"

            [user.profile]
            age = 31.0
            weight_kg = 78.5
            height_cm = 182.0
            gender = "male"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.goal, "cutting");
        assert_eq!(config.user.profile.weight_kg, 78.5);
        assert_eq!(config.user.profile.gender, Gender::Male);
        assert!(config.user.training.is_none());
        assert!(config.cardio_types.is_empty());
    }

    #[test]
    fn test_cardio_override_merges_per_intensity() {
        let mut config = AppConfig::default();
        config.cardio_types.insert(
            "running".to_string(),
            CardioType {
                met: MetValues {
                    moderate: Some(7.5),
                    ..Default::default()
                },
            },
        );

        let table = config.cardio_table();
        let running = &table["running"];
        assert_eq!(running.met.moderate, Some(7.5));
        // Built-in values survive a single-intensity override
        assert_eq!(running.met.light, Some(6.0));
        assert_eq!(running.met.vigorous, Some(9.8));
    }

    #[test]
    fn test_cardio_override_can_add_new_activity() {
        let mut config = AppConfig::default();
        config.cardio_types.insert(
            "skating".to_string(),
            CardioType::new(5.5, 7.0, 9.0),
        );
        let table = config.cardio_table();
        assert_eq!(table["skating"].met.moderate, Some(7.0));
    }

    #[test]
    fn test_training_override_replaces_entry() {
        let mut config = AppConfig::default();
        config
            .training_types
            .insert("strength".to_string(), TrainingType::new(240.0));
        let table = config.training_table();
        assert_eq!(table["strength"].calories_per_hour, 240.0);
        // Untouched entries stay built-in
        assert_eq!(table["crossfit"].calories_per_hour, 310.0);
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut original = AppConfig {
            goal: "bulking".to_string(),
            ..AppConfig::default()
        };
        original.user.training = Some(TrainingProfile {
            kind: "strength".to_string(),
            duration_hours: 1.5,
        });
        original.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.goal, "bulking");
        assert_eq!(
            loaded.user.training.as_ref().unwrap().duration_hours,
            1.5
        );
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = AppConfig::load_from_file(&missing).unwrap_err();
        assert!(matches!(
            err,
            crate::error::KcalError::Config(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "goal = [not toml").unwrap();
        let err = AppConfig::load_from_file(&config_path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::KcalError::Config(ConfigError::Parse { .. })
        ));
    }
}
