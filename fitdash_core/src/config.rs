//! Configuration file support for Fitdash.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitdash/config.toml`.

use crate::catalog::Catalog;
use crate::types::{CatalogEntry, ExercisePrescription, Measure};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub goals: GoalsConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Where the workbook lives
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Body-weight goal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_target_weight")]
    pub target_weight: f64,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            target_weight: default_target_weight(),
        }
    }
}

/// User-defined exercise; exactly one of `reps` / `duration_seconds`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomExercise {
    pub name: String,
    pub muscle: String,
    pub sets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

impl TryFrom<&CustomExercise> for CatalogEntry {
    type Error = Error;

    fn try_from(custom: &CustomExercise) -> Result<Self> {
        let measure = match (custom.reps, custom.duration_seconds) {
            (Some(reps), None) => Measure::Repetitions(reps),
            (None, Some(secs)) => Measure::DurationSeconds(secs),
            _ => {
                return Err(Error::Config(format!(
                    "exercise '{}' needs exactly one of reps or duration_seconds",
                    custom.name
                )))
            }
        };
        Ok(CatalogEntry {
            name: custom.name.clone(),
            prescription: ExercisePrescription {
                muscle: custom.muscle.clone(),
                sets: custom.sets,
                measure,
            },
        })
    }
}

/// Catalog extensions
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub custom: Vec<CustomExercise>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("fitdash")
}

fn default_target_weight() -> f64 {
    75.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("fitdash").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn target_weight(&self) -> f64 {
        self.goals.target_weight
    }

    /// Default catalog plus the configured custom exercises
    pub fn catalog(&self) -> Result<Catalog> {
        let custom = self
            .catalog
            .custom
            .iter()
            .map(CatalogEntry::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Catalog::with_custom(custom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.target_weight(), 75.0);
        assert!(config.catalog.custom.is_empty());
        assert!(config.store.data_dir.ends_with("fitdash"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[goals]
target_weight = 68.5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.target_weight(), 68.5);
        assert!(config.store.data_dir.ends_with("fitdash"));
    }

    #[test]
    fn test_custom_exercises_extend_catalog() {
        let toml_str = r#"
[[catalog.custom]]
name = "Deadlift"
muscle = "Hamstrings"
sets = 3
reps = 5

[[catalog.custom]]
name = "Wall Sit"
muscle = "Quads"
sets = 2
duration_seconds = 45
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(
            catalog.lookup("Wall Sit").unwrap().measure,
            Measure::DurationSeconds(45)
        );
    }

    #[test]
    fn test_custom_exercise_needs_one_measure() {
        let toml_str = r#"
[[catalog.custom]]
name = "Mystery"
muscle = "Core"
sets = 3
reps = 10
duration_seconds = 30
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.catalog(), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.goals.target_weight = 70.0;
        config.store.data_dir = temp_dir.path().join("data");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.target_weight(), 70.0);
        assert_eq!(loaded.store.data_dir, temp_dir.path().join("data"));
    }
}
