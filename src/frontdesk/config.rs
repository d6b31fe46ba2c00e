use crate::error::{FrontdeskError, Result};
use crate::store::ids::IdPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Page sizes the list views offer.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Keys accepted by `config get/set`, in display order.
pub const CONFIG_KEYS: [&str; 4] = [
    "patient-ids",
    "doctor-ids",
    "rows-per-page",
    "seed-on-empty",
];

/// Configuration, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrontdeskConfig {
    /// Identifier policy for patients
    #[serde(default = "default_patient_ids")]
    pub patient_ids: IdPolicy,

    /// Identifier policy for doctors
    #[serde(default = "default_doctor_ids")]
    pub doctor_ids: IdPolicy,

    /// Rows shown per page in list views
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,

    /// Start from the built-in sample records when nothing is stored
    #[serde(default = "default_seed_on_empty")]
    pub seed_on_empty: bool,
}

fn default_patient_ids() -> IdPolicy {
    IdPolicy::Renumber
}

fn default_doctor_ids() -> IdPolicy {
    IdPolicy::Stable
}

fn default_rows_per_page() -> usize {
    10
}

fn default_seed_on_empty() -> bool {
    true
}

impl Default for FrontdeskConfig {
    fn default() -> Self {
        Self {
            patient_ids: default_patient_ids(),
            doctor_ids: default_doctor_ids(),
            rows_per_page: default_rows_per_page(),
            seed_on_empty: default_seed_on_empty(),
        }
    }
}

impl FrontdeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FrontdeskError::Io)?;
        let config: FrontdeskConfig =
            serde_json::from_str(&content).map_err(FrontdeskError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FrontdeskError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FrontdeskError::Serialization)?;
        fs::write(config_path, content).map_err(FrontdeskError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "patient-ids" => Ok(self.patient_ids.to_string()),
            "doctor-ids" => Ok(self.doctor_ids.to_string()),
            "rows-per-page" => Ok(self.rows_per_page.to_string()),
            "seed-on-empty" => Ok(self.seed_on_empty.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "patient-ids" => self.patient_ids = value.parse().map_err(FrontdeskError::Config)?,
            "doctor-ids" => self.doctor_ids = value.parse().map_err(FrontdeskError::Config)?,
            "rows-per-page" => {
                let rows: usize = value.trim().parse().map_err(|_| {
                    FrontdeskError::Config(format!("rows-per-page must be a number: {}", value))
                })?;
                if !ROWS_PER_PAGE_OPTIONS.contains(&rows) {
                    return Err(FrontdeskError::Config(format!(
                        "rows-per-page must be one of {:?}",
                        ROWS_PER_PAGE_OPTIONS
                    )));
                }
                self.rows_per_page = rows;
            }
            "seed-on-empty" => {
                self.seed_on_empty = value.trim().parse().map_err(|_| {
                    FrontdeskError::Config(format!("seed-on-empty must be true or false: {}", value))
                })?
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// `rows_per_page`, clamped to an offered page size.
    pub fn page_size(&self) -> usize {
        if ROWS_PER_PAGE_OPTIONS.contains(&self.rows_per_page) {
            self.rows_per_page
        } else {
            default_rows_per_page()
        }
    }
}

fn unknown_key(key: &str) -> FrontdeskError {
    FrontdeskError::Config(format!(
        "Unknown config key: {} (known: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
