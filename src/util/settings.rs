use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::infra::advisor_api::DEFAULT_API_BASE;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "CropAdvisor";
const APP_NAME: &str = "CropAdvisor";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    /// Origin the `/api/...` paths are resolved against.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

pub fn load_settings() -> Option<AdvisorSettings> {
    load_settings_from(&settings_file()?)
}

pub fn save_settings(settings: &AdvisorSettings) -> Result<(), SettingsSaveError> {
    let path = settings_file().ok_or(SettingsSaveError::StorageUnavailable)?;
    save_settings_to(&path, settings)
}

fn load_settings_from(path: &Path) -> Option<AdvisorSettings> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no settings file; using defaults");
            return None;
        }
    };
    match serde_json::from_str::<AdvisorSettings>(&data) {
        Ok(settings) if !settings.api_base.trim().is_empty() => Some(settings),
        Ok(_) => {
            warn!(path = %path.display(), "settings file has an empty API base; ignoring it");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to parse settings file");
            None
        }
    }
}

fn save_settings_to(path: &Path, settings: &AdvisorSettings) -> Result<(), SettingsSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsSaveError {
    #[error("settings directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_settings_are_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AdvisorSettings {
            api_base: "https://advisor.example.org".into(),
        };

        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path), Some(settings));
    }

    #[test]
    fn missing_or_broken_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path), None);

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), None);

        fs::write(&path, r#"{ "api_base": "  " }"#).unwrap();
        assert_eq!(load_settings_from(&path), None);

        fs::write(&path, "{}").unwrap();
        assert_eq!(load_settings_from(&path), Some(AdvisorSettings::default()));
    }
}
