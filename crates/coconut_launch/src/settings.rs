//! Launcher Settings - Filesystem layout and the distributed launcher to invoke
//!
//! Defaults match the Coconut repository layout. Any subset of fields can be
//! overridden from a JSON file passed with `--settings`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;
use crate::models::ModelChoice;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LauncherSettings {
    // Prerequisite data
    pub train_data: PathBuf,
    pub valid_data: PathBuf,
    // Output
    pub checkpoint_dir: PathBuf,
    pub checkpoint_prefix: String,
    // Subprocess
    pub launcher_program: String,
    pub entry_point: String,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            train_data: PathBuf::from("data/gsm_train.json"),
            valid_data: PathBuf::from("data/gsm_valid.json"),
            checkpoint_dir: PathBuf::from("checkpoints"),
            checkpoint_prefix: "gsm-coconut".to_string(),
            launcher_program: "torchrun".to_string(),
            entry_point: "run.py".to_string(),
        }
    }
}

impl LauncherSettings {
    pub fn load(path: &Path) -> Result<Self, LaunchError> {
        let text = fs::read_to_string(path).map_err(|source| LaunchError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LaunchError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Data files that must exist before any training starts.
    pub fn prerequisite_files(&self) -> Vec<PathBuf> {
        vec![self.train_data.clone(), self.valid_data.clone()]
    }

    /// Where the training program writes checkpoints for `model`.
    pub fn checkpoint_path_for(&self, model: ModelChoice) -> PathBuf {
        self.checkpoint_dir
            .join(format!("{}-{}", self.checkpoint_prefix, model))
    }
}
