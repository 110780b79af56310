//! Launch Errors - Everything that can stop a training launch

use std::path::PathBuf;
use thiserror::Error;

use crate::models::ModelChoice;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// One or both GSM8k data files are absent. Raised before any work is done.
    #[error("GSM8k data files not found!")]
    MissingPrerequisiteData {
        missing: Vec<PathBuf>,
        required: Vec<PathBuf>,
    },

    /// The training command exited non-zero or could not be started.
    #[error("training {model} failed: {diagnostic}")]
    SubprocessFailure {
        model: ModelChoice,
        code: Option<i32>,
        diagnostic: String,
    },

    #[error("failed to create checkpoint directory {}: {source}", .path.display())]
    CheckpointDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config table: {0}")]
    InvalidConfigTable(String),

    #[error("failed to read launcher settings {}: {source}", .path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse launcher settings {}: {source}", .path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LaunchError {
    /// Process exit status for this failure. Every launcher failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Line printed to stderr when the launch stops.
    pub fn user_message(&self) -> String {
        match self {
            LaunchError::SubprocessFailure {
                model, diagnostic, ..
            } => format!("Error training {}: {}", model, diagnostic),
            other => format!("Error: {}", other),
        }
    }

    /// Follow-up hint shown to the user, if the failure has an obvious fix.
    pub fn remedy(&self) -> Option<String> {
        match self {
            LaunchError::MissingPrerequisiteData { required, .. } => Some(format!(
                "Please ensure {} exist.",
                join_paths(required, " and ")
            )),
            _ => None,
        }
    }

    /// Extra context for the log file that the user-facing message leaves out.
    pub fn log_detail(&self) -> Option<String> {
        match self {
            LaunchError::MissingPrerequisiteData { missing, .. } => {
                Some(format!("missing: {}", join_paths(missing, ", ")))
            }
            LaunchError::SubprocessFailure { code, .. } => Some(format!("exit code: {:?}", code)),
            _ => None,
        }
    }
}

fn join_paths(paths: &[PathBuf], sep: &str) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_message_and_remedy() {
        let err = LaunchError::MissingPrerequisiteData {
            missing: vec![PathBuf::from("data/gsm_valid.json")],
            required: vec![
                PathBuf::from("data/gsm_train.json"),
                PathBuf::from("data/gsm_valid.json"),
            ],
        };
        assert_eq!(err.user_message(), "Error: GSM8k data files not found!");
        assert_eq!(
            err.remedy().as_deref(),
            Some("Please ensure data/gsm_train.json and data/gsm_valid.json exist.")
        );
        assert_eq!(
            err.log_detail().as_deref(),
            Some("missing: data/gsm_valid.json")
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_subprocess_failure_message() {
        let err = LaunchError::SubprocessFailure {
            model: ModelChoice::Llama32_1b,
            code: Some(1),
            diagnostic: "Command 'false' returned non-zero exit status: 1".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Error training llama3.2-1b: Command 'false' returned non-zero exit status: 1"
        );
        assert!(err.remedy().is_none());
        assert_eq!(err.log_detail().as_deref(), Some("exit code: Some(1)"));
        assert_eq!(err.exit_code(), 1);
    }
}
