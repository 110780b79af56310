//! Launcher - Pre-flight checks and the sequential, fail-fast training batch

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::banner;
use crate::cli::LaunchArgs;
use crate::error::LaunchError;
use crate::models::{ConfigTable, ModelChoice};
use crate::runner::{CommandRunner, CommandSpec};
use crate::settings::LauncherSettings;

/// One launcher invocation, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchRequest {
    pub model: ModelChoice,
    pub num_gpus: u32,
    pub master_port: u16,
}

impl From<&LaunchArgs> for LaunchRequest {
    fn from(args: &LaunchArgs) -> Self {
        Self {
            model: args.model,
            num_gpus: args.num_gpus,
            master_port: args.master_port,
        }
    }
}

/// A model whose training command exited successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainedModel {
    pub model: ModelChoice,
    pub config: PathBuf,
    pub checkpoint_dir: PathBuf,
}

pub struct Launcher<R: CommandRunner> {
    settings: LauncherSettings,
    table: ConfigTable,
    runner: R,
}

impl<R: CommandRunner> Launcher<R> {
    pub fn new(settings: LauncherSettings, table: ConfigTable, runner: R) -> Self {
        Self {
            settings,
            table,
            runner,
        }
    }

    pub fn check_prerequisites(&self) -> Result<(), LaunchError> {
        let required = self.settings.prerequisite_files();
        let missing: Vec<PathBuf> = required.iter().filter(|p| !p.exists()).cloned().collect();
        if !missing.is_empty() {
            return Err(LaunchError::MissingPrerequisiteData { missing, required });
        }
        Ok(())
    }

    /// Create the checkpoint root if needed. Existing contents are left alone.
    pub fn ensure_checkpoint_dir(&self) -> Result<(), LaunchError> {
        let dir = &self.settings.checkpoint_dir;
        if dir.is_dir() {
            tracing::debug!("Checkpoint directory {} already exists", dir.display());
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| LaunchError::CheckpointDir {
            path: dir.clone(),
            source,
        })?;
        tracing::info!("📂 Created checkpoint directory {}", dir.display());
        Ok(())
    }

    pub fn build_command(&self, request: &LaunchRequest, config: &Path) -> CommandSpec {
        CommandSpec::new(self.settings.launcher_program.as_str())
            .arg(format!("--nproc_per_node={}", request.num_gpus))
            .arg(format!("--master_port={}", request.master_port))
            .arg(self.settings.entry_point.as_str())
            .arg(config.to_string_lossy())
    }

    /// Train every model the request selects, one at a time.
    ///
    /// Stops at the first failed run. Models trained before the failure are
    /// not rolled back.
    pub fn run(&mut self, request: &LaunchRequest) -> Result<Vec<TrainedModel>, LaunchError> {
        self.check_prerequisites()?;
        self.ensure_checkpoint_dir()?;

        let plan = self.table.resolve(request.model)?;
        tracing::info!(
            "🚀 Training {} model(s) on {} GPU(s), master port {}",
            plan.len(),
            request.num_gpus,
            request.master_port
        );

        let mut trained = Vec::with_capacity(plan.len());
        for (model, config) in plan {
            print!("{}", banner::model_banner(model, &config, request.num_gpus));

            let command = self.build_command(request, &config);
            tracing::info!("$ {}", command);

            let start = Instant::now();
            let outcome = self.runner.run(&command);
            let elapsed = start.elapsed().as_secs_f64();

            if !outcome.success {
                tracing::error!(
                    "❌ {} failed after {:.1}s (exit code {:?})",
                    model,
                    elapsed,
                    outcome.code
                );
                return Err(LaunchError::SubprocessFailure {
                    model,
                    code: outcome.code,
                    diagnostic: outcome.diagnostic,
                });
            }

            let checkpoint_dir = self.settings.checkpoint_path_for(model);
            tracing::info!("✅ {} finished in {:.1}s", model, elapsed);
            print!("{}", banner::completion(model, &checkpoint_dir));

            trained.push(TrainedModel {
                model,
                config,
                checkpoint_dir,
            });
        }

        print!("{}", banner::final_banner());
        Ok(trained)
    }
}
