pub mod banner;
pub mod cli;
pub mod error;
pub mod launch;
pub mod models;
pub mod runner;
pub mod settings;

pub use error::LaunchError;
pub use launch::{LaunchRequest, Launcher, TrainedModel};
pub use models::{ConfigTable, ModelChoice};
pub use runner::{CommandRunner, CommandSpec, RunOutcome, SystemRunner};
pub use settings::LauncherSettings;
