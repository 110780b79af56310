use clap::Parser;
use std::path::PathBuf;

use crate::models::ModelChoice;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Train Coconut with Llama models on GSM8k", long_about = None)]
pub struct LaunchArgs {
    /// Model to train
    #[arg(long, value_enum, default_value_t = ModelChoice::Llama32_3b)]
    pub model: ModelChoice,

    /// Number of GPUs to use (processes per node)
    #[arg(long = "num_gpus", default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_gpus: u32,

    /// Master port for distributed training
    #[arg(long = "master_port", default_value_t = 29500, value_parser = clap::value_parser!(u16).range(1..))]
    pub master_port: u16,

    /// JSON file overriding data paths, checkpoint dir, or the launcher program
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory for rolling log files. Created at startup, before the data-file check
    #[arg(long = "log_dir", default_value = "logs")]
    pub log_dir: PathBuf,
}
