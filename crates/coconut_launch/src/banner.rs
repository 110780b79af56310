//! Progress banners printed to stdout around each training run

use std::path::Path;

use crate::models::ModelChoice;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn model_banner(model: ModelChoice, config: &Path, num_gpus: u32) -> String {
    format!(
        "{rule}\nTraining Coconut on GSM8k with {model}\nConfig: {config}\nGPUs: {num_gpus}\n{rule}\n\n",
        rule = rule(),
        config = config.display(),
    )
}

pub fn completion(model: ModelChoice, checkpoint_dir: &Path) -> String {
    format!(
        "\nCompleted training {}\nCheckpoints saved in: {}/\n\n",
        model,
        checkpoint_dir.display()
    )
}

pub fn final_banner() -> String {
    format!(
        "{rule}\nTraining completed successfully!\n{rule}\n",
        rule = rule()
    )
}
