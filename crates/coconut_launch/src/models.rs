//! Model Table - Selectable Llama sizes and the YAML config each one trains with

use clap::ValueEnum;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;

/// Model selection accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum ModelChoice {
    #[value(name = "llama3.2-1b")]
    Llama32_1b,
    #[default]
    #[value(name = "llama3.2-3b")]
    Llama32_3b,
    #[value(name = "llama3.1-8b")]
    Llama31_8b,
    /// Every concrete model, trained one after another
    All,
}

impl ModelChoice {
    /// Concrete models in training order. `All` expands to exactly this list.
    pub const CONCRETE: [ModelChoice; 3] = [
        ModelChoice::Llama32_1b,
        ModelChoice::Llama32_3b,
        ModelChoice::Llama31_8b,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Llama32_1b => "llama3.2-1b",
            ModelChoice::Llama32_3b => "llama3.2-3b",
            ModelChoice::Llama31_8b => "llama3.1-8b",
            ModelChoice::All => "all",
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, ModelChoice::All)
    }

    /// Models to train for this selection, in order.
    pub fn expand(self) -> Vec<ModelChoice> {
        if self.is_aggregate() {
            Self::CONCRETE.to_vec()
        } else {
            vec![self]
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const STANDARD_CONFIGS: [(ModelChoice, &str); 3] = [
    (ModelChoice::Llama32_1b, "args/gsm_coconut_llama3.2_1b.yaml"),
    (ModelChoice::Llama32_3b, "args/gsm_coconut_llama3.2_3b.yaml"),
    (ModelChoice::Llama31_8b, "args/gsm_coconut_llama3.1_8b.yaml"),
];

/// Immutable model -> config path mapping, validated once on construction.
#[derive(Debug, Clone)]
pub struct ConfigTable {
    // Ordered like ModelChoice::CONCRETE
    entries: Vec<(ModelChoice, PathBuf)>,
}

impl ConfigTable {
    /// The GSM8k Coconut configs under `args/`.
    pub fn standard() -> Result<Self, LaunchError> {
        Self::from_entries(
            STANDARD_CONFIGS
                .iter()
                .map(|(model, path)| (*model, PathBuf::from(path))),
        )
    }

    /// Build a table, rejecting missing, duplicate, or aggregate entries.
    pub fn from_entries<I>(entries: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = (ModelChoice, PathBuf)>,
    {
        let mut found: HashMap<ModelChoice, PathBuf> = HashMap::new();
        for (model, path) in entries {
            if model.is_aggregate() {
                return Err(LaunchError::InvalidConfigTable(format!(
                    "'{}' expands to other models and cannot map to a config",
                    model
                )));
            }
            if found.insert(model, path).is_some() {
                return Err(LaunchError::InvalidConfigTable(format!(
                    "duplicate config entry for '{}'",
                    model
                )));
            }
        }

        let mut ordered = Vec::with_capacity(ModelChoice::CONCRETE.len());
        for model in ModelChoice::CONCRETE {
            match found.remove(&model) {
                Some(path) => ordered.push((model, path)),
                None => {
                    return Err(LaunchError::InvalidConfigTable(format!(
                        "no config entry for '{}'",
                        model
                    )))
                }
            }
        }

        Ok(Self { entries: ordered })
    }

    pub fn config_for(&self, model: ModelChoice) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(m, _)| *m == model)
            .map(|(_, path)| path.as_path())
    }

    /// Expand a selection into (model, config path) pairs in training order.
    pub fn resolve(
        &self,
        selection: ModelChoice,
    ) -> Result<Vec<(ModelChoice, PathBuf)>, LaunchError> {
        selection
            .expand()
            .into_iter()
            .map(|model| {
                self.config_for(model)
                    .map(|path| (model, path.to_path_buf()))
                    .ok_or_else(|| {
                        LaunchError::InvalidConfigTable(format!("no config entry for '{}'", model))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_models_resolve_to_table_entry() -> anyhow::Result<()> {
        let table = ConfigTable::standard()?;
        for (model, expected) in STANDARD_CONFIGS {
            let resolved = table.resolve(model)?;
            assert_eq!(resolved, vec![(model, PathBuf::from(expected))]);
        }
        Ok(())
    }

    #[test]
    fn test_all_expands_in_stable_order() -> anyhow::Result<()> {
        let table = ConfigTable::standard()?;
        let models: Vec<ModelChoice> = table
            .resolve(ModelChoice::All)?
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(
            models,
            vec![
                ModelChoice::Llama32_1b,
                ModelChoice::Llama32_3b,
                ModelChoice::Llama31_8b
            ]
        );
        // Same answer on a second call
        assert_eq!(table.resolve(ModelChoice::All)?, table.resolve(ModelChoice::All)?);
        Ok(())
    }

    #[test]
    fn test_table_rejects_missing_entry() {
        let result = ConfigTable::from_entries(vec![
            (ModelChoice::Llama32_1b, PathBuf::from("a.yaml")),
            (ModelChoice::Llama32_3b, PathBuf::from("b.yaml")),
        ]);
        assert!(matches!(result, Err(LaunchError::InvalidConfigTable(msg)) if msg.contains("llama3.1-8b")));
    }

    #[test]
    fn test_table_rejects_duplicate_entry() {
        let result = ConfigTable::from_entries(vec![
            (ModelChoice::Llama32_1b, PathBuf::from("a.yaml")),
            (ModelChoice::Llama32_1b, PathBuf::from("a2.yaml")),
            (ModelChoice::Llama32_3b, PathBuf::from("b.yaml")),
            (ModelChoice::Llama31_8b, PathBuf::from("c.yaml")),
        ]);
        assert!(matches!(result, Err(LaunchError::InvalidConfigTable(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_table_rejects_aggregate_entry() {
        let mut entries: Vec<(ModelChoice, PathBuf)> = STANDARD_CONFIGS
            .iter()
            .map(|(m, p)| (*m, PathBuf::from(p)))
            .collect();
        entries.push((ModelChoice::All, PathBuf::from("all.yaml")));
        assert!(ConfigTable::from_entries(entries).is_err());
    }

    #[test]
    fn test_display_matches_cli_names() {
        for model in ModelChoice::value_variants() {
            let name = model
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default();
            assert_eq!(name, model.to_string());
        }
    }
}
