//! certstat configuration
//!
//! Where the datasets live and how reports are printed.
//! Config file: --config <path>, $CERTSTAT_CONFIG, or ./certstat.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "CERTSTAT_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "certstat.toml";

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Dataset locations; file names are relative to `shared_dir`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub shared_dir: PathBuf,

    /// Chains submitted to the validator
    pub input: String,

    /// Validator results for `input`
    pub output: String,

    /// Results from the previous leaf selection method
    pub old_output: String,

    /// Results from the current leaf selection method
    pub new_output: String,

    /// `id,index` of intermediates missing the CA flag
    pub intermediate_ids: String,

    /// Chain identifiers of the LDAP subset
    pub ldap_ids: String,

    /// Validator JSON debug log
    pub validator_log: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            shared_dir: PathBuf::from("shared_dir"),
            input: "20240709_636_cert-validator-input.jsonl".to_string(),
            output: "20240709_636_cert-validator-output.jsonl".to_string(),
            old_output: "old20240709_636_cert-validator-output.jsonl".to_string(),
            new_output: "new20240709_636_cert-validator-output.jsonl".to_string(),
            intermediate_ids: "ids.csv".to_string(),
            ldap_ids: "ldap_ids.csv".to_string(),
            validator_log: "log.json".to_string(),
        }
    }
}

impl DatasetConfig {
    /// Resolve a configured file name against `shared_dir`
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.shared_dir.join(file)
    }

    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    pub fn old_output_path(&self) -> PathBuf {
        self.resolve(&self.old_output)
    }

    pub fn new_output_path(&self) -> PathBuf {
        self.resolve(&self.new_output)
    }

    pub fn intermediate_ids_path(&self) -> PathBuf {
        self.resolve(&self.intermediate_ids)
    }

    pub fn ldap_ids_path(&self) -> PathBuf {
        self.resolve(&self.ldap_ids)
    }

    pub fn validator_log_path(&self) -> PathBuf {
        self.resolve(&self.validator_log)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertstatConfig {
    #[serde(default)]
    pub datasets: DatasetConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl CertstatConfig {
    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. $CERTSTAT_CONFIG (must exist)
    /// 3. ./certstat.toml
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
