//! Inference settings, loadable from a JSON file and overridable from the CLI.
//!
//! ```json
//! { "sample_size": 5000, "seed": 7, "threads": 4, "min_partition_len": 64 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InferConfig {
    /// Number of documents to sample from the source
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Seed for the sampler; unseeded sampling draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Worker threads for aggregation; rayon's global pool when unset
    #[serde(default)]
    pub threads: Option<usize>,

    /// Lower bound on documents folded per partition before combining
    #[serde(default = "default_min_partition_len")]
    pub min_partition_len: usize,
}

fn default_sample_size() -> usize {
    1000
}

fn default_min_partition_len() -> usize {
    1
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            seed: None,
            threads: None,
            min_partition_len: default_min_partition_len(),
        }
    }
}

impl InferConfig {
    pub fn from_json_str(src: &str) -> Result<Self> {
        let config: Self = crate::path_de::from_str_with_path("config", src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src)
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(invalid("sample_size", "must be a positive integer"));
        }
        if self.threads == Some(0) {
            return Err(invalid("threads", "must be a positive integer when set"));
        }
        if self.min_partition_len == 0 {
            return Err(invalid("min_partition_len", "must be a positive integer"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> Error {
    Error::InvalidConfigValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
