//! Pathway catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Catalog configuration: where pathway documents live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Directory containing one JSON document per pathway
    #[serde(default = "default_pathways_dir")]
    pub pathways_dir: String,
}

impl CatalogConfig {
    /// Get the pathway directory as a path
    pub fn pathways_path(&self) -> PathBuf {
        PathBuf::from(&self.pathways_dir)
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pathways_dir.trim().is_empty() {
            return Err(ValidationError::EmptyPathwayDirectory);
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            pathways_dir: default_pathways_dir(),
        }
    }
}

fn default_pathways_dir() -> String {
    "./pathways".to_string()
}
