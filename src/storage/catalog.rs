use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::Product;

/// Default location of the catalog file.
pub const DEFAULT_CATALOG_PATH: &str = "productos.json";

/// Persists the catalog as a single JSON file, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every product from disk.
    ///
    /// A missing, empty or whitespace-only file is an empty catalog. So is a
    /// file that does not parse: the problem is logged and no data is returned.
    pub fn load(&self) -> Result<Vec<Product>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read catalog file {}", self.path.display())
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<Product>>(&content) {
            Ok(products) => {
                debug!(path = %self.path.display(), count = products.len(), "catalog loaded");
                Ok(products)
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "catalog file has an invalid format, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the catalog file with `products`, pretty-printed.
    pub fn save(&self, products: &[Product]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(products).context("Failed to serialize catalog")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write catalog file {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = products.len(), "catalog saved");
        Ok(())
    }

    /// Load the catalog, apply `mutator`, and save only if it succeeded.
    pub fn with_catalog<T, E>(
        &self,
        mutator: impl FnOnce(&mut Vec<Product>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<anyhow::Error>,
    {
        let mut products = self.load()?;
        let value = mutator(&mut products)?;
        self.save(&products)?;
        Ok(value)
    }
}
