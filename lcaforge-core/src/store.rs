//! Key-value persistence for saved products.
//!
//! A store holds the whole saved collection; products are matched by id when a
//! session upserts them, so stores themselves only load and replace the list.

use crate::error::LcaError;
use lcaforge_schemas::product::Product;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

pub trait ProductStore {
    fn load_all(&self) -> Result<Vec<Product>, LcaError>;
    fn save_all(&mut self, products: &[Product]) -> Result<(), LcaError>;
}

/// Keeps the collection in memory. Useful for tests and one-shot runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    products: Vec<Product>,
}

impl ProductStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Product>, LcaError> {
        Ok(self.products.clone())
    }

    fn save_all(&mut self, products: &[Product]) -> Result<(), LcaError> {
        self.products = products.to_vec();
        Ok(())
    }
}

/// Stores the collection as a single JSON array on disk.
///
/// A missing file reads as an empty collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl ProductStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<Product>, LcaError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LcaError::FileIO(self.display_path(), e)),
        };
        let products: Vec<Product> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = products.len(), "loaded product store");
        Ok(products)
    }

    fn save_all(&mut self, products: &[Product]) -> Result<(), LcaError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| LcaError::FileIO(parent.display().to_string(), e))?;
        }
        let json = serde_json::to_string_pretty(products)?;
        fs::write(&self.path, json).map_err(|e| LcaError::FileIO(self.display_path(), e))?;
        debug!(path = %self.path.display(), count = products.len(), "wrote product store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("products.json"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn saved_products_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("products.json"));
        let products = vec![Product::new("p1", "Bottle"), Product::new("p2", "Cap")];
        store.save_all(&products).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, products);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load_all(), Err(LcaError::JsonParsing(_))));
    }
}
