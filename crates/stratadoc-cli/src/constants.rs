//! File-backed constant store.
//!
//! Each namespace's constants live in `<root>/<A>/<B>/constants.toml` as a
//! flat table of name -> value. Every file is read once, up front.

use std::path::Path;

use stratadoc_core::constants::{store_key, ConstantSet};
use stratadoc_core::{ConstantStoreError, MemoryConstantStore};

/// Loads the constant files of `namespaces` below `root`.
pub struct FileConstantStore;

impl FileConstantStore {
    /// Read the constant file of every namespace that has one. Missing
    /// files are skipped; the namespace then has no constants.
    pub fn load<'n>(
        root: &Path,
        namespaces: impl IntoIterator<Item = &'n str>,
    ) -> Result<MemoryConstantStore, ConstantStoreError> {
        let mut store = MemoryConstantStore::new();

        for namespace in namespaces {
            let path = root.join(store_key(namespace));
            if !path.is_file() {
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|source| ConstantStoreError::Io {
                path: path.clone(),
                source,
            })?;
            let table: toml::Table = toml::from_str(&content).map_err(|source| ConstantStoreError::Parse {
                path: path.clone(),
                source,
            })?;

            let constants: ConstantSet = table
                .into_iter()
                .map(|(name, value)| {
                    let value = match value {
                        toml::Value::String(text) => text,
                        other => other.to_string(),
                    };
                    (name, value)
                })
                .collect();

            tracing::debug!(namespace, path = %path.display(), count = constants.len(), "loaded constants");
            store = store.with(namespace, constants);
        }

        Ok(store)
    }
}
