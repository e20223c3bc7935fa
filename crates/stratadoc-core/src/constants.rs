//! Per-namespace constant definitions
//!
//! Constants defined outside of classes are kept in side files, one per
//! namespace. The engine never reads those files itself; an adapter loads
//! them once and publishes a read-only [`ConstantStore`].

use std::collections::HashMap;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::namespace::{segments, ROOT_NAMESPACE};

/// File name of a namespace's constant definitions
pub const CONSTANTS_FILE: &str = "constants.toml";

/// Constant name -> value as written in source, in definition order
pub type ConstantSet = IndexMap<String, String>;

/// Lookup of constant definitions by namespace name
pub trait ConstantStore: Send + Sync {
    /// Constants defined in `namespace`, or `None` if nothing was stored
    fn constants_for(&self, namespace: &str) -> Option<&ConstantSet>;
}

/// In-memory store, immutable once built
#[derive(Debug, Clone, Default)]
pub struct MemoryConstantStore {
    sets: HashMap<String, ConstantSet>,
}

impl MemoryConstantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the constants of one namespace
    #[must_use]
    pub fn with(mut self, namespace: impl Into<String>, constants: ConstantSet) -> Self {
        self.sets.insert(namespace.into(), constants);
        self
    }

    /// Number of namespaces with stored constants
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl ConstantStore for MemoryConstantStore {
    fn constants_for(&self, namespace: &str) -> Option<&ConstantSet> {
        self.sets.get(namespace)
    }
}

/// Relative path of the constant file for `namespace`.
///
/// `A\B` maps to `A/B/constants.toml`; the root namespace maps to
/// `constants.toml`.
pub fn store_key(namespace: &str) -> PathBuf {
    let mut path = PathBuf::new();
    if namespace != ROOT_NAMESPACE {
        for segment in segments(namespace) {
            path.push(segment);
        }
    }
    path.push(CONSTANTS_FILE);
    path
}
