//! # Method Catalog
//!
//! The catalog is the static table of remote operations the client knows about, together
//! with the parameter contract of each one. It is decoded once from a declarative JSON
//! document and is read-only afterwards.
//!
//! ## Document format
//!
//! ```json
//! {
//!   "methods": [
//!     {
//!       "name": "domain.resource.list",
//!       "params": [
//!         { "name": "DomainID", "type": "integer", "required": true },
//!         { "name": "ResourceID", "type": "integer", "required": false }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Name resolution
//!
//! Lookups are case-insensitive and accept `_` as a word separator in place of the
//! catalog's `.` path separator, so `Domain_Resource_List` resolves to `domain.resource.list`.
mod types;

pub use types::*;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The Linode API catalog bundled with the library.
pub const LINODE_CATALOG: &str = include_str!("catalog/linode.json");

/// Errors that can occur while loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': '{source}'")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed catalog document: '{0}'")]
    Parse(#[from] serde_json::Error),
    #[error("Method '{0}' is declared more than once")]
    DuplicateMethod(String),
    #[error("Catalog contains a method with an empty name")]
    EmptyName,
}

#[derive(Deserialize)]
struct CatalogDocument {
    methods: Vec<MethodSpec>,
}

/// An immutable mapping from canonical method name to its [`MethodSpec`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    methods: BTreeMap<String, MethodSpec>,
}

impl Catalog {
    /// Decodes a catalog from a JSON document.
    ///
    /// Method names are canonicalized on load, two declarations that canonicalize to the
    /// same name are rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(Catalog)` - The decoded catalog.
    /// * `Err(CatalogError)` - If the document is malformed or declares a method twice.
    pub fn from_document(document: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(document)?;
        Self::from_methods(document.methods)
    }

    /// Reads and decodes a catalog document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_document(&document)
    }

    /// The catalog bundled with the library, see [`LINODE_CATALOG`].
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_document(LINODE_CATALOG)
    }

    /// Builds a catalog from already decoded method declarations.
    pub fn from_methods(
        methods: impl IntoIterator<Item = MethodSpec>,
    ) -> Result<Self, CatalogError> {
        let mut table = BTreeMap::new();

        for mut method in methods {
            let name = normalize_method_name(&method.name);
            if name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if table.contains_key(&name) {
                return Err(CatalogError::DuplicateMethod(name));
            }
            method.name = name.clone();
            table.insert(name, method);
        }

        tracing::debug!(methods = table.len(), "catalog loaded");

        Ok(Self { methods: table })
    }

    /// Resolves a symbolic method name to its declaration.
    ///
    /// # Returns
    ///
    /// * `Some(&MethodSpec)` - The declaration, if the normalized name is in the catalog.
    /// * `None` - Otherwise.
    pub fn lookup(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.get(&normalize_method_name(name))
    }

    /// Iterates over all declared methods, ordered by canonical name.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.methods.values()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Canonicalizes a symbolic method name: trims it, lowercases it and turns `_` into `.`.
pub fn normalize_method_name(name: &str) -> String {
    name.trim().replace('_', ".").to_lowercase()
}
