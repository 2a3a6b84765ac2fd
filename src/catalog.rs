use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, StoreError};
use crate::models::Product;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

// ---------------------------------------------------------------------------
// Catalog store
// ---------------------------------------------------------------------------

/// Read-only product list, seeded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-constructed products.
    ///
    /// Insertion order is kept; duplicate ids are rejected.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(p.id.as_str()) {
                return Err(StoreError::DuplicateProduct { id: p.id.clone() });
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// The ten-product demo catalog compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// All products in seed order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// Exact-match lookup by id.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`find_product`](Self::find_product), for callers that propagate errors.
    pub fn get(&self, id: &str) -> Result<&Product> {
        self.find_product(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Asset resolution
// ---------------------------------------------------------------------------

/// Lookup table from a product image key to a file on disk.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    entries: HashMap<String, PathBuf>,
}

impl AssetMap {
    /// Map every image key in `catalog` to `asset_dir/<key>`.
    pub fn for_catalog(catalog: &Catalog, asset_dir: impl AsRef<Path>) -> Self {
        let asset_dir = asset_dir.as_ref();
        let entries = catalog
            .list_products()
            .iter()
            .map(|p| (p.image.clone(), asset_dir.join(&p.image)))
            .collect();
        Self { entries }
    }

    pub fn resolve(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
