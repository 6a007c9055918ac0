use serde::Serialize;

use crate::domain::material::{Material, NewMaterial};
use crate::domain::process::{NewProcess, Process};
use crate::domain::product::{NewProduct, Product};

/// Row counts of the three catalog tables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub products: usize,
    pub materials: usize,
    pub processes: usize,
}

/// Row counts of every table in the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub products: usize,
    pub materials: usize,
    pub processes: usize,
    pub recipes: usize,
    pub chat_sessions: usize,
}

/// Maximum number of rows per table included in a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLimits {
    pub products: usize,
    pub materials: usize,
    pub processes: usize,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            products: 10,
            materials: 20,
            processes: 30,
        }
    }
}

/// Bounded slice of the catalog used as prompt context. Only top-level
/// processes are included.
#[derive(Debug, Default, Clone)]
pub struct CatalogSample {
    pub products: Vec<Product>,
    pub materials: Vec<Material>,
    pub processes: Vec<Process>,
}

/// Fully parsed catalog ready to replace the stored one.
#[derive(Debug, Default, Clone)]
pub struct CatalogUpload {
    pub products: Vec<NewProduct>,
    pub materials: Vec<NewMaterial>,
    pub processes: Vec<NewProcess>,
}

impl CatalogUpload {
    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            products: self.products.len(),
            materials: self.materials.len(),
            processes: self.processes.len(),
        }
    }
}
