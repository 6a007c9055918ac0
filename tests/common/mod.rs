//! Helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use sign_recipes::db::{DbPool, establish_connection_pool, run_migrations};
use sign_recipes::domain::catalog::CatalogUpload;
use sign_recipes::domain::material::NewMaterial;
use sign_recipes::domain::process::NewProcess;
use sign_recipes::domain::product::NewProduct;
use tempfile::TempDir;

/// Migrated SQLite database living in its own temporary directory.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        run_migrations(&mut conn).expect("Migrations failed");

        TestDb { pool, path, dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// One banner product with three materials and two processes, one of them a
/// sub-process.
pub fn banner_catalog() -> CatalogUpload {
    CatalogUpload {
        products: vec![
            NewProduct::new("PRD-0001", "Banner A", "Banners")
                .with_flags(true, false)
                .with_short_description("PVC banner with eyelets"),
        ],
        materials: vec![
            NewMaterial::new("MAT-PVC-440", "PVC Banner 440gsm", "PVC"),
            NewMaterial::new("MAT-EYE", "Brass eyelets", "Hardware"),
            NewMaterial::new("MAT-INK", "Solvent ink", "Ink"),
        ],
        processes: vec![
            NewProcess::new("PRC-PRINT", "Print", "Print").with_parent(1, 0),
            NewProcess::new("PRC-PRINT-QC", "Print QC", "Print").with_parent(2, 1),
        ],
    }
}
