use crate::db::{DbConnection, DbPool};
use crate::domain::{
    catalog::{CatalogCounts, CatalogSample, CatalogUpload, SampleLimits, StoreStats},
    chat_session::{ChatSession, NewChatSession},
    product::Product,
    recipe::{NewRecipeLine, RecipeLine},
};

pub mod catalog;
pub mod chat_session;
pub mod errors;
pub mod recipe;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the product, material and process catalog.
pub trait CatalogReader {
    fn count_catalog(&self) -> RepositoryResult<CatalogCounts>;
    fn sample_catalog(&self, limits: SampleLimits) -> RepositoryResult<CatalogSample>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

/// Wholesale replacement of the catalog.
pub trait CatalogWriter {
    /// Delete every product, material, process and recipe, then insert
    /// `upload`, all in one transaction.
    fn replace_catalog(&self, upload: &CatalogUpload) -> RepositoryResult<CatalogCounts>;
}

pub trait RecipeReader {
    /// Lines of the most recent generation for `product_code`, ordered by
    /// sequence and then by insertion order. Empty when nothing was generated.
    fn list_latest_recipe(&self, product_code: &str) -> RepositoryResult<Vec<RecipeLine>>;
}

pub trait RecipeWriter {
    /// Store one generation together with the chat turn that produced it.
    fn save_generation(
        &self,
        lines: &[NewRecipeLine],
        session: &NewChatSession,
    ) -> RepositoryResult<usize>;
}

pub trait ChatSessionReader {
    fn list_chat_sessions(&self, session_id: &str) -> RepositoryResult<Vec<ChatSession>>;
}

pub trait ChatSessionWriter {
    fn create_chat_session(&self, session: &NewChatSession) -> RepositoryResult<()>;
}

pub trait StatsReader {
    fn load_stats(&self) -> RepositoryResult<StoreStats>;
}
