use mockall::mock;

use super::{
    CatalogReader, CatalogWriter, ChatSessionWriter, RecipeReader, RecipeWriter,
    RepositoryResult, StatsReader,
};
use crate::domain::{
    catalog::{CatalogCounts, CatalogSample, CatalogUpload, SampleLimits, StoreStats},
    chat_session::NewChatSession,
    product::Product,
    recipe::{NewRecipeLine, RecipeLine},
};

mock! {
    pub CatalogReader {}

    impl CatalogReader for CatalogReader {
        fn count_catalog(&self) -> RepositoryResult<CatalogCounts>;
        fn sample_catalog(&self, limits: SampleLimits) -> RepositoryResult<CatalogSample>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub CatalogWriter {}

    impl CatalogWriter for CatalogWriter {
        fn replace_catalog(&self, upload: &CatalogUpload) -> RepositoryResult<CatalogCounts>;
    }
}

mock! {
    pub RecipeReader {}

    impl RecipeReader for RecipeReader {
        fn list_latest_recipe(&self, product_code: &str) -> RepositoryResult<Vec<RecipeLine>>;
    }
}

mock! {
    pub StatsReader {}

    impl StatsReader for StatsReader {
        fn load_stats(&self) -> RepositoryResult<StoreStats>;
    }
}

// Everything the chat workflow touches, in one mock.
mock! {
    pub ChatRepository {}

    impl CatalogReader for ChatRepository {
        fn count_catalog(&self) -> RepositoryResult<CatalogCounts>;
        fn sample_catalog(&self, limits: SampleLimits) -> RepositoryResult<CatalogSample>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }

    impl RecipeWriter for ChatRepository {
        fn save_generation(&self, lines: &[NewRecipeLine], session: &NewChatSession) -> RepositoryResult<usize>;
    }

    impl ChatSessionWriter for ChatRepository {
        fn create_chat_session(&self, session: &NewChatSession) -> RepositoryResult<()>;
    }
}
