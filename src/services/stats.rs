use crate::domain::catalog::StoreStats;
use crate::repository::StatsReader;
use crate::services::ServiceResult;

/// Row counts for all five tables.
pub fn load_stats<R>(repo: &R) -> ServiceResult<StoreStats>
where
    R: StatsReader + ?Sized,
{
    Ok(repo.load_stats()?)
}
