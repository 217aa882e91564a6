use async_trait::async_trait;

use crate::error::AppResult;

/// Read-only view of a repository's staged state.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Paths whose staged content differs from the last commit.
    async fn staged_paths(&self) -> AppResult<Vec<String>>;

    /// Staged paths that are new to the index (not in the last commit).
    async fn newly_added_paths(&self) -> AppResult<Vec<String>>;

    /// Staged diff text for a single path.
    async fn cached_diff(&self, path: &str) -> AppResult<String>;
}
