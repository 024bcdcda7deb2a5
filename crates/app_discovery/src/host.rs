//! Repository host seam.

use async_trait::async_trait;

use crate::{
    error::DiscoveryError,
    model::{FileContents, RepoInfo, RepoSummary},
};

/// Read-only view of a code hosting service. Missing resources are `Ok(None)`.
#[async_trait]
pub trait RepoHost {
    /// One page (1-based) of `user`'s public repositories.
    async fn list_repos(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Option<Vec<RepoSummary>>, DiscoveryError>;

    async fn repo_info(&self, owner: &str, repo: &str)
        -> Result<Option<RepoInfo>, DiscoveryError>;

    /// File metadata and base64 content of `path` on `branch`.
    async fn file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<FileContents>, DiscoveryError>;
}
