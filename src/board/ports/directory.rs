//! Directory ports resolving project and member summaries for the board
//! read path.
//!
//! Project and member management live outside this subsystem; these
//! read-only lookups exist so fetched tasks can be denormalized without
//! further round trips, and so workspace access can be gated on
//! membership. A summary that fails to resolve is an absence, not an
//! error.

use crate::board::domain::{MemberId, MemberProfile, ProjectId, ProjectSummary, UserId, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read-only lookup of project summaries.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Returns the summaries of the given projects that still resolve;
    /// unknown ids are silently omitted.
    async fn find_many(&self, ids: &[ProjectId]) -> DirectoryResult<Vec<ProjectSummary>>;
}

/// Read-only lookup of workspace member profiles.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Returns the profiles of the given members that still resolve;
    /// unknown ids are silently omitted.
    async fn find_many(&self, ids: &[MemberId]) -> DirectoryResult<Vec<MemberProfile>>;

    /// Returns the membership linking a user to a workspace, or `None`
    /// when the user is not a member.
    async fn find_for_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> DirectoryResult<Option<MemberProfile>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Lookup-layer failure.
    #[error("directory error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
