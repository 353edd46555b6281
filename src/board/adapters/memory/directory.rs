//! In-memory project and member directories for tests and local board
//! sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{MemberId, MemberProfile, ProjectId, ProjectSummary, UserId, WorkspaceId},
    ports::{DirectoryError, DirectoryResult, MemberDirectory, ProjectDirectory},
};

/// Thread-safe in-memory project directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectDirectory {
    state: Arc<RwLock<HashMap<ProjectId, ProjectSummary>>>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty project directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project summary.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Lookup`] when the directory lock is
    /// poisoned.
    pub fn register(&self, summary: ProjectSummary) -> DirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        state.insert(summary.id(), summary);
        Ok(())
    }

    /// Removes a project summary, simulating a project deleted by its
    /// owning subsystem.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Lookup`] when the directory lock is
    /// poisoned.
    pub fn unregister(&self, id: ProjectId) -> DirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        state.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryProjectDirectory {
    async fn find_many(&self, ids: &[ProjectId]) -> DirectoryResult<Vec<ProjectSummary>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(ids.iter().filter_map(|id| state.get(id).cloned()).collect())
    }
}

/// Thread-safe in-memory member directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberDirectory {
    state: Arc<RwLock<HashMap<MemberId, MemberProfile>>>,
}

impl InMemoryMemberDirectory {
    /// Creates an empty member directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a member profile.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Lookup`] when the directory lock is
    /// poisoned.
    pub fn register(&self, profile: MemberProfile) -> DirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        state.insert(profile.id(), profile);
        Ok(())
    }

    /// Removes a member profile, simulating a membership revoked by its
    /// owning subsystem.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Lookup`] when the directory lock is
    /// poisoned.
    pub fn unregister(&self, id: MemberId) -> DirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        state.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_many(&self, ids: &[MemberId]) -> DirectoryResult<Vec<MemberProfile>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(ids.iter().filter_map(|id| state.get(id).cloned()).collect())
    }

    async fn find_for_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> DirectoryResult<Option<MemberProfile>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(state
            .values()
            .find(|profile| {
                profile.workspace_id() == workspace_id && profile.user_id() == user_id
            })
            .cloned())
    }
}
