use std::sync::Arc;

use async_trait::async_trait;

use super::PermissionOverrides;
use super::types::Team;
use crate::PaddockError;
use crate::identity::{TeamId, UserId};

#[derive(Debug, Clone)]
pub struct CreateTeam {
    pub name: String,
    pub color: String,
    pub code: String,
    pub created_by: UserId,
}

/// Role and permission changes committed in one write.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleUpdate {
    /// Final admin list, owner included.
    pub admins: Vec<UserId>,
    /// Full replacement for the team's override map.
    pub permissions: PermissionOverrides,
}

/// The document store holding team records.
///
/// Writes are last-write-wins on the whole team record.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Stores a new team with its creator as the only member.
    async fn create(&self, data: CreateTeam) -> Result<Team, PaddockError>;
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, PaddockError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Team>, PaddockError>;
    /// All teams whose members contain `user`.
    async fn find_by_member(&self, user: &UserId) -> Result<Vec<Team>, PaddockError>;
    /// Set-union of `user` into the member list.
    async fn add_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError>;
    async fn remove_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError>;
    /// Replaces `admins` and `permissions` together.
    async fn update_roles(&self, id: &TeamId, update: &RoleUpdate) -> Result<Team, PaddockError>;
}

#[async_trait]
impl<T: TeamDirectory + ?Sized> TeamDirectory for Arc<T> {
    async fn create(&self, data: CreateTeam) -> Result<Team, PaddockError> {
        (**self).create(data).await
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, PaddockError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Team>, PaddockError> {
        (**self).find_by_code(code).await
    }

    async fn find_by_member(&self, user: &UserId) -> Result<Vec<Team>, PaddockError> {
        (**self).find_by_member(user).await
    }

    async fn add_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError> {
        (**self).add_member(id, user).await
    }

    async fn remove_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError> {
        (**self).remove_member(id, user).await
    }

    async fn update_roles(&self, id: &TeamId, update: &RoleUpdate) -> Result<Team, PaddockError> {
        (**self).update_roles(id, update).await
    }
}
