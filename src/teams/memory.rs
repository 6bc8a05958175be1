//! In-memory team directory.
//!
//! Suitable for development, tests and offline demos.

#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{CreateTeam, RoleUpdate, TeamDirectory};
use super::types::Team;
use super::PermissionOverrides;
use crate::PaddockError;
use crate::crypto::generate_document_id;
use crate::identity::{TeamId, UserId};

/// Team directory backed by a `HashMap` behind a `RwLock`.
///
/// Teams are lost when the process exits.
pub struct InMemoryTeamDirectory {
    teams: RwLock<HashMap<TeamId, Team>>,
}

impl InMemoryTeamDirectory {
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a fully formed record, replacing any team with the same id.
    pub fn insert(&self, team: Team) -> Result<(), PaddockError> {
        self.teams
            .write()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?
            .insert(team.id.clone(), team);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.teams.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryTeamDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamDirectory for InMemoryTeamDirectory {
    async fn create(&self, data: CreateTeam) -> Result<Team, PaddockError> {
        let team = Team {
            id: TeamId::new(generate_document_id()),
            name: data.name,
            color: data.color,
            code: data.code,
            members: vec![data.created_by.clone()],
            admins: vec![data.created_by.clone()],
            created_by: data.created_by,
            permissions: PermissionOverrides::new(),
            created_at: Utc::now(),
        };

        let mut teams = self
            .teams
            .write()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;
        teams.insert(team.id.clone(), team.clone());

        Ok(team)
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, PaddockError> {
        let teams = self
            .teams
            .read()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;
        Ok(teams.get(id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Team>, PaddockError> {
        let teams = self
            .teams
            .read()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;
        Ok(teams.values().find(|t| t.code == code).cloned())
    }

    async fn find_by_member(&self, user: &UserId) -> Result<Vec<Team>, PaddockError> {
        let teams = self
            .teams
            .read()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;
        let mut found: Vec<Team> = teams
            .values()
            .filter(|t| t.is_member(user))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn add_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;

        let team = teams.get_mut(id).ok_or(PaddockError::TeamNotFound)?;
        if !team.members.contains(user) {
            team.members.push(user.clone());
        }

        Ok(team.clone())
    }

    async fn remove_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;

        let team = teams.get_mut(id).ok_or(PaddockError::TeamNotFound)?;
        team.members.retain(|m| m != user);
        team.admins.retain(|m| m != user);
        team.permissions.clear_member(user);

        Ok(team.clone())
    }

    async fn update_roles(&self, id: &TeamId, update: &RoleUpdate) -> Result<Team, PaddockError> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;

        let team = teams.get_mut(id).ok_or(PaddockError::TeamNotFound)?;
        team.admins.clone_from(&update.admins);
        team.permissions.clone_from(&update.permissions);

        Ok(team.clone())
    }
}
