use std::sync::Arc;

use chrono::Utc;

use super::{SwitchRequest, Workspace, WorkspaceSelector};
use crate::PaddockError;
use crate::access::{AccessResolver, RouteDecision};
use crate::config::PaddockConfig;
use crate::events::{WorkspaceEvent, dispatch};
use crate::identity::{CurrentUser, ModuleId, TeamId};
use crate::modules::{ModuleDescriptor, ModuleRegistry};
use crate::storage::LocalStore;
use crate::teams::{
    CreateTeamAction, CreateTeamInput, JoinTeamAction, LeaveTeamAction, RoleEditor, Team,
    TeamDirectory, UpdateTeamRolesAction,
};

/// Application state for one signed-in session.
///
/// Owns the current user, their team list and the workspace selection, and
/// routes team operations through the directory so the local list never
/// drifts from what was written.
pub struct WorkspaceContext<D: TeamDirectory + ?Sized, S: LocalStore> {
    directory: Arc<D>,
    config: PaddockConfig,
    user: Option<CurrentUser>,
    teams: Vec<Team>,
    selector: WorkspaceSelector<S>,
}

impl<D: TeamDirectory + ?Sized, S: LocalStore> WorkspaceContext<D, S> {
    pub fn new(directory: Arc<D>, store: S, config: PaddockConfig) -> Self {
        let selector = WorkspaceSelector::new(store, config.storage.selected_team.clone());
        Self {
            directory,
            config,
            user: None,
            teams: Vec::new(),
            selector,
        }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Teams the user belongs to, oldest first.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn workspace(&self) -> &Workspace {
        self.selector.current()
    }

    pub fn pending_switch(&self) -> Option<&SwitchRequest> {
        self.selector.pending()
    }

    /// The selected team record, or `None` in the personal workspace.
    pub fn current_team(&self) -> Option<&Team> {
        let id = self.selector.current().team_id()?;
        self.teams.iter().find(|t| t.id == *id)
    }

    /// Loads the user's teams and restores the persisted selection.
    ///
    /// With no user the context is emptied and left in the personal
    /// workspace.
    pub async fn load(&mut self, user: Option<CurrentUser>) -> Result<(), PaddockError> {
        let Some(user) = user else {
            self.user = None;
            self.teams.clear();
            self.selector.reset();
            return Ok(());
        };

        let teams = self
            .directory
            .find_by_member(&user.uid)
            .await
            .inspect_err(|e| {
                log::error!(
                    target: "paddock",
                    "msg=\"failed to fetch teams\", user_id=\"{}\", error=\"{e}\"",
                    user.uid
                );
            })?;

        let stale = self.selector.restore(&teams)?;
        self.teams = teams;

        if let Some(stale_team_id) = stale {
            dispatch(WorkspaceEvent::SelectionReset {
                user_id: user.uid.clone(),
                stale_team_id,
                at: Utc::now(),
            })
            .await;
        }

        log::debug!(
            target: "paddock",
            "msg=\"workspace loaded\", user_id=\"{}\", teams={}",
            user.uid,
            self.teams.len()
        );
        self.user = Some(user);

        Ok(())
    }

    /// Forgets the user and falls back to the personal workspace.
    pub async fn sign_out(&mut self) -> Result<(), PaddockError> {
        let Some(user) = self.user.take() else {
            return Ok(());
        };

        self.teams.clear();
        self.selector.force_personal()?;

        dispatch(WorkspaceEvent::SignedOut {
            user_id: user.uid.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(target: "paddock", "msg=\"signed out\", user_id=\"{}\"", user.uid);

        Ok(())
    }

    /// Creates a team owned by the user. The selection does not change.
    pub async fn create_team(&mut self, name: &str, color: &str) -> Result<Team, PaddockError> {
        let user = self.require_user()?;

        let action =
            CreateTeamAction::with_config(Arc::clone(&self.directory), self.config.teams.clone());
        let team = action
            .execute(CreateTeamInput {
                name: name.to_owned(),
                color: color.to_owned(),
                created_by: user.uid.clone(),
            })
            .await?;

        self.upsert_team(team.clone());
        Ok(team)
    }

    /// Joins a team by code. The selection does not change.
    pub async fn join_team(&mut self, code: &str) -> Result<Team, PaddockError> {
        let user = self.require_user()?;

        let action =
            JoinTeamAction::with_config(Arc::clone(&self.directory), self.config.teams.clone());
        let team = action.execute(code, &user.uid).await?;

        self.upsert_team(team.clone());
        Ok(team)
    }

    /// Leaves one of the user's teams.
    ///
    /// When the team was selected the workspace falls back to personal.
    pub async fn leave_team(&mut self, team_id: &TeamId) -> Result<(), PaddockError> {
        let user = self.require_user()?;
        if !self.teams.iter().any(|t| t.id == *team_id) {
            return Err(PaddockError::TeamNotFound);
        }

        LeaveTeamAction::new(Arc::clone(&self.directory))
            .execute(team_id, &user.uid)
            .await?;

        self.drop_team(team_id).await
    }

    /// Stages a switch that must be confirmed with
    /// [`confirm_switch`](Self::confirm_switch).
    pub fn request_switch(
        &mut self,
        target: Workspace,
    ) -> Result<Option<SwitchRequest>, PaddockError> {
        self.require_user()?;
        self.selector.request_switch(target, &self.teams)
    }

    /// Applies the pending switch.
    pub async fn confirm_switch(&mut self) -> Result<Option<Workspace>, PaddockError> {
        let user = self.require_user()?;

        let Some(workspace) = self.selector.confirm(&self.teams)? else {
            return Ok(None);
        };

        dispatch(WorkspaceEvent::WorkspaceSwitched {
            user_id: user.uid.clone(),
            team_id: workspace.team_id().cloned(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "paddock",
            "msg=\"workspace switched\", user_id=\"{}\", team_id=\"{}\"",
            user.uid,
            workspace.team_id().map_or("personal", TeamId::as_str)
        );

        Ok(Some(workspace))
    }

    pub fn cancel_switch(&mut self) -> Option<SwitchRequest> {
        self.selector.cancel()
    }

    /// Applies a pushed team record from the directory subscription.
    ///
    /// A record that no longer lists the user removes the team locally and,
    /// if it was selected, forces the personal workspace.
    pub async fn apply_team_update(&mut self, team: Team) -> Result<(), PaddockError> {
        let Some(uid) = self.user.as_ref().map(|u| u.uid.clone()) else {
            return Ok(());
        };

        if team.is_member(&uid) {
            self.upsert_team(team);
            return Ok(());
        }

        if !self.teams.iter().any(|t| t.id == team.id) {
            return Ok(());
        }

        log::info!(
            target: "paddock",
            "msg=\"membership lost\", team_id=\"{}\", user_id=\"{uid}\"",
            team.id
        );
        self.drop_team(&team.id).await
    }

    /// Opens a role editor on one of the user's teams.
    pub fn role_editor(&self, team_id: &TeamId) -> Option<RoleEditor> {
        let user = self.user.as_ref()?;
        let team = self.teams.iter().find(|t| t.id == *team_id)?;
        Some(RoleEditor::open(team, &user.uid))
    }

    /// Commits the editor's staged edits.
    ///
    /// On success the editor is re-based on the stored record. On failure
    /// it keeps its staged edits.
    pub async fn commit_roles(&mut self, editor: &mut RoleEditor) -> Result<Team, PaddockError> {
        let team = UpdateTeamRolesAction::new(Arc::clone(&self.directory))
            .execute(editor)
            .await?;

        editor.reset(&team);
        self.upsert_team(team.clone());
        Ok(team)
    }

    /// Whether the user can open `module_id` in the selected workspace.
    pub fn can_access(&self, registry: &ModuleRegistry, module_id: &ModuleId) -> bool {
        self.resolver(registry)
            .check(self.user.as_ref(), self.current_team(), module_id)
            .is_granted()
    }

    pub fn route(&self, registry: &ModuleRegistry, module_id: &ModuleId) -> RouteDecision {
        self.resolver(registry)
            .route(self.user.as_ref(), self.current_team(), module_id)
    }

    /// Sidebar entries for the selected workspace.
    pub fn visible_modules<'a>(
        &'a self,
        registry: &'a ModuleRegistry,
    ) -> Vec<&'a ModuleDescriptor> {
        self.resolver(registry).visible_modules(self.user.as_ref(), self.current_team())
    }

    fn resolver<'a>(&'a self, registry: &'a ModuleRegistry) -> AccessResolver<'a> {
        AccessResolver::new(registry, &self.config.home_path)
    }

    fn require_user(&self) -> Result<CurrentUser, PaddockError> {
        self.user.clone().ok_or(PaddockError::Unauthenticated)
    }

    fn upsert_team(&mut self, team: Team) {
        match self.teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team,
            None => self.teams.push(team),
        }
    }

    async fn drop_team(&mut self, team_id: &TeamId) -> Result<(), PaddockError> {
        self.teams.retain(|t| t.id != *team_id);

        if self.selector.forget_team(team_id)? {
            if let Some(user) = self.user.as_ref() {
                dispatch(WorkspaceEvent::WorkspaceSwitched {
                    user_id: user.uid.clone(),
                    team_id: None,
                    at: Utc::now(),
                })
                .await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::teams::InMemoryTeamDirectory;

    fn context() -> (
        Arc<InMemoryTeamDirectory>,
        MemoryStore,
        WorkspaceContext<InMemoryTeamDirectory, MemoryStore>,
    ) {
        let directory = Arc::new(InMemoryTeamDirectory::new());
        let store = MemoryStore::new();
        let ctx = WorkspaceContext::new(
            Arc::clone(&directory),
            store.clone(),
            PaddockConfig::default(),
        );
        (directory, store, ctx)
    }

    #[tokio::test]
    async fn test_operations_require_user() {
        let (_, _, mut ctx) = context();

        let err = ctx.create_team("Apex", "#fff").await.unwrap_err();
        assert_eq!(err, PaddockError::Unauthenticated);
        assert_eq!(
            ctx.request_switch(Workspace::Personal).unwrap_err(),
            PaddockError::Unauthenticated
        );
    }

    #[tokio::test]
    async fn test_create_does_not_switch() {
        let (_, _, mut ctx) = context();
        ctx.load(Some(CurrentUser::new("A"))).await.unwrap();

        let team = ctx.create_team("Apex", "#fff").await.unwrap();

        assert_eq!(ctx.teams().len(), 1);
        assert!(ctx.workspace().is_personal());
        assert!(ctx.current_team().is_none());

        ctx.request_switch(Workspace::Team(team.id.clone())).unwrap();
        ctx.confirm_switch().await.unwrap();
        assert_eq!(ctx.current_team().map(|t| &t.id), Some(&team.id));
    }

    #[tokio::test]
    async fn test_leave_selected_team_falls_back() {
        let (directory, store, mut ctx) = context();
        let owner = {
            let mut owner_ctx = WorkspaceContext::new(
                Arc::clone(&directory),
                MemoryStore::new(),
                PaddockConfig::default(),
            );
            owner_ctx.load(Some(CurrentUser::new("A"))).await.unwrap();
            owner_ctx.create_team("Apex", "#fff").await.unwrap()
        };

        ctx.load(Some(CurrentUser::new("B"))).await.unwrap();
        ctx.join_team(&owner.code).await.unwrap();
        ctx.request_switch(Workspace::Team(owner.id.clone())).unwrap();
        ctx.confirm_switch().await.unwrap();

        ctx.leave_team(&owner.id).await.unwrap();

        assert!(ctx.workspace().is_personal());
        assert!(ctx.teams().is_empty());
        assert!(store.get("selectedTeamId").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_leave_unknown_team() {
        let (_, _, mut ctx) = context();
        ctx.load(Some(CurrentUser::new("A"))).await.unwrap();

        let err = ctx.leave_team(&"nope".into()).await.unwrap_err();
        assert_eq!(err, PaddockError::TeamNotFound);
    }

    #[tokio::test]
    async fn test_visible_modules_follow_selection() {
        let (directory, _, mut ctx) = context();
        let registry = ModuleRegistry::default();
        let team = {
            let mut owner_ctx = WorkspaceContext::new(
                Arc::clone(&directory),
                MemoryStore::new(),
                PaddockConfig::default(),
            );
            owner_ctx.load(Some(CurrentUser::new("A"))).await.unwrap();
            let team = owner_ctx.create_team("Apex", "#fff").await.unwrap();
            directory.add_member(&team.id, &"B".into()).await.unwrap();
            owner_ctx.load(Some(CurrentUser::new("A"))).await.unwrap();

            let mut editor = owner_ctx.role_editor(&team.id).unwrap();
            editor.set_module_permission(&"B".into(), &"budget".into(), false);
            owner_ctx.commit_roles(&mut editor).await.unwrap()
        };

        ctx.load(Some(CurrentUser::new("B"))).await.unwrap();
        assert_eq!(ctx.visible_modules(&registry).len(), registry.len());

        ctx.request_switch(Workspace::Team(team.id.clone())).unwrap();
        ctx.confirm_switch().await.unwrap();

        let visible = ctx.visible_modules(&registry);
        assert_eq!(visible.len(), registry.len() - 1);
        assert!(visible.iter().all(|m| m.id.as_str() != "budget"));
    }

    #[tokio::test]
    async fn test_sign_out_forces_personal() {
        let (_, store, mut ctx) = context();
        ctx.load(Some(CurrentUser::new("A"))).await.unwrap();
        let team = ctx.create_team("Apex", "#fff").await.unwrap();
        ctx.request_switch(Workspace::Team(team.id)).unwrap();
        ctx.confirm_switch().await.unwrap();

        ctx.sign_out().await.unwrap();

        assert!(ctx.user().is_none());
        assert!(ctx.teams().is_empty());
        assert!(ctx.workspace().is_personal());
        assert!(store.is_empty());
    }
}
