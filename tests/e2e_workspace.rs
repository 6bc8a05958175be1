//! End-to-end tests for team workspaces and module access.
//!
//! These tests drive the workspace context against the in-memory team
//! directory. Run with: `cargo test --test e2e_workspace`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use paddock::modules::ModuleSettings;
use paddock::teams::{CreateTeam, RoleUpdate};
use paddock::{
    CurrentUser, InMemoryTeamDirectory, LocalStore, MemoryStore, ModuleId, ModuleRegistry,
    PaddockConfig, PaddockError, RouteDecision, Team, TeamDirectory, TeamId, UserId, Workspace,
    WorkspaceContext,
};

type Context = WorkspaceContext<InMemoryTeamDirectory, MemoryStore>;

async fn signed_in(directory: &Arc<InMemoryTeamDirectory>, uid: &str) -> (MemoryStore, Context) {
    let store = MemoryStore::new();
    let mut ctx =
        WorkspaceContext::new(Arc::clone(directory), store.clone(), PaddockConfig::default());
    ctx.load(Some(CurrentUser::new(uid))).await.unwrap();
    (store, ctx)
}

async fn select(ctx: &mut Context, team_id: &TeamId) {
    ctx.request_switch(Workspace::Team(team_id.clone())).unwrap();
    ctx.confirm_switch().await.unwrap();
}

fn budget() -> ModuleId {
    ModuleId::from("budget")
}

#[tokio::test]
async fn test_owner_denies_module_to_member() {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let registry = ModuleRegistry::default();

    let (_, mut owner) = signed_in(&directory, "A").await;
    let team = owner.create_team("Apex Karting", "#3b82f6").await.unwrap();

    let (_, mut member) = signed_in(&directory, "B").await;
    member.join_team(&team.code.to_lowercase()).await.unwrap();
    select(&mut member, &team.id).await;

    // default allow before any override exists
    assert!(member.can_access(&registry, &budget()));

    // owner stages a denial and commits it
    owner.load(Some(CurrentUser::new("A"))).await.unwrap();
    let mut editor = owner.role_editor(&team.id).unwrap();
    assert!(editor.set_module_permission(&"B".into(), &budget(), false).is_applied());
    let stored = owner.commit_roles(&mut editor).await.unwrap();
    assert!(!editor.is_dirty());

    // the member sees the pushed record
    member.apply_team_update(stored).await.unwrap();
    assert!(!member.can_access(&registry, &budget()));
    assert_eq!(
        member.route(&registry, &budget()),
        RouteDecision::Redirect("/dashboard".to_owned())
    );
    assert_eq!(member.route(&registry, &"setup-guide".into()), RouteDecision::Render);

    // the same member is unrestricted in their personal workspace
    member.request_switch(Workspace::Personal).unwrap();
    member.confirm_switch().await.unwrap();
    assert!(member.can_access(&registry, &budget()));
}

#[tokio::test]
async fn test_promoted_admin_loses_overrides() {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let registry = ModuleRegistry::default();

    let (_, mut owner) = signed_in(&directory, "A").await;
    let team = owner.create_team("Apex Karting", "#3b82f6").await.unwrap();
    let (_, mut member) = signed_in(&directory, "B").await;
    member.join_team(&team.code).await.unwrap();

    owner.load(Some(CurrentUser::new("A"))).await.unwrap();
    let mut editor = owner.role_editor(&team.id).unwrap();
    editor.set_module_permission(&"B".into(), &budget(), false);
    owner.commit_roles(&mut editor).await.unwrap();

    assert!(editor.toggle_admin(&"B".into()).is_applied());
    let stored = owner.commit_roles(&mut editor).await.unwrap();

    assert!(stored.permissions.for_member(&"B".into()).is_none());
    assert!(stored.is_admin(&"B".into()));
    assert!(stored.effective_admins().contains(&UserId::from("A")));

    member.apply_team_update(stored).await.unwrap();
    select(&mut member, &team.id).await;
    assert_eq!(member.visible_modules(&registry).len(), registry.len());
}

#[tokio::test]
async fn test_team_cap_scenario() {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let (_, mut ctx) = signed_in(&directory, "A").await;

    for i in 0..5 {
        ctx.create_team(&format!("Team {i}"), "#fff").await.unwrap();
    }

    let err = ctx.create_team("X", "#fff").await.unwrap_err();

    assert_eq!(err, PaddockError::TeamLimitReached { max: 5 });
    assert_eq!(directory.len(), 5);
    assert_eq!(ctx.teams().len(), 5);
}

#[tokio::test]
async fn test_join_refused_at_cap() {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let (_, mut other) = signed_in(&directory, "Z").await;
    let target = other.create_team("Open Team", "#fff").await.unwrap();

    let (_, mut ctx) = signed_in(&directory, "A").await;
    for i in 0..5 {
        ctx.create_team(&format!("Team {i}"), "#fff").await.unwrap();
    }

    let err = ctx.join_team(&target.code).await.unwrap_err();

    assert_eq!(err, PaddockError::TeamLimitReached { max: 5 });
    let stored = directory.find_by_id(&target.id).await.unwrap().unwrap();
    assert_eq!(stored.members, vec![UserId::from("Z")]);
}

#[tokio::test]
async fn test_stale_selection_scenario() {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let store = MemoryStore::new();
    store.set("selectedTeamId", "Z").unwrap();

    let mut ctx: Context =
        WorkspaceContext::new(Arc::clone(&directory), store.clone(), PaddockConfig::default());
    ctx.load(Some(CurrentUser::new("A"))).await.unwrap();

    assert!(ctx.workspace().is_personal());
    assert!(ctx.current_team().is_none());
    assert!(store.get("selectedTeamId").unwrap().is_none());
}

#[tokio::test]
async fn test_selection_survives_reload() {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let (store, mut ctx) = signed_in(&directory, "A").await;
    let team = ctx.create_team("Apex", "#fff").await.unwrap();
    select(&mut ctx, &team.id).await;

    let mut reloaded: Context =
        WorkspaceContext::new(Arc::clone(&directory), store, PaddockConfig::default());
    reloaded.load(Some(CurrentUser::new("A"))).await.unwrap();

    assert_eq!(reloaded.workspace(), &Workspace::Team(team.id.clone()));
    assert_eq!(reloaded.current_team().map(|t| t.name.as_str()), Some("Apex"));
}

#[tokio::test]
async fn test_membership_loss_forces_personal() {
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let (_, mut owner) = signed_in(&directory, "A").await;
    let team = owner.create_team("Apex", "#fff").await.unwrap();

    let (store, mut member) = signed_in(&directory, "B").await;
    member.join_team(&team.code).await.unwrap();
    select(&mut member, &team.id).await;

    // a switch was pending when the member got removed
    member.request_switch(Workspace::Personal).unwrap();
    let removed = directory.remove_member(&team.id, &"B".into()).await.unwrap();
    member.apply_team_update(removed).await.unwrap();

    assert!(member.workspace().is_personal());
    assert!(member.pending_switch().is_none());
    assert!(member.teams().is_empty());
    assert!(store.get("selectedTeamId").unwrap().is_none());
}

#[tokio::test]
async fn test_module_layout_is_local_to_the_device() {
    let store = MemoryStore::new();
    let settings = ModuleSettings::from_keys(store.clone(), &PaddockConfig::default().storage);

    let mut registry = settings.load().unwrap();
    registry.toggle("budget").unwrap();
    registry.toggle("home").unwrap();
    settings.save(&registry).unwrap();

    let reloaded = settings.load().unwrap();
    assert!(store.get("app_modules").unwrap().is_some());
    assert!(!reloaded.get("budget").unwrap().enabled);
    assert!(reloaded.get("home").unwrap().enabled);

    // a disabled module is closed even to the owner
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let (_, mut owner) = signed_in(&directory, "A").await;
    let team = owner.create_team("Apex", "#fff").await.unwrap();
    select(&mut owner, &team.id).await;
    assert!(!owner.can_access(&reloaded, &budget()));
}

/// Team directory whose role updates fail while `offline` is set.
struct FlakyDirectory {
    inner: InMemoryTeamDirectory,
    offline: AtomicBool,
}

#[async_trait]
impl TeamDirectory for FlakyDirectory {
    async fn create(&self, data: CreateTeam) -> Result<Team, PaddockError> {
        self.inner.create(data).await
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, PaddockError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Team>, PaddockError> {
        self.inner.find_by_code(code).await
    }

    async fn find_by_member(&self, user: &UserId) -> Result<Vec<Team>, PaddockError> {
        self.inner.find_by_member(user).await
    }

    async fn add_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError> {
        self.inner.add_member(id, user).await
    }

    async fn remove_member(&self, id: &TeamId, user: &UserId) -> Result<Team, PaddockError> {
        self.inner.remove_member(id, user).await
    }

    async fn update_roles(&self, id: &TeamId, update: &RoleUpdate) -> Result<Team, PaddockError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PaddockError::Directory("network unavailable".into()));
        }
        self.inner.update_roles(id, update).await
    }
}

#[tokio::test]
async fn test_failed_commit_keeps_staged_edits() {
    let directory = Arc::new(FlakyDirectory {
        inner: InMemoryTeamDirectory::new(),
        offline: AtomicBool::new(false),
    });
    let mut owner = WorkspaceContext::new(
        Arc::clone(&directory),
        MemoryStore::new(),
        PaddockConfig::default(),
    );
    owner.load(Some(CurrentUser::new("A"))).await.unwrap();
    let team = owner.create_team("Apex", "#fff").await.unwrap();
    directory.add_member(&team.id, &"B".into()).await.unwrap();
    owner.load(Some(CurrentUser::new("A"))).await.unwrap();

    let mut editor = owner.role_editor(&team.id).unwrap();
    editor.set_module_permission(&"B".into(), &budget(), false);

    directory.offline.store(true, Ordering::SeqCst);
    let err = owner.commit_roles(&mut editor).await.unwrap_err();
    assert!(matches!(err, PaddockError::Directory(_)));
    assert!(editor.is_dirty());
    assert!(!editor.member_has_access(&"B".into(), &budget()));

    // manual retry once the network is back
    directory.offline.store(false, Ordering::SeqCst);
    let stored = owner.commit_roles(&mut editor).await.unwrap();
    assert!(stored.permissions.is_denied(&"B".into(), &budget()));
    assert!(!editor.is_dirty());
}
