use serde::{Deserialize, Serialize};

use crate::PaddockError;
use crate::identity::TeamId;
use crate::storage::LocalStore;
use crate::teams::Team;

/// The data scope a user is working in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "teamId", rename_all = "lowercase")]
pub enum Workspace {
    #[default]
    Personal,
    Team(TeamId),
}

impl Workspace {
    pub fn team_id(&self) -> Option<&TeamId> {
        match self {
            Self::Personal => None,
            Self::Team(id) => Some(id),
        }
    }

    pub fn is_personal(&self) -> bool {
        matches!(self, Self::Personal)
    }
}

/// A switch waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRequest {
    pub from: Workspace,
    pub to: Workspace,
}

/// Selection state machine for the active workspace.
///
/// Every user-initiated switch goes through [`request_switch`] and
/// [`confirm`]. Sign-out and loss of membership use [`force_personal`],
/// which skips confirmation and drops any pending request.
///
/// The selected team id is persisted under a single key; the personal
/// workspace is stored as the absence of that key.
///
/// [`request_switch`]: WorkspaceSelector::request_switch
/// [`confirm`]: WorkspaceSelector::confirm
/// [`force_personal`]: WorkspaceSelector::force_personal
pub struct WorkspaceSelector<S: LocalStore> {
    store: S,
    key: String,
    current: Workspace,
    pending: Option<SwitchRequest>,
}

impl<S: LocalStore> WorkspaceSelector<S> {
    /// Starts in the personal workspace. Call [`restore`](Self::restore)
    /// once the user's teams are known.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            current: Workspace::Personal,
            pending: None,
        }
    }

    pub fn current(&self) -> &Workspace {
        &self.current
    }

    pub fn pending(&self) -> Option<&SwitchRequest> {
        self.pending.as_ref()
    }

    /// Re-validates the persisted selection against `teams`.
    ///
    /// A pointer to a team that is not in the list is removed and the
    /// selection falls back to personal. Returns the stale id, if any.
    pub fn restore(&mut self, teams: &[Team]) -> Result<Option<TeamId>, PaddockError> {
        self.pending = None;

        let Some(saved) = self.store.get(&self.key)? else {
            self.current = Workspace::Personal;
            return Ok(None);
        };

        let saved = TeamId::new(saved);
        if teams.iter().any(|t| t.id == saved) {
            self.current = Workspace::Team(saved);
            return Ok(None);
        }

        log::debug!(
            target: "paddock",
            "msg=\"stale team selection reset\", team_id=\"{saved}\""
        );
        self.store.remove(&self.key)?;
        self.current = Workspace::Personal;
        Ok(Some(saved))
    }

    /// Stages a switch to `target`.
    ///
    /// Returns `Ok(None)` when `target` is already selected. A new request
    /// replaces any earlier pending one.
    ///
    /// # Errors
    ///
    /// `PaddockError::NotAMember` when `target` is a team missing from `teams`.
    pub fn request_switch(
        &mut self,
        target: Workspace,
        teams: &[Team],
    ) -> Result<Option<SwitchRequest>, PaddockError> {
        if target == self.current {
            self.pending = None;
            return Ok(None);
        }

        ensure_member(&target, teams)?;

        let request = SwitchRequest {
            from: self.current.clone(),
            to: target,
        };
        self.pending = Some(request.clone());
        Ok(Some(request))
    }

    /// Applies the pending switch and persists it.
    ///
    /// Membership is checked again, since `teams` may have changed since the
    /// request. Returns the new workspace, or `None` when nothing was pending.
    pub fn confirm(&mut self, teams: &[Team]) -> Result<Option<Workspace>, PaddockError> {
        let Some(request) = self.pending.take() else {
            return Ok(None);
        };

        ensure_member(&request.to, teams)?;

        if let Err(e) = self.persist(&request.to) {
            self.pending = Some(request);
            return Err(e);
        }

        self.current = request.to.clone();
        Ok(Some(request.to))
    }

    /// Returns to the personal workspace in memory, leaving the persisted
    /// pointer for the next [`restore`](Self::restore).
    pub fn reset(&mut self) {
        self.current = Workspace::Personal;
        self.pending = None;
    }

    /// Drops the pending switch, if any.
    pub fn cancel(&mut self) -> Option<SwitchRequest> {
        self.pending.take()
    }

    /// Moves to the personal workspace without confirmation.
    ///
    /// Returns true when the selection changed.
    pub fn force_personal(&mut self) -> Result<bool, PaddockError> {
        self.pending = None;
        self.store.remove(&self.key)?;

        let changed = !self.current.is_personal();
        self.current = Workspace::Personal;
        Ok(changed)
    }

    /// Drops every reference to a team the user no longer belongs to.
    ///
    /// Returns true when the team was selected and the selection fell back
    /// to personal.
    pub fn forget_team(&mut self, team_id: &TeamId) -> Result<bool, PaddockError> {
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.to.team_id() == Some(team_id))
        {
            self.pending = None;
        }

        if self.current.team_id() == Some(team_id) {
            return self.force_personal();
        }
        Ok(false)
    }

    fn persist(&self, workspace: &Workspace) -> Result<(), PaddockError> {
        match workspace {
            Workspace::Personal => self.store.remove(&self.key),
            Workspace::Team(id) => self.store.set(&self.key, id.as_str()),
        }
    }
}

fn ensure_member(target: &Workspace, teams: &[Team]) -> Result<(), PaddockError> {
    match target {
        Workspace::Personal => Ok(()),
        Workspace::Team(id) if teams.iter().any(|t| t.id == *id) => Ok(()),
        Workspace::Team(_) => Err(PaddockError::NotAMember),
    }
}
