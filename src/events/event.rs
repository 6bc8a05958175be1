use chrono::{DateTime, Utc};

use crate::identity::{TeamId, UserId};

/// Workspace and team events emitted by actions and the workspace context.
///
/// Events are always fired. If no listeners are registered they are
/// silently ignored. Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum WorkspaceEvent {
    // team lifecycle
    TeamCreated {
        team_id: TeamId,
        user_id: UserId,
        at: DateTime<Utc>,
    },
    MemberJoined {
        team_id: TeamId,
        user_id: UserId,
        at: DateTime<Utc>,
    },
    MemberLeft {
        team_id: TeamId,
        user_id: UserId,
        at: DateTime<Utc>,
    },
    RolesUpdated {
        team_id: TeamId,
        updated_by: UserId,
        admin_count: usize,
        at: DateTime<Utc>,
    },

    // selection
    WorkspaceSwitched {
        user_id: UserId,
        team_id: Option<TeamId>,
        at: DateTime<Utc>,
    },
    SelectionReset {
        user_id: UserId,
        stale_team_id: TeamId,
        at: DateTime<Utc>,
    },
    SignedOut {
        user_id: UserId,
        at: DateTime<Utc>,
    },
}

impl WorkspaceEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TeamCreated { .. } => "team.created",
            Self::MemberJoined { .. } => "team.member.joined",
            Self::MemberLeft { .. } => "team.member.left",
            Self::RolesUpdated { .. } => "team.roles.updated",
            Self::WorkspaceSwitched { .. } => "workspace.switched",
            Self::SelectionReset { .. } => "workspace.selection_reset",
            Self::SignedOut { .. } => "workspace.signed_out",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::TeamCreated { at, .. }
            | Self::MemberJoined { at, .. }
            | Self::MemberLeft { at, .. }
            | Self::RolesUpdated { at, .. }
            | Self::WorkspaceSwitched { at, .. }
            | Self::SelectionReset { at, .. }
            | Self::SignedOut { at, .. } => *at,
        }
    }
}
