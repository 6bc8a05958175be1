//! Team workspaces and module access control for the karting dashboard.
//!
//! The crate owns the logic that decides which feature modules a signed-in
//! driver can open, given the workspace they have selected (their personal
//! workspace or one of their teams), and the team management operations that
//! feed that decision: creating and joining teams, promoting admins and
//! denying individual modules to members.

pub mod access;
pub mod config;
pub mod crypto;
pub mod events;
pub mod identity;
pub mod modules;
pub mod storage;
pub mod teams;
pub mod validators;
pub mod workspace;

pub use access::{AccessDecision, AccessResolver, DenialReason, GrantReason, RouteDecision};
pub use config::{PaddockConfig, StorageKeys, TeamConfig};
pub use events::{WorkspaceEvent, dispatch, register_event_listeners};
pub use identity::{CurrentUser, ModuleId, TeamId, UserId};
pub use modules::{IconKind, ModuleDescriptor, ModuleRegistry};
pub use storage::{FileStore, LocalStore, MemoryStore};
pub use teams::{
    CreateTeam, CreateTeamAction, CreateTeamInput, EditOutcome, IgnoreReason,
    InMemoryTeamDirectory, JoinTeamAction, LeaveTeamAction, MemberRole, PermissionOverrides,
    RoleEditor, RoleUpdate, Team, TeamDirectory, UpdateTeamRolesAction,
};
pub use validators::ValidationError;
pub use workspace::{SwitchRequest, Workspace, WorkspaceContext, WorkspaceSelector};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PaddockError {
    Unauthenticated,
    TeamLimitReached { max: usize },
    InvalidJoinCode,
    AlreadyMember,
    TeamNotFound,
    NotAMember,
    OwnerCannotLeave,
    Forbidden,
    UnknownModule(String),
    InvalidReorder { from: usize, to: usize, len: usize },
    JoinCodeExhausted,
    Validation(ValidationError),
    Storage(String),
    Directory(String),
    Internal(String),
}

impl std::error::Error for PaddockError {}

impl fmt::Display for PaddockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddockError::Unauthenticated => write!(f, "You must be signed in"),
            PaddockError::TeamLimitReached { max } => write!(f, "Maximum {max} teams allowed."),
            PaddockError::InvalidJoinCode => write!(f, "Invalid team code."),
            PaddockError::AlreadyMember => write!(f, "You are already a member of this team."),
            PaddockError::TeamNotFound => write!(f, "Team not found"),
            PaddockError::NotAMember => write!(f, "You are not a member of this team"),
            PaddockError::OwnerCannotLeave => {
                write!(f, "The team owner cannot leave the team")
            }
            PaddockError::Forbidden => write!(f, "You do not have admin rights in this team"),
            PaddockError::UnknownModule(id) => write!(f, "Unknown module: {id}"),
            PaddockError::InvalidReorder { from, to, len } => {
                write!(f, "Cannot move module {from} to {to} in a list of {len}")
            }
            PaddockError::JoinCodeExhausted => {
                write!(f, "Could not generate a unique team code, please try again")
            }
            PaddockError::Validation(err) => write!(f, "{err}"),
            PaddockError::Storage(msg) => write!(f, "Storage error: {msg}"),
            PaddockError::Directory(msg) => write!(f, "Team directory error: {msg}"),
            PaddockError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl From<ValidationError> for PaddockError {
    fn from(err: ValidationError) -> Self {
        PaddockError::Validation(err)
    }
}
