//! Teams, their member roles and per-module overrides.
//!
//! A team record lives in a [`TeamDirectory`]. Role and permission edits are
//! staged in a [`RoleEditor`] and committed in a single write with
//! [`UpdateTeamRolesAction`].

mod actions;
mod memory;
mod permission_set;
mod repository;
mod roles;
mod types;

pub use actions::{
    CreateTeamAction, CreateTeamInput, JoinTeamAction, LeaveTeamAction, UpdateTeamRolesAction,
};
pub use memory::InMemoryTeamDirectory;
pub use permission_set::PermissionOverrides;
pub use repository::{CreateTeam, RoleUpdate, TeamDirectory};
pub use roles::{EditOutcome, IgnoreReason, RoleEditor};
pub use types::{MemberRole, Team};
