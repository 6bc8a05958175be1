mod create;
mod join;
mod leave;
mod update_roles;

pub use create::{CreateTeamAction, CreateTeamInput};
pub use join::JoinTeamAction;
pub use leave::LeaveTeamAction;
pub use update_roles::UpdateTeamRolesAction;
