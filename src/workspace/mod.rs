//! The active workspace and the application state around it.
//!
//! [`WorkspaceSelector`] is the selection state machine on its own;
//! [`WorkspaceContext`] wires it to the signed-in user, their teams and the
//! team directory.

mod context;
mod selector;

pub use context::WorkspaceContext;
pub use selector::{SwitchRequest, Workspace, WorkspaceSelector};
