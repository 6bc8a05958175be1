use async_trait::async_trait;

use super::WorkspaceEvent;

/// Receives workspace and team events.
///
/// Team actions fire `TeamCreated`, `MemberJoined`, `MemberLeft` and
/// `RolesUpdated` after the directory write succeeds. The workspace context
/// fires `WorkspaceSwitched`, `SelectionReset` and `SignedOut`. A handler
/// runs inline with the operation that fired the event, so it should not
/// block.
///
/// # Example
///
/// ```rust,ignore
/// use paddock::events::{Listener, WorkspaceEvent};
/// use async_trait::async_trait;
///
/// struct RoleAudit;
///
/// #[async_trait]
/// impl Listener for RoleAudit {
///     fn interested_in(&self, event: &WorkspaceEvent) -> bool {
///         matches!(event, WorkspaceEvent::RolesUpdated { .. })
///     }
///
///     async fn handle(&self, event: &WorkspaceEvent) {
///         if let WorkspaceEvent::RolesUpdated { team_id, updated_by, .. } = event {
///             // record who changed the team's roles
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Whether [`handle`](Self::handle) should see `event`. Defaults to
    /// every event.
    fn interested_in(&self, _event: &WorkspaceEvent) -> bool {
        true
    }

    async fn handle(&self, event: &WorkspaceEvent);
}
