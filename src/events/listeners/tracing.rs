use async_trait::async_trait;

use crate::events::{Listener, WorkspaceEvent};

/// Emits workspace events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &WorkspaceEvent) {
        tracing::info!(
            target: "paddock::events",
            event_name = event.name(),
            ?event,
            "workspace event"
        );
    }
}
