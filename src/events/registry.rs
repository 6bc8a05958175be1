use std::sync::OnceLock;

use super::{Listener, WorkspaceEvent};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Listeners for team and workspace events.
///
/// The registry is built once at startup by [`register_event_listeners`]
/// and is read-only afterwards. Each event goes to the listeners whose
/// [`Listener::interested_in`] accepts it, in registration order:
///
/// | Event               | Fired by                                        |
/// |---------------------|-------------------------------------------------|
/// | `TeamCreated`       | `CreateTeamAction`                              |
/// | `MemberJoined`      | `JoinTeamAction`                                |
/// | `MemberLeft`        | `LeaveTeamAction`                               |
/// | `RolesUpdated`      | `UpdateTeamRolesAction`, only when edits exist  |
/// | `WorkspaceSwitched` | a confirmed switch, or losing the selected team |
/// | `SelectionReset`    | loading a user whose saved team is gone         |
/// | `SignedOut`         | `WorkspaceContext::sign_out`                    |
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    async fn dispatch(&self, event: &WorkspaceEvent) {
        let mut delivered = 0;
        for listener in self.listeners.iter().filter(|l| l.interested_in(event)) {
            listener.handle(event).await;
            delivered += 1;
        }
        log::trace!(
            target: "paddock",
            "msg=\"event dispatched\", event=\"{}\", listeners={delivered}",
            event.name()
        );
    }
}

/// Installs the process-wide listeners.
///
/// Only the first call takes effect. Events fired before it are dropped.
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    let count = registry.len();
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "paddock",
            "msg=\"event listeners already registered, ignoring\", listeners={count}"
        );
    }
}

/// Sends `event` to the registered listeners. A no-op before registration.
pub async fn dispatch(event: WorkspaceEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}
