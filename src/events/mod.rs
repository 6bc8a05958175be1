//! Event system for team and workspace changes.
//!
//! Events are fired from every team action and workspace transition. If no
//! listeners are registered, they are silently ignored.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use paddock::register_event_listeners;
//! use paddock::events::listeners::LoggingListener;
//!
//! fn main() {
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::WorkspaceEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
