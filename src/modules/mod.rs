//! Feature module registry.
//!
//! Modules are the routable feature areas of the dashboard (calendar, budget,
//! track analysis, ...). The registry is static configuration; only the
//! `enabled` flags and the display order can change, and those changes are
//! kept in client-local storage rather than in the team directory.

mod descriptor;
mod registry;
mod settings;

pub use descriptor::{IconKind, ModuleDescriptor};
pub use registry::{
    HOME_MODULE_ID, ModuleRegistry, SavedModule, default_modules, sync_with_defaults,
};
pub use settings::ModuleSettings;
