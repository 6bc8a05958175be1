use serde::{Deserialize, Serialize};

use super::descriptor::{IconKind, ModuleDescriptor};
use crate::PaddockError;
use crate::identity::ModuleId;

/// The dashboard landing module. It is never offered for per-member denial.
pub const HOME_MODULE_ID: &str = "home";

/// The modules shipped with the dashboard, in default sidebar order.
pub fn default_modules() -> Vec<ModuleDescriptor> {
    vec![
        ModuleDescriptor::new(HOME_MODULE_ID, "Home", "/dashboard", IconKind::Home)
            .locked()
            .with_description("Dashboard overview and recent activity."),
        ModuleDescriptor::new(
            "ai-assistant",
            "AI Assistant",
            "/dashboard/ai-assistant",
            IconKind::Sparkles,
        )
        .beta()
        .with_description("Get AI-powered insights and answers about your karting data."),
        ModuleDescriptor::new("calendar", "Calendar", "/dashboard/calendar", IconKind::Calendar)
            .with_description("Manage your race schedule and testing sessions."),
        ModuleDescriptor::new(
            "budget",
            "Budget Monitoring",
            "/dashboard/budget",
            IconKind::Banknote,
        )
        .beta()
        .with_description("Conversational AI assistant for managing team budget."),
        ModuleDescriptor::new("library", "File Upload", "/dashboard/library", IconKind::Database)
            .with_description("Upload and manage your telemetry files and track data."),
        ModuleDescriptor::new(
            "sessions",
            "Session Logging",
            "/dashboard/sessions",
            IconKind::ClipboardList,
        )
        .with_description("Log your sessions, track conditions, and setup details."),
        ModuleDescriptor::new(
            "track-analysis",
            "Track Analysis",
            "/dashboard/track-analysis",
            IconKind::Activity,
        )
        .with_description("Compare telemetry data between two sessions to improve lap times."),
        ModuleDescriptor::new(
            "lap-comparison",
            "Lap Comparison",
            "/dashboard/lap-comparison",
            IconKind::ArrowRightLeft,
        )
        .beta()
        .with_description("Compare two sessions using AI to identify performance differences."),
        ModuleDescriptor::new(
            "binding-analysis",
            "Binding Analysis",
            "/dashboard/binding-analysis",
            IconKind::Zap,
        )
        .with_description("Analyze binding events to optimize chassis setup."),
        ModuleDescriptor::new(
            "setup-guide",
            "Setup Guide",
            "/dashboard/setup-guide",
            IconKind::Settings,
        )
        .locked()
        .with_description("Step-by-step guide to setting up your kart."),
    ]
}

/// The part of a stored module entry that survives a reload.
///
/// Stored entries carry the full descriptor; everything except `id` and
/// `enabled` is ignored when reading them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedModule {
    pub id: ModuleId,
    pub enabled: bool,
}

/// Merges stored module state into the default registry.
///
/// Structure, metadata and order come from `defaults`; only the `enabled`
/// flag is taken from `saved`. Saved ids that are no longer in the defaults
/// are dropped and locked modules always stay enabled.
pub fn sync_with_defaults(
    saved: &[SavedModule],
    defaults: &[ModuleDescriptor],
) -> Vec<ModuleDescriptor> {
    defaults
        .iter()
        .map(|def| {
            let mut module = def.clone();
            if let Some(entry) = saved.iter().find(|s| s.id == def.id) {
                module.enabled = entry.enabled || def.locked;
            }
            module
        })
        .collect()
}

/// Ordered list of feature modules.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new(default_modules())
    }
}

impl ModuleRegistry {
    pub fn new(modules: Vec<ModuleDescriptor>) -> Self {
        Self { modules }
    }

    /// Rebuilds a registry from stored entries on top of the defaults.
    pub fn from_saved(saved: &[SavedModule]) -> Self {
        Self::new(sync_with_defaults(saved, &default_modules()))
    }

    pub fn get(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn as_slice(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules shown in the sidebar, before any team policy is applied.
    pub fn enabled(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter().filter(|m| m.enabled)
    }

    /// Modules an admin can grant or deny to individual members.
    pub fn assignable(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules
            .iter()
            .filter(|m| m.id != HOME_MODULE_ID && !m.locked)
    }

    /// Flips the enabled flag of a module and returns the new value.
    ///
    /// Locked modules are left untouched.
    pub fn toggle(&mut self, id: &str) -> Result<bool, PaddockError> {
        let module = self.get_mut(id)?;
        if !module.locked {
            module.enabled = !module.enabled;
        }
        Ok(module.enabled)
    }

    /// Sets the enabled flag of a module and returns the resulting value.
    ///
    /// Locked modules stay enabled.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<bool, PaddockError> {
        let module = self.get_mut(id)?;
        if !module.locked {
            module.enabled = enabled;
        }
        Ok(module.enabled)
    }

    /// Moves the module at `from` so that it ends up at index `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), PaddockError> {
        let len = self.modules.len();
        if from >= len || to >= len {
            return Err(PaddockError::InvalidReorder { from, to, len });
        }
        let module = self.modules.remove(from);
        self.modules.insert(to, module);
        Ok(())
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ModuleDescriptor, PaddockError> {
        self.modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| PaddockError::UnknownModule(id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &ModuleRegistry) -> Vec<&str> {
        registry.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_defaults() {
        let registry = ModuleRegistry::default();

        assert_eq!(registry.len(), 10);
        assert_eq!(registry.as_slice()[0].id, "home");
        assert!(registry.get("home").unwrap().locked);
        assert!(registry.get("setup-guide").unwrap().locked);
        assert!(registry.get("budget").unwrap().beta);
        assert!(registry.iter().all(|m| m.enabled));
        assert!(registry.get("telemetry-export").is_none());
    }

    #[test]
    fn test_toggle_skips_locked() {
        let mut registry = ModuleRegistry::default();

        assert!(!registry.toggle("budget").unwrap());
        assert!(!registry.get("budget").unwrap().enabled);
        assert!(registry.toggle("budget").unwrap());

        assert!(registry.toggle("home").unwrap());
        assert!(registry.get("home").unwrap().enabled);
        assert!(registry.set_enabled("setup-guide", false).unwrap());
    }

    #[test]
    fn test_toggle_unknown_module() {
        let mut registry = ModuleRegistry::default();
        assert_eq!(
            registry.toggle("nope").unwrap_err(),
            PaddockError::UnknownModule("nope".to_owned())
        );
    }

    #[test]
    fn test_enabled_filters_sidebar() {
        let mut registry = ModuleRegistry::default();
        registry.set_enabled("calendar", false).unwrap();

        assert_eq!(registry.enabled().count(), 9);
        assert!(registry.enabled().all(|m| m.id != "calendar"));
    }

    #[test]
    fn test_assignable_excludes_home_and_locked() {
        let registry = ModuleRegistry::default();
        let assignable: Vec<&str> = registry.assignable().map(|m| m.id.as_str()).collect();

        assert_eq!(assignable.len(), 8);
        assert!(!assignable.contains(&"home"));
        assert!(!assignable.contains(&"setup-guide"));
        assert!(assignable.contains(&"budget"));
    }

    #[test]
    fn test_reorder() {
        let mut registry = ModuleRegistry::default();
        registry.reorder(3, 1).unwrap();

        assert_eq!(&ids(&registry)[..4], ["home", "budget", "ai-assistant", "calendar"]);

        assert_eq!(
            registry.reorder(0, 10).unwrap_err(),
            PaddockError::InvalidReorder { from: 0, to: 10, len: 10 }
        );
    }

    #[test]
    fn test_sync_keeps_enabled_and_default_structure() {
        let saved = vec![
            SavedModule { id: "budget".into(), enabled: false },
            SavedModule { id: "calendar".into(), enabled: false },
            SavedModule { id: "retired-module".into(), enabled: true },
        ];

        let synced = sync_with_defaults(&saved, &default_modules());

        assert_eq!(synced.len(), 10);
        let calendar = synced.iter().find(|m| m.id == "calendar").unwrap();
        assert_eq!(calendar.name, "Calendar");
        assert!(!calendar.enabled);
        assert!(!synced.iter().find(|m| m.id == "budget").unwrap().enabled);
        assert!(synced.iter().find(|m| m.id == "library").unwrap().enabled);
        assert!(synced.iter().all(|m| m.id != "retired-module"));
    }

    #[test]
    fn test_sync_keeps_locked_enabled() {
        let saved = vec![SavedModule { id: "home".into(), enabled: false }];
        let synced = sync_with_defaults(&saved, &default_modules());
        assert!(synced[0].enabled);
    }
}
