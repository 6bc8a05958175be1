use super::registry::{ModuleRegistry, SavedModule};
use crate::PaddockError;
use crate::config::StorageKeys;
use crate::storage::LocalStore;

/// Loads and saves the module registry through a [`LocalStore`].
pub struct ModuleSettings<S: LocalStore> {
    store: S,
    key: String,
}

impl<S: LocalStore> ModuleSettings<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Uses the configured modules key.
    pub fn from_keys(store: S, keys: &StorageKeys) -> Self {
        Self::new(store, keys.modules.clone())
    }

    /// Reads the stored registry, merged over the defaults.
    ///
    /// A missing entry yields the defaults. A corrupt entry is logged and
    /// also yields the defaults.
    pub fn load(&self) -> Result<ModuleRegistry, PaddockError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(ModuleRegistry::default());
        };

        match serde_json::from_str::<Vec<SavedModule>>(&raw) {
            Ok(saved) => Ok(ModuleRegistry::from_saved(&saved)),
            Err(e) => {
                log::error!(
                    target: "paddock",
                    "msg=\"failed to parse saved modules, using defaults\", key=\"{}\", error=\"{e}\"",
                    self.key
                );
                Ok(ModuleRegistry::default())
            }
        }
    }

    /// Writes the full registry.
    pub fn save(&self, registry: &ModuleRegistry) -> Result<(), PaddockError> {
        let json = serde_json::to_string(registry.as_slice())
            .map_err(|e| PaddockError::Storage(format!("Failed to serialize modules: {e}")))?;
        self.store.set(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_load_missing_returns_defaults() {
        let settings = ModuleSettings::new(MemoryStore::new(), "app_modules");
        assert_eq!(settings.load().unwrap(), ModuleRegistry::default());
    }

    #[test]
    fn test_save_then_load_keeps_enabled_flags() {
        let store = MemoryStore::new();
        let settings = ModuleSettings::new(store.clone(), "app_modules");

        let mut registry = ModuleRegistry::default();
        registry.toggle("lap-comparison").unwrap();
        settings.save(&registry).unwrap();

        let loaded = settings.load().unwrap();
        assert!(!loaded.get("lap-comparison").unwrap().enabled);
        assert!(loaded.get("budget").unwrap().enabled);
        assert!(store.get("app_modules").unwrap().unwrap().contains("iconName"));
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set("app_modules", "{not json").unwrap();

        let settings = ModuleSettings::new(store, "app_modules");
        assert_eq!(settings.load().unwrap(), ModuleRegistry::default());
    }

    #[test]
    fn test_configured_key() {
        let store = MemoryStore::new();
        let keys = StorageKeys {
            modules: "kart_modules".to_owned(),
            ..StorageKeys::default()
        };
        let settings = ModuleSettings::from_keys(store.clone(), &keys);

        let mut registry = ModuleRegistry::default();
        registry.toggle("calendar").unwrap();
        settings.save(&registry).unwrap();

        assert!(store.get("app_modules").unwrap().is_none());
        assert!(store.get("kart_modules").unwrap().is_some());
        assert!(!settings.load().unwrap().get("calendar").unwrap().enabled);
    }

    #[test]
    fn test_partial_entries_are_accepted() {
        let store = MemoryStore::new();
        store
            .set("app_modules", r#"[{"id":"calendar","enabled":false}]"#)
            .unwrap();

        let settings = ModuleSettings::new(store, "app_modules");
        let loaded = settings.load().unwrap();
        assert!(!loaded.get("calendar").unwrap().enabled);
        assert_eq!(loaded.len(), 10);
    }
}
