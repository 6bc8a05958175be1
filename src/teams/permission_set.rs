//! Per-member module overrides stored on a team record.
//!
//! Overrides are default-allow: a member with no entry for a module can use
//! it. Only an entry that is exactly `false` denies access.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::identity::{ModuleId, UserId};

/// Mapping of member id to module id to an allow/deny flag.
///
/// # Example
///
/// ```rust
/// use paddock::teams::PermissionOverrides;
///
/// let mut overrides = PermissionOverrides::new();
/// overrides.set("driver-2".into(), "budget".into(), false);
///
/// assert!(overrides.is_denied(&"driver-2".into(), &"budget".into()));
/// assert!(!overrides.is_denied(&"driver-2".into(), &"calendar".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionOverrides {
    entries: BTreeMap<UserId, BTreeMap<ModuleId, bool>>,
}

impl PermissionOverrides {
    /// Create an empty override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored flag for a member and module, if there is one.
    pub fn get(&self, member: &UserId, module: &ModuleId) -> Option<bool> {
        self.entries
            .get(member)
            .and_then(|modules| modules.get(module))
            .copied()
    }

    /// True only when the member has an explicit `false` for the module.
    pub fn is_denied(&self, member: &UserId, module: &ModuleId) -> bool {
        self.get(member, module) == Some(false)
    }

    /// Write a single member/module entry, leaving the member's other entries alone.
    pub fn set(&mut self, member: UserId, module: ModuleId, allowed: bool) {
        self.entries.entry(member).or_default().insert(module, allowed);
    }

    /// Drop every entry for a member.
    pub fn clear_member(&mut self, member: &UserId) {
        self.entries.remove(member);
    }

    /// All entries for a member.
    pub fn for_member(&self, member: &UserId) -> Option<&BTreeMap<ModuleId, bool>> {
        self.entries.get(member)
    }

    /// Members that have at least one entry.
    pub fn members(&self) -> impl Iterator<Item = &UserId> {
        self.entries.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of members with entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize to the JSON shape stored on the team document.
    ///
    /// Format: `{"uid": {"budget": false, "calendar": true}}`
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Parse the stored JSON shape.
    ///
    /// Returns None if the payload is not an object of objects. Entries whose
    /// value is not a boolean are dropped.
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

impl Serialize for PermissionOverrides {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (member, modules) in &self.entries {
            map.serialize_entry(member, modules)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PermissionOverrides {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OverridesVisitor)
    }
}

struct OverridesVisitor;

impl<'de> Visitor<'de> for OverridesVisitor {
    type Value = PermissionOverrides;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of member ids to module flags")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some((member, raw)) =
            access.next_entry::<UserId, BTreeMap<ModuleId, serde_json::Value>>()?
        {
            let modules: BTreeMap<ModuleId, bool> = raw
                .into_iter()
                .filter_map(|(module, value)| value.as_bool().map(|flag| (module, flag)))
                .collect();
            if !modules.is_empty() {
                entries.insert(member, modules);
            }
        }
        Ok(PermissionOverrides { entries })
    }
}
