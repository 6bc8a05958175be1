use serde::{Deserialize, Serialize};

use crate::identity::ModuleId;

/// Icon shown next to a module in the sidebar.
///
/// Stored by name; unknown names fall back to [`IconKind::Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconKind {
    Home,
    Sparkles,
    Calendar,
    Banknote,
    Database,
    ClipboardList,
    Activity,
    ArrowRightLeft,
    Zap,
    Settings,
}

impl IconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Sparkles => "Sparkles",
            Self::Calendar => "Calendar",
            Self::Banknote => "Banknote",
            Self::Database => "Database",
            Self::ClipboardList => "ClipboardList",
            Self::Activity => "Activity",
            Self::ArrowRightLeft => "ArrowRightLeft",
            Self::Zap => "Zap",
            Self::Settings => "Settings",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "Home" => Self::Home,
            "Sparkles" => Self::Sparkles,
            "Calendar" => Self::Calendar,
            "Banknote" => Self::Banknote,
            "Database" => Self::Database,
            "ClipboardList" => Self::ClipboardList,
            "Activity" => Self::Activity,
            "ArrowRightLeft" => Self::ArrowRightLeft,
            "Zap" => Self::Zap,
            _ => Self::Settings,
        }
    }
}

impl From<String> for IconKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<IconKind> for String {
    fn from(icon: IconKind) -> Self {
        icon.as_str().to_owned()
    }
}

/// Static description of one feature module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub id: ModuleId,
    pub name: String,
    /// Route the module renders at.
    pub path: String,
    #[serde(rename = "iconName")]
    pub icon: IconKind,
    /// Registry-level switch, independent of user and team.
    pub enabled: bool,
    /// Locked modules cannot be disabled and are never deniable by a team.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub beta: bool,
    #[serde(default)]
    pub description: String,
}

impl ModuleDescriptor {
    pub fn new(id: &str, name: &str, path: &str, icon: IconKind) -> Self {
        Self {
            id: ModuleId::from(id),
            name: name.to_owned(),
            path: path.to_owned(),
            icon,
            enabled: true,
            locked: false,
            beta: false,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    #[must_use]
    pub fn beta(mut self) -> Self {
        self.beta = true;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }
}
