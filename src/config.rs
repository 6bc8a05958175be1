//! Configuration for team workspaces and module access.
//!
//! # Example
//!
//! ```rust
//! use paddock::config::{PaddockConfig, TeamConfig};
//!
//! // Use defaults
//! let config = PaddockConfig::default();
//! assert_eq!(config.teams.max_teams_per_user, 5);
//!
//! // Or customize
//! let config = PaddockConfig {
//!     teams: TeamConfig {
//!         max_teams_per_user: 3,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! assert_eq!(config.teams.join_code_length, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration struct.
///
/// Use `PaddockConfig::default()` for the production defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddockConfig {
    /// Team creation and membership limits.
    pub teams: TeamConfig,

    /// Keys used for client-local persistence.
    pub storage: StorageKeys,

    /// Route a denied module redirects to.
    ///
    /// Default: `/dashboard`
    pub home_path: String,
}

impl Default for PaddockConfig {
    fn default() -> Self {
        Self {
            teams: TeamConfig::default(),
            storage: StorageKeys::default(),
            home_path: "/dashboard".to_owned(),
        }
    }
}

impl PaddockConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Team limits and join-code generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// How many teams a single user may belong to.
    ///
    /// Default: 5
    pub max_teams_per_user: usize,

    /// Length of generated join codes.
    ///
    /// Default: 6
    pub join_code_length: usize,

    /// Check generated join codes against existing teams before creating.
    ///
    /// Default: true
    pub unique_join_codes: bool,

    /// How many codes to try before giving up when `unique_join_codes` is set.
    ///
    /// Default: 5
    pub join_code_attempts: u32,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            max_teams_per_user: 5,
            join_code_length: 6,
            unique_join_codes: true,
            join_code_attempts: 5,
        }
    }
}

/// Keys under which client-local state is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Module registry (enabled flags and order).
    ///
    /// Default: `app_modules`
    pub modules: String,

    /// Pointer to the selected team.
    ///
    /// Default: `selectedTeamId`
    pub selected_team: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            modules: "app_modules".to_owned(),
            selected_team: "selectedTeamId".to_owned(),
        }
    }
}
