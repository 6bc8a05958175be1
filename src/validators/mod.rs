pub mod color;
pub mod join_code;
pub mod name;

pub use color::validate_team_color;
pub use join_code::{normalize_join_code, validate_join_code};
pub use name::validate_team_name;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    TeamNameEmpty,
    TeamNameTooLong,
    ColorInvalid,
    JoinCodeEmpty,
    JoinCodeInvalidFormat,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamNameEmpty => write!(f, "Team name cannot be empty"),
            Self::TeamNameTooLong => write!(f, "Team name is too long (max 50 characters)"),
            Self::ColorInvalid => write!(f, "Team color must be a hex value like #3b82f6"),
            Self::JoinCodeEmpty => write!(f, "Team code cannot be empty"),
            Self::JoinCodeInvalidFormat => write!(f, "Invalid team code."),
        }
    }
}

impl std::error::Error for ValidationError {}
