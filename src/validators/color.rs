use regex::Regex;
use std::sync::LazyLock;

use super::ValidationError;

static COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

pub fn validate_team_color(color: &str) -> Result<(), ValidationError> {
    if !COLOR_REGEX.is_match(color) {
        return Err(ValidationError::ColorInvalid);
    }

    Ok(())
}
