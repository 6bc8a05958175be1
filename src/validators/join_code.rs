use super::ValidationError;

/// Trims and upper-cases a code typed by a user.
pub fn normalize_join_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Checks the alphabet of a normalized join code.
///
/// Length is not checked. Codes issued under an earlier length setting
/// stay joinable, and a code of the wrong length simply matches no team.
pub fn validate_join_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::JoinCodeEmpty);
    }

    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ValidationError::JoinCodeInvalidFormat);
    }

    Ok(())
}
