//! Field validators shared by the settings structs

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// `#RRGGBB` color pattern backing the hex-validated settings fields
pub static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

const FORBIDDEN_PATH_CHARS: [char; 6] = ['<', '>', '"', '|', '?', '*'];

/// Reject empty paths and characters no common filesystem accepts
///
/// Colons stay allowed for Windows drive letters.
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }
    if path.chars().any(|c| FORBIDDEN_PATH_CHARS.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }
    Ok(())
}

/// Accept exactly the level names tracing understands, case-insensitively
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}
