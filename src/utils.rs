//! Common utility functions shared across the codebase.

use std::{path::Path, sync::LazyLock};

use regex::Regex;

static PASCAL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid PascalCase regex"));

/// Checks if an identifier follows the PascalCase component naming convention.
///
/// # Examples
///
/// ```
/// use hooklens::utils::is_pascal_case;
///
/// assert!(is_pascal_case("Button"));
/// assert!(is_pascal_case("UserCard2"));
/// assert!(!is_pascal_case("button"));
/// assert!(!is_pascal_case("User_Card"));
/// assert!(!is_pascal_case("Button.test"));
/// assert!(!is_pascal_case(""));
/// ```
pub fn is_pascal_case(name: &str) -> bool {
    PASCAL_CASE.is_match(name)
}

/// File name without its final extension (`src/Button.tsx` → `Button`).
pub fn file_stem(path: &str) -> Option<&str> {
    Path::new(path).file_stem().and_then(|s| s.to_str())
}
