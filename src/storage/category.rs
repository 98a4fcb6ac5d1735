//! Category name handling
//!
//! Tags come straight from page markup and become directory names, so they are
//! normalized and checked against a character whitelist first.

/// Longest category name accepted, in bytes
pub const MAX_CATEGORY_BYTES: usize = 255;

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Returns true for names the store ignores (dot-files and dot-directories)
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Normalizes a raw tag into a safe category name
///
/// Whitespace runs collapse to one space and the ends are trimmed. Returns
/// `None` when the result is empty, too long, hidden, contains `..`, ends with
/// a dot, uses a character outside the whitelist, or is a reserved device name.
///
/// # Examples
///
/// ```
/// use tagged_corpus::storage::normalize_category;
///
/// assert_eq!(normalize_category("  Gaming \n News "), Some("Gaming News".to_string()));
/// assert_eq!(normalize_category("../etc"), None);
/// assert_eq!(normalize_category("a/b"), None);
/// ```
pub fn normalize_category(raw: &str) -> Option<String> {
    let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if name.is_empty() || name.len() > MAX_CATEGORY_BYTES {
        return None;
    }

    if is_hidden(&name) || name.contains("..") || name.ends_with('.') {
        return None;
    }

    if !name.chars().all(is_allowed_char) {
        return None;
    }

    let stem = name.split('.').next().unwrap_or(&name);
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem.trim()))
    {
        return None;
    }

    Some(name)
}

/// Returns true if `name` is already a normalized, valid category name
pub fn is_valid_category(name: &str) -> bool {
    normalize_category(name).as_deref() == Some(name)
}

fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '&' | '\'' | '.' | ',' | '+' | '(' | ')')
}
