//! Input validation helpers
//!
//! Centralized text length constants, normalization and validation
//! functions used by the master-data repositories.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Department names, employee names
pub const MAX_NAME_LEN: usize = 200;

/// Department codes, employee IDs
pub const MAX_CODE_LEN: usize = 32;

/// Passwords (stored as entered)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Normalization ───────────────────────────────────────────────────

/// Codes and employee IDs are stored trimmed and upper-case.
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Names are stored trimmed.
pub fn normalize_name(value: &str) -> String {
    value.trim().to_string()
}

/// Normalize a list of codes: blanks dropped, duplicates removed, first
/// occurrence order kept.
pub fn normalize_code_list(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for code in values.iter().map(|v| normalize_code(v)) {
        if !code.is_empty() && !out.contains(&code) {
            out.push(code);
        }
    }
    out
}

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}
