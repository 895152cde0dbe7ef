//! Field-level validation shared by every entity.
//!
//! Helpers return the normalized value so callers can assign it directly.

use crate::errors::ModelError;

/// Trimmed, non-empty text no longer than `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> Result<String, ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::invalid(format!("{field} required")));
    }
    if v.chars().count() > max {
        return Err(ModelError::invalid(format!("{field} longer than {max} characters")));
    }
    Ok(v.to_string())
}

/// Optional text: blank collapses to `None`.
pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>, ModelError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, max).map(Some),
    }
}

/// Absolute http(s) URL or a site-relative path such as `/uploads/logo.png`.
pub fn url(field: &str, value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    let ok = v.starts_with("http://") || v.starts_with("https://") || (v.starts_with('/') && !v.starts_with("//"));
    if !ok || v.contains(char::is_whitespace) {
        return Err(ModelError::invalid(format!("{field} must be an http(s) URL or a path starting with '/'")));
    }
    if v.len() > 512 {
        return Err(ModelError::invalid(format!("{field} longer than 512 characters")));
    }
    Ok(v.to_string())
}

pub fn optional_url(field: &str, value: Option<&str>) -> Result<Option<String>, ModelError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => url(field, v).map(Some),
    }
}

pub fn email(value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    let Some((local, domain)) = v.split_once('@') else {
        return Err(ModelError::invalid("invalid email"));
    };
    if local.is_empty() || domain.is_empty() || v.len() > 255 {
        return Err(ModelError::invalid("invalid email"));
    }
    Ok(v.to_ascii_lowercase())
}

/// Lowercase kebab-case: `[a-z0-9]` runs joined by single dashes.
pub fn slug(value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    let valid = !v.is_empty()
        && v.len() <= 128
        && !v.starts_with('-')
        && !v.ends_with('-')
        && !v.contains("--")
        && v.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(ModelError::invalid("slug must be lowercase letters, digits and single dashes"));
    }
    Ok(v.to_string())
}

/// Derive a slug from free text; non-alphanumerics become dashes.
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out.truncate(128);
    out.trim_end_matches('-').to_string()
}
