//! Local checks run before any request leaves the process

use crate::error::{ProviderError, Result};

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_OBJECT_PATH_LEN: usize = 1024;

pub fn non_empty(resource: &'static str, field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ProviderError::validation(
            resource,
            format!("{} must not be empty", field),
        ));
    }
    Ok(())
}

pub fn positive(resource: &'static str, field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(ProviderError::validation(
            resource,
            format!("{} must be a positive integer", field),
        ));
    }
    Ok(())
}

/// Project and bucket names: non-empty, at most 255 characters
pub fn name(resource: &'static str, value: &str) -> Result<()> {
    let len = value.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ProviderError::validation(
            resource,
            format!(
                "name must be non-empty and at most {} characters",
                MAX_NAME_LEN
            ),
        ));
    }
    Ok(())
}

/// Bucket names additionally restrict the charset to `[A-Za-z0-9_-]`
pub fn bucket_name(value: &str) -> Result<()> {
    name("bucket", value)?;

    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ProviderError::validation(
            "bucket",
            format!(
                "name may only contain letters, digits, '_' and '-' (found '{}')",
                bad
            ),
        ));
    }
    Ok(())
}

pub fn object_path(value: &str) -> Result<()> {
    let len = value.chars().count();
    if len == 0 || len > MAX_OBJECT_PATH_LEN {
        return Err(ProviderError::validation(
            "object",
            format!(
                "path must be non-empty and at most {} characters",
                MAX_OBJECT_PATH_LEN
            ),
        ));
    }
    Ok(())
}

/// Syntactic base64 sanity check.
///
/// Length must be a multiple of 4 and the charset `[A-Za-z0-9+/=]` plus line
/// breaks. This does not decode the payload.
pub fn base64_content(value: &str) -> Result<()> {
    if !is_likely_base64(value) {
        return Err(ProviderError::validation(
            "object",
            "content must be non-empty and base64-encoded",
        ));
    }
    Ok(())
}

pub fn is_likely_base64(value: &str) -> bool {
    if value.is_empty() || value.len() % 4 != 0 {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=' | '\n' | '\r'))
}
