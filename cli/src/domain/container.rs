//! Container identifier validation.

use crate::domain::error::InputError;

/// Longest identifier accepted from a caller.
pub const MAX_CONTAINER_ID_LEN: usize = 255;

/// Validate a caller-supplied container id or name.
///
/// Accepts full or short hex ids and Docker names
/// (`/?[a-zA-Z0-9][a-zA-Z0-9_.-]*`). Anything else is rejected before a
/// runtime call is made.
///
/// # Errors
///
/// Returns [`InputError::InvalidContainerId`] describing the first rule broken.
pub fn validate_container_id(id: &str) -> Result<(), InputError> {
    let invalid = |reason| InputError::InvalidContainerId {
        id: id.to_string(),
        reason,
    };
    let name = id.strip_prefix('/').unwrap_or(id);
    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if id.len() > MAX_CONTAINER_ID_LEN {
        return Err(invalid("too long"));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err(invalid("must start with a letter or digit"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(invalid("only letters, digits, '_', '.' and '-' are allowed"));
    }
    Ok(())
}
