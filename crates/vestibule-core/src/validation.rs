//! Identity and activation-code validation.
//!
//! An identity is either a campus email (`localpart@wustl.edu`) or a bare
//! username. Validation is pure: the same input always produces the same
//! verdict, which keeps inline error messages stable across repeated input
//! events.
//!
//! All length checks count Unicode scalar values of the trimmed input, and
//! "whitespace" means `char::is_whitespace`.

/// Domain accepted for email identities (compared ASCII-case-insensitively).
pub const EMAIL_DOMAIN: &str = "wustl.edu";

/// Minimum length of a bare username identity.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum length of an activation code.
///
/// Length-only: the code is nominally numeric but digits are not enforced.
pub const MIN_CODE_LEN: usize = 6;

/// Why an identity value failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    /// Empty or whitespace-only input.
    Empty,
    /// Contains `@` but is not a well-formed `localpart@wustl.edu` address.
    InvalidEmail,
    /// Bare username shorter than [`MIN_USERNAME_LEN`].
    UsernameTooShort,
}

/// Why an activation code failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    /// Fewer than [`MIN_CODE_LEN`] characters after trimming.
    TooShort,
}

/// Validate an identity (email or username).
///
/// Email form: a non-empty local part containing no whitespace and no second
/// `@`, followed by exactly [`EMAIL_DOMAIN`]. Username form: at least
/// [`MIN_USERNAME_LEN`] characters after trimming.
///
/// # Errors
///
/// Returns the reason the identity is not acceptable.
pub fn validate_identity(value: &str) -> Result<(), IdentityError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdentityError::Empty);
    }

    if let Some((local, domain)) = trimmed.split_once('@') {
        let local_ok = !local.is_empty() && !local.chars().any(char::is_whitespace);
        let domain_ok = domain.eq_ignore_ascii_case(EMAIL_DOMAIN);
        if local_ok && domain_ok {
            Ok(())
        } else {
            Err(IdentityError::InvalidEmail)
        }
    } else if trimmed.chars().count() >= MIN_USERNAME_LEN {
        Ok(())
    } else {
        Err(IdentityError::UsernameTooShort)
    }
}

/// Validate an activation code.
///
/// # Errors
///
/// Returns [`CodeError::TooShort`] when the trimmed value has fewer than
/// [`MIN_CODE_LEN`] characters.
pub fn validate_code(value: &str) -> Result<(), CodeError> {
    if value.trim().chars().count() >= MIN_CODE_LEN {
        Ok(())
    } else {
        Err(CodeError::TooShort)
    }
}

/// Whether an identity is acceptable.
pub fn is_valid_identity(value: &str) -> bool {
    validate_identity(value).is_ok()
}

/// Whether an activation code is acceptable.
pub fn is_valid_code(value: &str) -> bool {
    validate_code(value).is_ok()
}

/// Derive the display username from an identity.
///
/// For an email this is the local part (everything before the first `@`).
/// A leading `@` is NOT treated as a separator: the identity is returned
/// unchanged, matching the validation rule that rejects an empty local part.
pub fn derive_username(identity: &str) -> &str {
    let trimmed = identity.trim();
    match trimmed.find('@') {
        Some(at) if at > 0 => &trimmed[..at],
        _ => trimmed,
    }
}
