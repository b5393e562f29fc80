//! Payload validation.

use thiserror::Error;

/// Maximum length accepted for free-text name fields.
pub const MAX_NAME_LENGTH: usize = 200;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A payload field broke a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty (after trimming) when it shouldn't be.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length.
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Field is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Numeric field must be strictly positive.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// An update payload carried no fields.
    #[error("no fields to update")]
    NoChanges,
}

/// Implemented by every payload accepted from clients.
pub trait Validate {
    /// Check the payload's constraints.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Require a non-blank name no longer than [`MAX_NAME_LENGTH`].
pub(crate) fn name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Like [`name`] but for optional fields.
pub(crate) fn optional_name(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| name(field, v))
}

/// Require a password of at least [`MIN_PASSWORD_LENGTH`] characters.
pub(crate) fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Require a strictly positive integer.
pub(crate) const fn positive(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LENGTH,
        };
        assert_eq!(err.to_string(), "name exceeds maximum length of 200 characters");
    }

    #[test]
    fn test_name_rejects_blank() {
        assert_eq!(
            name("name", "   "),
            Err(ValidationError::Empty { field: "name" })
        );
        assert!(name("name", "Nasi Goreng").is_ok());
        assert!(optional_name("name", None).is_ok());
    }

    #[test]
    fn test_password_length() {
        assert!(password("short").is_err());
        assert!(password("long enough").is_ok());
    }

    #[test]
    fn test_positive() {
        assert!(positive("quantity", 0).is_err());
        assert!(positive("quantity", -3).is_err());
        assert!(positive("quantity", 2).is_ok());
    }
}
