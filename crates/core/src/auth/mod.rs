//! Credential checks and password hashing.
//!
//! Employees are identified by username alone; the first successful
//! authentication registers them.

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use thiserror::Error;

/// Longest username accepted at registration.
pub const MAX_USERNAME_LEN: usize = 64;

/// Errors in the shape of submitted credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Username is empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Username exceeds [`MAX_USERNAME_LEN`].
    #[error("username must be at most {MAX_USERNAME_LEN} characters")]
    UsernameTooLong,

    /// Password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validates submitted credentials before any lookup or hashing.
///
/// # Errors
///
/// Returns the first problem found with the username, then the password.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), CredentialError> {
    if username.trim().is_empty() {
        return Err(CredentialError::EmptyUsername);
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(CredentialError::UsernameTooLong);
    }
    if password.is_empty() {
        return Err(CredentialError::EmptyPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        assert!(validate_credentials("alice", "secret").is_ok());
    }

    #[test]
    fn test_blank_username() {
        assert_eq!(
            validate_credentials("   ", "secret"),
            Err(CredentialError::EmptyUsername)
        );
    }

    #[test]
    fn test_long_username() {
        let name = "a".repeat(MAX_USERNAME_LEN + 1);
        assert_eq!(
            validate_credentials(&name, "secret"),
            Err(CredentialError::UsernameTooLong)
        );
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(
            validate_credentials("alice", ""),
            Err(CredentialError::EmptyPassword)
        );
    }
}
