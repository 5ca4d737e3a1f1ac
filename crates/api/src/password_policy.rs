// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password rules for user accounts.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password lacks a letter or a digit.
    #[error("Password must contain at least one letter and one digit")]
    MissingLetterOrDigit,

    /// Password repeats the account's own identifiers.
    #[error("Password must not match the user's {field}")]
    MatchesAccountField { field: &'static str },
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// Validates a password for an account.
    ///
    /// # Arguments
    ///
    /// * `password` - The candidate password
    /// * `email` - The account email; neither it nor its local part may be used
    /// * `name` - The account holder's name
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` naming the first rule broken.
    pub fn validate(
        &self,
        password: &str,
        email: &str,
        name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let has_letter: bool = password.chars().any(char::is_alphabetic);
        let has_digit: bool = password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(PasswordPolicyError::MissingLetterOrDigit);
        }

        let lowered: String = password.to_lowercase();
        let email: String = email.trim().to_lowercase();
        let local_part: &str = email.split('@').next().unwrap_or_default();

        if lowered == email || lowered == local_part {
            return Err(PasswordPolicyError::MatchesAccountField { field: "email" });
        }
        if lowered == name.trim().to_lowercase() {
            return Err(PasswordPolicyError::MatchesAccountField { field: "name" });
        }

        Ok(())
    }
}
