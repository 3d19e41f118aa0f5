//! User, credential, and profile models.

use chrono::NaiveDate;
use ridgeline_core::Email;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum password length accepted at registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The signed-in user's profile as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub birth_date: Option<NaiveDate>,
    pub shipping_address: Option<String>,
}

impl User {
    /// Display name, `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: SecretString,
}

/// Errors from local registration validation. Nothing is sent to the
/// backend until these pass.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("first name cannot be empty")]
    EmptyFirstName,
    #[error("last name cannot be empty")]
    EmptyLastName,
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

/// A new-account request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: SecretString,
}

impl Registration {
    /// Validate the registration locally.
    ///
    /// # Errors
    ///
    /// Returns an error if either name is blank or the password is shorter
    /// than [`MIN_PASSWORD_LENGTH`] characters.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.first_name.trim().is_empty() {
            return Err(RegistrationError::EmptyFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(RegistrationError::EmptyLastName);
        }
        if self.password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }
}

/// Editable profile fields. Email is fixed at registration and deliberately
/// not part of this struct.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub shipping_address: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: Email::parse("ana@example.com").unwrap(),
            password: SecretString::from("longenough"),
        }
    }

    #[test]
    fn test_validate_accepts_complete_registration() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_names() {
        let mut reg = registration();
        reg.first_name = "   ".to_string();
        assert!(matches!(
            reg.validate(),
            Err(RegistrationError::EmptyFirstName)
        ));

        let mut reg = registration();
        reg.last_name = String::new();
        assert!(matches!(
            reg.validate(),
            Err(RegistrationError::EmptyLastName)
        ));
    }

    #[test]
    fn test_validate_rejects_short_password() {
        let mut reg = registration();
        reg.password = SecretString::from("seven77");
        assert!(matches!(
            reg.validate(),
            Err(RegistrationError::PasswordTooShort { min: 8 })
        ));
    }

    #[test]
    fn test_full_name() {
        let user = User {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: Email::parse("ana@example.com").unwrap(),
            birth_date: None,
            shipping_address: None,
        };
        assert_eq!(user.full_name(), "Ana Reyes");
    }
}
