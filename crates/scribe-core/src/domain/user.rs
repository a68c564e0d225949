use chrono::{DateTime, Utc};
use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{FieldErrors, is_valid_username};

pub const USERNAME_MAX_LEN: usize = 150;
pub const NAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;

/// Bare addresses with a dotted domain; display names like `Ada <ada@x.org>` are rejected.
fn is_valid_email(value: &str) -> bool {
    let options = Options {
        minimum_sub_domains: 2,
        allow_display_text: false,
        ..Options::default()
    };
    EmailAddress::parse_with_options(value, options).is_ok()
}

/// User entity - represents a registered author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(registration: Registration, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: registration.username,
            email: registration.email,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A registration request that passed shape validation.
///
/// Uniqueness of `email` and `username` needs the repository and is checked
/// by the caller afterwards.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Raw registration input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub password2: Option<&'a str>,
}

impl RegistrationInput<'_> {
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = errors.require("email", self.email).map(str::trim);
        if let Some(email) = email {
            errors.max_length("email", email, EMAIL_MAX_LEN);
            if !is_valid_email(email) {
                errors.add("email", "Enter a valid email address.");
            }
        }

        let username = errors.require("username", self.username).map(str::trim);
        if let Some(username) = username {
            errors.max_length("username", username, USERNAME_MAX_LEN);
            if !is_valid_username(username) {
                errors.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            }
        }

        let password = errors.require("password", self.password);
        let password2 = errors.require("password2", self.password2);
        if let (Some(p1), Some(p2)) = (password, password2) {
            if p1 != p2 {
                errors.add("password2", "Passwords must match.");
            }
        }

        let first_name = self.first_name.unwrap_or_default().trim();
        let last_name = self.last_name.unwrap_or_default().trim();
        errors.max_length("first_name", first_name, NAME_MAX_LEN);
        errors.max_length("last_name", last_name, NAME_MAX_LEN);

        errors.into_result()?;

        Ok(Registration {
            username: username.unwrap_or_default().to_string(),
            email: email.unwrap_or_default().to_string(),
            password: password.unwrap_or_default().to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }
}
