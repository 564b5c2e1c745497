use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::password;

pub const USERS_EMAIL_KEY: &str = "users_email_key";
pub const USERS_USERNAME_KEY: &str = "users_username_key";

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,                // unique across all users
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Unsaved user whose password is unusable until [`User::set_password`].
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password::unusable_password(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn set_password(&mut self, plain: &str) -> anyhow::Result<()> {
        self.password_hash = password::hash_password(plain)?;
        Ok(())
    }

    pub fn set_unusable_password(&mut self) {
        self.password_hash = password::unusable_password();
    }

    pub fn has_usable_password(&self) -> bool {
        password::is_password_usable(&self.password_hash)
    }

    pub fn check_password(&self, plain: &str) -> anyhow::Result<bool> {
        password::verify_password(plain, &self.password_hash)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

/// One-to-one extension of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub postal_code: String,
    pub stripe_customer_id: String,
}

impl Profile {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            postal_code: String::new(),
            stripe_customer_id: String::new(),
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(postal_code) = update.postal_code {
            self.postal_code = postal_code;
        }
        if let Some(customer_id) = update.stripe_customer_id {
            self.stripe_customer_id = customer_id;
        }
    }
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub postal_code: Option<String>,
    pub stripe_customer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InviteEmail {
    pub id: Uuid,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
}

impl InviteEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            created_date: OffsetDateTime::now_utc(),
        }
    }
}
