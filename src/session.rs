//! Mock session identity.
//!
//! There is no real credential handling here: login and register accept any
//! password and fabricate a local user. A production embedding must replace
//! this with a real identity provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

const USER_ID_PREFIX: &str = "user_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    /// Build a user for a login: display name derived from the email local
    /// part.
    pub(crate) fn from_login(email: &str) -> Result<Self> {
        let email = non_empty(email)
            .ok_or_else(|| Error::Validation("email must not be empty".to_string()))?;
        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(Self {
            id: generate_user_id(),
            email: email.to_string(),
            name,
        })
    }

    /// Build a user for a registration with an explicit display name.
    pub(crate) fn from_registration(name: &str, email: &str) -> Result<Self> {
        let email = non_empty(email)
            .ok_or_else(|| Error::Validation("email must not be empty".to_string()))?;
        let name = non_empty(name)
            .ok_or_else(|| Error::Validation("name must not be empty".to_string()))?;
        Ok(Self {
            id: generate_user_id(),
            email: email.to_string(),
            name: name.to_string(),
        })
    }
}

fn generate_user_id() -> String {
    format!("{}{}", USER_ID_PREFIX, Uuid::new_v4().simple())
}

fn non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
