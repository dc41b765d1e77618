//! Sign-in payloads.

use serde::{Deserialize, Serialize};

use super::form::{FormFields, FormReader, ValidationError};
use super::user::UserWire;

/// Username/password pair submitted on sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse a submitted sign-in form.
    pub fn from_form(fields: &FormFields) -> Result<Self, ValidationError> {
        let mut form = FormReader::new(fields);
        let username = form.required_text("username");
        let password = form.required_text("password");
        form.finish(Self { username, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"••••••••")
            .finish()
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub expires_in_mins: u32,
}

/// Answer to `POST /auth/login`: the token plus the signed-in profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(flatten)]
    pub user: UserWire,
}
