use std::sync::Arc;

use crate::http::{ApiError, HttpClient};
use crate::model::auth::{Credentials, LoginRequest, LoginResponse};
use crate::model::user::{self, User, UserWire};
use crate::session::AccessToken;

/// Sign-in/sign-out against the backend's auth endpoints.
///
/// [`AuthService::sign_in`] and [`AuthService::sign_out`] also persist and
/// clear the credential. Callers that must decide whether a login still
/// counts use [`AuthService::authenticate`] and [`AuthService::persist`]
/// separately.
#[derive(Clone)]
pub struct AuthService {
    http: Arc<HttpClient>,
    expires_in_mins: u32,
}

impl AuthService {
    pub fn new(http: Arc<HttpClient>, expires_in_mins: u32) -> Self {
        Self {
            http,
            expires_in_mins,
        }
    }

    /// Exchange credentials for a token and profile. Nothing is stored.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<(AccessToken, User), ApiError> {
        let request = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
            expires_in_mins: self.expires_in_mins,
        };
        let response: LoginResponse = self.http.post("/auth/login", &request).await?;

        let Some(token) = AccessToken::new(response.access_token) else {
            return Err(ApiError::MissingToken);
        };
        Ok((token, user::from_wire(response.user)))
    }

    pub fn persist(&self, token: &AccessToken) -> Result<(), ApiError> {
        self.http.tokens().set(token)?;
        tracing::info!("Signed in");
        Ok(())
    }

    /// Forget the stored credential. There is no server-side logout.
    pub fn forget(&self) -> Result<(), ApiError> {
        self.http.tokens().clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Exchange credentials for a token, store it and return the profile.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let (token, profile) = self.authenticate(credentials).await?;
        self.persist(&token)?;
        tracing::debug!(username = %profile.username, "Profile received");
        Ok(profile)
    }

    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.forget()
    }

    /// Profile of the user the stored token belongs to.
    pub async fn me(&self) -> Result<User, ApiError> {
        let wire: UserWire = self.http.get("/auth/me", &[]).await?;
        Ok(user::from_wire(wire))
    }
}
