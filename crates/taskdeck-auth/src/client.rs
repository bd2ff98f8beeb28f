use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskdeck_core::{DeckError, DeckResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Token plus user, as returned by signin and signup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ProfileResponse {
    user: User,
}

/// Error payloads carry a human-readable `message`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// The remote authentication API, narrowed to the calls the board needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> DeckResult<AuthSession>;
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> DeckResult<AuthSession>;
    async fn profile(&self, token: &str) -> DeckResult<User>;
}

/// HTTP implementation over the remote auth backend.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn connection_error(err: reqwest::Error) -> DeckError {
    DeckError::Connection(err.to_string())
}

/// Map a non-2xx response to `DeckError::Auth`, preferring the server's
/// `message` over the fallback phrase.
async fn auth_error(response: reqwest::Response, fallback: &str) -> DeckError {
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => None,
    };
    DeckError::Auth(message.unwrap_or_else(|| fallback.to_string()))
}

async fn decode_session(response: reqwest::Response, fallback: &str) -> DeckResult<AuthSession> {
    if !response.status().is_success() {
        return Err(auth_error(response, fallback).await);
    }
    response
        .json::<AuthSession>()
        .await
        .map_err(|e| DeckError::Serialization(e.to_string()))
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> DeckResult<AuthSession> {
        let response = self
            .http
            .post(self.url("/auth/signin"))
            .json(&SignInBody { email, password })
            .send()
            .await
            .map_err(connection_error)?;
        decode_session(response, "Login failed").await
    }

    async fn sign_up(&self, name: &str, email: &str, password: &str) -> DeckResult<AuthSession> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&SignUpBody {
                name,
                email,
                password,
            })
            .send()
            .await
            .map_err(connection_error)?;
        decode_session(response, "Signup failed").await
    }

    async fn profile(&self, token: &str) -> DeckResult<User> {
        let response = self
            .http
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(connection_error)?;
        if !response.status().is_success() {
            return Err(auth_error(response, "Session expired").await);
        }
        response
            .json::<ProfileResponse>()
            .await
            .map(|body| body.user)
            .map_err(|e| DeckError::Serialization(e.to_string()))
    }
}
