//! REST client for the staff directory HTTP API.
//!
//! Wraps the directory endpoints (listing, single-record fetch, create,
//! partial update, group names) using [`reqwest`]. Error envelopes are
//! decoded into [`ClientError::Api`] so callers can branch on the
//! machine-readable code, e.g. `EMAIL_EXISTS` from a create form.

use serde::Deserialize;
use staffdir_core::listing::{ListingQuery, UserPage};
use staffdir_core::types::DbId;
use staffdir_core::user::{CreateUser, UpdateUser, User};

/// Typed HTTP client for a directory server.
pub struct DirectoryApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the directory REST API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("API error ({status}): {code}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code from the envelope.
        code: String,
    },
}

impl ClientError {
    /// True when the server rejected a create/update because the email is
    /// already taken.
    pub fn is_email_conflict(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == "EMAIL_EXISTS")
    }

    /// True for a 404 / `NOT_FOUND` answer on a single-record fetch.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == "NOT_FOUND")
    }
}

/// The server's `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
    code: Option<String>,
}

impl DirectoryApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:3001`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// GET /users with the descriptor's query parameters.
    pub async fn list_users(&self, query: &ListingQuery) -> Result<UserPage, ClientError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if !query.search.is_empty() {
            params.push(("search", query.search.clone()));
        }
        if let Some(field) = query.sort_by {
            params.push(("sortBy", field.as_str().to_string()));
            params.push(("sortDir", query.sort_dir.as_str().to_string()));
        }

        let response = self
            .client
            .get(format!("{}/users", self.base_url))
            .query(&params)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET /users/{id}.
    pub async fn get_user(&self, id: DbId) -> Result<User, ClientError> {
        let response = self
            .client
            .get(format!("{}/users/{id}", self.base_url))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// POST /users. Surfaces `EMAIL_EXISTS` and `VALIDATION` as
    /// [`ClientError::Api`] so forms can react to them.
    pub async fn create_user(&self, input: &CreateUser) -> Result<User, ClientError> {
        let response = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(input)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// PATCH /users/{id} with only the supplied fields.
    pub async fn update_user(&self, id: DbId, patch: &UpdateUser) -> Result<User, ClientError> {
        let response = self
            .client
            .patch(format!("{}/users/{id}", self.base_url))
            .json(patch)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET /groups.
    pub async fn list_groups(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(format!("{}/groups", self.base_url))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], decoding the
    /// error envelope when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let code = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.code.unwrap_or(envelope.error),
            Err(_) => "INTERNAL_ERROR".to_string(),
        };
        Err(ClientError::Api { status, code })
    }
}
