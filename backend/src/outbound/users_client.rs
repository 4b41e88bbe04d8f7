//! Reqwest-backed client for the users REST API.
//!
//! This adapter owns transport details only: URL construction, status
//! mapping and JSON decoding. Form submissions are validated locally before
//! any request is sent.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::form::{FormErrors, Submission, UserForm};
use crate::domain::{NewUser, User, UserId, UserList, UserPatch};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USERS_PATH: &str = "/api/users";

/// Failures surfaced by [`UsersClient`].
#[derive(Debug, thiserror::Error)]
pub enum UsersClientError {
    /// The base URL cannot carry path segments.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The addressed user does not exist.
    #[error("user {0} not found")]
    NotFound(UserId),
    /// The server answered with a status the operation does not expect.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Status returned by the server.
        status: StatusCode,
        /// Raw response body, for diagnostics.
        body: String,
    },
    /// A success body did not decode into the expected type.
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
    /// The form failed local validation; nothing was sent.
    #[error("form has invalid fields")]
    Validation(#[from] FormErrors),
}

/// Client for `/api/users` on one server.
///
/// # Examples
/// ```
/// use reqwest::Url;
/// use roster::outbound::UsersClient;
///
/// let base = Url::parse("http://127.0.0.1:8080").expect("valid URL");
/// let client = UsersClient::new(base).expect("client builds");
/// # let _ = client;
/// ```
#[derive(Debug, Clone)]
pub struct UsersClient {
    client: Client,
    users_url: Url,
}

impl UsersClient {
    /// Build a client with the default request timeout.
    ///
    /// # Errors
    /// [`UsersClientError::InvalidBaseUrl`] when `base` cannot hold a path;
    /// [`UsersClientError::Transport`] when the reqwest client cannot be
    /// constructed.
    pub fn new(base: Url) -> Result<Self, UsersClientError> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    /// As for [`UsersClient::new`].
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, UsersClientError> {
        if base.cannot_be_a_base() {
            return Err(UsersClientError::InvalidBaseUrl(base.to_string()));
        }
        let users_url = base
            .join(USERS_PATH)
            .map_err(|err| UsersClientError::InvalidBaseUrl(format!("{base}: {err}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, users_url })
    }

    /// Fetch every stored user.
    ///
    /// # Errors
    /// Transport, status and decode failures.
    pub async fn list_users(&self) -> Result<Vec<User>, UsersClientError> {
        let response = self.client.get(self.users_url.clone()).send().await?;
        let list: UserList = expect_json(response, StatusCode::OK).await?;
        Ok(list.data)
    }

    /// Fetch one user; `None` when the server does not know `id`.
    ///
    /// # Errors
    /// Transport, status and decode failures other than 404.
    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, UsersClientError> {
        match self.send_for(Method::GET, id, None::<&()>).await {
            Ok(user) => Ok(Some(user)),
            Err(UsersClientError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Merge `patch` into the stored user.
    ///
    /// # Errors
    /// [`UsersClientError::NotFound`] for an unknown id, plus transport,
    /// status and decode failures.
    pub async fn update_user(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<User, UsersClientError> {
        self.send_for(Method::PATCH, id, Some(patch)).await
    }

    /// Create a user; the server assigns its id.
    ///
    /// # Errors
    /// Transport, status and decode failures.
    pub async fn add_user(&self, fields: &NewUser) -> Result<User, UsersClientError> {
        let response = self
            .client
            .post(self.users_url.clone())
            .json(fields)
            .send()
            .await?;
        expect_json(response, StatusCode::CREATED).await
    }

    /// Delete a user and return the removed record.
    ///
    /// # Errors
    /// [`UsersClientError::NotFound`] for an unknown id, plus transport,
    /// status and decode failures.
    pub async fn delete_user(&self, id: &UserId) -> Result<User, UsersClientError> {
        self.send_for(Method::DELETE, id, None::<&()>).await
    }

    /// Validate `form`, then create or update accordingly.
    ///
    /// # Errors
    /// [`UsersClientError::Validation`] without touching the network when
    /// any field fails; otherwise as for [`UsersClient::add_user`] and
    /// [`UsersClient::update_user`].
    pub async fn submit(&self, form: &UserForm) -> Result<User, UsersClientError> {
        let validated = form.validate().inspect_err(|errors| {
            debug!(invalid_fields = errors.len(), "form rejected before submission");
        })?;
        match validated.into_submission() {
            Submission::Create(fields) => self.add_user(&fields).await,
            Submission::Update { id, patch } => self.update_user(&id, &patch).await,
        }
    }

    fn user_url(&self, id: &UserId) -> Result<Url, UsersClientError> {
        let mut url = self.users_url.clone();
        url.path_segments_mut()
            .map_err(|()| UsersClientError::InvalidBaseUrl(self.users_url.to_string()))?
            .pop_if_empty()
            .push(id.as_ref());
        Ok(url)
    }

    async fn send_for<B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        id: &UserId,
        body: Option<&B>,
    ) -> Result<User, UsersClientError> {
        let mut request = self.client.request(method, self.user_url(id)?);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(UsersClientError::NotFound(id.clone()));
        }
        expect_json(response, StatusCode::OK).await
    }
}

async fn expect_json<T: DeserializeOwned>(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<T, UsersClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if status != expected {
        let body = String::from_utf8_lossy(&body).into_owned();
        warn!(%status, %expected, "users API answered with an unexpected status");
        return Err(UsersClientError::UnexpectedStatus { status, body });
    }
    serde_json::from_slice(&body).map_err(UsersClientError::Decode)
}
