//! Reqwest-backed users and auth adapter.
//!
//! This adapter owns transport details only: URL building, headers, timeout
//! and HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use pagination::PageNumber;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::dto::{
    CreatedUserDto, CredentialsBody, RegisteredDto, TokenDto, UpdatedUserDto, UserDetailDto,
    UserDraftBody, UserDto, page_into_domain,
};
use crate::domain::ports::{AuthApi, UsersApi};
use crate::domain::{
    ApiFailure, AuthToken, CreatedUser, LoginCredentials, RegisteredAccount, Registration,
    UpdatedUser, UserDetail, UserDraft, UserId, UsersPage,
};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Users and auth adapter for one reqres-compatible base URL.
pub struct ReqresClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ReqresClient {
    /// Build an adapter. With `timeout` unset, requests wait indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: with_trailing_slash(base_url),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiFailure> {
        self.base_url
            .join(path)
            .map_err(|error| ApiFailure::transport(format!("invalid endpoint `{path}`: {error}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiFailure> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "sending request");
        Ok(self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json"))
    }

    async fn send(request: RequestBuilder) -> Result<Vec<u8>, ApiFailure> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl UsersApi for ReqresClient {
    async fn list_users(&self, page: PageNumber) -> Result<UsersPage, ApiFailure> {
        let request = self
            .request(Method::GET, "users")?
            .query(&[("page", page.get())]);
        let body = Self::send(request).await?;
        let decoded = decode::<pagination::Page<UserDto>>(&body)?;
        page_into_domain(decoded).map_err(ApiFailure::decode)
    }

    async fn get_user(&self, id: UserId) -> Result<UserDetail, ApiFailure> {
        let request = self.request(Method::GET, &format!("users/{id}"))?;
        let body = Self::send(request).await?;
        decode::<UserDetailDto>(&body)?
            .into_domain()
            .map_err(ApiFailure::decode)
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<CreatedUser, ApiFailure> {
        let request = self
            .request(Method::POST, "users")?
            .json(&draft_body(draft));
        let body = Self::send(request).await?;
        decode::<CreatedUserDto>(&body).map(CreatedUser::from)
    }

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<UpdatedUser, ApiFailure> {
        let request = self
            .request(Method::PUT, &format!("users/{id}"))?
            .json(&draft_body(draft));
        let body = Self::send(request).await?;
        decode::<UpdatedUserDto>(&body).map(UpdatedUser::from)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiFailure> {
        let request = self.request(Method::DELETE, &format!("users/{id}"))?;
        Self::send(request).await.map(drop)
    }
}

#[async_trait]
impl AuthApi for ReqresClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, ApiFailure> {
        let request = self.request(Method::POST, "login")?.json(&CredentialsBody {
            email: credentials.email(),
            password: credentials.password(),
        });
        let body = Self::send(request).await?;
        decode::<TokenDto>(&body).map(|dto| AuthToken::new(dto.token))
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<RegisteredAccount, ApiFailure> {
        let request = self.request(Method::POST, "register")?.json(&CredentialsBody {
            email: registration.email(),
            password: registration.password(),
        });
        let body = Self::send(request).await?;
        decode::<RegisteredDto>(&body).map(RegisteredAccount::from)
    }

    async fn logout(&self) -> Result<(), ApiFailure> {
        let request = self.request(Method::POST, "logout")?;
        Self::send(request).await.map(drop)
    }
}

fn draft_body(draft: &UserDraft) -> UserDraftBody<'_> {
    UserDraftBody {
        name: draft.name(),
        job: draft.job(),
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiFailure> {
    serde_json::from_slice(body)
        .map_err(|error| ApiFailure::decode(format!("invalid response payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiFailure {
    if error.is_timeout() {
        ApiFailure::transport(format!("request timed out: {error}"))
    } else {
        ApiFailure::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiFailure {
    let parsed = serde_json::from_slice::<Value>(body).ok();
    debug!(status = status.as_u16(), json_body = parsed.is_some(), "request rejected");
    ApiFailure::server(status.as_u16(), parsed)
}
