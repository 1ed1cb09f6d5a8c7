//! reqwest-backed implementation shared by all resource repositories.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::types::TypeConstraintError;
use crate::models::config::ServerConfig;
use crate::repository::envelope::{DataEnvelope, ListEnvelope};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{Page, QueryPairs, encode_query};

/// Client for the clinic REST API.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRepository {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_config(config: &ServerConfig) -> RepositoryResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.api_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, pairs: &QueryPairs) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !pairs.is_empty() {
            url.push('?');
            url.push_str(&encode_query(pairs));
        }
        url
    }

    fn request(&self, method: Method, path: &str, pairs: &QueryPairs) -> RequestBuilder {
        let url = self.url(path, pairs);
        log::debug!("{method} {url}");
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Fetches one page of a list endpoint and converts each record.
    pub(crate) async fn fetch_page<W, D>(
        &self,
        path: &str,
        pairs: QueryPairs,
    ) -> RepositoryResult<Page<D>>
    where
        W: DeserializeOwned,
        D: TryFrom<W, Error = TypeConstraintError>,
    {
        let response = self.request(Method::GET, path, &pairs).send().await?;
        let envelope: ListEnvelope<W> = ensure_success(response).await?.json().await?;
        let (data, meta) = envelope.into_parts();
        let items = data
            .into_iter()
            .map(D::try_from)
            .collect::<Result<Vec<D>, _>>()?;
        Ok(Page { items, meta })
    }

    /// Fetches a single record, mapping 404 to `None`.
    pub(crate) async fn fetch_one<W, D>(
        &self,
        path: &str,
        pairs: QueryPairs,
    ) -> RepositoryResult<Option<D>>
    where
        W: DeserializeOwned,
        D: TryFrom<W, Error = TypeConstraintError>,
    {
        let response = self.request(Method::GET, path, &pairs).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: DataEnvelope<W> = ensure_success(response).await?.json().await?;
        Ok(Some(D::try_from(envelope.data)?))
    }

    /// Sends a JSON body (POST, PUT or PATCH) and converts the returned record.
    pub(crate) async fn send<B, W, D>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> RepositoryResult<D>
    where
        B: Serialize + ?Sized,
        W: DeserializeOwned,
        D: TryFrom<W, Error = TypeConstraintError>,
    {
        let response = self
            .request(method, path, &QueryPairs::new())
            .json(body)
            .send()
            .await?;
        let envelope: DataEnvelope<W> = ensure_success(response).await?.json().await?;
        Ok(D::try_from(envelope.data)?)
    }

    /// Issues a DELETE; the response body, if any, is ignored.
    pub(crate) async fn remove(&self, path: &str) -> RepositoryResult<()> {
        let response = self
            .request(Method::DELETE, path, &QueryPairs::new())
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into a [`RepositoryError`] carrying the backend
/// message.
async fn ensure_success(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let err = RepositoryError::from_response(status, &body);
    log::warn!("API request failed with {status}: {err}");
    Err(err)
}
