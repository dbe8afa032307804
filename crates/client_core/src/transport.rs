//! The remote resource contract and its HTTP implementation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Record, ResourceKind},
    error::ApiErrorBody,
    protocol::{ListParams, Page, ResourceStats},
};
use tracing::{debug, warn};
use url::Url;

use crate::{error::ApiFailure, session::Session};

#[async_trait]
pub trait ResourceApi<R: Record>: Send + Sync {
    async fn list(&self, session: &Session, params: &ListParams) -> Result<Page<R>, ApiFailure>;
    async fn stats(&self, session: &Session) -> Result<ResourceStats, ApiFailure>;
    async fn create(&self, session: &Session, draft: &R::Draft) -> Result<R, ApiFailure>;
    async fn update(
        &self,
        session: &Session,
        id: &R::Id,
        patch: &R::Draft,
    ) -> Result<R, ApiFailure>;
    async fn delete(&self, session: &Session, id: &R::Id) -> Result<(), ApiFailure>;
}

/// Placeholder used before a backend URL is configured.
pub struct MissingResourceApi;

#[async_trait]
impl<R: Record> ResourceApi<R> for MissingResourceApi {
    async fn list(&self, _session: &Session, _params: &ListParams) -> Result<Page<R>, ApiFailure> {
        Err(unavailable(R::KIND))
    }

    async fn stats(&self, _session: &Session) -> Result<ResourceStats, ApiFailure> {
        Err(unavailable(R::KIND))
    }

    async fn create(&self, _session: &Session, _draft: &R::Draft) -> Result<R, ApiFailure> {
        Err(unavailable(R::KIND))
    }

    async fn update(
        &self,
        _session: &Session,
        _id: &R::Id,
        _patch: &R::Draft,
    ) -> Result<R, ApiFailure> {
        Err(unavailable(R::KIND))
    }

    async fn delete(&self, _session: &Session, _id: &R::Id) -> Result<(), ApiFailure> {
        Err(unavailable(R::KIND))
    }
}

fn unavailable(kind: ResourceKind) -> ApiFailure {
    ApiFailure::Transport(format!("no backend configured for {kind}"))
}

/// Talks to the admin REST backend under `{base}/api/{resource}`.
#[derive(Clone, Debug)]
pub struct HttpResourceClient {
    http: Client,
    base_url: Url,
}

impl HttpResourceClient {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::with_client(Client::new(), Url::parse(base_url)?))
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, kind: ResourceKind, tail: &[&str]) -> Result<Url, ApiFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiFailure::Transport(format!("invalid backend base url '{}'", self.base_url))
            })?
            .pop_if_empty()
            .push("api")
            .push(kind.as_str())
            .extend(tail);
        Ok(url)
    }

    async fn dispatch(
        &self,
        session: &Session,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, ApiFailure> {
        let request = match session.authorization().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|err| ApiFailure::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let failure = failure_from_response(status, &body);
        warn!(status = status.as_u16(), error = %failure, "admin api request rejected");
        Err(failure)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: RequestBuilder,
    ) -> Result<T, ApiFailure> {
        self.dispatch(session, request)
            .await?
            .json()
            .await
            .map_err(|err| ApiFailure::Decode(err.to_string()))
    }
}

/// Maps a non-success response to the failure taxonomy.
pub fn failure_from_response(status: StatusCode, body: &str) -> ApiFailure {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|body| body.detail_text().map(str::to_string));

    match status {
        StatusCode::UNAUTHORIZED => ApiFailure::Unauthenticated,
        StatusCode::FORBIDDEN => ApiFailure::Forbidden { detail },
        StatusCode::NOT_FOUND => ApiFailure::NotFound { detail },
        _ => match detail {
            Some(detail) => ApiFailure::Validation {
                status: status.as_u16(),
                detail,
            },
            None => ApiFailure::Status {
                status: status.as_u16(),
            },
        },
    }
}

#[async_trait]
impl<R: Record> ResourceApi<R> for HttpResourceClient {
    async fn list(&self, session: &Session, params: &ListParams) -> Result<Page<R>, ApiFailure> {
        let url = self.endpoint(R::KIND, &[])?;
        debug!(resource = %R::KIND, ?params, "GET list");
        self.fetch_json(session, self.http.get(url).query(&params.to_query_pairs()))
            .await
    }

    async fn stats(&self, session: &Session) -> Result<ResourceStats, ApiFailure> {
        let url = self.endpoint(R::KIND, &["stats"])?;
        debug!(resource = %R::KIND, "GET stats");
        self.fetch_json(session, self.http.get(url)).await
    }

    async fn create(&self, session: &Session, draft: &R::Draft) -> Result<R, ApiFailure> {
        let url = self.endpoint(R::KIND, &[])?;
        debug!(resource = %R::KIND, "POST create");
        self.fetch_json(session, self.http.post(url).json(draft))
            .await
    }

    async fn update(
        &self,
        session: &Session,
        id: &R::Id,
        patch: &R::Draft,
    ) -> Result<R, ApiFailure> {
        let id = id.to_string();
        let url = self.endpoint(R::KIND, &[id.as_str()])?;
        debug!(resource = %R::KIND, id = %id, "PUT update");
        self.fetch_json(session, self.http.put(url).json(patch))
            .await
    }

    async fn delete(&self, session: &Session, id: &R::Id) -> Result<(), ApiFailure> {
        let id = id.to_string();
        let url = self.endpoint(R::KIND, &[id.as_str()])?;
        debug!(resource = %R::KIND, id = %id, "DELETE");
        // Some endpoints answer with `true`, others with an empty body.
        self.dispatch(session, self.http.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
