//! Typed access to the `/api/v1/duties` resource.

use async_trait::async_trait;
use duties_core::duty::{Duty, DutyInput, BASE_DUTIES_ROUTE};
use reqwest::{Method, Url};

use crate::error::ClientError;
use crate::request::{request, PendingRequest, RequestCanceller};

/// Duty operations the UI state depends on.
#[async_trait]
pub trait DutiesApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Duty>, ClientError>;

    /// Create a duty named `name`; returns it with its server-assigned id.
    async fn add(&self, name: &str) -> Result<Duty, ClientError>;

    async fn update(&self, duty: &Duty) -> Result<Duty, ClientError>;

    async fn remove(&self, id: &str) -> Result<(), ClientError>;
}

/// HTTP client for a duties server.
#[derive(Debug, Clone)]
pub struct DutiesClient {
    client: reqwest::Client,
    base_url: Url,
}

impl DutiesClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Start loading the list, returning a handle to abort it.
    pub fn list_cancellable(&self) -> Result<(RequestCanceller, PendingRequest<Vec<Duty>>), ClientError> {
        Ok(request::<(), _>(
            &self.client,
            self.duties_url()?,
            Method::GET,
            None,
        ))
    }

    fn duties_url(&self) -> Result<Url, ClientError> {
        self.base_url
            .join(BASE_DUTIES_ROUTE)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// `{base}/api/v1/duties/{id}` with `id` percent-encoded as one segment.
    fn duty_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.duties_url()?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl DutiesApi for DutiesClient {
    async fn list(&self) -> Result<Vec<Duty>, ClientError> {
        let (_, pending) = self.list_cancellable()?;
        pending.await
    }

    async fn add(&self, name: &str) -> Result<Duty, ClientError> {
        let body = DutyInput::named(name);
        let (_, pending) =
            request::<_, Duty>(&self.client, self.duties_url()?, Method::PUT, Some(&body));
        pending.await
    }

    async fn update(&self, duty: &Duty) -> Result<Duty, ClientError> {
        let body = DutyInput::from(duty);
        let (_, pending) =
            request::<_, Duty>(&self.client, self.duty_url(&duty.id)?, Method::POST, Some(&body));
        pending.await
    }

    async fn remove(&self, id: &str) -> Result<(), ClientError> {
        let (_, pending) = request::<(), ()>(&self.client, self.duty_url(id)?, Method::DELETE, None);
        pending.await
    }
}
