//! Cancellable JSON requests.
//!
//! [`request`] starts the call on the runtime right away and hands back a
//! [`RequestCanceller`] together with a [`PendingRequest`] to await.

use std::future::IntoFuture;

use duties_core::error::ErrorBody;
use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Handle that aborts an in-flight [`request`].
///
/// Dropping it does not cancel anything.
#[derive(Debug, Clone)]
pub struct RequestCanceller {
    token: CancellationToken,
}

impl RequestCanceller {
    /// Abort the request. Its [`PendingRequest`] resolves to
    /// [`ClientError::Cancelled`] unless it already settled.
    pub fn cancel_request(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Result of a [`request`], resolved by awaiting it.
///
/// Dropping it detaches the request; it still runs to completion.
pub struct PendingRequest<R> {
    handle: JoinHandle<Result<R, ClientError>>,
}

impl<R: Send + 'static> IntoFuture for PendingRequest<R> {
    type Output = Result<R, ClientError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            match self.handle.await {
                Ok(result) => result,
                Err(err) if err.is_cancelled() => Err(ClientError::Cancelled),
                Err(err) => std::panic::resume_unwind(err.into_panic()),
            }
        })
    }
}

/// Send `body` (if any) as JSON with `method` to `url` and decode the JSON
/// response into `R`.
///
/// Non-2xx responses fail with [`ClientError::Status`]. An empty success body
/// decodes as JSON `null`, so `R = ()` fits a `204 No Content`.
///
/// Must be called from within a Tokio runtime.
pub fn request<B, R>(
    client: &reqwest::Client,
    url: Url,
    method: Method,
    body: Option<&B>,
) -> (RequestCanceller, PendingRequest<R>)
where
    B: Serialize + ?Sized,
    R: DeserializeOwned + Send + 'static,
{
    let mut builder = client
        .request(method, url)
        .header(ACCEPT, "application/json");
    if let Some(body) = body {
        builder = builder.json(body);
    }

    let token = CancellationToken::new();
    let task_token = token.clone();
    let handle = tokio::spawn(async move {
        tokio::select! {
            () = task_token.cancelled() => Err(ClientError::Cancelled),
            result = send(builder) => result,
        }
    });

    (RequestCanceller { token }, PendingRequest { handle })
}

async fn send<R: DeserializeOwned>(builder: RequestBuilder) -> Result<R, ClientError> {
    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .map(|body| body.message);
        tracing::error!(status = status.as_u16(), message = ?message, "Request failed");
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    decode(&bytes)
}

fn decode<R: DeserializeOwned>(bytes: &[u8]) -> Result<R, ClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(bytes)?)
}
