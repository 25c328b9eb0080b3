use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use derivative::Derivative;
use futures::TryStream;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Body, Client, Method, Response, StatusCode};

use crate::error::{AwtrixError, Result};
use crate::util::observer::{LogObserver, RequestObserver};

/// The payload of a request: either a complete buffer or a stream that is
/// piped to the connection chunk by chunk.
#[derive(Debug)]
pub enum RequestBody {
    Bytes(Bytes),
    Stream(Body),
}

impl RequestBody {
    pub fn empty() -> Self {
        RequestBody::Bytes(Bytes::new())
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: TryStream + Send + Sync + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        RequestBody::Stream(Body::wrap_stream(stream))
    }

    /// The buffered payload, or `None` for a stream.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RequestBody::Bytes(bytes) => Some(bytes),
            RequestBody::Stream(_) => None,
        }
    }
}

impl fmt::Display for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Bytes(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            RequestBody::Stream(_) => write!(f, "<stream>"),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(bytes.into())
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Bytes(text.into())
    }
}

impl From<&'static str> for RequestBody {
    fn from(text: &'static str) -> Self {
        RequestBody::Bytes(Bytes::from_static(text.as_bytes()))
    }
}

/// Thin wrapper over a [`reqwest::Client`] that reports each outgoing request
/// to an optional [`RequestObserver`].
///
/// No retries and no timeouts: a failed connection is returned to the caller
/// as [`AwtrixError::Transport`].
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Transport {
    client: Client,
    #[derivative(Debug = "ignore")]
    observer: Option<Arc<dyn RequestObserver>>,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Uses the given client, logging requests through [`LogObserver`].
    pub fn with_client(client: Client) -> Self {
        Transport {
            client,
            observer: Some(Arc::new(LogObserver)),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn without_observer(mut self) -> Self {
        self.observer = None;
        self
    }

    /// Sends a request and resolves once the status line and headers are in.
    /// The body of the returned response has not been read yet.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<Response> {
        if let Some(observer) = &self.observer {
            observer.on_request(&method, url, &body);
        }

        let body = match body {
            RequestBody::Bytes(bytes) => Body::from(bytes),
            RequestBody::Stream(stream) => stream,
        };

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        debug!("{} answered with status {}", url, response.status());
        Ok(response)
    }

    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<Response> {
        self.send(Method::GET, url, RequestBody::empty(), headers)
            .await
    }

    pub async fn post(
        &self,
        url: &str,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Response> {
        self.send(Method::POST, url, body.into(), headers).await
    }

    /// Drains the response body into memory.
    pub async fn read_body(response: Response) -> Result<Bytes> {
        Ok(response.bytes().await?)
    }
}

/// Fails with [`AwtrixError::StatusCode`] unless `actual` is one of `expected`.
pub fn ensure_status_code(actual: StatusCode, expected: &[u16]) -> Result<()> {
    if expected.contains(&actual.as_u16()) {
        Ok(())
    } else {
        Err(AwtrixError::StatusCode {
            expected: expected.to_vec(),
            actual: actual.as_u16(),
        })
    }
}
