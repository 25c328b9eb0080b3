use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AwtrixError, Result};
use crate::util::transport::{ensure_status_code, Transport};

/// What the device sent back: `None` for an empty body, otherwise the parsed JSON.
pub type Reply = Option<Value>;

/// The only status code the device answers with on success.
pub const EXPECTED_STATUS: &[u16] = &[200];

impl Transport {
    /// POSTs `payload` as JSON, reads the whole response and checks its status.
    ///
    /// An empty response body is returned as `None` without going through the
    /// JSON parser.
    pub async fn post_json<T>(&self, url: &str, payload: &T) -> Result<Reply>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(AwtrixError::Encode)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self.post(url, body, headers).await?;
        let status = response.status();
        let bytes = Transport::read_body(response).await?;

        ensure_status_code(status, EXPECTED_STATUS)?;
        parse_reply(&bytes)
    }
}

pub fn parse_reply(bytes: &[u8]) -> Result<Reply> {
    if bytes.is_empty() {
        debug!("Empty response body");
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(AwtrixError::Parse)
}
