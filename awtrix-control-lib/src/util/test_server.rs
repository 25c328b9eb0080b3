//! A one-shot HTTP responder standing in for the device in tests.

use std::net::SocketAddr;

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const API_PREFIX: &str = "/api/v3";

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

pub struct FakeDevice {
    addr: SocketAddr,
    handle: JoinHandle<CapturedRequest>,
}

impl FakeDevice {
    /// Accepts a single connection, records the request and answers with
    /// `status` and `body`.
    pub async fn respond(status: u16, body: &'static str) -> Self {
        init_logging();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {} Fake\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        FakeDevice { addr, handle }
    }

    /// Base API URL pointing at this device.
    pub fn base(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }

    pub async fn request(self) -> CapturedRequest {
        self.handle.await.unwrap()
    }
}

/// Routes `log` output (request lines from `LogObserver`) to the test harness.
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// A URL on a port nobody listens on.
pub async fn unused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, API_PREFIX)
}

/// A client that ignores proxy settings from the environment.
pub fn test_client() -> Client {
    init_logging();
    Client::builder().no_proxy().build().unwrap()
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = find(&buffer, b"\r\n\r\n") {
            break pos;
        }
        let read = stream.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before headers were complete");
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .collect();

    let header = |name: &str| {
        headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };
    let mut body = buffer[header_end + 4..].to_vec();

    if let Some(length) = header("content-length") {
        let length: usize = length.parse().unwrap();
        while body.len() < length {
            let read = stream.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed before body was complete");
            body.extend_from_slice(&chunk[..read]);
        }
    } else if header("transfer-encoding").as_deref() == Some("chunked") {
        while find(&body, b"0\r\n\r\n").is_none() {
            let read = stream.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed before last chunk");
            body.extend_from_slice(&chunk[..read]);
        }
        body = decode_chunked(&body);
    }

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn decode_chunked(mut raw: &[u8]) -> Vec<u8> {
    let mut decoded = Vec::new();
    loop {
        let line_end = find(raw, b"\r\n").unwrap();
        let size_line = String::from_utf8_lossy(&raw[..line_end]).to_string();
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16).unwrap();
        if size == 0 {
            return decoded;
        }
        let start = line_end + 2;
        decoded.extend_from_slice(&raw[start..start + size]);
        raw = &raw[start + size + 2..];
    }
}
