use log::debug;
use reqwest::Method;

use crate::util::transport::RequestBody;

/// Hook invoked by [`Transport`](crate::util::transport::Transport) right before
/// every request goes out.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, method: &Method, url: &str, body: &RequestBody);

    /// Short label used when the observer shows up in debug output.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// The `<url> <body>` line written for each request. Streamed bodies show as
/// `<stream>` since they are not buffered.
pub fn trace_line(url: &str, body: &RequestBody) -> String {
    format!("{} {}", url, body)
}

impl<F> RequestObserver for F
where
    F: Fn(&Method, &str, &RequestBody) + Send + Sync,
{
    fn on_request(&self, method: &Method, url: &str, body: &RequestBody) {
        self(method, url, body)
    }
}

/// Writes each request to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RequestObserver for LogObserver {
    fn on_request(&self, method: &Method, url: &str, body: &RequestBody) {
        debug!("{} {}", method, trace_line(url, body));
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Prints `<url> <body>` to standard output for each request.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutObserver;

impl RequestObserver for StdoutObserver {
    fn on_request(&self, _method: &Method, url: &str, body: &RequestBody) {
        println!("{}", trace_line(url, body));
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
