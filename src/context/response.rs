use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};

/// Response sink handed to filters and handlers. Writing a status or any
/// body bytes marks the response as started.
#[derive(Debug, Default)]
pub struct Response {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
    started: bool,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
        self.started = true;
    }

    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
        self.started = true;
    }

    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub(crate) fn into_http(self) -> http::Response<Vec<u8>> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}
