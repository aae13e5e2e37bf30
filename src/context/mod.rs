mod params;
mod response;

pub use params::ParamStore;
pub use response::Response;

use http::HeaderMap;

use crate::enums::HttpMethod;
use crate::errors::RouterResult;

#[derive(Debug)]
pub struct Context {
    method: HttpMethod,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
    params: ParamStore,
    response: Response,
}

impl Context {
    /// `target` may carry a query string; only the part before '?' is routed.
    pub fn new(method: HttpMethod, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            headers: HeaderMap::new(),
            body: Vec::new(),
            params: ParamStore::new(),
            response: Response::new(),
        }
    }

    pub fn from_request<B: AsRef<[u8]>>(request: &http::Request<B>) -> RouterResult<Self> {
        let method = HttpMethod::try_from(request.method())?;
        let mut ctx = Self::new(method, request.uri().path());
        ctx.query = request.uri().query().map(str::to_string);
        ctx.headers = request.headers().clone();
        ctx.body = request.body().as_ref().to_vec();
        Ok(ctx)
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn request_headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn request_body(&self) -> &[u8] {
        &self.body
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    pub fn write_str(&mut self, text: &str) {
        self.response.write_str(text);
    }

    pub fn into_response(self) -> http::Response<Vec<u8>> {
        self.response.into_http()
    }
}
