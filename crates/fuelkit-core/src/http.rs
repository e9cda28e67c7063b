//! HTTP value types and the exceptions controllers raise.

use std::collections::BTreeMap;
use thiserror::Error;

/// HTTP-level failures that short-circuit a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpException {
    /// No route, controller or action matched.
    #[error("not found: {0}")]
    NotFound(String),

    /// Access to the resource is refused.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The application failed while handling the request.
    #[error("server error: {0}")]
    ServerError(String),
}

impl HttpException {
    /// Status code sent for this exception.
    pub fn status(&self) -> u16 {
        match self {
            HttpException::NotFound(_) => 404,
            HttpException::Forbidden(_) => 403,
            HttpException::ServerError(_) => 500,
        }
    }

    /// Turns the exception into the response the application sends.
    pub fn into_response(self) -> Response {
        Response::new(self.status(), self.to_string())
    }
}

/// Incoming request as seen by a controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Upper-case HTTP method.
    pub method: String,

    /// Request URI without query string.
    pub uri: String,

    /// Positional segments left after the controller/action.
    pub params: Vec<String>,

    /// Query/body parameters.
    pub input: BTreeMap<String, String>,
}

impl Request {
    pub fn new(method: &str, uri: impl Into<String>) -> Self {
        Self {
            method: method.to_uppercase(),
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }

    /// Input value for `key`.
    pub fn input(&self, key: &str) -> Option<&str> {
        self.input.get(key).map(String::as_str)
    }
}

/// Outgoing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// 200 response with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Appends a header. Repeated names are kept (e.g. `Set-Cookie`).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// All values of header `name`, case-insensitive.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }
}
