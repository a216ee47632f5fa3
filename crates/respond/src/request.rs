use bytes::Bytes;
use serde::Serialize;
use uhsapi::{
    header::{HeaderMap, HeaderName},
    http::StatusCode,
};

use crate::ResponseConfig;

/// Describes a single response.
///
/// Data of any [`Serialize`] type is kept by reference and handed to the
/// encoder as is, so serialization failures surface from dispatch.
///
/// ```
/// use respond::{Recorder, Responder, ResponseRequest};
/// use uhsapi::{header::{HeaderMap, HeaderName}, http::StatusCode};
///
/// let responder = Responder::default();
/// let mut w = Recorder::new();
/// ResponseRequest::with(&[1, 2, 3])
///     .status(StatusCode::CREATED)
///     .header(HeaderName::from_static("X-RateLimit-Remaining"), "41")
///     .to(&responder, &mut w, &HeaderMap::new())
///     .unwrap();
///
/// assert_eq!(w.status(), Some(StatusCode::CREATED));
/// assert_eq!(w.body(), b"[1,2,3]\n");
/// ```
#[derive(Clone, Default)]
pub struct ResponseRequest<'a> {
    data: Option<&'a dyn erased_serde::Serialize>,
    status: Option<StatusCode>,
    headers: HeaderMap,
    options: Option<&'a ResponseConfig>,
}

impl<'a> ResponseRequest<'a> {
    /// A response without data; only the status and headers are written
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Serialize>(data: &'a T) -> Self {
        Self::new().data(data)
    }

    pub fn data<T: Serialize>(mut self, data: &'a T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds an explicit header, after any earlier values for the same name
    pub fn header(mut self, name: HeaderName, value: impl Into<Bytes>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Uses `options` instead of the responder's defaults for this response
    pub fn options(mut self, options: &'a ResponseConfig) -> Self {
        self.options = Some(options);
        self
    }

    pub fn get_data(&self) -> Option<&'a dyn erased_serde::Serialize> {
        self.data
    }

    pub fn get_status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn get_headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn get_options(&self) -> Option<&'a ResponseConfig> {
        self.options
    }

    /// Picks the configuration for this response. Explicit options replace the
    /// defaults entirely; nothing is merged.
    pub fn resolve_config<'c>(&self, defaults: &'c ResponseConfig) -> &'c ResponseConfig
    where
        'a: 'c,
    {
        self.options.unwrap_or(defaults)
    }

    pub fn resolve_status(&self, config: &ResponseConfig) -> StatusCode {
        self.status.unwrap_or(config.default_status)
    }
}

impl std::fmt::Debug for ResponseRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseRequest")
            .field("data", &self.data.map(|_| ".."))
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("options", &self.options.map(|_| ".."))
            .finish()
    }
}
