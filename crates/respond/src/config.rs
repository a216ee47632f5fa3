use std::{fmt, sync::Arc};

use bytes::Bytes;
use uhsapi::{
    header::{HeaderMap, HeaderName},
    http::StatusCode,
};

use crate::{
    HeaderMerge,
    dispatch::{BodyWriter, HeaderWriter, StandardBodyWriter, StandardHeaderWriter},
    encoder::{Encoder, JsonEncoder},
    negotiate::{AcceptContains, EncoderSelector},
};

pub const APPLICATION_JSON: &str = "application/json";

/// Content type to [`Encoder`] mapping, iterated in registration order.
#[derive(Clone, Default)]
pub struct EncoderRegistry {
    encoders: Vec<(String, Arc<dyn Encoder>)>,
}

impl EncoderRegistry {
    pub fn new() -> Self {
        Self {
            encoders: Vec::new(),
        }
    }

    /// Registers `encoder` for `content_type`, replacing the previous encoder for
    /// that content type in place.
    pub fn insert(&mut self, content_type: impl Into<String>, encoder: Arc<dyn Encoder>) {
        let content_type = content_type.into();
        match self.encoders.iter_mut().find(|(ct, _)| *ct == content_type) {
            Some((_, existing)) => *existing = encoder,
            None => self.encoders.push((content_type, encoder)),
        }
    }

    pub fn remove(&mut self, content_type: &str) -> Option<Arc<dyn Encoder>> {
        let idx = self.encoders.iter().position(|(ct, _)| ct == content_type)?;
        Some(self.encoders.remove(idx).1)
    }

    pub fn get(&self, content_type: &str) -> Option<&Arc<dyn Encoder>> {
        self.encoders
            .iter()
            .find(|(ct, _)| ct == content_type)
            .map(|(_, encoder)| encoder)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Encoder>)> {
        self.encoders
            .iter()
            .map(|(ct, encoder)| (ct.as_str(), encoder))
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

impl fmt::Debug for EncoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.encoders.iter().map(|(ct, _)| ct))
            .finish()
    }
}

/// How responses are written.
///
/// [`ResponseConfig::default`] writes JSON with a `200 OK` and lets explicit
/// headers override default ones. Cloning gives an independent copy: the maps are
/// duplicated, the strategy objects are shared since they are never mutated.
#[derive(Clone)]
pub struct ResponseConfig {
    /// Encoders available to content negotiation
    pub encoders: EncoderRegistry,
    /// Used when negotiation finds nothing
    pub default_encoder: Arc<dyn Encoder>,
    /// Used when a response does not set a status
    pub default_status: StatusCode,
    /// Sent with every response, merged with explicit headers per `header_merge`
    pub default_headers: HeaderMap,
    pub header_merge: HeaderMerge,
    /// Applies headers and commits the head
    pub header_writer: Arc<dyn HeaderWriter>,
    /// Writes the response data
    pub body_writer: Arc<dyn BodyWriter>,
    /// Picks the encoder for a response
    pub encoder_selector: Arc<dyn EncoderSelector>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        let json: Arc<dyn Encoder> = Arc::new(JsonEncoder);
        let mut encoders = EncoderRegistry::new();
        encoders.insert(APPLICATION_JSON, json.clone());
        Self {
            encoders,
            default_encoder: json,
            default_status: StatusCode::OK,
            default_headers: HeaderMap::new(),
            header_merge: HeaderMerge::Override,
            header_writer: Arc::new(StandardHeaderWriter),
            body_writer: Arc::new(StandardBodyWriter),
            encoder_selector: Arc::new(AcceptContains),
        }
    }
}

impl ResponseConfig {
    pub fn with_encoder(
        mut self,
        content_type: impl Into<String>,
        encoder: impl Encoder + 'static,
    ) -> Self {
        self.encoders.insert(content_type, Arc::new(encoder));
        self
    }

    pub fn with_default_encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.default_encoder = Arc::new(encoder);
        self
    }

    pub fn with_default_status(mut self, status: StatusCode) -> Self {
        self.default_status = status;
        self
    }

    pub fn with_default_header(mut self, name: HeaderName, value: impl Into<Bytes>) -> Self {
        self.default_headers.append(name, value);
        self
    }

    pub fn with_header_merge(mut self, merge: HeaderMerge) -> Self {
        self.header_merge = merge;
        self
    }

    pub fn with_header_writer(mut self, writer: impl HeaderWriter + 'static) -> Self {
        self.header_writer = Arc::new(writer);
        self
    }

    pub fn with_body_writer(mut self, writer: impl BodyWriter + 'static) -> Self {
        self.body_writer = Arc::new(writer);
        self
    }

    pub fn with_encoder_selector(mut self, selector: impl EncoderSelector + 'static) -> Self {
        self.encoder_selector = Arc::new(selector);
        self
    }
}

impl fmt::Debug for ResponseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseConfig")
            .field("encoders", &self.encoders)
            .field("default_status", &self.default_status)
            .field("default_headers", &self.default_headers)
            .field("header_merge", &self.header_merge)
            .finish_non_exhaustive()
    }
}
