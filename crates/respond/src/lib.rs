//! Consistent data responses for HTTP handlers.
//!
//! A [`ResponseRequest`] says what to send (data, status, headers), a
//! [`Responder`] owns the default [`ResponseConfig`] and writes the response to
//! any [`ResponseWriter`]:
//!
//! ```
//! use respond::{HeaderMerge, Recorder, Responder, ResponseConfig, ResponseRequest};
//! use uhsapi::header::{HeaderMap, HeaderName};
//!
//! let version = HeaderName::from_static("X-App-Version");
//! let responder = Responder::new(
//!     ResponseConfig::default()
//!         .with_default_header(version.clone(), "1.0")
//!         .with_header_merge(HeaderMerge::Aggregate),
//! );
//!
//! let mut w = Recorder::new();
//! ResponseRequest::with(&serde_json::json!({"one": 1}))
//!     .to(&responder, &mut w, &HeaderMap::new())
//!     .unwrap();
//!
//! assert_eq!(w.body(), b"{\"one\":1}\n");
//! assert_eq!(w.headers().get(&version).unwrap(), "1.0");
//! ```
//!
//! Every step is a replaceable strategy on [`ResponseConfig`]: the
//! [`HeaderWriter`], the [`BodyWriter`], the [`EncoderSelector`] and the
//! [`Encoder`]s themselves.

pub mod config;
pub mod dispatch;
pub mod encoder;
pub mod error;
pub mod negotiate;
pub mod sink;

mod merge;
mod request;

pub use config::{APPLICATION_JSON, EncoderRegistry, ResponseConfig};
pub use dispatch::{
    BodyWriter, DispatchContext, HeaderWriter, Responder, StandardBodyWriter,
    StandardHeaderWriter,
};
pub use encoder::{Encoder, JsonEncoder, PrettyJsonEncoder, TextEncoder};
pub use error::EncodingError;
pub use merge::HeaderMerge;
pub use negotiate::{AcceptContains, EncoderSelector};
pub use erased_serde;
pub use request::ResponseRequest;
pub use sink::{Recorder, Sender};
pub use uhsapi::server::{RequestHeaders, ResponseWriter};
