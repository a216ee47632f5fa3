//! Content negotiation: choosing an [`Encoder`] from the request's `Accept` header.

use std::sync::Arc;

use memchr::memmem;
use uhsapi::header::HeaderName;

use crate::{dispatch::DispatchContext, encoder::Encoder};

pub trait EncoderSelector: Send + Sync {
    fn select(&self, ctx: &DispatchContext<'_>) -> Arc<dyn Encoder>;
}

impl<F> EncoderSelector for F
where
    F: Fn(&DispatchContext<'_>) -> Arc<dyn Encoder> + Send + Sync,
{
    fn select(&self, ctx: &DispatchContext<'_>) -> Arc<dyn Encoder> {
        self(ctx)
    }
}

/// Picks the first registered encoder whose content type occurs anywhere in the
/// `Accept` header, falling back to the default encoder.
///
/// Quality values and wildcards are not interpreted: `text/html;q=0` still
/// matches `text/html`, and `*/*` only matches an encoder registered as `*/*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptContains;

impl EncoderSelector for AcceptContains {
    fn select(&self, ctx: &DispatchContext<'_>) -> Arc<dyn Encoder> {
        let accept = ctx.inbound.header(&HeaderName::ACCEPT).unwrap_or_default();
        for (content_type, encoder) in ctx.config.encoders.iter() {
            if memmem::find(accept, content_type.as_bytes()).is_some() {
                log::trace!("accept matched {content_type}");
                return encoder.clone();
            }
        }
        log::debug!(
            "no encoder matches accept {:?}, using default",
            String::from_utf8_lossy(accept)
        );
        ctx.config.default_encoder.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;
    use uhsapi::header::HeaderMap;

    use super::*;
    use crate::{EncodingError, Recorder, ResponseConfig, ResponseRequest, encoder::TextEncoder};

    fn marker(tag: &'static str) -> impl Encoder {
        move |w: &mut dyn io::Write, _: &dyn erased_serde::Serialize| -> Result<(), EncodingError> {
            w.write_all(tag.as_bytes())?;
            Ok(())
        }
    }

    fn selected(config: &ResponseConfig, accept: Option<&'static str>) -> Vec<u8> {
        let mut inbound = HeaderMap::new();
        if let Some(accept) = accept {
            inbound.append(HeaderName::ACCEPT, accept);
        }
        let request = ResponseRequest::new();
        let mut sink = Recorder::new();
        let ctx = DispatchContext {
            sink: &mut sink,
            inbound: &inbound,
            request: &request,
            config,
        };
        let mut out = Vec::new();
        AcceptContains
            .select(&ctx)
            .encode(&mut out, &json!(null))
            .unwrap();
        out
    }

    fn config() -> ResponseConfig {
        ResponseConfig::default()
            .with_encoder("application/json", marker("json"))
            .with_encoder("text/plain", marker("text"))
            .with_default_encoder(marker("default"))
    }

    #[test]
    fn exact_match() {
        assert_eq!(selected(&config(), Some("application/json")), b"json");
        assert_eq!(selected(&config(), Some("text/plain")), b"text");
    }

    #[test]
    fn substring_match() {
        assert_eq!(
            selected(&config(), Some("text/html, text/plain;q=0.9")),
            b"text"
        );
    }

    #[test]
    fn empty_or_missing_accept() {
        assert_eq!(selected(&config(), Some("")), b"default");
        assert_eq!(selected(&config(), None), b"default");
    }

    #[test]
    fn no_match_uses_config_default() {
        assert_eq!(selected(&config(), Some("image/png")), b"default");

        let config = ResponseConfig::default().with_default_encoder(TextEncoder);
        let mut inbound = HeaderMap::new();
        inbound.append(HeaderName::ACCEPT, "text/csv");
        let request = ResponseRequest::new();
        let mut sink = Recorder::new();
        let ctx = DispatchContext {
            sink: &mut sink,
            inbound: &inbound,
            request: &request,
            config: &config,
        };
        let mut out = Vec::new();
        AcceptContains
            .select(&ctx)
            .encode(&mut out, &json!("plain"))
            .unwrap();
        assert_eq!(out, b"plain\n");
    }

    #[test]
    fn registration_order_wins() {
        assert_eq!(
            selected(&config(), Some("text/plain, application/json")),
            b"json"
        );
    }
}
