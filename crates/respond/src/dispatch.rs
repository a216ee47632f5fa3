use uhsapi::{
    http::StatusCode,
    server::{RequestHeaders, ResponseWriter},
};

use crate::{EncodingError, ResponseConfig, ResponseRequest};

/// Everything a strategy needs to know about the response being written.
pub struct DispatchContext<'a> {
    pub sink: &'a mut dyn ResponseWriter,
    pub inbound: &'a dyn RequestHeaders,
    pub request: &'a ResponseRequest<'a>,
    /// The effective configuration of this response
    pub config: &'a ResponseConfig,
}

/// Applies headers to the sink and commits the head.
pub trait HeaderWriter: Send + Sync {
    fn write_header(&self, ctx: &mut DispatchContext<'_>, status: StatusCode);
}

impl<F> HeaderWriter for F
where
    F: Fn(&mut DispatchContext<'_>, StatusCode) + Send + Sync,
{
    fn write_header(&self, ctx: &mut DispatchContext<'_>, status: StatusCode) {
        self(ctx, status)
    }
}

/// Merges default and explicit headers per [`ResponseConfig::header_merge`], then
/// writes the status.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHeaderWriter;

impl HeaderWriter for StandardHeaderWriter {
    fn write_header(&self, ctx: &mut DispatchContext<'_>, status: StatusCode) {
        ctx.config.header_merge.apply(
            &ctx.config.default_headers,
            ctx.request.get_headers(),
            ctx.sink.headers_mut(),
        );
        ctx.sink.write_head(status);
    }
}

/// Writes the response data to the sink.
pub trait BodyWriter: Send + Sync {
    fn write_data(
        &self,
        ctx: &mut DispatchContext<'_>,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError>;
}

impl<F> BodyWriter for F
where
    F: Fn(&mut DispatchContext<'_>, &dyn erased_serde::Serialize) -> Result<(), EncodingError>
        + Send
        + Sync,
{
    fn write_data(
        &self,
        ctx: &mut DispatchContext<'_>,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError> {
        self(ctx, data)
    }
}

/// Asks the configured [`EncoderSelector`](crate::EncoderSelector) for an encoder
/// and encodes the data with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBodyWriter;

impl BodyWriter for StandardBodyWriter {
    fn write_data(
        &self,
        ctx: &mut DispatchContext<'_>,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError> {
        let encoder = ctx.config.encoder_selector.select(ctx);
        encoder.encode(&mut *ctx.sink, data)
    }
}

/// Writes responses, falling back to the configuration it owns.
///
/// The defaults can only be changed through `&mut self`, so they are settled
/// before a `Responder` is shared between request handlers.
#[derive(Debug, Clone, Default)]
pub struct Responder {
    defaults: ResponseConfig,
}

impl Responder {
    pub fn new(defaults: ResponseConfig) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ResponseConfig {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut ResponseConfig {
        &mut self.defaults
    }

    /// Writes the response described by `request` to `sink`.
    ///
    /// The head is always written. Data, if any, is encoded afterwards; an
    /// encoding failure is returned as is and may leave a partial body behind.
    pub fn dispatch<W, R>(
        &self,
        request: &ResponseRequest<'_>,
        sink: &mut W,
        inbound: &R,
    ) -> Result<(), EncodingError>
    where
        W: ResponseWriter,
        R: RequestHeaders + ?Sized,
    {
        let config = request.resolve_config(&self.defaults);
        let status = request.resolve_status(config);
        log::trace!("dispatching {status} response");

        let mut ctx = DispatchContext {
            sink,
            inbound: &inbound,
            request,
            config,
        };
        config.header_writer.write_header(&mut ctx, status);
        match request.get_data() {
            Some(data) => config.body_writer.write_data(&mut ctx, data),
            None => Ok(()),
        }
    }
}

impl ResponseRequest<'_> {
    /// Shorthand for [`Responder::dispatch`]
    pub fn to<W, R>(
        &self,
        responder: &Responder,
        sink: &mut W,
        inbound: &R,
    ) -> Result<(), EncodingError>
    where
        W: ResponseWriter,
        R: RequestHeaders + ?Sized,
    {
        responder.dispatch(self, sink, inbound)
    }
}
