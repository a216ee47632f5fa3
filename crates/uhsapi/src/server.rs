//! The seams between a response helper and the server that owns the connection.

use std::io;

use crate::{
    header::{HeaderMap, HeaderName},
    http::StatusCode,
};

/// Read access to the headers of the request being answered
pub trait RequestHeaders {
    /// Returns the first value of `name`, if the request carried it
    fn header(&self, name: &HeaderName) -> Option<&[u8]>;
}

impl RequestHeaders for HeaderMap {
    fn header(&self, name: &HeaderName) -> Option<&[u8]> {
        self.get(name).map(|value| value.as_ref())
    }
}

impl<T: RequestHeaders + ?Sized> RequestHeaders for &T {
    fn header(&self, name: &HeaderName) -> Option<&[u8]> {
        (**self).header(name)
    }
}

/// The outgoing half of an exchange.
///
/// Headers are collected in [`ResponseWriter::headers_mut`] until
/// [`ResponseWriter::write_head`] commits them together with the status.
/// Everything written through [`io::Write`] afterwards is body.
pub trait ResponseWriter: io::Write {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commits the status line and the current headers. Only the first call has
    /// an effect.
    fn write_head(&mut self, status: StatusCode);
}
