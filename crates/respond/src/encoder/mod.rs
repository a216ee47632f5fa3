//! Encoders turn response data into body bytes.
//!
//! - [`JsonEncoder`] - compact JSON, the default
//! - [`PrettyJsonEncoder`] - indented JSON
//! - [`TextEncoder`] - strings as-is, everything else as JSON
//!
//! Any `Fn(&mut dyn io::Write, &dyn erased_serde::Serialize) -> Result<(), EncodingError>`
//! closure is an encoder too.

mod json;
mod text;

use std::io;

pub use json::{JsonEncoder, PrettyJsonEncoder};
pub use text::TextEncoder;

use crate::EncodingError;

/// Something capable of writing response data to a body.
pub trait Encoder: Send + Sync {
    /// Writes `data` to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be represented in this encoding or
    /// the writer fails.
    fn encode(
        &self,
        w: &mut dyn io::Write,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError>;
}

impl<F> Encoder for F
where
    F: Fn(&mut dyn io::Write, &dyn erased_serde::Serialize) -> Result<(), EncodingError>
        + Send
        + Sync,
{
    fn encode(
        &self,
        w: &mut dyn io::Write,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError> {
        self(w, data)
    }
}
