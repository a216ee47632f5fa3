use std::io;

use crate::{EncodingError, encoder::Encoder};

/// Writes a single compact JSON document followed by a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(
        &self,
        w: &mut dyn io::Write,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError> {
        serde_json::to_writer(&mut *w, data)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}

/// Like [`JsonEncoder`], but indented for humans.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJsonEncoder;

impl Encoder for PrettyJsonEncoder {
    fn encode(
        &self,
        w: &mut dyn io::Write,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError> {
        serde_json::to_writer_pretty(&mut *w, data)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}
