use std::io;

use crate::{EncodingError, encoder::Encoder};

/// Writes strings verbatim and anything else as compact JSON, followed by a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEncoder;

impl Encoder for TextEncoder {
    fn encode(
        &self,
        w: &mut dyn io::Write,
        data: &dyn erased_serde::Serialize,
    ) -> Result<(), EncodingError> {
        let json = serde_json::to_vec(data)?;
        if json.first() == Some(&b'"') {
            let text: String = serde_json::from_slice(&json)?;
            w.write_all(text.as_bytes())?;
        } else {
            w.write_all(&json)?;
        }
        w.write_all(b"\n")?;
        Ok(())
    }
}
