use std::io;

use uhsapi::{header::HeaderMap, http::StatusCode, server::ResponseWriter};

/// Records a response in memory, for tests.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
    head_writes: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed status, `None` until the head is written
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// How many times `write_head` was called, including ignored calls
    pub fn head_writes(&self) -> usize {
        self.head_writes
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl ResponseWriter for Recorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_head(&mut self, status: StatusCode) {
        self.head_writes += 1;
        if self.status.is_none() {
            self.status = Some(status);
        }
    }
}

impl io::Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.write_head(StatusCode::OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
