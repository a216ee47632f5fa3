use std::io;

use bytes::{BufMut, BytesMut};
use tokio::io::AsyncWriteExt;
use uhsapi::{
    header::{HeaderMap, HeaderName},
    http::{HttpVersion, StatusCode},
    server::ResponseWriter,
};

/// Serializes HTTP/1.1 responses for an async transport.
///
/// Dispatch is synchronous, so the response is assembled in memory and only
/// written out by [`Sender::flush`]. After a flush the sender is ready for the
/// next response on the same connection.
pub struct Sender<WRITER: AsyncWriteExt + Unpin> {
    writer: WRITER,
    version: HttpVersion,
    headers: HeaderMap,
    status: Option<StatusCode>,
    /// Status line and header lines, without the terminating empty line
    head: BytesMut,
    body: BytesMut,
    /// The committed headers already frame the body
    framed: bool,
}

impl<WRITER> Sender<WRITER>
where
    WRITER: AsyncWriteExt + Unpin,
{
    pub fn new(writer: WRITER) -> Self {
        Self::with_version(writer, HttpVersion::HTTP_1_1)
    }

    pub fn with_version(writer: WRITER, version: HttpVersion) -> Self {
        Self {
            writer,
            version,
            headers: HeaderMap::new(),
            status: None,
            head: BytesMut::with_capacity(1024),
            body: BytesMut::with_capacity(8192),
            framed: false,
        }
    }

    /// The committed status of the pending response
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn into_inner(self) -> WRITER {
        self.writer
    }

    fn put_headers(&mut self) {
        for (name, value) in self.headers.iter() {
            for line in value.iter() {
                if line.contains(&b'\r') || line.contains(&b'\n') {
                    log::warn!("dropping {name} header value containing a line break");
                    continue;
                }
                self.head.put_slice(name.as_str().as_bytes());
                self.head.put_slice(b": ");
                self.head.put_slice(line);
                self.head.put_slice(b"\r\n");
            }
        }
        self.framed = self.headers.contains(&HeaderName::CONTENT_LENGTH)
            || self.headers.contains(&HeaderName::TRANSFER_ENCODING);
    }

    /// Writes the pending response to the transport.
    ///
    /// A response without a committed head is sent as an empty `200 OK`. On
    /// failure the response stays pending, so a retry sends it unchanged.
    pub async fn flush(&mut self) -> io::Result<()> {
        let status = match self.status {
            Some(status) => status,
            None => {
                self.write_head(StatusCode::OK);
                StatusCode::OK
            }
        };
        let mut end = BytesMut::with_capacity(32);
        if !self.framed && !status.forbids_body() {
            end.put_slice(HeaderName::CONTENT_LENGTH.as_str().as_bytes());
            end.put_slice(b": ");
            end.put_slice(self.body.len().to_string().as_bytes());
            end.put_slice(b"\r\n");
        }
        end.put_slice(b"\r\n");

        self.writer.write_all(&self.head).await?;
        self.writer.write_all(&end).await?;
        self.writer.write_all(&self.body).await?;
        self.writer.flush().await?;

        self.head.clear();
        self.body.clear();
        self.headers.clear();
        self.status = None;
        self.framed = false;
        Ok(())
    }
}

impl<WRITER> ResponseWriter for Sender<WRITER>
where
    WRITER: AsyncWriteExt + Unpin,
{
    fn headers_mut(&mut self) -> &mut HeaderMap {
        if self.status.is_some() {
            log::warn!("headers modified after the head was written, changes are ignored");
        }
        &mut self.headers
    }

    fn write_head(&mut self, status: StatusCode) {
        if let Some(committed) = self.status {
            log::warn!("head already written with status {committed}, ignoring {status}");
            return;
        }
        self.status = Some(status);

        // SPEC: RFC 9112 - 4. Status Line
        // ABNF: status-line = HTTP-version SP status-code SP [ reason-phrase ]
        self.head.put_slice(self.version.as_str().as_bytes());
        self.head.put_u8(b' ');
        self.head.put_slice(status.to_string().as_bytes());
        self.head.put_u8(b' ');
        self.head
            .put_slice(status.canonical_reason().unwrap_or("Unknown Reason").as_bytes());
        self.head.put_slice(b"\r\n");
        self.put_headers();
    }
}

impl<WRITER> io::Write for Sender<WRITER>
where
    WRITER: AsyncWriteExt + Unpin,
{
    /// Fails once the committed status forbids a body (1xx, 204, 304)
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let status = match self.status {
            Some(status) => status,
            None => {
                self.write_head(StatusCode::OK);
                StatusCode::OK
            }
        };
        if status.forbids_body() && !buf.is_empty() {
            return Err(io::Error::other(format!(
                "a {status} response cannot have a body"
            )));
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    /// Bytes stay buffered until [`Sender::flush`]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Write,
        pin::Pin,
        task::{Context, Poll},
    };

    use tokio::io::AsyncWrite;

    use super::*;

    /// Fails the first write, then collects everything
    #[derive(Default)]
    struct FlakyWriter {
        failed: bool,
        written: Vec<u8>,
    }

    impl AsyncWrite for FlakyWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            if !self.failed {
                self.failed = true;
                return Poll::Ready(Err(io::ErrorKind::ConnectionReset.into()));
            }
            self.written.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn sends_head_and_body() {
        let mut sender = Sender::new(Vec::new());
        sender
            .headers_mut()
            .append(HeaderName::CONTENT_TYPE, "application/json");
        sender.write_head(StatusCode::CREATED);
        sender.write_all(b"{}\n").unwrap();
        sender.flush().await.unwrap();

        assert_eq!(
            sender.into_inner(),
            b"HTTP/1.1 201 Created\r\n\
              Content-Type: application/json\r\n\
              Content-Length: 3\r\n\
              \r\n\
              {}\n"
        );
    }

    #[tokio::test]
    async fn repeated_values_are_separate_lines() {
        let cookie = HeaderName::from_static("Set-Cookie");
        let mut sender = Sender::new(Vec::new());
        sender.headers_mut().append(cookie.clone(), "a=1");
        sender.headers_mut().append(cookie, "b=2");
        sender.write_head(StatusCode::NO_CONTENT);
        sender.flush().await.unwrap();

        assert_eq!(
            sender.into_inner(),
            b"HTTP/1.1 204 No Content\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn late_changes_are_ignored() {
        let mut sender = Sender::new(Vec::new());
        sender.write_head(StatusCode::NOT_FOUND);
        sender
            .headers_mut()
            .append(HeaderName::from_static("X-Late"), "1");
        sender.write_head(StatusCode::OK);
        assert_eq!(sender.status(), Some(StatusCode::NOT_FOUND));
        sender.flush().await.unwrap();

        assert_eq!(
            sender.into_inner(),
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn keeps_explicit_length_and_drops_line_breaks() {
        let mut sender = Sender::new(Vec::new());
        sender
            .headers_mut()
            .append(HeaderName::CONTENT_LENGTH, "2");
        sender
            .headers_mut()
            .append(HeaderName::from_static("X-Evil"), "a\r\nInjected: yes");
        sender.write_all(b"ok").unwrap();
        sender.flush().await.unwrap();

        assert_eq!(
            sender.into_inner(),
            b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok"
        );
    }

    #[tokio::test]
    async fn reusable_after_flush() {
        let mut sender = Sender::new(Vec::new());
        sender.flush().await.unwrap();
        assert_eq!(sender.status(), None);
        sender.write_head(StatusCode::ACCEPTED);
        sender.flush().await.unwrap();

        assert_eq!(
            sender.into_inner(),
            b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n\
              HTTP/1.1 202 Accepted\r\nContent-Length: 0\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn body_rejected_for_no_content() {
        let mut sender = Sender::new(Vec::new());
        sender.write_head(StatusCode::NO_CONTENT);
        let err = sender.write_all(b"{}\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        sender.write_all(b"").unwrap();
        sender.flush().await.unwrap();

        assert_eq!(sender.into_inner(), b"HTTP/1.1 204 No Content\r\n\r\n");
    }

    #[tokio::test]
    async fn retry_after_failed_flush() {
        let mut sender = Sender::new(FlakyWriter::default());
        sender.write_all(b"ok").unwrap();
        assert!(sender.flush().await.is_err());
        assert_eq!(sender.status(), Some(StatusCode::OK));
        sender.flush().await.unwrap();

        assert_eq!(
            sender.into_inner().written,
            b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok"
        );
    }
}
