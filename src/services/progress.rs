use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Bytes between progress log lines
const PROGRESS_LOG_INTERVAL: u64 = 1000;

/// `AsyncRead` decorator that counts bytes as they pass through.
///
/// Emits a debug log each time the counter crosses `PROGRESS_LOG_INTERVAL`
/// and once more at end of stream. Exposes the same read contract as the
/// inner reader, so it composes with `tokio::io::copy` unchanged.
pub struct ProgressReader<R> {
    inner: R,
    bytes_read: u64,
    intervals_logged: u64,
}

impl<R> ProgressReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
            intervals_logged: 0,
        }
    }

    /// Total bytes read through this reader so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for ProgressReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        match Pin::new(&mut self.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                let read = (buf.filled().len() - before) as u64;
                if read == 0 {
                    tracing::debug!(bytes_read = self.bytes_read, "end of stream");
                } else {
                    self.bytes_read += read;
                    let intervals = self.bytes_read / PROGRESS_LOG_INTERVAL;
                    if intervals > self.intervals_logged {
                        self.intervals_logged = intervals;
                        tracing::debug!(bytes_read = self.bytes_read, "reading stream");
                    }
                }
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}

impl<R> Drop for ProgressReader<R> {
    fn drop(&mut self) {
        tracing::debug!(bytes_read = self.bytes_read, "stream closed");
    }
}
