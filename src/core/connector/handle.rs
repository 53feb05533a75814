use crate::core::connector::adapter::LinkStream;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// One open stream connection to a single peripheral.
///
/// Exclusively owned by the [`Connector`](super::Connector); never pooled,
/// never shared, never reused after close. A reconnect always produces a
/// fresh handle.
pub struct ConnectionHandle {
    address: String,
    stream: LinkStream,
}

impl ConnectionHandle {
    pub fn new(address: impl Into<String>, stream: LinkStream) -> Self {
        Self {
            address: address.into(),
            stream,
        }
    }

    /// Peer hardware address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Write one command as raw UTF-8 bytes and flush immediately.
    ///
    /// No terminator is appended: command boundaries on the wire rely on
    /// one write per logical command.
    pub async fn write_command(&mut self, raw: &str) -> std::io::Result<()> {
        self.stream.write_all(raw.as_bytes()).await?;
        self.stream.flush().await
    }

    /// Best-effort close. A socket that already failed is expected to
    /// error here, so the result is swallowed and logged at debug level.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Ignoring error while closing stream to {}: {}", self.address, e);
        }
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
