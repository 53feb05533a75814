use crate::core::connector::adapter::{BluetoothAdapter, PeripheralDescriptor, SPP_UUID};
use crate::core::connector::handle::ConnectionHandle;
use crate::domain::error::{LedComError, LedComResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default ceiling for one connection attempt. The wire protocol itself
/// specifies no timeout, so expiry is treated like any other connect
/// failure.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Device registry access and single-connection ownership.
///
/// Holds at most one live [`ConnectionHandle`]. Connection state is the
/// last known state as tracked here; it is not verified against the
/// transport, so a dead link surfaces only on the next write.
pub struct Connector {
    adapter: Arc<dyn BluetoothAdapter>,
    handle: Option<ConnectionHandle>,
    connect_timeout: Duration,
}

impl Connector {
    pub fn new(adapter: Arc<dyn BluetoothAdapter>) -> Self {
        Self {
            adapter,
            handle: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Ensure the local radio is powered, requesting power-on if needed.
    ///
    /// Returns whether the adapter is now enabled. The power-on request is
    /// an opaque success/failure signal; a refusal is reported as `false`,
    /// never as a panic.
    pub async fn enable_adapter(&self) -> bool {
        match self.adapter.is_powered().await {
            Ok(true) => true,
            Ok(false) => match self.adapter.set_powered(true).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Failed to enable Bluetooth adapter: {}", e);
                    false
                }
            },
            Err(e) => {
                warn!("Failed to query Bluetooth adapter state: {}", e);
                false
            }
        }
    }

    /// List bonded peripherals in registry order.
    ///
    /// Enables the adapter first if needed. An adapter that cannot be
    /// enabled is an error; an empty registry is not.
    pub async fn list_bonded_peripherals(&self) -> LedComResult<Vec<PeripheralDescriptor>> {
        if !self.enable_adapter().await {
            return Err(LedComError::AdapterUnavailable);
        }

        self.adapter.list_bonded().await
    }

    /// Open a stream connection to the given bonded address.
    ///
    /// A single blocking attempt with no retry; retry policy belongs to
    /// the caller. Any existing connection is torn down first so at most
    /// one handle is ever live.
    pub async fn connect(&mut self, address: &str) -> LedComResult<()> {
        if self.handle.is_some() {
            debug!("Replacing existing connection before connecting to {}", address);
            self.disconnect().await;
        }

        let stream = tokio::time::timeout(
            self.connect_timeout,
            self.adapter.open_stream(address, SPP_UUID),
        )
        .await
        .map_err(|_| LedComError::Timeout)??;

        self.handle = Some(ConnectionHandle::new(address, stream));
        info!("Connected to {}", address);
        Ok(())
    }

    /// Close the current connection if any. Idempotent; close-time errors
    /// are swallowed inside the handle.
    pub async fn disconnect(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Disconnecting from {}", handle.address());
            handle.close().await;
        }
    }

    /// Last known connection state; not verified against the transport.
    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    /// Address of the connected peripheral, if any
    pub fn peer_address(&self) -> Option<&str> {
        self.handle.as_ref().map(ConnectionHandle::address)
    }

    /// Write one command line on the active connection.
    pub async fn write(&mut self, raw: &str) -> std::io::Result<()> {
        match self.handle.as_mut() {
            Some(handle) => handle.write_command(raw).await,
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "no active connection",
            )),
        }
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("connected", &self.is_connected())
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connector::adapter::LinkStream;
    use async_trait::async_trait;
    use uuid::Uuid;

    /// Adapter stub backed by in-memory duplex streams
    struct MockAdapter {
        powered: bool,
        enable_succeeds: bool,
        bonded: Vec<PeripheralDescriptor>,
    }

    #[async_trait]
    impl BluetoothAdapter for MockAdapter {
        async fn is_powered(&self) -> LedComResult<bool> {
            Ok(self.powered)
        }

        async fn set_powered(&self, _powered: bool) -> LedComResult<()> {
            if self.enable_succeeds {
                Ok(())
            } else {
                Err(LedComError::AdapterUnavailable)
            }
        }

        async fn list_bonded(&self) -> LedComResult<Vec<PeripheralDescriptor>> {
            Ok(self.bonded.clone())
        }

        async fn open_stream(&self, address: &str, _service: Uuid) -> LedComResult<LinkStream> {
            if address == "unreachable" {
                return Err(LedComError::Connect {
                    address: address.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        "page timeout",
                    ),
                });
            }

            let (client, _server) = tokio::io::duplex(64);
            Ok(Box::new(client))
        }
    }

    fn mock_connector(bonded: Vec<PeripheralDescriptor>) -> Connector {
        Connector::new(Arc::new(MockAdapter {
            powered: true,
            enable_succeeds: true,
            bonded,
        }))
    }

    #[tokio::test]
    async fn test_connect_records_state() {
        let mut connector = mock_connector(Vec::new());
        assert!(!connector.is_connected());

        connector.connect("AA:BB:CC:DD:EE:FF").await.unwrap();
        assert!(connector.is_connected());
        assert_eq!(connector.peer_address(), Some("AA:BB:CC:DD:EE:FF"));
    }

    #[tokio::test]
    async fn test_connect_failure_leaves_disconnected() {
        let mut connector = mock_connector(Vec::new());

        let result = connector.connect("unreachable").await;
        assert!(matches!(result, Err(LedComError::Connect { .. })));
        assert!(!connector.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let mut connector = mock_connector(Vec::new());
        connector.connect("AA:BB:CC:DD:EE:FF").await.unwrap();

        connector.disconnect().await;
        assert!(!connector.is_connected());

        // Second disconnect must not error or panic
        connector.disconnect().await;
        assert!(!connector.is_connected());
    }

    #[tokio::test]
    async fn test_empty_registry_is_not_an_error() {
        let connector = mock_connector(Vec::new());

        let peripherals = connector.list_bonded_peripherals().await.unwrap();
        assert!(peripherals.is_empty());
    }

    #[tokio::test]
    async fn test_list_enables_adapter_first() {
        let connector = Connector::new(Arc::new(MockAdapter {
            powered: false,
            enable_succeeds: true,
            bonded: vec![PeripheralDescriptor::new("AA:BB:CC:DD:EE:FF", "Strip")],
        }));

        let peripherals = connector.list_bonded_peripherals().await.unwrap();
        assert_eq!(peripherals.len(), 1);
    }

    #[tokio::test]
    async fn test_adapter_unavailable_when_enable_fails() {
        let connector = Connector::new(Arc::new(MockAdapter {
            powered: false,
            enable_succeeds: false,
            bonded: Vec::new(),
        }));

        let result = connector.list_bonded_peripherals().await;
        assert!(matches!(result, Err(LedComError::AdapterUnavailable)));
    }

    #[tokio::test]
    async fn test_write_without_connection_fails() {
        let mut connector = mock_connector(Vec::new());

        let result = connector.write("B128").await;
        assert_eq!(
            result.unwrap_err().kind(),
            std::io::ErrorKind::NotConnected
        );
    }
}
