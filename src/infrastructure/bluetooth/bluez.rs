use crate::core::connector::{BluetoothAdapter, LinkStream, PeripheralDescriptor};
use crate::domain::error::{LedComError, LedComResult};
use async_trait::async_trait;
use bluer::rfcomm::{Profile, Role};
use bluer::{Adapter, Address, Session};
use futures::StreamExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// BlueZ-backed implementation of the [`BluetoothAdapter`] capability.
///
/// Streams are opened through a transient RFCOMM client profile: the
/// profile is registered for the requested service class, the remote
/// device is asked to connect it, and the resulting connection request is
/// accepted into a socket. BlueZ resolves the RFCOMM channel from the
/// peripheral's SDP record, so only the service UUID is needed.
pub struct BlueZAdapter {
    session: Session,
    adapter: Adapter,
}

impl BlueZAdapter {
    /// Bind to the default local adapter.
    pub async fn new() -> LedComResult<Self> {
        let session = Session::new().await?;
        let adapter = session.default_adapter().await?;
        debug!("Using Bluetooth adapter {}", adapter.name());

        Ok(Self { session, adapter })
    }

    fn connect_error(address: &str, message: impl ToString) -> LedComError {
        LedComError::Connect {
            address: address.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message.to_string(),
            ),
        }
    }
}

#[async_trait]
impl BluetoothAdapter for BlueZAdapter {
    async fn is_powered(&self) -> LedComResult<bool> {
        Ok(self.adapter.is_powered().await?)
    }

    async fn set_powered(&self, powered: bool) -> LedComResult<()> {
        Ok(self.adapter.set_powered(powered).await?)
    }

    async fn list_bonded(&self) -> LedComResult<Vec<PeripheralDescriptor>> {
        let mut peripherals = Vec::new();

        for address in self.adapter.device_addresses().await? {
            let device = self.adapter.device(address)?;

            match device.is_paired().await {
                Ok(true) => {
                    let name = device
                        .alias()
                        .await
                        .unwrap_or_else(|_| address.to_string());
                    peripherals.push(PeripheralDescriptor::new(address.to_string(), name));
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Skipping device {}: {}", address, e);
                }
            }
        }

        Ok(peripherals)
    }

    async fn open_stream(&self, address: &str, service: Uuid) -> LedComResult<LinkStream> {
        let peer: Address = address
            .parse()
            .map_err(|_| LedComError::InvalidInput(format!("invalid address '{}'", address)))?;
        let device = self.adapter.device(peer)?;

        let profile = Profile {
            uuid: service,
            role: Some(Role::Client),
            require_authentication: Some(false),
            require_authorization: Some(false),
            auto_connect: Some(true),
            ..Default::default()
        };
        let mut profile_handle = self.session.register_profile(profile).await?;

        // ConnectProfile does not resolve until the inbound connection
        // request has been accepted, so both must be driven concurrently.
        let connect_device = device.clone();
        let mut connect_task =
            tokio::spawn(async move { connect_device.connect_profile(&service).await });

        let request = tokio::select! {
            connect_res = &mut connect_task => {
                match connect_res {
                    Ok(Ok(())) => profile_handle.next().await,
                    Ok(Err(e)) => return Err(Self::connect_error(address, e)),
                    Err(e) => return Err(Self::connect_error(address, e)),
                }
            }
            request = profile_handle.next() => request,
        };

        let request = request.ok_or_else(|| {
            Self::connect_error(address, "profile terminated before a connection arrived")
        })?;

        debug!("Accepting RFCOMM connection from {}", request.device());
        let stream = request
            .accept()
            .map_err(|e| Self::connect_error(address, e))?;

        Ok(Box::new(stream))
    }
}
