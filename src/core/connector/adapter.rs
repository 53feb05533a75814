use crate::domain::error::LedComResult;
use async_trait::async_trait;
use tokio::io::AsyncWrite;
use uuid::Uuid;

/// Serial Port Profile service class, `00001101-0000-1000-8000-00805F9B34FB`.
///
/// Every RFCOMM stream this crate opens targets this well-known identifier;
/// the firmware registers no custom service record.
pub const SPP_UUID: Uuid = Uuid::from_u128(0x0000_1101_0000_1000_8000_0080_5F9B_34FB);

/// Byte stream to a connected peripheral.
///
/// The protocol is one-directional, so only the write half is modeled.
pub type LinkStream = Box<dyn AsyncWrite + Send + Unpin>;

/// A previously bonded peripheral as reported by the local registry.
#[derive(Debug, Clone, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeripheralDescriptor {
    /// Hardware address, the key used for connecting
    pub address: String,
    /// Display name
    pub name: String,
}

impl PeripheralDescriptor {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

// Equality is by address only; the display name may change between scans.
impl PartialEq for PeripheralDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl std::hash::Hash for PeripheralDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl std::fmt::Display for PeripheralDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

/// Capability interface over the platform Bluetooth stack.
///
/// The connector receives an implementation at construction instead of
/// reaching for an ambient adapter singleton, so everything above this
/// trait is testable without radio hardware.
#[async_trait]
pub trait BluetoothAdapter: Send + Sync {
    /// Whether the local radio is currently powered
    async fn is_powered(&self) -> LedComResult<bool>;

    /// Request the local radio be powered on or off
    async fn set_powered(&self, powered: bool) -> LedComResult<()>;

    /// List bonded peripherals in registry order.
    ///
    /// An empty list is a valid result, not an error.
    async fn list_bonded(&self) -> LedComResult<Vec<PeripheralDescriptor>>;

    /// Open a stream socket to the given service on a bonded peripheral,
    /// performing the blocking handshake.
    async fn open_stream(&self, address: &str, service: Uuid) -> LedComResult<LinkStream>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spp_uuid_canonical_form() {
        assert_eq!(
            SPP_UUID.to_string(),
            "00001101-0000-1000-8000-00805f9b34fb"
        );
    }

    #[test]
    fn test_peripheral_equality_by_address() {
        let a = PeripheralDescriptor::new("AA:BB:CC:DD:EE:FF", "Strip");
        let b = PeripheralDescriptor::new("AA:BB:CC:DD:EE:FF", "Renamed Strip");
        let c = PeripheralDescriptor::new("00:11:22:33:44:55", "Strip");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_peripheral_display() {
        let peripheral = PeripheralDescriptor::new("AA:BB:CC:DD:EE:FF", "Strip");
        assert_eq!(peripheral.to_string(), "Strip (AA:BB:CC:DD:EE:FF)");
    }
}
