// Connector module - Device registry and connection ownership
pub mod adapter;
pub mod connector;
pub mod handle;

pub use adapter::{BluetoothAdapter, LinkStream, PeripheralDescriptor, SPP_UUID};
pub use connector::Connector;
pub use handle::ConnectionHandle;
