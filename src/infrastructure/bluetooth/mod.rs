// Bluetooth module - BlueZ adapter implementation
pub mod bluez;

pub use bluez::BlueZAdapter;
