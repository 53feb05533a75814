//! LedCom Library
//!
//! Bluetooth SPP command library for addressable LED strip controllers,
//! providing bonded-device enumeration, single-connection management and
//! the textual LED command protocol.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::connector::{BluetoothAdapter, Connector, PeripheralDescriptor, SPP_UUID};
pub use crate::core::protocol::{Command, Rgb, EFFECTS};
pub use crate::core::session::{CommandSession, LedState};
pub use crate::domain::config::LedComConfig;
pub use crate::domain::error::{LedComError, LedComResult};
