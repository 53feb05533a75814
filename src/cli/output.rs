use crate::cli::args::OutputFormat;
use crate::core::connector::PeripheralDescriptor;
use crate::core::protocol::EFFECTS;
use crate::core::session::LedState;
use crate::domain::config::{DeviceEntry, LedComConfig};
use std::io;
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_peripherals(&self, peripherals: &[PeripheralDescriptor]) -> Result<(), OutputError>;
    fn write_effects(&self) -> Result<(), OutputError>;
    fn write_device_entries(&self, devices: &[DeviceEntry]) -> Result<(), OutputError>;
    fn write_config(&self, config: &LedComConfig) -> Result<(), OutputError>;
    fn write_state(&self, state: &LedState) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::LedComError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
    quiet: bool,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }
}

#[derive(Tabled)]
struct PeripheralRow {
    name: String,
    address: String,
}

impl From<&PeripheralDescriptor> for PeripheralRow {
    fn from(peripheral: &PeripheralDescriptor) -> Self {
        Self {
            name: peripheral.name.clone(),
            address: peripheral.address.clone(),
        }
    }
}

#[derive(Tabled)]
struct EffectRow {
    index: usize,
    name: &'static str,
}

#[derive(Tabled)]
struct DeviceEntryRow {
    name: String,
    address: String,
    description: String,
}

impl From<&DeviceEntry> for DeviceEntryRow {
    fn from(entry: &DeviceEntry) -> Self {
        Self {
            name: entry.name.clone(),
            address: entry.address.clone(),
            description: entry.description.clone(),
        }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_peripherals(&self, peripherals: &[PeripheralDescriptor]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                for peripheral in peripherals {
                    println!("{}", peripheral);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(peripherals)?);
            }
            OutputFormat::Table => {
                if !peripherals.is_empty() {
                    let rows: Vec<PeripheralRow> =
                        peripherals.iter().map(PeripheralRow::from).collect();
                    println!("{}", Table::new(rows));
                }
            }
            OutputFormat::Csv => {
                println!("name,address");
                for peripheral in peripherals {
                    println!("{},{}", peripheral.name, peripheral.address);
                }
            }
        }
        Ok(())
    }

    fn write_effects(&self) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                for (index, name) in EFFECTS.iter().enumerate() {
                    println!("{}: {}", index, name);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(EFFECTS)?);
            }
            OutputFormat::Table => {
                let rows: Vec<EffectRow> = EFFECTS
                    .iter()
                    .enumerate()
                    .map(|(index, name)| EffectRow { index, name })
                    .collect();
                println!("{}", Table::new(rows));
            }
            OutputFormat::Csv => {
                println!("index,name");
                for (index, name) in EFFECTS.iter().enumerate() {
                    println!("{},{}", index, name);
                }
            }
        }
        Ok(())
    }

    fn write_device_entries(&self, devices: &[DeviceEntry]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                for entry in devices {
                    if entry.description.is_empty() {
                        println!("{}: {}", entry.name, entry.address);
                    } else {
                        println!("{}: {} - {}", entry.name, entry.address, entry.description);
                    }
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(devices)?);
            }
            OutputFormat::Table => {
                if !devices.is_empty() {
                    let rows: Vec<DeviceEntryRow> =
                        devices.iter().map(DeviceEntryRow::from).collect();
                    println!("{}", Table::new(rows));
                }
            }
            OutputFormat::Csv => {
                println!("name,address,description");
                for entry in devices {
                    println!("{},{},{}", entry.name, entry.address, entry.description);
                }
            }
        }
        Ok(())
    }

    fn write_config(&self, config: &LedComConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(config)?);
            }
            _ => {
                println!("LedCom Configuration:");
                println!("  Log level: {}", config.global.log_level);
                println!("  Connect timeout: {}ms", config.global.connect_timeout_ms);
                println!("  State file enabled: {}", config.global.state_file_enabled);
                println!("  Devices: {}", config.devices.len());
                self.write_device_entries(&config.devices)?;
            }
        }
        Ok(())
    }

    fn write_state(&self, state: &LedState) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(state)?);
            }
            _ => {
                println!("LED state:");
                println!("  Color: {}", state.color);
                println!("  Brightness: {}", state.brightness);
                let effect_name = EFFECTS.get(state.effect).copied().unwrap_or("unknown");
                println!("  Effect: {} ({})", state.effect, effect_name);
                println!("  Power: {}", if state.enabled { "on" } else { "off" });
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        if !self.quiet {
            println!("{}", message);
        }
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        eprintln!("Error: {}", error);
        Ok(())
    }
}
