use serde::{Deserialize, Serialize};

/// LedCom configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedComConfig {
    /// Global configuration
    pub global: GlobalConfig,
    /// Known controller entries
    pub devices: Vec<DeviceEntry>,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Connection attempt timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// Persist the LED shadow state between invocations
    #[serde(default = "default_state_file_enabled")]
    pub state_file_enabled: bool,
}

/// Named alias for a bonded LED controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEntry {
    /// Alias used on the command line
    pub name: String,
    /// Bonded Bluetooth hardware address
    pub address: String,
    /// Entry description
    #[serde(default)]
    pub description: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_timeout() -> u64 {
    10_000
}

fn default_state_file_enabled() -> bool {
    true
}

impl Default for LedComConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            devices: Vec::new(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            connect_timeout_ms: default_connect_timeout(),
            state_file_enabled: default_state_file_enabled(),
        }
    }
}

impl LedComConfig {
    /// Look up a device entry by its alias
    pub fn find_device(&self, name: &str) -> Option<&DeviceEntry> {
        self.devices.iter().find(|d| d.name == name)
    }
}
