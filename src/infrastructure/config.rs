use crate::domain::{config::LedComConfig, error::{LedComError, LedComResult}};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> LedComResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Load configuration from files.
    ///
    /// Starts from defaults, applies the global file, then merges the
    /// device entries of a project file found by walking up from the
    /// current directory.
    pub fn load_config(&self) -> LedComResult<LedComConfig> {
        let mut config = LedComConfig::default();

        if self.global_config_path.exists() {
            let global_config = self.load_config_from_path(&self.global_config_path)?;
            config.global = global_config.global;
            config.devices = global_config.devices;
        }

        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                let project_config = self.load_config_from_path(project_path)?;
                config.devices.extend(project_config.devices);
            }
        }

        Ok(config)
    }

    /// Save configuration to the global file
    pub fn save_config(&self, config: &LedComConfig) -> LedComResult<()> {
        if let Some(parent) = self.global_config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| LedComError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        self.save_config_to_path(&self.global_config_path, config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> LedComResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| LedComError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("ledcom").join("config.toml"))
    }

    /// Find project configuration path by walking up the directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".ledcom").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> LedComResult<LedComConfig> {
        let content = fs::read_to_string(path).map_err(|e| LedComError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| LedComError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &LedComConfig) -> LedComResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| LedComError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| LedComError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration
    pub fn init_project_config(&self, path: &Path) -> LedComResult<()> {
        let config_dir = path.join(".ledcom");
        let config_file = config_dir.join("config.toml");

        if config_file.exists() {
            return Err(LedComError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        fs::create_dir_all(&config_dir).map_err(|e| LedComError::Config {
            message: format!("Failed to create .ledcom directory: {}", e),
        })?;

        let default_config = LedComConfig {
            global: crate::domain::config::GlobalConfig::default(),
            devices: vec![crate::domain::config::DeviceEntry {
                name: "example_strip".to_string(),
                address: "AA:BB:CC:DD:EE:FF".to_string(),
                description: "Example LED strip controller".to_string(),
            }],
        };

        self.save_config_to_path(&config_file, &default_config)?;

        Ok(())
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_manager_creation() {
        let _manager = ConfigManager::new().unwrap();
    }

    #[test]
    fn test_init_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();

        manager.init_project_config(temp_dir.path()).unwrap();

        let config_file = temp_dir.path().join(".ledcom").join("config.toml");
        assert!(config_file.exists());

        let content = fs::read_to_string(&config_file).unwrap();
        let config: LedComConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.devices.len(), 1);
        assert_eq!(config.devices[0].name, "example_strip");
    }

    #[test]
    fn test_init_project_config_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();

        manager.init_project_config(temp_dir.path()).unwrap();
        let result = manager.init_project_config(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_path_rejects_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").unwrap();

        let manager = ConfigManager::new().unwrap();
        let result = manager.load_config_from_path(&path);
        assert!(matches!(result, Err(LedComError::Config { .. })));
    }
}
