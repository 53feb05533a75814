use crate::core::session::LedState;
use crate::domain::error::{LedComError, LedComResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persists the LED shadow state between invocations.
///
/// The session itself is file-free; only the CLI wraps a session with
/// load/save so that the full-state replay after a reconnect reflects the
/// last-known intent across process boundaries. A missing or unreadable
/// state file degrades to the default state, never to a hard error.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store under the default location (`~/.config/ledcom/state.toml`)
    pub fn new() -> LedComResult<Self> {
        let home = dirs::home_dir().ok_or_else(|| LedComError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(Self::at_path(
            home.join(".config").join("ledcom").join("state.toml"),
        ))
    }

    /// Store at an explicit path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted shadow state, falling back to defaults
    pub fn load(&self) -> LedState {
        match fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!(
                        "Ignoring corrupt state file {}: {}",
                        self.path.display(),
                        e
                    );
                    LedState::default()
                }
            },
            Err(_) => {
                debug!("No state file at {}, using defaults", self.path.display());
                LedState::default()
            }
        }
    }

    /// Persist the shadow state
    pub fn save(&self, state: &LedState) -> LedComResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| LedComError::Config {
                message: format!("Failed to create state directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(state).map_err(|e| LedComError::Config {
            message: format!("Failed to serialize state: {}", e),
        })?;

        fs::write(&self.path, content).map_err(|e| LedComError::Config {
            message: format!("Failed to write state file {}: {}", self.path.display(), e),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocol::Rgb;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::at_path(temp_dir.path().join("state.toml"));

        assert_eq!(store.load(), LedState::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::at_path(temp_dir.path().join("state.toml"));

        let state = LedState {
            color: Rgb::new(10, 20, 30),
            brightness: 200,
            effect: 2,
            enabled: false,
        };

        store.save(&state).unwrap();
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.toml");
        fs::write(&path, "brightness = \"loud\"").unwrap();

        let store = StateStore::at_path(&path);
        assert_eq!(store.load(), LedState::default());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::at_path(temp_dir.path().join("nested").join("state.toml"));

        store.save(&LedState::default()).unwrap();
        assert!(store.path().exists());
    }
}
