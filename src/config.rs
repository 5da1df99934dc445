//! Application configuration.
//!
//! The configuration is a JSON file, by default
//! `%APPDATA%\edgeflyout\config.json` (or `$XDG_CONFIG_HOME/edgeflyout/`
//! elsewhere).  Every section is optional and falls back to compiled-in
//! defaults, so `{}` is a valid file.
//!
//! # Example
//!
//! ```json
//! {
//!   "hot_area": {
//!     "edge": "top",
//!     "start_percent": 15,
//!     "end_percent": 45,
//!     "catch_mouse": true,
//!     "catch_thickness_px": 10
//!   },
//!   "poller": { "interval_ms": 100 },
//!   "popup": { "width": 220, "row_height": 28, "padding": 6 },
//!   "ipc": { "address": "127.0.0.1:47813" },
//!   "items": [
//!     { "label": "Desktop 1", "action": { "SwitchTo": 0 } },
//!     { "label": "Terminal", "action": { "Run": "wt.exe" } },
//!     { "label": "Quit", "action": "Exit" }
//!   ]
//! }
//! ```

use crate::action::MenuItem;
use crate::geometry::HotArea;
use crate::traits::ConfigSource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the fly-out triggers and how the cursor is caught.
    #[serde(default)]
    pub hot_area: HotArea,

    /// Cursor sampling cadence.
    #[serde(default)]
    pub poller: PollerConfig,

    /// Layout of the built-in popup.
    #[serde(default)]
    pub popup: PopupConfig,

    /// Control channel settings.
    #[serde(default)]
    pub ipc: IpcConfig,

    /// Menu entries, top to bottom.
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// Cursor sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Milliseconds between two cursor samples.  Lower is more responsive
    /// and costs more wake-ups.
    pub interval_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { interval_ms: 100 }
    }
}

impl PollerConfig {
    /// The tick interval, never shorter than 1 ms.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Geometry of the popup rows, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub width: i32,
    pub row_height: i32,
    /// Space above the first and below the last row.
    pub padding: i32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            width: 220,
            row_height: 28,
            padding: 6,
        }
    }
}

/// Control channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IpcConfig {
    /// Loopback address the command listener binds to.
    pub address: String,
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:47813".into(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

/// A [`Config`] that is also a [`ConfigSource`] with nothing to reload.
impl ConfigSource for Config {
    fn hot_area(&self) -> HotArea {
        self.hot_area.clone()
    }

    fn menu_items(&self) -> Vec<MenuItem> {
        self.items.clone()
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// A [`ConfigSource`] backed by a file on disk.
///
/// The parsed file is cached; [`reload`](ConfigSource::reload) reads it
/// again and keeps the previous values if the new contents are broken.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
    config: Config,
}

impl FileConfig {
    /// Read `path`, falling back to defaults when it is missing or invalid.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let config = match Config::load(&path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                info!("no usable config ({}), using defaults", e);
                Config::default()
            }
        };
        Self { path, config }
    }

    /// The currently cached configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn hot_area(&self) -> HotArea {
        self.config.hot_area.clone()
    }

    fn menu_items(&self) -> Vec<MenuItem> {
        self.config.items.clone()
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        match Config::load(&self.path) {
            Ok(cfg) => {
                info!("reloaded config from {}", self.path.display());
                self.config = cfg;
                Ok(())
            }
            Err(e) => {
                warn!("reload failed, keeping previous config: {}", e);
                Err(e)
            }
        }
    }
}
