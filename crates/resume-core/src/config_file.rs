use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

impl ConfigFile {
    pub fn endpoint(&self) -> Option<&str> {
        self.server
            .as_ref()
            .and_then(|s| s.endpoint.as_deref())
            .filter(|e| !e.is_empty())
    }

    pub fn theme(&self) -> Option<&str> {
        self.display
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn fps(&self) -> Option<u32> {
        self.display
            .as_ref()
            .and_then(|d| d.fps)
            .map(|fps| fps.clamp(1, 120))
    }
}

/// Platform config directory path: `<config_dir>/resume-viewer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("resume-viewer").join("config.toml"))
}

/// Load config by cascading CWD `.resume-viewer.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".resume-viewer.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            endpoint: overlay
                .server
                .as_ref()
                .and_then(|s| s.endpoint.clone())
                .or_else(|| base.server.as_ref().and_then(|s| s.endpoint.clone())),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
            fps: overlay
                .display
                .as_ref()
                .and_then(|d| d.fps)
                .or_else(|| base.display.as_ref().and_then(|d| d.fps)),
        }),
    }
}
