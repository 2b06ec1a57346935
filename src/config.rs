use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Runtime settings, resolved once at startup and passed by reference into
/// every request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the listener binds to.
    pub listen_addr: String,
    /// Base directory that route file paths are resolved against.
    pub root: PathBuf,
    /// Reproduce the legacy byte stream (`404 OK` status lines, doubled
    /// terminal chunk).
    pub legacy_wire: bool,
}

/// On-disk form of [`Config`]. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    listen_addr: Option<String>,
    root: Option<PathBuf>,
    legacy_wire: Option<bool>,
}

impl Config {
    /// Loads configuration from `CHUNKSERVE_CONFIG` (if set) and then applies
    /// the `LISTEN`, `SERVE_ROOT` and `LEGACY_WIRE` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CHUNKSERVE_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::with_root(executable_dir()?),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("SERVE_ROOT") {
            cfg.root = PathBuf::from(root);
        }
        if let Ok(flag) = std::env::var("LEGACY_WIRE") {
            cfg.legacy_wire = parse_flag(&flag);
        }

        Ok(cfg)
    }

    /// Default settings serving files out of `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN.to_string(),
            root: root.into(),
            legacy_wire: false,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses a YAML document. A missing `root` falls back to the executable
    /// directory.
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(text)?;

        let root = match file.root {
            Some(root) => root,
            None => executable_dir()?,
        };

        Ok(Self {
            listen_addr: file
                .listen_addr
                .unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
            root,
            legacy_wire: file.legacy_wire.unwrap_or(false),
        })
    }
}

/// Directory containing the running executable.
pub fn executable_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("executable path has no parent directory")
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
