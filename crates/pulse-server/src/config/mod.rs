//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use pulse_core::error::{PulseError, Result};

pub use schema::{ServerConfig, ServerSection};

/// Config path probed at startup; absence is not an error.
pub const DEFAULT_PATH: &str = "pulse.yaml";

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PulseError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| PulseError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path` if it exists, otherwise fall back to defaults. A file that
/// exists but fails to parse or validate is still an error.
pub fn load_or_default(path: &str) -> Result<ServerConfig> {
    if Path::new(path).exists() {
        load_from_file(path)
    } else {
        Ok(ServerConfig::default())
    }
}
