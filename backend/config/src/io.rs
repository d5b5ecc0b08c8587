//! Config file reading.

use crate::schema::MarkPreviewConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name, resolved against the working directory.
const CONFIG_FILE_NAME: &str = "markpreview.yaml";

/// Resolve the config file path: `MARKPREVIEW_CONFIG` env wins,
/// otherwise `markpreview.yaml` next to the process.
pub fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("MARKPREVIEW_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<MarkPreviewConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(MarkPreviewConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: MarkPreviewConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/markpreview.yaml"))
            .await
            .unwrap();
        assert_eq!(config, MarkPreviewConfig::default());
    }

    #[tokio::test]
    async fn test_loads_yaml_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 9999\nstatic_dir: /tmp/static").unwrap();

        let config = load_config(file.path()).await.unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.static_dir, "/tmp/static");
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: [not a number").unwrap();

        assert!(load_config(file.path()).await.is_err());
    }
}
