//! `markpreview-config` — preview server configuration.
//!
//! Provides:
//! - Typed config schema with full defaults
//! - YAML loading
//! - `${ENV_VAR}` substitution in string values

pub mod env;
pub mod io;
pub mod schema;

pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_file_path, load_config};
pub use schema::MarkPreviewConfig;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load a config file and apply env substitution.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<MarkPreviewConfig> {
    let raw_config = load_config(path).await?;

    // Round-trip through Value so substitution sees every string leaf.
    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: MarkPreviewConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_and_prepare_substitutes_env_vars() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "static_dir: ${{MARKPREVIEW_TEST_STATIC}}").unwrap();

        // Var name is unique to this test so parallel tests cannot race.
        std::env::set_var("MARKPREVIEW_TEST_STATIC", "/srv/preview");
        let config = load_and_prepare(file.path()).await.unwrap();
        std::env::remove_var("MARKPREVIEW_TEST_STATIC");

        assert_eq!(config.static_dir, "/srv/preview");
    }
}
