pub mod types;

use std::path::Path;

use crate::error::{ExplorerError, Result};
use types::{Config, SourceKind};

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ExplorerError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    let config: Config = serde_yml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Checks that the selected catalog source has what it needs.
pub fn validate(config: &Config) -> Result<()> {
    match config.catalog.source {
        SourceKind::Builtin => Ok(()),
        SourceKind::File if config.catalog.path.is_none() => Err(ExplorerError::Config(
            "catalog.path is required when catalog.source is 'file'".into(),
        )),
        SourceKind::Http => {
            let Some(ref raw) = config.catalog.url else {
                return Err(ExplorerError::Config(
                    "catalog.url is required when catalog.source is 'http'".into(),
                ));
            };
            url::Url::parse(raw)?;
            Ok(())
        }
        SourceKind::File => Ok(()),
    }
}
