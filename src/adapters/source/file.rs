use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::listing::Listing;
use crate::error::{ExplorerError, Result};
use crate::ports::listing_source::ListingSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

/// Catalog file on disk: a JSON or YAML sequence of listings.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Format,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = format_for(&path)?;
        Ok(Self { path, format })
    }
}

fn format_for(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("yaml" | "yml") => Ok(Format::Yaml),
        _ => Err(ExplorerError::Config(format!(
            "unsupported catalog file {} (expected .json, .yaml or .yml)",
            path.display()
        ))),
    }
}

#[async_trait]
impl ListingSource for FileSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        tracing::debug!(path = %self.path.display(), "Reading catalog file");
        let content = tokio::fs::read_to_string(&self.path).await?;
        let listings = match self.format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Yaml => serde_yml::from_str(&content)?,
        };
        Ok(listings)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
