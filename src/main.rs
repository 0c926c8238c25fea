use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use listing_explorer::adapters::source::builtin::BuiltinSource;
use listing_explorer::adapters::source::file::FileSource;
use listing_explorer::adapters::source::http::HttpSource;
use listing_explorer::config::load_config;
use listing_explorer::config::types::{CatalogConfig, SourceKind};
use listing_explorer::domain::session::Session;
use listing_explorer::mcp::server::ExplorerMcpServer;
use listing_explorer::ports::listing_source::{ListingSource, load_catalog};

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [PathBuf::from("config.yaml"), binary_dir().join("config.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn build_source(config: &CatalogConfig) -> Result<Box<dyn ListingSource>> {
    let source: Box<dyn ListingSource> = match config.source {
        SourceKind::Builtin => Box::new(BuiltinSource),
        SourceKind::File => {
            let path = config
                .path
                .as_ref()
                .context("catalog.path is required for the file source")?;
            Box::new(FileSource::new(path)?)
        }
        SourceKind::Http => {
            let url = config
                .url
                .as_deref()
                .context("catalog.url is required for the http source")?;
            Box::new(HttpSource::new(url, config)?)
        }
    };
    Ok(source)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting listing-explorer server");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    let source = build_source(&config.catalog)?;
    let catalog = load_catalog(source.as_ref())
        .await
        .with_context(|| format!("failed to load catalog from {}", source.describe()))?;

    let session = config.session.map_or_else(Session::anonymous, Session::signed_in);
    if let Some(profile) = session.profile() {
        tracing::info!(user = %profile.name, role = %profile.role, "Session profile loaded");
    }

    let server = ExplorerMcpServer::new(catalog, session);

    // Start MCP server over stdio
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
