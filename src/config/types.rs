use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::session::UserProfile;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Profile supplied by the identity provider, if someone is signed in.
    #[serde(default)]
    pub session: Option<UserProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Builtin,
    File,
    Http,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: SourceKind,
    /// Catalog file for `source: file` (`.json`, `.yaml` or `.yml`).
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Endpoint returning a JSON array of listings for `source: http`.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Builtin,
            path: None,
            url: None,
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("listing-explorer/", env!("CARGO_PKG_VERSION")).into()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}
