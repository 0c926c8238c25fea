use async_trait::async_trait;

use crate::domain::catalog::Catalog;
use crate::domain::listing::Listing;
use crate::error::Result;

/// Supplier of listing snapshots. The engine only ever sees the resolved
/// snapshot, never the source.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listings(&self) -> Result<Vec<Listing>>;

    /// Short label used in logs.
    fn describe(&self) -> String;
}

/// Fetches one snapshot and validates it into a [`Catalog`].
pub async fn load_catalog(source: &dyn ListingSource) -> Result<Catalog> {
    let listings = source.fetch_listings().await?;
    tracing::info!(
        source = %source.describe(),
        count = listings.len(),
        "Loaded listing snapshot"
    );
    Catalog::new(listings)
}
