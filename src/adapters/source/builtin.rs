use async_trait::async_trait;

use crate::domain::catalog::builtin_listings;
use crate::domain::listing::Listing;
use crate::error::Result;
use crate::ports::listing_source::ListingSource;

/// The sample listings compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

#[async_trait]
impl ListingSource for BuiltinSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        builtin_listings()
    }

    fn describe(&self) -> String {
        "builtin".into()
    }
}
