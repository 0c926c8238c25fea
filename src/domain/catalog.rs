use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::engine;
use crate::domain::filter::{CategoryFilter, FilterSpec, PriceRange};
use crate::domain::listing::Listing;
use crate::error::{ExplorerError, Result};

const BUILTIN_LISTINGS: &str = include_str!("../../data/sample_listings.json");

/// Immutable, validated listing collection. Identities are unique.
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: Arc<[Listing]>,
}

impl Catalog {
    pub fn new(listings: impl Into<Arc<[Listing]>>) -> Result<Self> {
        let listings = listings.into();
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in listings.iter() {
            listing.validate()?;
            if !seen.insert(listing.id.as_str()) {
                return Err(ExplorerError::invalid_catalog(format!(
                    "duplicate listing id '{}'",
                    listing.id
                )));
            }
        }
        tracing::debug!(count = listings.len(), "Catalog loaded");
        Ok(Self { listings })
    }

    /// The six-listing sample set shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_listings()?)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn filter(&self, spec: &FilterSpec) -> Vec<&Listing> {
        engine::filter_listings(&self.listings, spec)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Listing> {
        engine::find_by_id(&self.listings, id)
    }

    /// Like [`Catalog::find_by_id`], for callers that propagate with `?`.
    pub fn get(&self, id: &str) -> Result<&Listing> {
        self.find_by_id(id)
            .ok_or_else(|| ExplorerError::ListingNotFound { id: id.to_string() })
    }

    pub fn featured(&self) -> Vec<&Listing> {
        engine::find_featured(&self.listings)
    }

    pub fn by_category(&self, category: CategoryFilter) -> Vec<&Listing> {
        engine::find_by_category(&self.listings, category)
    }

    pub fn by_price_range(&self, range: PriceRange) -> Vec<&Listing> {
        engine::find_by_price_range(&self.listings, range)
    }

    /// Featured listings other than `id`, at most [`engine::RELATED_LIMIT`].
    pub fn related(&self, id: &str) -> Vec<&Listing> {
        engine::find_related(&self.listings, id, engine::RELATED_LIMIT)
    }
}

pub fn builtin_listings() -> Result<Vec<Listing>> {
    Ok(serde_json::from_str(BUILTIN_LISTINGS)?)
}
