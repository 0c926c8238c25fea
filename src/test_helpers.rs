use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::catalog::Catalog;
use crate::domain::listing::{
    Listing, ListingDetails, ListingLocation, OwnerContact, PropertyCategory,
};
use crate::error::{ExplorerError, Result};
use crate::ports::listing_source::ListingSource;

type ErrorFn = Box<dyn Fn() -> ExplorerError + Send + Sync>;

/// In-memory [`ListingSource`] that counts fetches.
pub struct MockListingSource {
    listings: Vec<Listing>,
    error_fn: Option<ErrorFn>,
    calls: Arc<AtomicUsize>,
}

impl MockListingSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            error_fn: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(f: impl Fn() -> ExplorerError + Send + Sync + 'static) -> Self {
        Self {
            listings: Vec::new(),
            error_fn: Some(Box::new(f)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ListingSource for MockListingSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.error_fn {
            Some(ref f) => Err(f()),
            None => Ok(self.listings.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".into()
    }
}

// --- Factory functions ---

/// Two-bedroom apartment in Springfield.
pub fn make_listing(id: &str, title: &str, price: f64) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        description: "A test listing".to_string(),
        price,
        currency: "USD".to_string(),
        location: ListingLocation {
            address: "1 Test Street".to_string(),
            city: "Springfield".to_string(),
            country: "USA".to_string(),
            coordinates: (39.78, -89.65),
        },
        details: ListingDetails {
            bedrooms: 2,
            bathrooms: 1,
            area: 80.0,
            property_type: PropertyCategory::Apartment,
        },
        images: vec![format!("https://example.com/{id}/1.jpg")],
        amenities: vec!["WiFi".to_string()],
        available: true,
        featured: false,
        owner: OwnerContact {
            name: "Test Owner".to_string(),
            phone: "+1-555-0100".to_string(),
            email: "owner@example.com".to_string(),
        },
    }
}

pub fn make_listing_with(
    id: &str,
    title: &str,
    price: f64,
    category: PropertyCategory,
    bedrooms: u32,
    city: &str,
) -> Listing {
    let mut listing = make_listing(id, title, price);
    listing.details.property_type = category;
    listing.details.bedrooms = bedrooms;
    listing.location.city = city.to_string();
    listing
}

pub fn sample_catalog() -> Catalog {
    Catalog::builtin().expect("builtin catalog is valid")
}
