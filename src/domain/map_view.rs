use crate::domain::listing::Listing;
use crate::error::{ExplorerError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub listing_id: String,
    pub title: String,
    pub price: f64,
    pub currency: String,
    pub coordinates: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapCenter {
    pub address: String,
    pub city: String,
    pub coordinates: (f64, f64),
}

/// Mock map over a set of listings. Holds selection state only.
#[derive(Debug, Clone, Default)]
pub struct MapView {
    markers: Vec<MapMarker>,
    centers: Vec<MapCenter>,
    selected: Option<usize>,
}

impl MapView {
    pub fn new<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> Self {
        let (markers, centers) = listings
            .into_iter()
            .map(|l| {
                (
                    MapMarker {
                        listing_id: l.id.clone(),
                        title: l.title.clone(),
                        price: l.price,
                        currency: l.currency.clone(),
                        coordinates: l.location.coordinates,
                    },
                    MapCenter {
                        address: l.location.address.clone(),
                        city: l.location.city.clone(),
                        coordinates: l.location.coordinates,
                    },
                )
            })
            .unzip();
        Self {
            markers,
            centers,
            selected: None,
        }
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn selected(&self) -> Option<&MapMarker> {
        self.selected.map(|i| &self.markers[i])
    }

    pub fn select(&mut self, listing_id: &str) -> Result<&MapMarker> {
        let index = self
            .markers
            .iter()
            .position(|m| m.listing_id == listing_id)
            .ok_or_else(|| ExplorerError::ListingNotFound {
                id: listing_id.to_string(),
            })?;
        self.selected = Some(index);
        Ok(&self.markers[index])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Selected listing's location, else the first listing's.
    pub fn center(&self) -> Option<&MapCenter> {
        self.centers.get(self.selected.unwrap_or(0))
    }
}
