use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Apartment,
    House,
    Villa,
    Studio,
}

impl PropertyCategory {
    pub const ALL: [Self; 4] = [Self::Apartment, Self::House, Self::Villa, Self::Studio];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Villa => "villa",
            Self::Studio => "studio",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyCategory {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ExplorerError::invalid_filter(format!("unknown property type '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingLocation {
    pub address: String,
    pub city: String,
    pub country: String,
    /// `(latitude, longitude)`, display only.
    pub coordinates: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    /// Zero means studio.
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Square meters.
    pub area: f64,
    pub property_type: PropertyCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// One rentable property record. Listings are read-only once loaded into a
/// [`Catalog`](crate::domain::catalog::Catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Monthly rent.
    pub price: f64,
    pub currency: String,
    pub location: ListingLocation,
    pub details: ListingDetails,
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub available: bool,
    #[serde(default)]
    pub featured: bool,
    pub owner: OwnerContact,
}

impl Listing {
    pub fn category(&self) -> PropertyCategory {
        self.details.property_type
    }

    pub fn is_studio(&self) -> bool {
        self.details.bedrooms == 0
    }

    fn bedrooms_label(&self) -> String {
        match self.details.bedrooms {
            _ if self.is_studio() => "Studio".to_string(),
            1 => "1 bedroom".to_string(),
            n => format!("{n} bedrooms"),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ExplorerError::invalid_catalog("listing id must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ExplorerError::invalid_catalog(format!(
                "listing '{}' has invalid price {}",
                self.id, self.price
            )));
        }
        if self.details.bathrooms == 0 {
            return Err(ExplorerError::invalid_catalog(format!(
                "listing '{}' must have at least one bathroom",
                self.id
            )));
        }
        if !self.details.area.is_finite() || self.details.area <= 0.0 {
            return Err(ExplorerError::invalid_catalog(format!(
                "listing '{}' has invalid area {}",
                self.id, self.details.area
            )));
        }
        if self.images.is_empty() {
            return Err(ExplorerError::invalid_catalog(format!(
                "listing '{}' has no images",
                self.id
            )));
        }
        Ok(())
    }

    /// Multi-line rendering used by the property detail view.
    pub fn summary_detail(&self) -> String {
        let mut out = format!("# {}\n", self.title);
        out.push_str(&format!(
            "Location: {}, {}, {}\n",
            self.location.address, self.location.city, self.location.country
        ));
        out.push_str(&format!("Price: {} {}/month\n", self.currency, self.price));
        out.push_str(&format!(
            "Type: {} | {} | Bathrooms: {} | Area: {} m²\n",
            self.category(),
            self.bedrooms_label(),
            self.details.bathrooms,
            self.details.area
        ));
        out.push_str(if self.available {
            "Status: Available\n"
        } else {
            "Status: Not available\n"
        });
        if self.featured {
            out.push_str("Featured listing\n");
        }
        if !self.description.is_empty() {
            out.push_str(&format!("\n## Description\n{}\n", self.description));
        }
        if !self.amenities.is_empty() {
            out.push_str(&format!("\n## Amenities\n{}\n", self.amenities.join(", ")));
        }
        out.push_str(&format!(
            "\n## Contact\n{} | {} | {}\n",
            self.owner.name, self.owner.phone, self.owner.email
        ));
        out
    }
}


impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} {}/month, {}, {})",
            self.title,
            self.location.city,
            self.currency,
            self.price,
            self.bedrooms_label(),
            self.category()
        )?;
        if self.featured {
            write!(f, " | Featured")?;
        }
        if !self.available {
            write!(f, " | Unavailable")?;
        }
        Ok(())
    }
}
