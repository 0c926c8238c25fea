use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::listing::PropertyCategory;
use crate::error::{ExplorerError, Result};

/// Token that disables the category and bedrooms facets.
pub const ALL_TOKEN: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(PropertyCategory),
}

impl CategoryFilter {
    pub fn accepts(self, category: PropertyCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        if s == ALL_TOKEN {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_TOKEN),
            Self::Only(c) => c.fmt(f),
        }
    }
}

/// Inclusive price interval. Only constructible through [`PriceRange::new`],
/// so `0 <= min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Neutral range of the explore view. Kept fixed rather than derived
    /// from the catalog.
    pub const DEFAULT: Self = Self {
        min: 0.0,
        max: 10_000.0,
    };

    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ExplorerError::invalid_filter(
                "price bounds must be finite numbers",
            ));
        }
        if min < 0.0 || max < 0.0 {
            return Err(ExplorerError::invalid_filter(format!(
                "price bounds must be nonnegative (got [{min}, {max}])"
            )));
        }
        if min > max {
            return Err(ExplorerError::invalid_filter(format!(
                "min price {min} cannot be greater than max price {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    pub fn contains(self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> Deserialize<'de> for PriceRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            min: f64,
            max: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BedroomsFilter {
    #[default]
    Any,
    /// Exactly zero bedrooms.
    Studio,
    AtLeast(NonZeroU32),
}

impl BedroomsFilter {
    pub fn accepts(self, bedrooms: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Studio => bedrooms == 0,
            Self::AtLeast(n) => bedrooms >= n.get(),
        }
    }
}

impl From<u32> for BedroomsFilter {
    fn from(threshold: u32) -> Self {
        NonZeroU32::new(threshold).map_or(Self::Studio, Self::AtLeast)
    }
}

impl FromStr for BedroomsFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        if token == ALL_TOKEN {
            return Ok(Self::Any);
        }
        token.parse::<u32>().map(Self::from).map_err(|_| {
            ExplorerError::invalid_filter(format!(
                "bedrooms must be 'all' or a nonnegative integer (got '{s}')"
            ))
        })
    }
}

impl fmt::Display for BedroomsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(ALL_TOKEN),
            Self::Studio => f.write_str("0"),
            Self::AtLeast(n) => write!(f, "{n}+"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Category,
    Price,
    Bedrooms,
    Location,
    Search,
}

/// The five facets of one filtering pass. `Default` is the neutral spec,
/// which excludes nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    pub price: PriceRange,
    pub bedrooms: BedroomsFilter,
    pub location: String,
    pub search: String,
}

/// Untyped filter state as collected by a form: string tokens plus an
/// optional price interval.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilter {
    pub property_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

impl FilterSpec {
    pub fn from_raw(raw: RawFilter) -> Result<Self> {
        let category = match raw.property_type.as_deref() {
            None | Some("") => CategoryFilter::All,
            Some(token) => token.parse()?,
        };
        let bedrooms = match raw.bedrooms.as_deref() {
            None | Some("") => BedroomsFilter::Any,
            Some(token) => token.parse()?,
        };
        let price = PriceRange::new(
            raw.min_price.unwrap_or(PriceRange::DEFAULT.min),
            raw.max_price.unwrap_or(PriceRange::DEFAULT.max),
        )?;
        Ok(Self {
            category,
            price,
            bedrooms,
            location: raw.location.unwrap_or_default(),
            search: raw.search.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_bedrooms(mut self, bedrooms: BedroomsFilter) -> Self {
        self.bedrooms = bedrooms;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Facets that depart from their neutral value, in display order.
    pub fn active_facets(&self) -> Vec<Facet> {
        let mut facets = Vec::new();
        if self.category != CategoryFilter::All {
            facets.push(Facet::Category);
        }
        if !self.price.is_default() {
            facets.push(Facet::Price);
        }
        if self.bedrooms != BedroomsFilter::Any {
            facets.push(Facet::Bedrooms);
        }
        if !self.location.is_empty() {
            facets.push(Facet::Location);
        }
        if !self.search.is_empty() {
            facets.push(Facet::Search);
        }
        facets
    }

    pub fn is_neutral(&self) -> bool {
        self.active_facets().is_empty()
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={} price=[{}, {}] bedrooms={}",
            self.category,
            self.price.min,
            self.price.max,
            self.bedrooms
        )?;
        if !self.location.is_empty() {
            write!(f, " location=\"{}\"", self.location)?;
        }
        if !self.search.is_empty() {
            write!(f, " search=\"{}\"", self.search)?;
        }
        Ok(())
    }
}
