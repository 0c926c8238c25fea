//! Filter engine over an in-memory listing snapshot.
//!
//! Every function here is pure: results borrow from the input slice and keep
//! its relative order.

use crate::domain::filter::{CategoryFilter, FilterSpec, PriceRange};
use crate::domain::listing::Listing;

/// How many related listings a property page shows.
pub const RELATED_LIMIT: usize = 3;

/// Returns the listings for which every active facet of `spec` holds.
pub fn filter_listings<'a>(listings: &'a [Listing], spec: &FilterSpec) -> Vec<&'a Listing> {
    let matcher = Matcher::new(spec);
    let result: Vec<&Listing> = listings.iter().filter(|l| matcher.matches(l)).collect();
    tracing::debug!(
        total = listings.len(),
        matched = result.len(),
        filters = %spec,
        "Filtered listings"
    );
    result
}

/// Per-listing predicate behind [`filter_listings`].
pub fn matches(listing: &Listing, spec: &FilterSpec) -> bool {
    Matcher::new(spec).matches(listing)
}

pub fn find_by_id<'a>(listings: &'a [Listing], id: &str) -> Option<&'a Listing> {
    listings.iter().find(|l| l.id == id)
}

pub fn find_featured(listings: &[Listing]) -> Vec<&Listing> {
    listings.iter().filter(|l| l.featured).collect()
}

pub fn find_by_category(listings: &[Listing], category: CategoryFilter) -> Vec<&Listing> {
    listings
        .iter()
        .filter(|l| category.accepts(l.category()))
        .collect()
}

pub fn find_by_price_range(listings: &[Listing], range: PriceRange) -> Vec<&Listing> {
    listings.iter().filter(|l| range.contains(l.price)).collect()
}

/// Featured listings other than `exclude_id`, first `limit` in catalog order.
pub fn find_related<'a>(listings: &'a [Listing], exclude_id: &str, limit: usize) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|l| l.featured && l.id != exclude_id)
        .take(limit)
        .collect()
}

/// Spec with its text queries lowercased once per pass.
struct Matcher<'s> {
    spec: &'s FilterSpec,
    location: Option<String>,
    search: Option<String>,
}

impl<'s> Matcher<'s> {
    fn new(spec: &'s FilterSpec) -> Self {
        let lowered = |q: &str| (!q.is_empty()).then(|| q.to_lowercase());
        Self {
            spec,
            location: lowered(&spec.location),
            search: lowered(&spec.search),
        }
    }

    fn matches(&self, listing: &Listing) -> bool {
        if !self.spec.category.accepts(listing.category()) {
            return false;
        }
        if !self.spec.price.contains(listing.price) {
            return false;
        }
        if !self.spec.bedrooms.accepts(listing.details.bedrooms) {
            return false;
        }
        if let Some(ref query) = self.location
            && !contains_any(query, &[&listing.location.city, &listing.location.address])
        {
            return false;
        }
        if let Some(ref query) = self.search
            && !contains_any(
                query,
                &[
                    &listing.title,
                    &listing.description,
                    &listing.location.address,
                    &listing.location.city,
                ],
            )
        {
            return false;
        }
        true
    }
}

/// `query` must already be lowercase.
fn contains_any(query: &str, fields: &[&str]) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::BedroomsFilter;
    use crate::domain::listing::PropertyCategory;
    use crate::test_helpers::{make_listing, make_listing_with};

    fn fixture() -> Vec<Listing> {
        vec![
            make_listing_with("a", "Garden Flat", 1500.0, PropertyCategory::Apartment, 1, "Leeds"),
            make_listing_with("b", "Studio Loft", 900.0, PropertyCategory::Studio, 0, "York"),
            make_listing_with("c", "Big Villa", 6000.0, PropertyCategory::Villa, 5, "Bath"),
            make_listing_with("d", "Town House", 2500.0, PropertyCategory::House, 3, "New York"),
        ]
    }

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn neutral_spec_returns_everything_in_order() {
        let listings = fixture();
        let result = filter_listings(&listings, &FilterSpec::default());
        assert_eq!(ids(&result), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        assert!(filter_listings(&[], &FilterSpec::default()).is_empty());
    }

    #[test]
    fn category_facet_is_exact() {
        let listings = fixture();
        let spec = FilterSpec::default()
            .with_category(CategoryFilter::Only(PropertyCategory::Villa));
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["c"]);
    }

    #[test]
    fn studio_bedrooms_matches_only_zero() {
        let listings = fixture();
        let spec = FilterSpec::default().with_bedrooms(BedroomsFilter::Studio);
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["b"]);
    }

    #[test]
    fn bedrooms_threshold_is_at_least() {
        let listings = fixture();
        let spec = FilterSpec::default().with_bedrooms(BedroomsFilter::from(3));
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["c", "d"]);
    }

    #[test]
    fn location_matches_city_or_address_case_insensitively() {
        let listings = fixture();
        let spec = FilterSpec::default().with_location("YORK");
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["b", "d"]);
    }

    #[test]
    fn location_matches_street_address() {
        let mut listings = fixture();
        listings[2].location.address = "12 Abbey Road".into();
        let spec = FilterSpec::default().with_location("abbey");
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["c"]);
    }

    #[test]
    fn search_covers_title_description_address_city() {
        let mut listings = fixture();
        listings[1].description = "Has a shared GARDEN".into();
        let spec = FilterSpec::default().with_search("garden");
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["a", "b"]);
    }

    #[test]
    fn search_does_not_look_at_amenities() {
        let mut listings = fixture();
        listings[2].amenities = vec!["Garden".into()];
        let spec = FilterSpec::default().with_search("garden");
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["a"]);
    }

    #[test]
    fn facets_combine_with_and() {
        let listings = fixture();
        let spec = FilterSpec::default()
            .with_price(PriceRange::new(1000.0, 3000.0).unwrap())
            .with_location("york");
        assert_eq!(ids(&filter_listings(&listings, &spec)), vec!["d"]);
    }

    #[test]
    fn related_is_featured_minus_current_capped() {
        let mut listings = fixture();
        listings.push(make_listing("e", "Extra", 1200.0));
        for l in &mut listings {
            l.featured = true;
        }
        assert_eq!(
            ids(&find_related(&listings, "b", RELATED_LIMIT)),
            vec!["a", "c", "d"]
        );
        assert!(find_related(&listings, "a", 0).is_empty());
    }

    #[test]
    fn related_ignores_unfeatured() {
        let mut listings = fixture();
        listings[3].featured = true;
        assert_eq!(ids(&find_related(&listings, "a", RELATED_LIMIT)), vec!["d"]);
        assert!(find_related(&listings, "d", RELATED_LIMIT).is_empty());
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let listings = fixture();
        let spec = FilterSpec::default().with_search("submarine");
        assert!(filter_listings(&listings, &spec).is_empty());
    }

    #[test]
    fn matches_agrees_with_filter() {
        let listings = fixture();
        let spec = FilterSpec::default().with_bedrooms(BedroomsFilter::from(1));
        for listing in &listings {
            let in_result = filter_listings(&listings, &spec)
                .iter()
                .any(|l| l.id == listing.id);
            assert_eq!(matches(listing, &spec), in_result);
        }
    }

    #[test]
    fn find_by_id_hit_and_miss() {
        let listings = fixture();
        assert_eq!(find_by_id(&listings, "c").map(|l| l.title.as_str()), Some("Big Villa"));
        assert!(find_by_id(&listings, "zz").is_none());
    }

    #[test]
    fn find_featured_preserves_order() {
        let mut listings = fixture();
        listings[3].featured = true;
        listings[0].featured = true;
        assert_eq!(ids(&find_featured(&listings)), vec!["a", "d"]);
    }

    #[test]
    fn find_by_category_all_returns_everything() {
        let listings = fixture();
        assert_eq!(find_by_category(&listings, CategoryFilter::All).len(), 4);
        assert_eq!(
            ids(&find_by_category(
                &listings,
                CategoryFilter::Only(PropertyCategory::House)
            )),
            vec!["d"]
        );
    }

    #[test]
    fn find_by_price_range_is_inclusive() {
        let listings = vec![
            make_listing("x", "Low", 1000.0),
            make_listing("y", "Mid", 2000.0),
            make_listing("z", "High", 3000.0),
        ];
        let range = PriceRange::new(1000.0, 2000.0).unwrap();
        assert_eq!(ids(&find_by_price_range(&listings, range)), vec!["x", "y"]);
    }
}
