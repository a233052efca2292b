//! Listing search filter built from raw query parameters.
//!
//! Parsing is deliberately lenient: malformed numeric values are dropped
//! rather than rejected, favouring a permissive search experience over
//! strict validation.

use std::collections::BTreeSet;

use crate::domain::Listing;

/// Query parameter carrying the lower price bound.
pub const MIN_PRICE_PARAM: &str = "minPrice";
/// Query parameter carrying the upper price bound.
pub const MAX_PRICE_PARAM: &str = "maxPrice";
/// Repeatable query parameter naming a requested amenity.
pub const AMENITY_PARAM: &str = "amenity";

/// Optional search constraints applied to the listing collection.
///
/// Constructed per request from query-string pairs and never persisted.
///
/// # Examples
/// ```
/// use backend::domain::ListingFilter;
///
/// let filter = ListingFilter::from_query_pairs([
///     ("minPrice", "800"),
///     ("maxPrice", "oops"),
///     ("amenity", "WiFi"),
///     ("amenity", "Gym"),
/// ]);
/// assert_eq!(filter.min_price(), Some(800));
/// assert_eq!(filter.max_price(), None);
/// assert_eq!(filter.amenities().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    min_price: Option<i32>,
    max_price: Option<i32>,
    amenities: BTreeSet<String>,
}

impl ListingFilter {
    /// Build a filter from raw query pairs.
    ///
    /// `minPrice`/`maxPrice` values that fail integer parsing are omitted
    /// from the filter and never displace a previously parsed bound; a
    /// repeated valid value replaces the earlier one. Repeated `amenity`
    /// keys accumulate into a set and unknown keys are ignored.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                MIN_PRICE_PARAM => {
                    if let Ok(price) = value.as_ref().trim().parse() {
                        filter.min_price = Some(price);
                    }
                }
                MAX_PRICE_PARAM => {
                    if let Ok(price) = value.as_ref().trim().parse() {
                        filter.max_price = Some(price);
                    }
                }
                AMENITY_PARAM => {
                    let name = value.as_ref().trim();
                    if !name.is_empty() {
                        filter.amenities.insert(name.to_owned());
                    }
                }
                _ => {}
            }
        }
        filter
    }

    /// Explicit constructor used by tests and seeding code.
    pub fn new(
        min_price: Option<i32>,
        max_price: Option<i32>,
        amenities: BTreeSet<String>,
    ) -> Self {
        Self {
            min_price,
            max_price,
            amenities,
        }
    }

    /// Lower price bound, inclusive.
    pub fn min_price(&self) -> Option<i32> {
        self.min_price
    }

    /// Upper price bound, inclusive.
    pub fn max_price(&self) -> Option<i32> {
        self.max_price
    }

    /// Requested amenity names; empty means no amenity constraint.
    pub fn amenities(&self) -> &BTreeSet<String> {
        &self.amenities
    }

    /// Whether the filter constrains anything at all.
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none() && self.amenities.is_empty()
    }

    /// Predicate a listing must satisfy to appear in the results.
    ///
    /// Amenities use any-of semantics: one overlapping amenity suffices.
    /// An inverted price range (`min > max`) matches nothing; the bounds
    /// are applied as given, not reconciled.
    pub fn matches(&self, listing: &Listing) -> bool {
        if self
            .min_price
            .is_some_and(|min| listing.price_per_month() < min)
        {
            return false;
        }
        if self
            .max_price
            .is_some_and(|max| listing.price_per_month() > max)
        {
            return false;
        }
        if self.amenities.is_empty() {
            return true;
        }
        listing
            .amenities()
            .iter()
            .any(|name| self.amenities.contains(name))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for filter construction and predicate semantics.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn listing(price: i32, amenities: &[&str]) -> Listing {
        Listing::new(Uuid::new_v4(), "Room", "Brooklyn", price)
            .with_amenities(amenities.iter().copied())
    }

    #[test]
    fn builds_filter_from_query_pairs() {
        let filter = ListingFilter::from_query_pairs([
            ("minPrice", "500"),
            ("maxPrice", "1500"),
            ("amenity", "WiFi"),
            ("amenity", "Gym"),
            ("amenity", "WiFi"),
            ("page", "2"),
        ]);
        assert_eq!(filter.min_price(), Some(500));
        assert_eq!(filter.max_price(), Some(1500));
        assert_eq!(
            filter.amenities().iter().cloned().collect::<Vec<_>>(),
            vec!["Gym".to_owned(), "WiFi".to_owned()]
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("12.5")]
    #[case("1e3")]
    fn malformed_prices_are_dropped_not_rejected(#[case] raw: &str) {
        let filter = ListingFilter::from_query_pairs([("minPrice", raw), ("maxPrice", raw)]);
        assert_eq!(filter.min_price(), None);
        assert_eq!(filter.max_price(), None);
    }

    #[test]
    fn malformed_duplicate_keeps_the_earlier_valid_bound() {
        let filter = ListingFilter::from_query_pairs([
            ("minPrice", "800"),
            ("minPrice", "abc"),
            ("maxPrice", "1500"),
            ("maxPrice", ""),
        ]);
        assert_eq!(filter.min_price(), Some(800));
        assert_eq!(filter.max_price(), Some(1500));
    }

    #[test]
    fn repeated_valid_bound_takes_the_last_value() {
        let filter = ListingFilter::from_query_pairs([("minPrice", "800"), ("minPrice", "900")]);
        assert_eq!(filter.min_price(), Some(900));
    }

    #[test]
    fn blank_amenity_values_are_ignored() {
        let filter = ListingFilter::from_query_pairs([("amenity", "  "), ("amenity", "")]);
        assert!(filter.amenities().is_empty());
        assert!(filter.is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ListingFilter::from_query_pairs([("minPrice", "1000"), ("maxPrice", "1200")]);
        assert!(filter.matches(&listing(1000, &[])));
        assert!(filter.matches(&listing(1200, &[])));
        assert!(!filter.matches(&listing(999, &[])));
        assert!(!filter.matches(&listing(1201, &[])));
    }

    #[test]
    fn amenity_matching_is_any_of_not_all_of() {
        let filter = ListingFilter::from_query_pairs([("amenity", "WiFi"), ("amenity", "Gym")]);
        assert!(filter.matches(&listing(900, &["WiFi"])));
        assert!(filter.matches(&listing(900, &["Gym", "Laundry"])));
        assert!(!filter.matches(&listing(900, &["Laundry"])));
    }

    #[test]
    fn empty_amenity_set_means_no_constraint() {
        let filter = ListingFilter::from_query_pairs([("minPrice", "100")]);
        assert!(filter.matches(&listing(500, &[])));
    }

    // Current behaviour, preserved: an inverted range is applied as given
    // and therefore matches nothing.
    #[test]
    fn inverted_price_range_matches_nothing() {
        let filter = ListingFilter::from_query_pairs([("minPrice", "2000"), ("maxPrice", "1000")]);
        for price in [500, 1000, 1500, 2000, 2500] {
            assert!(!filter.matches(&listing(price, &[])));
        }
    }
}
