//! Listing entity and the read-time rating annotation.

use std::collections::BTreeSet;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A rental listing as owned by the persistence layer.
///
/// The average rating is deliberately not stored on the entity; it is
/// derived at read time from whatever ratings are currently attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    id: Uuid,
    title: String,
    borough: String,
    price_per_month: i32,
    amenities: BTreeSet<String>,
    ratings: Vec<i16>,
}

impl Listing {
    /// Construct a listing with no amenities or ratings attached.
    pub fn new(
        id: Uuid,
        title: impl Into<String>,
        borough: impl Into<String>,
        price_per_month: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            borough: borough.into(),
            price_per_month,
            amenities: BTreeSet::new(),
            ratings: Vec::new(),
        }
    }

    /// Replace the attached amenity names.
    #[must_use]
    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the attached rating scores.
    #[must_use]
    pub fn with_ratings(mut self, ratings: Vec<i16>) -> Self {
        self.ratings = ratings;
        self
    }

    /// Stable listing identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Listing headline shown in search results.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Borough the listing is located in.
    pub fn borough(&self) -> &str {
        self.borough.as_str()
    }

    /// Monthly rent in whole currency units.
    pub fn price_per_month(&self) -> i32 {
        self.price_per_month
    }

    /// Amenity names attached to the listing.
    pub fn amenities(&self) -> &BTreeSet<String> {
        &self.amenities
    }

    /// Rating scores currently attached to the listing.
    pub fn ratings(&self) -> &[i16] {
        &self.ratings
    }

    /// Arithmetic mean of the attached ratings, rounded to one decimal.
    ///
    /// Returns `None` when the listing has no ratings so unrated listings
    /// are never presented as zero-starred.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: i64 = self.ratings.iter().map(|score| i64::from(*score)).sum();
        let mean = sum as f64 / self.ratings.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}

/// Search-result view of a listing, annotated with its derived rating.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    /// Stable listing identifier.
    pub id: Uuid,
    /// Listing headline.
    pub title: String,
    /// Borough the listing is located in.
    pub borough: String,
    /// Monthly rent in whole currency units.
    pub price_per_month: i32,
    /// Amenity names, sorted.
    pub amenities: Vec<String>,
    /// Derived average rating; `null` marks an unrated listing.
    #[schema(example = 4.5)]
    pub average_rating: Option<f64>,
}

impl From<Listing> for ListingSummary {
    fn from(listing: Listing) -> Self {
        let average_rating = listing.average_rating();
        Self {
            id: listing.id,
            title: listing.title,
            borough: listing.borough,
            price_per_month: listing.price_per_month,
            amenities: listing.amenities.into_iter().collect(),
            average_rating,
        }
    }
}
