//! Diesel row structs for the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{listing_amenities, listing_ratings, listings};

/// Row shape for the `listings` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListingRow {
    /// Primary key.
    pub id: Uuid,
    /// Listing headline.
    pub title: String,
    /// Borough the listing is located in.
    pub borough: String,
    /// Monthly rent in whole currency units.
    pub price_per_month: i32,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row shape for the `listing_amenities` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listing_amenities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AmenityRow {
    /// Listing the amenity belongs to.
    pub listing_id: Uuid,
    /// Amenity name.
    pub name: String,
}

/// Row shape for the `listing_ratings` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listing_ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RatingRow {
    /// Primary key.
    pub id: Uuid,
    /// Listing the rating belongs to.
    pub listing_id: Uuid,
    /// Score from 1 to 5.
    pub score: i16,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
