//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel
//! uses them for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` after a migration
//! changes the schema.

diesel::table! {
    /// Rental listings.
    listings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Listing headline shown in search results.
        title -> Varchar,
        /// Borough the listing is located in.
        borough -> Varchar,
        /// Monthly rent in whole currency units.
        price_per_month -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Amenity names attached to a listing.
    listing_amenities (listing_id, name) {
        /// Listing the amenity belongs to.
        listing_id -> Uuid,
        /// Amenity name, e.g. `WiFi`.
        name -> Varchar,
    }
}

diesel::table! {
    /// Individual review ratings attached to a listing.
    listing_ratings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Listing the rating belongs to.
        listing_id -> Uuid,
        /// Score from 1 to 5.
        score -> Int2,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(listing_amenities -> listings (listing_id));
diesel::joinable!(listing_ratings -> listings (listing_id));

diesel::allow_tables_to_appear_in_same_query!(listings, listing_amenities, listing_ratings);
