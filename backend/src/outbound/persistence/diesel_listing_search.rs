//! Diesel-backed `ListingSearch` adapter.
//!
//! Translates a [`ListingFilter`] into SQL: the optional price bounds
//! become conditional clauses on a boxed query, and the amenity constraint
//! becomes an `id IN (SELECT listing_id ...)` subquery preserving the
//! filter's any-of semantics. Amenities and ratings for the matching page
//! are then fetched in two follow-up queries and grouped in memory, so the
//! rating average stays a read-time derivation.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::ListingSearch;
use crate::domain::{Error, Listing, ListingFilter};

use super::models::{AmenityRow, ListingRow, RatingRow};
use super::pool::DbPool;
use super::schema::{listing_amenities, listing_ratings, listings};

/// Diesel-backed implementation of the listing search port.
#[derive(Clone)]
pub struct DieselListingSearch {
    pool: DbPool,
}

impl DieselListingSearch {
    /// Create a new adapter over a connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(err: impl std::fmt::Display) -> Error {
    Error::service_unavailable(format!("listing store unavailable: {err}"))
}

fn map_query_error(err: diesel::result::Error) -> Error {
    Error::internal(format!("listing query failed: {err}"))
}

fn assemble(
    rows: Vec<ListingRow>,
    amenity_rows: Vec<AmenityRow>,
    rating_rows: Vec<RatingRow>,
) -> Vec<Listing> {
    let mut amenities_by_listing: HashMap<Uuid, Vec<String>> = HashMap::new();
    for row in amenity_rows {
        amenities_by_listing
            .entry(row.listing_id)
            .or_default()
            .push(row.name);
    }

    let mut ratings_by_listing: HashMap<Uuid, Vec<i16>> = HashMap::new();
    for row in rating_rows {
        ratings_by_listing
            .entry(row.listing_id)
            .or_default()
            .push(row.score);
    }

    rows.into_iter()
        .map(|row| {
            let amenities = amenities_by_listing.remove(&row.id).unwrap_or_default();
            let ratings = ratings_by_listing.remove(&row.id).unwrap_or_default();
            Listing::new(row.id, row.title, row.borough, row.price_per_month)
                .with_amenities(amenities)
                .with_ratings(ratings)
        })
        .collect()
}

#[async_trait]
impl ListingSearch for DieselListingSearch {
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, Error> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let mut query = listings::table
            .select(ListingRow::as_select())
            .order(listings::created_at.desc())
            .into_boxed();

        // An inverted range (min > max) produces contradictory clauses and
        // therefore an empty result set; the bounds are applied as given.
        if let Some(min) = filter.min_price() {
            query = query.filter(listings::price_per_month.ge(min));
        }
        if let Some(max) = filter.max_price() {
            query = query.filter(listings::price_per_month.le(max));
        }
        if !filter.amenities().is_empty() {
            let names: Vec<String> = filter.amenities().iter().cloned().collect();
            let with_amenity = listing_amenities::table
                .filter(listing_amenities::name.eq_any(names))
                .select(listing_amenities::listing_id);
            query = query.filter(listings::id.eq_any(with_amenity));
        }

        let rows = query
            .load::<ListingRow>(&mut conn)
            .await
            .map_err(map_query_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let amenity_rows = listing_amenities::table
            .filter(listing_amenities::listing_id.eq_any(ids.clone()))
            .select(AmenityRow::as_select())
            .load::<AmenityRow>(&mut conn)
            .await
            .map_err(map_query_error)?;
        let rating_rows = listing_ratings::table
            .filter(listing_ratings::listing_id.eq_any(ids))
            .select(RatingRow::as_select())
            .load::<RatingRow>(&mut conn)
            .await
            .map_err(map_query_error)?;

        Ok(assemble(rows, amenity_rows, rating_rows))
    }
}
