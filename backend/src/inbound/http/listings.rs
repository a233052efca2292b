//! Listing search endpoint.
//!
//! ```text
//! GET /api/v1/listings?minPrice=800&maxPrice=1500&amenity=WiFi&amenity=Gym
//! ```
//!
//! The raw query string is parsed here (repeated `amenity` keys cannot be
//! expressed with a plain deserializable struct) and handed to the search
//! port as a [`ListingFilter`]; results are annotated with their derived
//! average rating.

use actix_web::{HttpRequest, get, web};
use url::form_urlencoded;

use crate::domain::{ListingFilter, ListingSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Search listings with optional price bounds and any-of amenity matching.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    params(
        ("minPrice" = Option<i32>, Query, description = "Inclusive lower price bound; non-numeric values are ignored"),
        ("maxPrice" = Option<i32>, Query, description = "Inclusive upper price bound; non-numeric values are ignored"),
        ("amenity" = Option<Vec<String>>, Query, description = "Repeatable amenity name; a listing matches when it has any one of them")
    ),
    responses(
        (status = 200, description = "Matching listings", body = [ListingSummary]),
        (status = 503, description = "Listing store unavailable", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "searchListings",
    security([])
)]
#[get("/listings")]
pub async fn search_listings(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<ListingSummary>>> {
    let filter =
        ListingFilter::from_query_pairs(form_urlencoded::parse(req.query_string().as_bytes()));
    let listings = state.listings.search(&filter).await?;
    Ok(web::Json(
        listings.into_iter().map(ListingSummary::from).collect(),
    ))
}
