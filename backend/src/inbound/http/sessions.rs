//! Session endpoints implementing the credential cookie contract.
//!
//! ```text
//! POST /api/v1/login  {"email":"student@example.edu","password":"password"}
//! POST /api/v1/logout
//! ```
//!
//! Login issues the signed credential in a single HTTP-only `SameSite=Lax`
//! cookie with a 7-day max-age; logout clears it by re-issuing the cookie
//! empty with max-age 0. The server keeps no session state of its own.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::token::{SESSION_COOKIE, TOKEN_TTL_DAYS};

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::InvalidEmail => {
            Error::invalid_request("email must be a valid address")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(CookieDuration::days(TOKEN_TTL_DAYS))
        .finish()
}

fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// Authenticate and set the session credential cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session credential cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sessions"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let session = state.login.authenticate(&credentials).await?;
    let token = state
        .tokens
        .issue(&session)
        .map_err(|err| Error::internal(format!("failed to sign credential: {err}")))?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, state.cookie_secure))
        .json(json!({ "role": session.role().as_str() })))
}

/// Clear the session credential cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cookie cleared")
    ),
    tags = ["sessions"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::NoContent()
        .cookie(removal_cookie(state.cookie_secure))
        .finish()
}

#[cfg(test)]
mod tests {
    //! Cookie-contract coverage driven over real HTTP requests.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{FixtureListingSearch, FixtureLoginService};
    use crate::token::{SigningSecret, TokenIssuer};

    fn test_state() -> web::Data<HttpState> {
        let secret = SigningSecret::from_bytes(*b"session-test-secret-session-test");
        web::Data::new(HttpState::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureListingSearch::default()),
            TokenIssuer::new(&secret),
            false,
        ))
    }

    async fn post_login(body: Value) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new().app_data(test_state()).service(login).service(logout),
        )
        .await;
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(body)
                .to_request(),
        )
        .await
    }

    #[actix_web::test]
    async fn login_sets_the_credential_cookie_per_contract() {
        let res = post_login(
            serde_json::json!({ "email": "landlord@example.edu", "password": "password" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie set");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(7)));
        assert!(!cookie.value().is_empty());

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["role"], "LANDLORD");
    }

    #[actix_web::test]
    async fn login_rejects_unknown_accounts() {
        let res = post_login(
            serde_json::json!({ "email": "nobody@example.edu", "password": "password" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_rejects_malformed_email_with_field_details() {
        let res =
            post_login(serde_json::json!({ "email": "not-an-email", "password": "pw" })).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "email");
    }

    #[actix_web::test]
    async fn logout_clears_the_cookie_with_zero_max_age() {
        let app = test::init_service(
            App::new().app_data(test_state()).service(login).service(logout),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("removal cookie set");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
