//! Access-control middleware evaluated on every inbound request.
//!
//! Order per request: extract the credential cookie (may be absent), verify
//! it (failure degrades to anonymous, never an error), classify the path,
//! then apply the decision table. The gate performs no I/O — classification
//! is a static prefix lookup and verification is CPU-bound — so it is cheap
//! enough to wrap the whole application.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::HttpResponse;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::{GateDecision, RoutePolicy, Session};
use crate::token::{CredentialVerifier, SESSION_COOKIE};

struct GateInner {
    verifier: CredentialVerifier,
    policy: RoutePolicy,
}

/// Access-control gate deciding allow/redirect for every request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::RequestGate;
/// use backend::domain::RoutePolicy;
/// use backend::token::{CredentialVerifier, SigningSecret};
///
/// let secret = SigningSecret::generate();
/// let gate = RequestGate::new(CredentialVerifier::new(&secret), RoutePolicy::default());
/// let app = App::new().wrap(gate);
/// ```
#[derive(Clone)]
pub struct RequestGate {
    inner: Rc<GateInner>,
}

impl RequestGate {
    /// Build a gate from a verifier and a route policy.
    pub fn new(verifier: CredentialVerifier, policy: RoutePolicy) -> Self {
        Self {
            inner: Rc::new(GateInner { verifier, policy }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestGateMiddleware {
            service,
            inner: Rc::clone(&self.inner),
        }))
    }
}

/// Service wrapper produced by [`RequestGate`].
pub struct RequestGateMiddleware<S> {
    service: S,
    inner: Rc<GateInner>,
}

impl<S> RequestGateMiddleware<S> {
    /// Decode the cookie into a session, treating every failure as anonymous.
    fn session_for(&self, req: &ServiceRequest) -> Option<Session> {
        let cookie = req.request().cookie(SESSION_COOKIE)?;
        match self.inner.verifier.verify(cookie.value()) {
            Ok(session) => Some(session),
            Err(error) => {
                debug!(%error, "invalid session credential treated as anonymous");
                None
            }
        }
    }
}

fn redirect_response(req: ServiceRequest, target: &str) -> ServiceResponse<BoxBody> {
    let (request, _payload) = req.into_parts();
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, target))
        .finish();
    ServiceResponse::new(request, response)
}

impl<S, B> Service<ServiceRequest> for RequestGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = self.session_for(&req);
        let decision = self.inner.policy.decide(session.as_ref(), req.path());

        match decision {
            GateDecision::Allow => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_boxed_body) })
            }
            GateDecision::RedirectToLanding(target) | GateDecision::RedirectToLogin(target) => {
                Box::pin(ready(Ok(redirect_response(req, &target))))
            }
            GateDecision::RedirectToUnauthorized(target) => {
                // Audit trail: exactly one record per blocked request.
                if let Some(session) = &session {
                    warn!(
                        subject = %session.user_id(),
                        email = %session.email(),
                        role = %session.role(),
                        path = %req.path(),
                        "blocked access to restricted route"
                    );
                }
                Box::pin(ready(Ok(redirect_response(req, &target))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Gate behaviour over real HTTP requests.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chrono::Duration;
    use tracing::field::{Field, Visit};
    use tracing::span;
    use tracing::{Event, Level, Metadata, Subscriber};

    use crate::domain::{Role, UserId};
    use crate::token::{SigningSecret, TokenIssuer};

    /// Collects warning-level events as field-name/value maps.
    #[derive(Default)]
    struct WarnCapture {
        events: Mutex<Vec<HashMap<String, String>>>,
    }

    struct FieldMap<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldMap<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }

    impl Subscriber for WarnCapture {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            *metadata.level() <= Level::WARN
        }

        fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

        fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

        fn event(&self, event: &Event<'_>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldMap(&mut fields));
            self.events.lock().expect("event log").push(fields);
        }

        fn enter(&self, _span: &span::Id) {}

        fn exit(&self, _span: &span::Id) {}
    }

    fn secret() -> SigningSecret {
        SigningSecret::from_bytes(*b"gate-test-secret-gate-test-secre")
    }

    fn token_for(secret: &SigningSecret, role: Role) -> String {
        let session = Session::new(UserId::random(), "someone@example.edu", role);
        TokenIssuer::new(secret).issue(&session).expect("issue token")
    }

    async fn gated_request(path: &str, cookie: Option<Cookie<'static>>) -> (StatusCode, Option<String>) {
        let secret = secret();
        let gate = RequestGate::new(CredentialVerifier::new(&secret), RoutePolicy::default());
        let app = test::init_service(
            App::new()
                .wrap(gate)
                .default_service(web::to(HttpResponse::Ok)),
        )
        .await;

        let mut req = test::TestRequest::get().uri(path);
        if let Some(cookie) = cookie {
            req = req.cookie(cookie);
        }
        let res = test::call_service(&app, req.to_request()).await;
        let location = res
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().expect("ascii location").to_owned());
        (res.status(), location)
    }

    fn session_cookie(secret: &SigningSecret, role: Role) -> Cookie<'static> {
        Cookie::new(SESSION_COOKIE, token_for(secret, role))
    }

    #[actix_web::test]
    async fn public_path_passes_through() {
        let (status, location) = gated_request("/listings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(location, None);
    }

    #[actix_web::test]
    async fn protected_path_without_cookie_redirects_to_login() {
        let (status, location) = gated_request("/dashboard", None).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(
            location.as_deref(),
            Some("/login?redirectedFrom=%2Fdashboard")
        );
    }

    #[actix_web::test]
    async fn student_cookie_on_admin_path_redirects_to_unauthorized() {
        let (status, location) = gated_request(
            "/admin",
            Some(session_cookie(&secret(), Role::Student)),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/unauthorized"));
    }

    #[actix_web::test]
    async fn role_mismatch_emits_exactly_one_audit_record() {
        let capture = Arc::new(WarnCapture::default());
        let _guard = tracing::subscriber::set_default(Arc::clone(&capture));

        let (status, _) = gated_request(
            "/admin/stats",
            Some(session_cookie(&secret(), Role::Student)),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let events = capture.events.lock().expect("event log");
        assert_eq!(events.len(), 1, "expected one audit record, got {events:?}");
        let record = &events[0];
        assert_eq!(
            record.get("message").map(String::as_str),
            Some("blocked access to restricted route")
        );
        assert_eq!(record.get("path").map(String::as_str), Some("/admin/stats"));
        assert_eq!(record.get("role").map(String::as_str), Some("STUDENT"));
        assert!(record.contains_key("subject"));
    }

    #[actix_web::test]
    async fn allowed_requests_emit_no_audit_record() {
        let capture = Arc::new(WarnCapture::default());
        let _guard = tracing::subscriber::set_default(Arc::clone(&capture));

        let (status, _) =
            gated_request("/admin", Some(session_cookie(&secret(), Role::Admin))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(capture.events.lock().expect("event log").is_empty());
    }

    #[actix_web::test]
    async fn landlord_cookie_on_login_page_redirects_to_dashboard() {
        let (status, location) = gated_request(
            "/login",
            Some(session_cookie(&secret(), Role::Landlord)),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/dashboard"));
    }

    #[actix_web::test]
    async fn admin_cookie_on_admin_path_is_allowed() {
        let (status, _) = gated_request("/admin/users", Some(session_cookie(&secret(), Role::Admin)))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn expired_cookie_is_treated_as_anonymous() {
        let secret = secret();
        let session = Session::new(UserId::random(), "someone@example.edu", Role::Admin);
        let stale = TokenIssuer::with_ttl(&secret, Duration::days(-2))
            .issue(&session)
            .expect("issue token");
        let (status, location) =
            gated_request("/profile", Some(Cookie::new(SESSION_COOKIE, stale))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/login?redirectedFrom=%2Fprofile"));
    }

    #[actix_web::test]
    async fn garbage_cookie_never_errors_the_request() {
        let (status, _) = gated_request(
            "/listings",
            Some(Cookie::new(SESSION_COOKIE, "not-a-token")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
