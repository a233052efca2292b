//! Route classification and the access-control decision table.
//!
//! `classify` is a total, stateless function from request path to access
//! bucket; `decide` evaluates the fixed-order decision table over
//! session presence, classification, and role. Both are pure so the
//! middleware adds no I/O to the request path.

use url::form_urlencoded;

use crate::domain::{Role, Session};

/// Access-control bucket a request path falls into.
///
/// Every path maps to exactly one class, with [`RouteClass::Public`] as the
/// default when no prefix table matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No restrictions; anonymous and authenticated users alike.
    Public,
    /// Login/register pages; authenticated users are bounced forward.
    AuthOnly,
    /// Requires any authenticated session.
    Protected,
    /// Requires an authenticated `ADMIN` session.
    AdminOnly,
    /// Requires an authenticated `LANDLORD` session.
    LandlordOnly,
}

/// Outcome of evaluating the decision table for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Forward the request to the downstream handler unchanged.
    Allow,
    /// Authenticated user on an auth-only page; bounce to their landing page.
    RedirectToLanding(String),
    /// Anonymous user on a protected path; send to login with the original
    /// path preserved in `redirectedFrom`.
    RedirectToLogin(String),
    /// Role mismatch on a restricted prefix.
    RedirectToUnauthorized(String),
}

impl GateDecision {
    /// Redirect target, when the decision is any redirect variant.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLanding(target)
            | Self::RedirectToLogin(target)
            | Self::RedirectToUnauthorized(target) => Some(target.as_str()),
        }
    }
}

/// Redirect target paths the gate must know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    /// Login form; receives `redirectedFrom` on enforced redirects.
    pub login: String,
    /// Default landing page for students and other roles.
    pub home: String,
    /// Landing page for authenticated administrators.
    pub admin_landing: String,
    /// Landing page for authenticated landlords.
    pub landlord_landing: String,
    /// Shown on role mismatch.
    pub unauthorized: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            login: "/login".to_owned(),
            home: "/".to_owned(),
            admin_landing: "/admin".to_owned(),
            landlord_landing: "/dashboard".to_owned(),
            unauthorized: "/unauthorized".to_owned(),
        }
    }
}

/// Path prefix tables, one per non-public classification.
///
/// Matching is segment-aware: `/admin` covers `/admin` and `/admin/users`
/// but not `/administrator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePrefixes {
    /// Prefixes classified as [`RouteClass::AuthOnly`].
    pub auth_only: Vec<String>,
    /// Prefixes classified as [`RouteClass::AdminOnly`].
    pub admin: Vec<String>,
    /// Prefixes classified as [`RouteClass::LandlordOnly`].
    pub landlord: Vec<String>,
    /// Prefixes classified as [`RouteClass::Protected`].
    pub protected: Vec<String>,
}

impl Default for RoutePrefixes {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|p| (*p).to_owned()).collect();
        Self {
            auth_only: owned(&["/login", "/register"]),
            admin: owned(&["/admin"]),
            landlord: owned(&["/dashboard"]),
            protected: owned(&["/profile", "/favorites", "/inquiries", "/messages"]),
        }
    }
}

/// Static route policy: prefix tables plus redirect targets.
///
/// # Examples
/// ```
/// use backend::domain::{RoutePolicy, RouteClass};
///
/// let policy = RoutePolicy::default();
/// assert_eq!(policy.classify("/admin/users"), RouteClass::AdminOnly);
/// assert_eq!(policy.classify("/listings/42"), RouteClass::Public);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    prefixes: RoutePrefixes,
    targets: RedirectTargets,
}

fn prefix_covers(prefix: &str, path: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl RoutePolicy {
    /// Build a policy from explicit prefix tables and redirect targets.
    pub fn new(prefixes: RoutePrefixes, targets: RedirectTargets) -> Self {
        Self { prefixes, targets }
    }

    /// Redirect targets in effect for this policy.
    pub fn targets(&self) -> &RedirectTargets {
        &self.targets
    }

    /// Classify a request path into exactly one access bucket.
    pub fn classify(&self, path: &str) -> RouteClass {
        let tables = [
            (&self.prefixes.auth_only, RouteClass::AuthOnly),
            (&self.prefixes.admin, RouteClass::AdminOnly),
            (&self.prefixes.landlord, RouteClass::LandlordOnly),
            (&self.prefixes.protected, RouteClass::Protected),
        ];
        for (prefixes, class) in tables {
            if prefixes.iter().any(|p| prefix_covers(p, path)) {
                return class;
            }
        }
        RouteClass::Public
    }

    /// Evaluate the decision table for one request, first match wins:
    ///
    /// 1. session on an auth-only page → role-specific landing redirect;
    /// 2. no session on any protected class → login redirect carrying
    ///    `redirectedFrom`;
    /// 3. non-admin session on an admin prefix → unauthorized redirect;
    /// 4. non-landlord session on a landlord prefix → unauthorized redirect;
    /// 5. otherwise → allow.
    pub fn decide(&self, session: Option<&Session>, path: &str) -> GateDecision {
        let class = self.classify(path);
        match (session, class) {
            (Some(session), RouteClass::AuthOnly) => {
                GateDecision::RedirectToLanding(self.landing_for(session.role()))
            }
            (None, RouteClass::Protected | RouteClass::AdminOnly | RouteClass::LandlordOnly) => {
                GateDecision::RedirectToLogin(self.login_redirect(path))
            }
            (Some(session), RouteClass::AdminOnly) if session.role() != Role::Admin => {
                GateDecision::RedirectToUnauthorized(self.targets.unauthorized.clone())
            }
            (Some(session), RouteClass::LandlordOnly) if session.role() != Role::Landlord => {
                GateDecision::RedirectToUnauthorized(self.targets.unauthorized.clone())
            }
            _ => GateDecision::Allow,
        }
    }

    fn landing_for(&self, role: Role) -> String {
        match role {
            Role::Landlord => self.targets.landlord_landing.clone(),
            Role::Admin => self.targets.admin_landing.clone(),
            Role::Student => self.targets.home.clone(),
        }
    }

    fn login_redirect(&self, original_path: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirectedFrom", original_path)
            .finish();
        format!("{}?{}", self.targets.login, query)
    }
}
