//! Route guard.
//!
//! A pure function of session state and the requested path: no network, no
//! async, re-evaluated on every navigation. Protected paths require an
//! authenticated session; the public entry path is itself redirected to the
//! dashboard when a session is present, so an authenticated user can never
//! re-enter the landing flow.

use crate::session::Session;

/// The unauthenticated entry path (public landing).
pub const ENTRY_PATH: &str = "/";

/// Default destination for an authenticated user.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Paths that require an authenticated session.
pub const PROTECTED_PATHS: &[&str] = &[
    "/dashboard",
    "/expenses",
    "/upload",
    "/reconcile",
    "/settings",
];

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested path.
    Allow(String),
    /// Navigate to the given path instead.
    Redirect(String),
}

/// Decides whether a navigation request may proceed.
///
/// Rules, in order:
/// - protected path + session present: allow
/// - protected path + no session: redirect to the entry path
/// - entry path + session present: redirect to the dashboard
/// - entry path + no session: allow
/// - anything else: redirect to the entry path
pub fn guard(session: Option<&Session>, path: &str) -> RouteDecision {
    if PROTECTED_PATHS.contains(&path) {
        return if session.is_some() {
            RouteDecision::Allow(path.to_string())
        } else {
            RouteDecision::Redirect(ENTRY_PATH.to_string())
        };
    }
    if path == ENTRY_PATH {
        return if session.is_some() {
            RouteDecision::Redirect(DASHBOARD_PATH.to_string())
        } else {
            RouteDecision::Allow(ENTRY_PATH.to_string())
        };
    }
    RouteDecision::Redirect(ENTRY_PATH.to_string())
}
