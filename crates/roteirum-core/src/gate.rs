//! Route access policy.
//!
//! Decides whether a caller may reach a view, given whether they hold a
//! session. This is routing policy, not a security boundary.

/// How a route treats sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone.
    Public,
    /// Session required.
    Protected,
    /// Only callers without a session, e.g. the login view.
    GuestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectToDefault,
}

pub fn decide(access: RouteAccess, authenticated: bool) -> GateDecision {
    match (access, authenticated) {
        (RouteAccess::Protected, false) => GateDecision::RedirectToLogin,
        (RouteAccess::GuestOnly, true) => GateDecision::RedirectToDefault,
        _ => GateDecision::Allow,
    }
}
