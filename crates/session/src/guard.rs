//! Role guard run by every page before it renders or fetches

use learnloop_common::Route;

use crate::navigator::Navigator;
use crate::store::{Session, SessionStore};
use crate::types::Role;

/// Roles a page admits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    pub const ADMIN_ONLY: RoleSet = RoleSet(&[Role::Admin]);
    pub const TEACHER_ONLY: RoleSet = RoleSet(&[Role::Teacher]);
    pub const STUDENT_ONLY: RoleSet = RoleSet(&[Role::Student]);
    pub const STAFF: RoleSet = RoleSet(&[Role::Admin, Role::Teacher]);
    pub const ANY_ROLE: RoleSet = RoleSet(&[Role::Admin, Role::Teacher, Role::Student]);

    pub const fn of(roles: &'static [Role]) -> Self {
        RoleSet(roles)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

/// Result of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Page may render; carries the session it was admitted with
    Allow(Session),
    /// Navigation to login already happened; render nothing
    RedirectToLogin,
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow(_))
    }
}

/// Admit the current session if its role is in `allowed`, otherwise send
/// the user to login.
///
/// Must run before the page issues any request so no authenticated call
/// goes out with a missing credential. A session with a blank credential
/// is cleared. A signed-in user whose role is not admitted is redirected
/// but keeps their session.
pub fn guard(store: &dyn SessionStore, navigator: &dyn Navigator, allowed: RoleSet) -> GuardOutcome {
    match store.get() {
        Some(session) if !session.has_credential() => {
            tracing::warn!(page = %navigator.current(), "Session has no credential, signing out");
            store.clear();
            navigator.navigate(Route::Login);
            GuardOutcome::RedirectToLogin
        }
        Some(session) if allowed.contains(session.identity.role) => GuardOutcome::Allow(session),
        Some(session) => {
            tracing::info!(
                role = %session.identity.role,
                page = %navigator.current(),
                "Role not permitted on page, redirecting to login"
            );
            navigator.navigate(Route::Login);
            GuardOutcome::RedirectToLogin
        }
        None => {
            tracing::info!(page = %navigator.current(), "No session, redirecting to login");
            navigator.navigate(Route::Login);
            GuardOutcome::RedirectToLogin
        }
    }
}
