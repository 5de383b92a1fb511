//! Session handling for the LearnLoop client
//!
//! Holds who is signed in and with what credential, where the user is
//! currently looking, and the guard every page runs before it renders:
//! - `SessionStore` / `TabSessionStore`: injectable, tab-scoped session
//! - `Navigator` / `HistoryNavigator`: route changes the client performs
//! - `guard`: the allow/redirect check parameterized by a `RoleSet`

mod guard;
mod navigator;
mod store;
mod types;

pub use guard::{guard, GuardOutcome, RoleSet};
pub use navigator::{HistoryNavigator, Navigator};
pub use store::{Session, SessionStore, TabSessionStore};
pub use types::{Identity, ParseRoleError, Role};
