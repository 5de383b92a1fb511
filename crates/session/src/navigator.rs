//! Client-side navigation

use std::sync::{Arc, RwLock};

use learnloop_common::Route;

/// Performs route changes on behalf of the API layer and page controllers.
pub trait Navigator: Send + Sync {
    /// Move to `route`. Navigating to the current route is allowed.
    fn navigate(&self, route: Route);

    /// Route currently shown
    fn current(&self) -> Route;

    /// Check if the view for `route` is still the one on screen
    fn is_on(&self, route: Route) -> bool {
        self.current() == route
    }
}

/// In-memory navigation history, the way a single tab's router sees it.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    history: Arc<RwLock<Vec<Route>>>,
}

impl HistoryNavigator {
    /// History that starts on `route`
    pub fn starting_at(route: Route) -> Self {
        Self {
            history: Arc::new(RwLock::new(vec![route])),
        }
    }

    /// Every route visited so far, oldest first
    pub fn history(&self) -> Vec<Route> {
        self.history
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::starting_at(Route::Login)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(to = %route, "Navigating");
        self.history
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(route);
    }

    fn current(&self) -> Route {
        self.history
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
            .unwrap_or(Route::Login)
    }
}
