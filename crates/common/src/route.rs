//! Browser routes the client navigates between

use serde::{Deserialize, Serialize};
use std::fmt;

/// A client-side route. `Login` is the entry point every failed guard and
/// every 401 sends the user back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    AdminDashboard,
    TeacherDashboard,
    StudentDashboard,
    Materials,
    Messaging,
    Notifications,
    StudentNotifications,
    Timetable,
}

impl Route {
    /// Path of the route as the browser shows it
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::AdminDashboard => "/admin",
            Route::TeacherDashboard => "/teacher",
            Route::StudentDashboard => "/student",
            Route::Materials => "/materials",
            Route::Messaging => "/messaging",
            Route::Notifications => "/notifications",
            Route::StudentNotifications => "/students/notifications",
            Route::Timetable => "/timetable",
        }
    }

    /// Resolve a browser path back to a route. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Login,
            "/admin" => Route::AdminDashboard,
            "/teacher" => Route::TeacherDashboard,
            "/student" => Route::StudentDashboard,
            "/materials" => Route::Materials,
            "/messaging" => Route::Messaging,
            "/notifications" => Route::Notifications,
            "/students/notifications" => Route::StudentNotifications,
            "/timetable" => Route::Timetable,
            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    #[mutants::skip] // Delegates to Route::path(), which is covered directly
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
