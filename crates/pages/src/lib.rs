//! Page controllers for the LearnLoop dashboards
//!
//! Each page is a controller holding the view state a UI layer renders:
//! the lists it shows, a loading flag and the inline error or notice.
//! Every page follows the same lifecycle:
//! - `mount` runs the role guard first and fetches nothing on redirect
//! - reads and writes go through the session-gated `ApiClient`
//! - mutations are followed by a refetch of the affected list
//! - state is only written while the user is still on the page

pub mod admin;
pub mod context;
pub mod forms;
pub mod login;
pub mod materials;
pub mod messaging;
pub mod notifications;
pub mod student;
pub mod teacher;
pub mod timetable;

pub use admin::{AdminDashboard, RoleCounts};
pub use context::{PageContext, ViewStatus};
pub use forms::{FormError, StudentForm, TeacherForm};
pub use login::LoginPage;
pub use materials::MaterialsPage;
pub use messaging::MessagingPage;
pub use notifications::{NotificationsPage, StudentNotificationsPage};
pub use student::StudentDashboard;
pub use teacher::TeacherDashboard;
pub use timetable::TimetablePage;

#[cfg(test)]
pub(crate) mod testing;
