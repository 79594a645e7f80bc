//! Page components for the application.
//!
//! Pages that need the backend load through the session's client, which
//! only exists after hydration; on the server they render their loading
//! fallbacks.

mod choice_forms;
pub mod department;
pub mod dept_admin;
mod form;
pub mod home;
pub mod login;
pub mod main_admin;
pub mod not_found;
pub mod staff;
pub mod timetable;

pub use department::DepartmentPage;
pub use dept_admin::DeptAdminDashboard;
pub use home::HomePage;
pub use login::LoginPage;
pub use main_admin::MainAdminDashboard;
pub use not_found::NotFoundPage;
pub use staff::StaffDashboard;
pub use timetable::TimetableGeneratorPage;
