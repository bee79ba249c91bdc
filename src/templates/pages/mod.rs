pub mod admin;
pub mod dashboard;
pub mod diff;

pub use admin::{admin_page, AdminVm};
pub use dashboard::{dashboard_empty_page, dashboard_page, DashboardVm};
pub use diff::{diff_page, DiffVm};
