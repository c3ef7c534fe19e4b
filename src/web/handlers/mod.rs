//! HTML template rendering handlers for the dashboard.

mod auth;
mod dashboard;
mod urls;

pub use auth::{auth_page_handler, logout_handler, sign_in_handler, sign_up_handler};
pub use dashboard::dashboard_handler;
pub use urls::{analytics_handler, url_list_handler};
