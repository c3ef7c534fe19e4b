//! Server-rendered pages of the dashboard.
//!
//! Uses Askama templates from `templates/`; the page script in
//! `static/app.js` talks to the JSON API and swaps in re-rendered fragments.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering and auth form handlers
//! - [`middleware`] - Session gate for pages
//! - [`routes`] - Page route configuration
//! - [`session`] - Session cookies and [`session::CurrentUser`]
//! - [`view`] - Display models for the templates

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod view;
