//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod events;
pub mod health;
pub mod qr;
pub mod redirect;
pub mod shorten;
pub mod urls;

pub use events::events_handler;
pub use health::health_handler;
pub use qr::{qr_png_handler, qr_svg_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use urls::{delete_url_handler, list_urls_handler};
