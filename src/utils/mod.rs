//! Utility functions for input validation, QR rendering, and request handling.
//!
//! - [`validation`] - Long URL and custom short code checks
//! - [`qr`] - SVG and PNG QR code rendering
//! - [`origin`] - Public origin resolution from configuration or headers
//! - [`db_error`] - Mapping of unique-constraint names to user messages

pub mod db_error;
pub mod origin;
pub mod qr;
pub mod validation;
