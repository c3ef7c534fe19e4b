//! QR code rendering for short links.

use crate::error::AppError;
use image::{ImageFormat, Luma};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use serde_json::json;
use std::io::Cursor;

/// Minimum rendered edge length in pixels.
pub const QR_SIZE: u32 = 256;

fn encode(data: &str) -> Result<QrCode, AppError> {
    QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H).map_err(|e| {
        AppError::bad_request(
            "Failed to render QR code",
            json!({ "reason": e.to_string() }),
        )
    })
}

/// Renders `data` as a standalone SVG document.
///
/// Uses the highest error correction level and keeps the quiet zone.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the data does not fit in a QR code.
pub fn render_svg(data: &str) -> Result<String, AppError> {
    let code = encode(data)?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .quiet_zone(true)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Renders `data` as PNG bytes.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the data does not fit in a QR code and
/// [`AppError::Internal`] if PNG encoding fails.
pub fn render_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = encode(data)?;

    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .quiet_zone(true)
        .build();

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| {
            tracing::error!("PNG encoding failed: {}", e);
            AppError::internal("Failed to render QR code", json!({}))
        })?;

    Ok(bytes)
}
