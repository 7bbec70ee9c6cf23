// src/app/poster.rs
use eframe::egui::{self as eg, ColorImage, TextureHandle};
use image::GenericImageView;
use reqwest::blocking::Client;
use tracing::warn;

use super::types::DecodedPoster;

/// The API's convention for "no poster available".
pub const POSTER_SENTINEL: &str = "N/A";

/// True when the poster field points at a real image rather than the sentinel.
pub fn poster_url_is_usable(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url != POSTER_SENTINEL
}

/// Download and decode a poster on a worker thread. Never fatal for the
/// search: any failure just means the placeholder gets painted instead.
pub fn fetch_poster(client: &Client, url: &str) -> Option<DecodedPoster> {
    if !poster_url_is_usable(url) {
        return None;
    }

    let bytes = match client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
    {
        Ok(b) => b,
        Err(e) => {
            warn!("poster download failed for {url}: {e}");
            return None;
        }
    };

    match decode_poster(&bytes) {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("poster decode failed for {url}: {e}");
            None
        }
    }
}

/// Decode image bytes to RGBA8.
pub fn decode_poster(bytes: &[u8]) -> Result<DecodedPoster, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("decode: {e}"))?;
    let (width, height) = img.dimensions();
    Ok(DecodedPoster {
        width,
        height,
        rgba: img.to_rgba8().into_raw(),
    })
}

/// Texture uploads happen here only, on the UI thread.
pub fn upload_poster(ctx: &eg::Context, name: &str, poster: &DecodedPoster) -> TextureHandle {
    let img = ColorImage::from_rgba_unmultiplied(
        [poster.width as usize, poster.height as usize],
        &poster.rgba,
    );
    ctx.load_texture(name.to_string(), img, eg::TextureOptions::LINEAR)
}
