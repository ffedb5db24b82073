//! Image codec for stored listing photos.
//!
//! Two transforms cover everything the photo store needs: [`compress`]
//! normalizes an upload into a bounded-size JPEG before it hits the database,
//! and [`thumbnail`] derives the fixed-size gallery thumbnail on demand.
//!
//! Both are pure and total: decode or encode failures degrade to "processing
//! skipped" results (the original bytes, or no thumbnail) instead of
//! propagating. Callers must treat those as valid outcomes.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// Neither dimension of a stored original exceeds this after compression.
pub const COMPRESS_MAX_DIMENSION: u32 = 800;

/// Byte budget for a compressed original. Inputs already within budget are
/// stored untouched.
pub const COMPRESS_TARGET_BYTES: usize = 50 * 1024;

/// Descending JPEG quality ladder tried until the budget is met.
const COMPRESS_QUALITIES: [u8; 4] = [60, 50, 40, 30];

/// Thumbnails fit within a square box of this size (aspect preserved).
pub const THUMBNAIL_MAX_DIMENSION: u32 = 300;

/// Fixed JPEG quality for thumbnails.
const THUMBNAIL_QUALITY: u8 = 85;

/// Compress raw upload bytes into a JPEG within the size/dimension targets.
///
/// Inputs at or below [`COMPRESS_TARGET_BYTES`] are returned unmodified
/// without a re-encode. Undecodable input is returned unmodified as well;
/// this function never fails.
pub fn compress(data: &[u8]) -> Vec<u8> {
    if data.len() <= COMPRESS_TARGET_BYTES {
        return data.to_vec();
    }

    let decoded = match image::load_from_memory(data) {
        Ok(img) => img,
        Err(err) => {
            tracing::warn!(%err, "photo decode failed, storing original bytes");
            return data.to_vec();
        }
    };

    let img = shrink_to_fit(flatten_to_rgb(&decoded), COMPRESS_MAX_DIMENSION);

    let mut smallest = Vec::new();
    for quality in COMPRESS_QUALITIES {
        match encode_jpeg(&img, quality) {
            Ok(encoded) => {
                if encoded.len() <= COMPRESS_TARGET_BYTES {
                    return encoded;
                }
                smallest = encoded;
            }
            Err(err) => {
                tracing::warn!(%err, quality, "jpeg encode failed, storing original bytes");
                return data.to_vec();
            }
        }
    }

    // Over budget even at the lowest quality: ship the lowest-quality attempt.
    smallest
}

/// Derive a gallery thumbnail from raw image bytes.
///
/// Returns `None` when the input cannot be decoded or the JPEG encode fails;
/// callers treat that as "no thumbnail available", not an error.
pub fn thumbnail(data: &[u8]) -> Option<Vec<u8>> {
    let decoded = match image::load_from_memory(data) {
        Ok(img) => img,
        Err(err) => {
            tracing::warn!(%err, "thumbnail source decode failed");
            return None;
        }
    };

    let img = shrink_to_fit(flatten_to_rgb(&decoded), THUMBNAIL_MAX_DIMENSION);

    match encode_jpeg(&img, THUMBNAIL_QUALITY) {
        Ok(encoded) => Some(encoded),
        Err(err) => {
            tracing::warn!(%err, "thumbnail encode failed");
            None
        }
    }
}

/// Sniff a content type from stored byte headers.
///
/// Unrecognized headers fall back to `image/png`; that imprecision is the
/// documented serving policy for legacy rows, not something to tighten.
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    if data.starts_with(b"\xff\xd8\xff") {
        "image/jpeg"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "image/gif"
    } else {
        // Covers the real PNG magic (\x89PNG\r\n\x1a\n) and everything else.
        "image/png"
    }
}

/// Collapse any alpha channel by compositing over a white background.
fn flatten_to_rgb(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (out_px, px) in out.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = px.0;
        let a = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * a + 255 * (255 - a)) / 255) as u8;
        *out_px = image::Rgb([blend(r), blend(g), blend(b)]);
    }
    out
}

/// Shrink so neither dimension exceeds `max`, preserving aspect ratio.
/// Images already within the box are returned as-is (never enlarged).
fn shrink_to_fit(img: RgbImage, max: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    if w <= max && h <= max {
        return img;
    }
    DynamicImage::ImageRgb8(img)
        .resize(max, max, FilterType::Lanczos3)
        .to_rgb8()
}

fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(img)?;
    Ok(buf)
}
