use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::Result;
use crate::photo::source::{Photo, extension_of};

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jfif", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("avif", "image/avif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

fn image_type(name: &str) -> Option<&'static str> {
    let ext = extension_of(name)?.to_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

pub fn is_image_name(name: &str) -> bool {
    image_type(name).is_some()
}

pub fn mime_for(name: &str) -> &'static str {
    image_type(name).unwrap_or("application/octet-stream")
}

pub fn data_url(name: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(name), STANDARD.encode(bytes))
}

/// Reads the whole photo and renders it as a data URL.
pub fn preview(photo: &Photo) -> Result<String> {
    let bytes = photo.read_bytes()?;
    Ok(data_url(photo.name(), &bytes))
}
