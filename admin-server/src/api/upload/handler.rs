//! Image Upload Handler
//!
//! Validates the upload, re-encodes to JPEG, and pushes the bytes to the
//! blob store before the menu item document ever references the URL. A
//! failure aborts the remaining steps; an uploaded-but-unlinked image is
//! accepted residue, never rolled back.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::Path;

use crate::core::ServerState;
use shared::{AppError, AppResult};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for dish images
const JPEG_QUALITY: u8 = 85;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Retrievable URL to store on the menu item
    pub url: String,
    /// Object path inside the bucket
    pub path: String,
    pub size: usize,
    pub format: &'static str,
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }
    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported image format '{ext}'. Supported: {}",
            SUPPORTED_FORMATS.join(", ")
        )));
    }
    Ok(())
}

/// Decode and re-encode as JPEG with quality setting
fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    }

    Ok(buffer)
}

/// POST /api/upload - upload a menu item image
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let ext = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        validate_image(&data, &ext)?;
        let jpeg = compress_to_jpeg(&data)?;
        let size = jpeg.len();

        // Content-hash object name: identical uploads land on the same object
        let hash = calculate_hash(&jpeg);
        let object_path = format!("menuItems/{}.jpg", &hash[..16]);

        let blob = state
            .blobs
            .upload(&object_path, jpeg, "image/jpeg")
            .await?;
        let url = state.blobs.download_url(&blob).await?;

        tracing::info!(path = %object_path, size = %size, "Image uploaded");

        return Ok(Json(UploadResponse {
            url,
            path: object_path,
            size,
            format: "jpg",
        }));
    }

    Err(AppError::validation("No 'file' field in upload"))
}
