use crate::llm::media::{detect_mime_type, is_generic_mime, normalize_mime};

pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, thiserror::Error)]
pub enum ImageValidationError {
    #[error("No image file provided")]
    MissingFile,
    #[error("Uploaded image is empty")]
    Empty,
    #[error("Invalid file type: {0}. Allowed types: PNG, JPEG, WebP")]
    UnsupportedType(String),
    #[error("File too large: {size_mb:.2}MB. Maximum size: {max_mb}MB")]
    TooLarge { size_mb: f64, max_mb: usize },
}

/// An upload as it arrived, before any checks.
#[derive(Debug, Clone, Default)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub declared_mime: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

pub fn validate_image(
    upload: Option<UploadedImage>,
    max_bytes: usize,
) -> Result<ValidatedImage, ImageValidationError> {
    let upload = upload.ok_or(ImageValidationError::MissingFile)?;
    if upload.bytes.is_empty() {
        return Err(ImageValidationError::Empty);
    }

    let mime_type = resolve_mime(upload.declared_mime.as_deref(), &upload.bytes)?;

    if upload.bytes.len() > max_bytes {
        return Err(ImageValidationError::TooLarge {
            size_mb: upload.bytes.len() as f64 / BYTES_PER_MB,
            max_mb: max_bytes / (1024 * 1024),
        });
    }

    Ok(ValidatedImage {
        bytes: upload.bytes,
        mime_type,
    })
}

// The declared type wins unless it is absent or generic, then the bytes decide.
fn resolve_mime(declared: Option<&str>, bytes: &[u8]) -> Result<String, ImageValidationError> {
    let declared = declared.map(normalize_mime).unwrap_or_default();
    let mime_type = if is_generic_mime(&declared) {
        detect_mime_type(bytes).map(|sniffed| normalize_mime(&sniffed))
    } else {
        Some(declared.clone())
    };

    match mime_type {
        Some(mime) if ALLOWED_MIME_TYPES.contains(&mime.as_str()) => Ok(mime),
        Some(mime) => Err(ImageValidationError::UnsupportedType(mime)),
        None if declared.is_empty() => Err(ImageValidationError::UnsupportedType("unknown".into())),
        None => Err(ImageValidationError::UnsupportedType(declared)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 8 * 1024 * 1024;

    fn png_bytes() -> Vec<u8> {
        vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0]
    }

    fn upload(bytes: Vec<u8>, mime: Option<&str>) -> Option<UploadedImage> {
        Some(UploadedImage {
            bytes,
            declared_mime: mime.map(str::to_string),
            file_name: Some("photo".into()),
        })
    }

    #[test]
    fn missing_and_empty_uploads_are_rejected() {
        assert!(matches!(
            validate_image(None, MAX),
            Err(ImageValidationError::MissingFile)
        ));
        assert!(matches!(
            validate_image(upload(Vec::new(), Some("image/png")), MAX),
            Err(ImageValidationError::Empty)
        ));
    }

    #[test]
    fn jpg_alias_is_accepted_as_jpeg() {
        let image = validate_image(upload(vec![1, 2, 3], Some("image/jpg")), MAX).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn generic_declared_type_falls_back_to_sniffing() {
        let image =
            validate_image(upload(png_bytes(), Some("application/octet-stream")), MAX).unwrap();
        assert_eq!(image.mime_type, "image/png");

        let err = validate_image(upload(b"hello".to_vec(), None), MAX).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type: unknown. Allowed types: PNG, JPEG, WebP"
        );
    }

    #[test]
    fn gif_is_not_an_allowed_type() {
        let err = validate_image(upload(vec![1, 2, 3], Some("image/gif")), MAX).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type: image/gif. Allowed types: PNG, JPEG, WebP"
        );
    }

    #[test]
    fn oversized_upload_reports_size_in_megabytes() {
        let bytes = vec![0u8; 9 * 1024 * 1024];
        let err = validate_image(upload(bytes, Some("image/jpeg")), MAX).unwrap_err();
        assert_eq!(err.to_string(), "File too large: 9.00MB. Maximum size: 8MB");
    }

    #[test]
    fn upload_at_the_limit_is_accepted() {
        let bytes = vec![0u8; MAX];
        assert!(validate_image(upload(bytes, Some("image/webp")), MAX).is_ok());
    }
}
