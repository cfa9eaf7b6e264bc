pub const FALLBACK_MIME: &str = "image/png";

pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    infer::get(data).map(|kind| kind.mime_type().to_string())
}

pub fn normalize_mime(mime_type: &str) -> String {
    let lowered = mime_type.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        "image/x-png" => "image/png".to_string(),
        _ => lowered,
    }
}

/// Declared types that say nothing about the actual format.
pub fn is_generic_mime(mime_type: &str) -> bool {
    matches!(
        mime_type,
        "" | "application/octet-stream" | "binary/octet-stream" | "image/*"
    )
}

pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpg_alias_is_normalized() {
        assert_eq!(normalize_mime(" Image/JPG "), "image/jpeg");
        assert_eq!(normalize_mime("image/webp"), "image/webp");
    }

    #[test]
    fn sniffs_png_signature() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(detect_mime_type(&png).as_deref(), Some("image/png"));
        assert_eq!(detect_mime_type(b"plain text"), None);
    }

    #[test]
    fn generic_types_are_recognised() {
        assert!(is_generic_mime("application/octet-stream"));
        assert!(!is_generic_mime("image/png"));
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
    }
}
