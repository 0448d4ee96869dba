use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

/// Largest decoded photo accepted for diagnosis unless configured otherwise
pub const DEFAULT_MAX_PHOTO_BYTES: usize = 8 * 1024 * 1024;

static DATA_URI: OnceLock<Regex> = OnceLock::new();

fn data_uri_pattern() -> &'static Regex {
    DATA_URI.get_or_init(|| {
        Regex::new(r"(?s)^data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+)((?:;[^;,]+)*?);base64,(.*)$")
            .expect("data URI pattern is valid")
    })
}

/// An uploaded plant photo in `data:<mimetype>;base64,<data>` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDataUri {
    pub mime_type: String,
    /// Base64 payload with any whitespace removed
    pub data: String,
    /// Size of the decoded image
    pub byte_len: usize,
}

impl PhotoDataUri {
    /// Parses and checks a data URI, returning a farmer-readable message on rejection.
    pub fn parse(uri: &str, max_bytes: usize) -> Result<Self, String> {
        let captures = data_uri_pattern()
            .captures(uri.trim())
            .ok_or_else(|| {
                "Photo must be a base64 data URI (data:<mimetype>;base64,<data>).".to_string()
            })?;

        let mime_type = captures[1].to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(format!("Photo must be an image, got {}.", mime_type));
        }

        let data: String = captures[3]
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let decoded = STANDARD
            .decode(data.as_bytes())
            .map_err(|e| format!("Photo data is not valid base64: {}", e))?;

        if decoded.is_empty() {
            return Err("Photo is empty.".to_string());
        }
        if decoded.len() > max_bytes {
            return Err(format!(
                "Photo is too large ({} bytes, limit {} bytes).",
                decoded.len(),
                max_bytes
            ));
        }

        Ok(Self {
            mime_type,
            data,
            byte_len: decoded.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn test_parse_png() {
        let uri = format!("data:image/png;base64,{}", PIXEL);
        let photo = PhotoDataUri::parse(&uri, DEFAULT_MAX_PHOTO_BYTES).unwrap();
        assert_eq!(photo.mime_type, "image/png");
        assert_eq!(photo.data, PIXEL);
        assert!(photo.byte_len > 0);
    }

    #[test]
    fn test_parse_with_parameters_and_whitespace() {
        let uri = format!("data:image/jpeg;name=leaf.jpg;base64,{}\n", "aGVs\nbG8=");
        let photo = PhotoDataUri::parse(&uri, DEFAULT_MAX_PHOTO_BYTES).unwrap();
        assert_eq!(photo.mime_type, "image/jpeg");
        assert_eq!(photo.data, "aGVsbG8=");
        assert_eq!(photo.byte_len, 5);
    }

    #[test]
    fn test_rejects_non_image() {
        let err = PhotoDataUri::parse("data:text/plain;base64,aGVsbG8=", 1024).unwrap_err();
        assert!(err.contains("must be an image"));
    }

    #[test]
    fn test_rejects_plain_url_and_bad_base64() {
        assert!(PhotoDataUri::parse("https://example.com/leaf.png", 1024).is_err());
        assert!(PhotoDataUri::parse("data:image/png;base64,@@@", 1024).is_err());
        assert!(PhotoDataUri::parse("data:image/png;base64,", 1024).is_err());
    }

    #[test]
    fn test_rejects_oversized_photo() {
        let err = PhotoDataUri::parse("data:image/png;base64,aGVsbG8=", 4).unwrap_err();
        assert!(err.contains("too large"));
    }
}
