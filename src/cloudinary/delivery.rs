//! Structured view of a Cloudinary delivery URL.
//!
//! ```text
//! https://res.cloudinary.com/acme/image/upload/c_fill,g_auto/f_auto/v1699999999/artists/jane/sunset.jpg
//! └──────────────── prefix ──────────────────┘└─ transformations ─┘└ version ─┘└──── public id ─────┘
//! ```
//!
//! Transformations are `/`-separated segments, each a comma-separated list of
//! directive tokens (`w_900`, `q_auto:best`, `fl_awebp`). They sit between
//! `/upload/` and the first `v<digits>` segment; everything after the version
//! is the public id and is never touched.
//!
//! All rewriting goes through [`DeliveryUrl`] so the three operations the
//! breakpoint rules need (is there a width? add a default transformation, add
//! a width) are independent and testable on their own.

use std::fmt;
use thiserror::Error;

const UPLOAD: &str = "/upload/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image record has no secure_url")]
    MissingSecureUrl,
    #[error("no /upload/ segment in delivery URL: {0}")]
    MissingUploadSegment(String),
    #[error("no version segment in delivery URL: {0}")]
    MissingVersion(String),
}

/// A parsed delivery URL. Borrows from the string it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryUrl<'a> {
    /// Everything up to and including `/upload/`.
    prefix: &'a str,
    transformations: Vec<String>,
    /// `v` followed by digits.
    version: &'a str,
    /// The rest after the version segment, without the leading `/`.
    public_id: &'a str,
}

impl<'a> DeliveryUrl<'a> {
    pub fn parse(url: &'a str) -> Result<Self, ImageError> {
        let upload_at = url
            .find(UPLOAD)
            .ok_or_else(|| ImageError::MissingUploadSegment(url.to_string()))?;
        let (prefix, path) = url.split_at(upload_at + UPLOAD.len());

        let mut transformations = Vec::new();
        let mut offset = 0;
        for segment in path.split('/') {
            let next = offset + segment.len() + 1;
            if is_version(segment) {
                return Ok(Self {
                    prefix,
                    transformations,
                    version: segment,
                    public_id: path.get(next..).unwrap_or_default(),
                });
            }
            transformations.push(segment.to_string());
            offset = next;
        }
        Err(ImageError::MissingVersion(url.to_string()))
    }

    pub fn transformations(&self) -> &[String] {
        &self.transformations
    }

    pub fn version(&self) -> &str {
        self.version
    }

    pub fn public_id(&self) -> &str {
        self.public_id
    }

    /// Whether any transformation token is an explicit width (`w_<digits>`).
    pub fn has_width(&self) -> bool {
        self.transformations
            .iter()
            .flat_map(|segment| segment.split(','))
            .any(is_width)
    }

    /// Use `directives` as the transformation when the URL has none yet.
    /// A URL that already carries transformations is returned unchanged.
    pub fn with_default_transformation(mut self, directives: &str) -> Self {
        if self.transformations.is_empty() {
            self.transformations.push(directives.to_string());
        }
        self
    }

    /// Append a `w_<width>` token to the last transformation segment, right
    /// before the version.
    pub fn with_width(mut self, width: u32) -> Self {
        let token = format!("w_{width}");
        match self.transformations.last_mut() {
            Some(last) => {
                last.push(',');
                last.push_str(&token);
            }
            None => self.transformations.push(token),
        }
        self
    }
}

impl fmt::Display for DeliveryUrl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix)?;
        for segment in &self.transformations {
            write!(f, "{segment}/")?;
        }
        f.write_str(self.version)?;
        if !self.public_id.is_empty() {
            write!(f, "/{}", self.public_id)?;
        }
        Ok(())
    }
}

fn is_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_width(token: &str) -> bool {
    token
        .strip_prefix("w_")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = "https://res.cloudinary.com/acme/image/upload/v1699/artists/jane/sunset.jpg";
    const CHAINED: &str =
        "https://res.cloudinary.com/acme/image/upload/c_fill,g_auto/f_auto/v1699/artists/jane/sunset.jpg";

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn parses_bare_url() {
        let url = DeliveryUrl::parse(BARE).unwrap();
        assert!(url.transformations().is_empty());
        assert_eq!(url.version(), "v1699");
        assert_eq!(url.public_id(), "artists/jane/sunset.jpg");
    }

    #[test]
    fn parses_chained_transformations() {
        let url = DeliveryUrl::parse(CHAINED).unwrap();
        assert_eq!(url.transformations(), ["c_fill,g_auto", "f_auto"]);
        assert_eq!(url.version(), "v1699");
    }

    #[test]
    fn version_is_first_v_digits_segment() {
        // `video` and `v2x` are not versions
        let url = DeliveryUrl::parse("https://x/image/upload/video/v2x/v7/v8/a.jpg").unwrap();
        assert_eq!(url.transformations(), ["video", "v2x"]);
        assert_eq!(url.version(), "v7");
        assert_eq!(url.public_id(), "v8/a.jpg");
    }

    #[test]
    fn missing_upload_segment_is_error() {
        let err = DeliveryUrl::parse("https://example.com/images/a.jpg").unwrap_err();
        assert!(matches!(err, ImageError::MissingUploadSegment(_)));
    }

    #[test]
    fn missing_version_is_error() {
        let err = DeliveryUrl::parse("https://x/image/upload/w_900/a.jpg").unwrap_err();
        assert_eq!(
            err,
            ImageError::MissingVersion("https://x/image/upload/w_900/a.jpg".to_string())
        );
    }

    #[test]
    fn display_roundtrips_unmodified_url() {
        assert_eq!(DeliveryUrl::parse(BARE).unwrap().to_string(), BARE);
        assert_eq!(DeliveryUrl::parse(CHAINED).unwrap().to_string(), CHAINED);
    }

    // =========================================================================
    // Width detection
    // =========================================================================

    #[test]
    fn detects_width_token() {
        let url = DeliveryUrl::parse("https://x/image/upload/c_fill,w_1200,h_800/v1/a.jpg").unwrap();
        assert!(url.has_width());
    }

    #[test]
    fn width_needs_digits() {
        let url = DeliveryUrl::parse("https://x/image/upload/w_auto/v1/a.jpg").unwrap();
        assert!(!url.has_width());
    }

    #[test]
    fn width_in_public_id_is_ignored() {
        let url = DeliveryUrl::parse("https://x/image/upload/f_auto/v1/w_900/a.jpg").unwrap();
        assert!(!url.has_width());
    }

    // =========================================================================
    // Rewriting
    // =========================================================================

    #[test]
    fn default_transformation_fills_bare_url() {
        let url = DeliveryUrl::parse(BARE)
            .unwrap()
            .with_default_transformation("f_auto,q_auto:best");
        assert_eq!(
            url.to_string(),
            "https://res.cloudinary.com/acme/image/upload/f_auto,q_auto:best/v1699/artists/jane/sunset.jpg"
        );
    }

    #[test]
    fn default_transformation_keeps_existing() {
        let url = DeliveryUrl::parse(CHAINED)
            .unwrap()
            .with_default_transformation("f_auto,q_auto:best");
        assert_eq!(url.to_string(), CHAINED);
    }

    #[test]
    fn width_appends_to_last_segment() {
        let url = DeliveryUrl::parse(CHAINED).unwrap().with_width(900);
        assert_eq!(
            url.to_string(),
            "https://res.cloudinary.com/acme/image/upload/c_fill,g_auto/f_auto,w_900/v1699/artists/jane/sunset.jpg"
        );
    }

    #[test]
    fn width_on_bare_url_becomes_own_segment() {
        let url = DeliveryUrl::parse(BARE).unwrap().with_width(1600);
        assert_eq!(
            url.to_string(),
            "https://res.cloudinary.com/acme/image/upload/w_1600/v1699/artists/jane/sunset.jpg"
        );
    }
}
