//! Shared test utilities for the folio test suite.
//!
//! Builders for raw CMS records (as JSON, the way the content store returns
//! them) and extractors that flatten normalized entities into plain values
//! that are easy to assert on.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let raw = doc(project_json("p1", "jane-sunset"));
//! let project = Normalizer::default().project(Some(&raw), true).unwrap().unwrap();
//! assert_eq!(project.slug, "jane-sunset");
//! ```

use serde_json::{Value, json};

use crate::raw::{RawDerivedImage, RawDocument, RawImage};
use crate::types::{MediaEntry, ProjectEntry};

pub const IMAGE_URL: &str = "https://res.cloudinary.com/acme/image/upload/v1699/jane/sunset.jpg";

// =========================================================================
// Raw images
// =========================================================================

pub fn raw_image(secure_url: &str) -> RawImage {
    RawImage {
        format: Some("jpg".to_string()),
        secure_url: Some(secure_url.to_string()),
        derived: Vec::new(),
        width: Some(1920),
        height: Some(1080),
    }
}

pub fn raw_image_with_derived(secure_url: &str, derived: &str) -> RawImage {
    RawImage {
        derived: vec![RawDerivedImage {
            secure_url: Some(derived.to_string()),
        }],
        ..raw_image(secure_url)
    }
}

pub fn raw_gif(secure_url: &str) -> RawImage {
    RawImage {
        format: Some("gif".to_string()),
        ..raw_image(secure_url)
    }
}

pub fn image_json(secure_url: &str) -> Value {
    json!({
        "format": "jpg",
        "secure_url": secure_url,
        "width": 1920,
        "height": 1080
    })
}

// =========================================================================
// Raw documents
// =========================================================================

/// Decode a JSON value the way the pipeline would receive it.
pub fn doc(value: Value) -> RawDocument {
    RawDocument::from_value(value)
}

pub fn project_json(id: &str, slug: &str) -> Value {
    json!({
        "_type": "project",
        "_id": id,
        "name": id,
        "slug": slug,
        "image": image_json(IMAGE_URL)
    })
}

pub fn media_json(id: &str) -> Value {
    json!({
        "_type": "project_media",
        "_id": id,
        "name": id,
        "kind": "image",
        "image": image_json(IMAGE_URL)
    })
}

pub fn pair_json(kind: &str, left: Value, right: Value) -> Value {
    json!({ "_type": kind, "left": left, "right": right })
}

pub fn trio_json(kind: &str, top: Value, bottom: Value, side: Value) -> Value {
    json!({ "_type": kind, "top": top, "bottom": bottom, "side": side, "align": "left" })
}

pub fn artist_json(slug: &str, projects: Vec<Value>) -> Value {
    json!({
        "_type": "artist",
        "_id": format!("artist-{slug}"),
        "name": slug,
        "slug": slug,
        "projects": projects
    })
}

// =========================================================================
// Extractors
// =========================================================================

/// Shape of each entry: `"project"`, `"pair"`, or `"trio"`.
pub fn entry_shapes(entries: &[ProjectEntry]) -> Vec<&'static str> {
    entries
        .iter()
        .map(|e| match e {
            ProjectEntry::Project(_) => "project",
            ProjectEntry::ProjectPair(_) => "pair",
            ProjectEntry::ProjectTrio(_) => "trio",
        })
        .collect()
}

/// Every project slug, flattened across groupings in layout order.
pub fn project_slugs(entries: &[ProjectEntry]) -> Vec<&str> {
    entries
        .iter()
        .flat_map(ProjectEntry::projects)
        .map(|p| p.slug.as_str())
        .collect()
}

/// Every media key, one inner list per entry.
pub fn media_keys(entries: &[MediaEntry]) -> Vec<Vec<&str>> {
    entries
        .iter()
        .map(|e| match e {
            MediaEntry::ProjectMedia(m) => vec![m.key.as_str()],
            MediaEntry::ItemPair(p) => vec![p.left.key.as_str(), p.right.key.as_str()],
            MediaEntry::ItemTrio(t) => {
                vec![t.top.key.as_str(), t.bottom.key.as_str(), t.side.key.as_str()]
            }
        })
        .collect()
}
