//! Artist-relative project slugs.
//!
//! Project slugs are unique across the whole content store, so editors prefix
//! them with the owning artist's slug: Jane's "Sunset" project is stored as
//! `jane-sunset`. Inside an artist's pages the prefix is redundant (the
//! project lives at `/artists/jane/sunset`), so list views strip it and route
//! lookups put it back.
//!
//! - `resolve_slug("jane", "jane-sunset")` → `"sunset"`
//! - `resolve_slug("jane", "sunset")` → `"sunset"` (already relative)
//! - `resolve_slug("jane", "janet-sunset")` → `"janet-sunset"` (different artist)

use crate::raw::{RawArtistRoute, RawSlug, RawSlugRef};

/// Strip `artist_slug-` from the front of `project_slug`, if present.
pub fn resolve_slug<'a>(artist_slug: &str, project_slug: &'a str) -> &'a str {
    project_slug
        .strip_prefix(artist_slug)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(project_slug)
}

/// Whether a requested route segment names a stored project slug, either
/// directly or once the artist prefix is put back.
pub fn slug_matches(artist_slug: &str, stored: &str, requested: &str) -> bool {
    stored == requested
        || stored
            .strip_prefix(artist_slug)
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|rest| rest == requested)
}

/// Stored slugs of every project an artist lists, in page order.
///
/// The portfolio comes first, then each entry of the project list: singles
/// contribute their own slug, pairs `left, right`, trios `top, bottom, side`.
/// Empty and missing slugs are skipped.
pub fn artist_project_slugs(artist: &RawArtistRoute) -> Vec<&str> {
    let portfolio = artist.portfolio.as_ref().and_then(|p| p.slug.as_ref());
    let listed = artist.projects.iter().flat_map(|entry| {
        let members = match entry.kind.as_deref() {
            Some("project") => vec![entry.slug.as_ref()],
            Some("project_pair") => vec![member(&entry.left), member(&entry.right)],
            Some("project_trio") => vec![
                member(&entry.top),
                member(&entry.bottom),
                member(&entry.side),
            ],
            _ => Vec::new(),
        };
        members.into_iter().flatten()
    });
    portfolio
        .into_iter()
        .chain(listed)
        .map(RawSlug::as_str)
        .filter(|s| !s.is_empty())
        .collect()
}

fn member(slot: &Option<RawSlugRef>) -> Option<&RawSlug> {
    slot.as_ref().and_then(|r| r.slug.as_ref())
}

/// Resolve `/artists/{artist}/{requested}` to the stored slug of the project
/// it names. `None` means the route is a not-found.
pub fn find_artist_project_slug<'a>(artist: &'a RawArtistRoute, requested: &str) -> Option<&'a str> {
    let artist_slug = artist.slug.as_ref().map(RawSlug::as_str).unwrap_or_default();
    artist_project_slugs(artist)
        .into_iter()
        .find(|stored| slug_matches(artist_slug, stored, requested))
}
