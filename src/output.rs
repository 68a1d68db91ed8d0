//! CLI output formatting for normalized entities.
//!
//! # Information-First Display
//!
//! Output reads as a content inventory: every entity shows its display name
//! and position, with the route it renders at as secondary context. A reviewer
//! can check a page's structure (what is in the grid, which slides got
//! credited to an artist, which media blocks survived) without reading JSON.
//!
//! # Entity Display Contract
//!
//! 1. **Header line**: positional index + name (+ optional count)
//! 2. **Context lines**: indented details, routes as `→ slug`
//!
//! # Output Format
//!
//! ## Page
//!
//! ```text
//! Home (home)
//!     Hero: Directors (2 slides)
//! 001 Artists grid: Roster (2 artists)
//!     001 Jane Doe → jane
//!     002 Bob Ray → bob
//! 002 Columned text: About (2 columns)
//! 003 Latest projects: New (1 slides)
//!     001 Jane Doe → jane/sunset
//! ```
//!
//! ## Artist
//!
//! ```text
//! Jane Doe (jane)
//!     Clients: Nike, Adidas
//! 001 Portfolio → portfolio
//! 002 Pair
//!     Dawn → dawn
//!     Dusk → dusk
//! ```
//!
//! ## Project
//!
//! ```text
//! Sunset | Jane Doe | BAA Global
//!     Slug: jane-sunset
//!     Credits: 2
//! 001 image Still
//! 002 Pair: Left + Right
//! ```
//!
//! # Architecture
//!
//! Each entity has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::batch::{Normalized, Outcome};
use crate::types::{
    Artist, MediaEntry, MediaKind, Page, PageComponent, Project, ProjectEntry, ProjectMedia,
};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 001 Artists grid: Roster (2 artists)
/// 002 Pair
/// ```
fn entity_header(index: usize, title: &str, count: Option<(usize, &str)>) -> String {
    match count {
        Some((n, noun)) => format!("{} {} ({} {})", format_index(index), title, n, noun),
        None => format!("{} {}", format_index(index), title),
    }
}

/// A named entity with the route it renders at. Unnamed entities fall back
/// to their route in parens.
fn route_line(name: &str, slug: &str) -> String {
    match (name.is_empty(), slug.is_empty()) {
        (false, false) => format!("{} → {}", name, slug),
        (false, true) => name.to_string(),
        (true, false) => format!("({})", slug),
        (true, true) => "(untitled)".to_string(),
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `Nike<br/>Adidas` → `Nike, Adidas`
fn clients_summary(clients: &str) -> String {
    let joined = clients.replace("<br/>", ", ");
    truncate_desc(&strip_html_tags(&joined), 60)
}

fn media_label(media: &ProjectMedia) -> String {
    let kind = match media.kind {
        Some(MediaKind::Image) => "image",
        Some(MediaKind::VideoBg) => "video-bg",
        Some(MediaKind::VideoPlayer) => "video-player",
        None => "media",
    };
    let name = if media.name.is_empty() {
        &media.key
    } else {
        &media.name
    };
    format!("{} {}", kind, name)
}

// ============================================================================
// Page
// ============================================================================

pub fn format_page(page: &Page) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", page.name, page.slug)];

    if let Some(hero) = &page.hero {
        lines.push(format!(
            "{}Hero: {} ({} slides)",
            indent(1),
            hero.name,
            hero.artists.len()
        ));
    }

    for (i, component) in page.components.iter().enumerate() {
        let pos = i + 1;
        match component {
            PageComponent::ArtistsGrid(grid) => {
                let title = format!("Artists grid: {}", grid.name);
                lines.push(entity_header(pos, &title, Some((grid.artists.len(), "artists"))));
                for (j, artist) in grid.artists.iter().enumerate() {
                    lines.push(format!(
                        "{}{} {}",
                        indent(1),
                        format_index(j + 1),
                        route_line(&artist.name, &artist.slug)
                    ));
                }
            }
            PageComponent::ColumnedText(text) => {
                let title = format!("Columned text: {}", text.title);
                lines.push(entity_header(pos, &title, Some((text.body.len(), "columns"))));
            }
            PageComponent::LatestProjects(latest) => {
                let title = format!("Latest projects: {}", latest.title);
                lines.push(entity_header(pos, &title, Some((latest.projects.len(), "slides"))));
                for (j, slide) in latest.projects.iter().enumerate() {
                    let slug = slide.project.as_ref().map(|p| p.slug.as_str()).unwrap_or("");
                    lines.push(format!(
                        "{}{} {}",
                        indent(1),
                        format_index(j + 1),
                        route_line(&slide.name, slug)
                    ));
                }
            }
        }
    }

    lines
}

pub fn print_page(page: &Page) {
    for line in format_page(page) {
        println!("{}", line);
    }
}

// ============================================================================
// Artist
// ============================================================================

pub fn format_artist(artist: &Artist) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", artist.name, artist.slug)];

    if !artist.clients.is_empty() {
        lines.push(format!(
            "{}Clients: {}",
            indent(1),
            clients_summary(&artist.clients)
        ));
    }
    if let Some(featured) = artist.featured.as_ref().filter(|f| !f.is_empty()) {
        lines.push(format!("{}Featured: {} media", indent(1), featured.len()));
    }

    for (i, entry) in artist.projects.iter().enumerate() {
        let pos = i + 1;
        match entry {
            ProjectEntry::Project(project) => {
                let line = route_line(&project.short_name, &project.slug);
                lines.push(entity_header(pos, &line, None));
            }
            ProjectEntry::ProjectPair(_) | ProjectEntry::ProjectTrio(_) => {
                let label = match entry {
                    ProjectEntry::ProjectPair(_) => "Pair",
                    _ => "Trio",
                };
                lines.push(entity_header(pos, label, None));
                for project in entry.projects() {
                    lines.push(format!(
                        "{}{}",
                        indent(1),
                        route_line(&project.short_name, &project.slug)
                    ));
                }
            }
        }
    }

    lines
}

pub fn print_artist(artist: &Artist) {
    for line in format_artist(artist) {
        println!("{}", line);
    }
}

// ============================================================================
// Project
// ============================================================================

pub fn format_project(project: &Project) -> Vec<String> {
    let mut lines = vec![project.page_title.clone()];
    lines.push(format!("{}Slug: {}", indent(1), project.slug));
    if !project.credits.is_empty() {
        lines.push(format!("{}Credits: {}", indent(1), project.credits.len()));
    }

    for (i, entry) in project.media.iter().flatten().enumerate() {
        let pos = i + 1;
        let line = match entry {
            MediaEntry::ProjectMedia(media) => media_label(media),
            MediaEntry::ItemPair(pair) => {
                format!("Pair: {} + {}", pair.left.name, pair.right.name)
            }
            MediaEntry::ItemTrio(trio) => format!(
                "Trio: {} + {} + {}",
                trio.top.name, trio.bottom.name, trio.side.name
            ),
        };
        lines.push(entity_header(pos, &line, None));
    }

    lines
}

pub fn print_project(project: &Project) {
    for line in format_project(project) {
        println!("{}", line);
    }
}

// ============================================================================
// Batch outcomes
// ============================================================================

/// Summary of one batch input: the entity tree, or the error that stopped it.
pub fn format_outcome(outcome: &Outcome) -> Vec<String> {
    let mut lines = vec![format!("==> {}", outcome.path.display())];
    match &outcome.result {
        Ok(Normalized::Page(page)) => lines.extend(format_page(page)),
        Ok(Normalized::Artist(artist)) => lines.extend(format_artist(artist)),
        Ok(Normalized::Project(project)) => lines.extend(format_project(project)),
        Ok(Normalized::Hero(Some(hero))) => {
            lines.push(format!("Hero: {} ({} slides)", hero.name, hero.artists.len()))
        }
        Ok(Normalized::Hero(None)) => lines.push("No hero".to_string()),
        Err(err) => lines.push(format!("{}Error: {}", indent(1), err)),
    }
    lines
}

pub fn print_outcomes(outcomes: &[Outcome]) {
    for outcome in outcomes {
        for line in format_outcome(outcome) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchError;
    use crate::normalize::Normalizer;
    use crate::raw::RawPage;
    use crate::test_helpers::*;
    use serde_json::json;
    use std::path::PathBuf;

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_is_four_spaces_per_level() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_with_and_without_count() {
        assert_eq!(entity_header(1, "Pair", None), "001 Pair");
        assert_eq!(
            entity_header(2, "Grid", Some((3, "artists"))),
            "002 Grid (3 artists)"
        );
    }

    #[test]
    fn route_line_fallbacks() {
        assert_eq!(route_line("Sunset", "sunset"), "Sunset → sunset");
        assert_eq!(route_line("Sunset", ""), "Sunset");
        assert_eq!(route_line("", "sunset"), "(sunset)");
        assert_eq!(route_line("", ""), "(untitled)");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_desc("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_desc("short", 10), "short");
    }

    #[test]
    fn clients_become_comma_list() {
        assert_eq!(clients_summary("Nike<br/>Adidas<br/>Puma"), "Nike, Adidas, Puma");
    }

    // =========================================================================
    // Entities
    // =========================================================================

    #[test]
    fn artist_tree() {
        let mut raw = artist_json(
            "jane",
            vec![
                project_json("p1", "jane-sunset"),
                pair_json("project_pair", project_json("p2", "jane-dawn"), project_json("p3", "dusk")),
            ],
        );
        raw["name"] = json!("Jane Doe");
        raw["clients"] = json!("Nike\nAdidas");
        let artist = Normalizer::default().artist(Some(&doc(raw))).unwrap().unwrap();
        assert_eq!(
            format_artist(&artist),
            vec![
                "Jane Doe (jane)",
                "    Clients: Nike, Adidas",
                "001 p1 → sunset",
                "002 Pair",
                "    p2 → dawn",
                "    p3 → dusk",
            ]
        );
    }

    #[test]
    fn page_tree() {
        let raw: RawPage = serde_json::from_value(json!({
            "name": "Home",
            "slug": "home",
            "hero": { "_type": "hero", "title": "Directors", "artists": [{ "artist": "Jane" }] },
            "components": [
                { "_type": "artists_grid", "name": "Roster", "artists": [artist_json("jane", vec![])] },
                { "_type": "columned_text", "title": "About", "body": [{ "title": "a" }, { "title": "b" }] },
                { "_type": "latest_projects", "title": "New", "projects": [project_json("p1", "jane-sunset")] }
            ]
        }))
        .unwrap();
        let page = Normalizer::default().page(&raw).unwrap();
        assert_eq!(
            format_page(&page),
            vec![
                "Home (home)",
                "    Hero: Directors (1 slides)",
                "001 Artists grid: Roster (1 artists)",
                "    001 jane → jane",
                "002 Columned text: About (2 columns)",
                "003 Latest projects: New (1 slides)",
                "    001 (jane-sunset)",
            ]
        );
    }

    #[test]
    fn project_tree() {
        let raw = doc(json!({
            "_type": "project",
            "name": "Sunset",
            "slug": "jane-sunset",
            "credits": [{ "name": "Director", "credit": "Jane" }],
            "media": [media_json("still"), pair_json("item_pair", media_json("l"), media_json("r"))]
        }));
        let project = Normalizer::default()
            .project_page(Some(&raw), Some("Jane Doe"))
            .unwrap()
            .unwrap();
        assert_eq!(
            format_project(&project),
            vec![
                "Sunset | Jane Doe | BAA Global",
                "    Slug: jane-sunset",
                "    Credits: 1",
                "001 image still",
                "002 Pair: l + r",
            ]
        );
    }

    #[test]
    fn failed_outcome_shows_error() {
        let outcome = Outcome {
            path: PathBuf::from("q/home.json"),
            result: Err(BatchError::EmptyResult(PathBuf::from("q/home.json"))),
        };
        assert_eq!(
            format_outcome(&outcome),
            vec![
                "==> q/home.json",
                "    Error: Query result is an empty array: q/home.json",
            ]
        );
    }

    #[test]
    fn absent_hero_outcome() {
        let outcome = Outcome {
            path: PathBuf::from("hero.json"),
            result: Ok(Normalized::Hero(None)),
        };
        assert_eq!(format_outcome(&outcome), vec!["==> hero.json", "No hero"]);
    }
}
