//! Pages and their component stacks.
//!
//! A page is a hero followed by an ordered list of components. Three
//! component kinds are understood:
//!
//! - `artists_grid`: a grid of fully normalized artists
//! - `columned_text`: multi-column copy, passed through untouched
//! - `latest_projects`: a strip of recent projects rendered as hero slides
//!
//! Anything else is logged and left out, so an editor adding a component the
//! pipeline does not know yet never breaks a page.
//!
//! Latest-project slides come out of [`Normalizer::page`] anonymous: the
//! project records do not say which artist they belong to. The caller fetches
//! the artist index separately and runs [`attribute_latest_projects`].

use super::{NormalizeError, Normalizer};
use crate::cloudinary::DeriveOptions;
use crate::raw::{RawArtistIndex, RawArtistsGrid, RawDocument, RawLatestProjects, RawPage, RawSlug};
use crate::slug::resolve_slug;
use crate::types::{ArtistHero, ArtistsGrid, LatestProjects, Page, PageComponent};

impl Normalizer {
    /// Normalize a page's component list, keeping order.
    pub fn components(&self, raw: &[RawDocument]) -> Vec<PageComponent> {
        raw.iter()
            .filter_map(|component| match component {
                RawDocument::ArtistsGrid(grid) => {
                    Some(PageComponent::ArtistsGrid(self.artists_grid(grid)))
                }
                RawDocument::ColumnedText(text) => Some(PageComponent::ColumnedText(text.clone())),
                RawDocument::LatestProjects(latest) => {
                    Some(PageComponent::LatestProjects(self.latest_projects(latest)))
                }
                other => {
                    tracing::warn!(kind = ?other.kind(), "unknown page component");
                    None
                }
            })
            .collect()
    }

    fn artists_grid(&self, raw: &RawArtistsGrid) -> ArtistsGrid {
        let artists = raw
            .artists
            .iter()
            .flatten()
            .filter_map(|artist| {
                self.artist(Some(artist)).unwrap_or_else(|err| {
                    tracing::warn!(%err, "dropping artist from grid");
                    None
                })
            })
            .collect();
        ArtistsGrid {
            name: raw.name.clone().unwrap_or_default(),
            artists,
        }
    }

    fn latest_projects(&self, raw: &RawLatestProjects) -> LatestProjects {
        let projects = raw
            .projects
            .iter()
            .flatten()
            .filter_map(|project| {
                self.project_slide(project).unwrap_or_else(|err| {
                    tracing::warn!(%err, "dropping latest project");
                    None
                })
            })
            .collect();
        LatestProjects {
            title: raw.title.clone().unwrap_or_default(),
            projects,
        }
    }

    /// A project dressed as a hero slide; non-projects are `None`.
    fn project_slide(&self, raw: &RawDocument) -> Result<Option<ArtistHero>, NormalizeError> {
        let RawDocument::Project(fields) = raw else {
            return Ok(None);
        };
        let image_desktop = self.image(fields.image.as_ref(), None, DeriveOptions::default())?;
        let project = self.project(Some(raw), true)?;
        Ok(Some(ArtistHero {
            id: fields.id.clone().unwrap_or_default(),
            name: String::new(),
            kind: project.as_ref().and_then(|p| p.kind),
            image_desktop,
            video_bg_src: fields.thumb_vimeo_src.clone(),
            video_bg_src_hd: fields.thumb_vimeo_src_hd.clone(),
            project,
        }))
    }

    /// Normalize a page. Only the hero can fail; broken components are
    /// dropped.
    pub fn page(&self, raw: &RawPage) -> Result<Page, NormalizeError> {
        let hero = self.hero(raw.hero.as_ref())?;
        let components = self.components(raw.components.as_deref().unwrap_or_default());
        Ok(Page {
            id: raw.id.clone().unwrap_or_default(),
            name: raw.name.clone().unwrap_or_default(),
            bg_color: raw.bg_color.as_ref().and_then(|c| c.value.clone()),
            slug: raw
                .slug
                .as_ref()
                .map(RawSlug::as_str)
                .unwrap_or_default()
                .to_string(),
            meta_description: raw.description.clone(),
            hero,
            components,
            footer_has_contact_info: raw.footer_has_contact_info.unwrap_or(true),
        })
    }
}

/// Credit each latest-project slide to the artist that lists its project.
///
/// The slide takes the artist's name, and its project slug becomes the
/// artist-relative route `{artist}/{project}`. When several artists list the
/// same project the first one in `artists` wins. Slides no artist lists are
/// left as they are.
pub fn attribute_latest_projects(mut page: Page, artists: &[RawArtistIndex]) -> Page {
    let index: Vec<(&RawArtistIndex, Vec<&str>)> = artists
        .iter()
        .map(|artist| (artist, artist.project_ids()))
        .filter(|(_, ids)| !ids.is_empty())
        .collect();

    for component in &mut page.components {
        let PageComponent::LatestProjects(latest) = component else {
            continue;
        };
        for slide in &mut latest.projects {
            let owner = index.iter().find(|(_, ids)| ids.contains(&slide.id.as_str()));
            let Some((artist, _)) = owner else {
                continue;
            };
            let artist_slug = artist.slug.as_ref().map(RawSlug::as_str).unwrap_or_default();
            slide.name = artist.name.clone().unwrap_or_default();
            if let Some(project) = slide.project.as_mut().filter(|p| !p.slug.is_empty()) {
                project.slug = format!("{artist_slug}/{}", resolve_slug(artist_slug, &project.slug));
            }
        }
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::MediaKind;
    use serde_json::{Value, json};

    fn raw_page(value: Value) -> RawPage {
        serde_json::from_value(value).unwrap()
    }

    fn latest_json(projects: Vec<Value>) -> Value {
        json!({ "_type": "latest_projects", "title": "Latest", "projects": projects })
    }

    fn index(value: Value) -> Vec<RawArtistIndex> {
        serde_json::from_value(value).unwrap()
    }

    fn slides(page: &Page) -> Vec<&ArtistHero> {
        page.components
            .iter()
            .flat_map(|c| match c {
                PageComponent::LatestProjects(latest) => latest.projects.iter().collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect()
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn page_fields_and_defaults() {
        let page = Normalizer::default()
            .page(&raw_page(json!({
                "_id": "home",
                "name": "Home",
                "slug": "home",
                "description": "Portfolio of directors",
                "bgColor": { "value": "#000" }
            })))
            .unwrap();
        assert_eq!(page.id, "home");
        assert_eq!(page.slug, "home");
        assert_eq!(page.bg_color.as_deref(), Some("#000"));
        assert_eq!(page.meta_description.as_deref(), Some("Portfolio of directors"));
        assert!(page.hero.is_none());
        assert!(page.components.is_empty());
        assert!(page.footer_has_contact_info);
    }

    #[test]
    fn footer_flag_respected_when_set() {
        let page = Normalizer::default()
            .page(&raw_page(json!({ "footer_has_contact_info": false })))
            .unwrap();
        assert!(!page.footer_has_contact_info);
    }

    #[test]
    fn page_with_hero() {
        let page = Normalizer::default()
            .page(&raw_page(json!({ "hero": { "_type": "hero", "title": "Welcome" } })))
            .unwrap();
        assert_eq!(page.hero.unwrap().name, "Welcome");
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn components_dispatch_and_skip_unknown() {
        let raw: Vec<RawDocument> = serde_json::from_value(json!([
            {
                "_type": "artists_grid",
                "name": "Directors",
                "artists": [artist_json("jane", vec![]), project_json("p1", "x"), null]
            },
            { "_type": "logo_grid", "logos": [] },
            {
                "_type": "columned_text",
                "title": "About",
                "layout": "two",
                "body": [{ "title": "Col", "body": [{ "_type": "block" }] }]
            },
            latest_json(vec![project_json("p1", "jane-sunset")])
        ]))
        .unwrap();
        let components = Normalizer::default().components(&raw);
        assert_eq!(components.len(), 3);

        let PageComponent::ArtistsGrid(grid) = &components[0] else {
            panic!("expected artists grid");
        };
        assert_eq!(grid.name, "Directors");
        assert_eq!(grid.artists.len(), 1);

        let PageComponent::ColumnedText(text) = &components[1] else {
            panic!("expected columned text");
        };
        assert_eq!(text.title, "About");
        assert_eq!(text.layout.as_deref(), Some("two"));
        assert_eq!(text.body[0].title, "Col");

        assert!(matches!(components[2], PageComponent::LatestProjects(_)));
    }

    #[test]
    fn latest_project_becomes_slide() {
        let mut project = project_json("p1", "jane-sunset");
        project["kind"] = json!("video-bg");
        project["thumb_vimeo_src"] = json!("https://vimeo.example/sd.mp4");
        let raw: Vec<RawDocument> =
            serde_json::from_value(json!([latest_json(vec![project, media_json("m1")])])).unwrap();
        let components = Normalizer::default().components(&raw);
        let PageComponent::LatestProjects(latest) = &components[0] else {
            panic!("expected latest projects");
        };
        assert_eq!(latest.title, "Latest");
        assert_eq!(latest.projects.len(), 1);

        let slide = &latest.projects[0];
        assert_eq!(slide.id, "p1");
        assert_eq!(slide.name, "");
        assert_eq!(slide.kind, Some(MediaKind::VideoBg));
        assert_eq!(slide.video_bg_src.as_deref(), Some("https://vimeo.example/sd.mp4"));
        let lg = &slide.image_desktop.as_ref().unwrap().sizes.as_ref().unwrap().lg;
        assert!(lg.contains("w_3200"));
        assert_eq!(slide.project.as_ref().unwrap().slug, "jane-sunset");
    }

    #[test]
    fn non_project_entries_get_no_slide() {
        let raw: Vec<RawDocument> = serde_json::from_value(json!([latest_json(vec![
            media_json("m1"),
            pair_json("project_pair", project_json("p1", "a"), project_json("p2", "b")),
            Value::Null
        ])]))
        .unwrap();
        let components = Normalizer::default().components(&raw);
        let PageComponent::LatestProjects(latest) = &components[0] else {
            panic!("expected latest projects");
        };
        assert!(latest.projects.is_empty());
    }

    #[test]
    fn slide_serializes_as_artist_hero() {
        let raw: Vec<RawDocument> =
            serde_json::from_value(json!([latest_json(vec![project_json("p1", "a")])])).unwrap();
        let value = serde_json::to_value(Normalizer::default().components(&raw)).unwrap();
        assert_eq!(value[0]["_type"], "latest_projects");
        assert_eq!(value[0]["projects"][0]["_id"], "p1");
        assert_eq!(value[0]["projects"][0]["_type"], "hero");
        assert_eq!(value[0]["projects"][0]["project"]["_type"], "project");
        assert!(value[0]["projects"][0]["imageDesktop"]["sizes"].is_object());
    }

    // =========================================================================
    // Attribution
    // =========================================================================

    fn page_with_latest(projects: Vec<Value>) -> Page {
        Normalizer::default()
            .page(&raw_page(json!({ "components": [latest_json(projects)] })))
            .unwrap()
    }

    #[test]
    fn attribution_sets_name_and_route_slug() {
        let page = page_with_latest(vec![
            project_json("p1", "jane-sunset"),
            project_json("p2", "bob-dawn"),
        ]);
        let artists = index(json!([
            { "_id": "a1", "name": "Jane Doe", "slug": "jane", "projects": [{ "projects": ["p1"] }] }
        ]));
        let page = attribute_latest_projects(page, &artists);
        let slides = slides(&page);
        assert_eq!(slides[0].name, "Jane Doe");
        assert_eq!(slides[0].project.as_ref().unwrap().slug, "jane/sunset");
        assert_eq!(slides[1].name, "");
        assert_eq!(slides[1].project.as_ref().unwrap().slug, "bob-dawn");
    }

    #[test]
    fn attribution_via_portfolio() {
        let page = page_with_latest(vec![project_json("pf", "reel")]);
        let artists = index(json!([
            { "_id": "a1", "name": "Jane", "slug": "jane", "portfolio": { "_id": "pf" } }
        ]));
        let page = attribute_latest_projects(page, &artists);
        assert_eq!(slides(&page)[0].project.as_ref().unwrap().slug, "jane/reel");
    }

    #[test]
    fn first_artist_wins() {
        let page = page_with_latest(vec![project_json("p1", "shared")]);
        let artists = index(json!([
            { "_id": "a0", "name": "Nobody", "slug": "nobody" },
            { "_id": "a1", "name": "Jane", "slug": "jane", "projects": [{ "projects": ["p1"] }] },
            { "_id": "a2", "name": "Bob", "slug": "bob", "projects": [{ "projects": ["p1"] }] }
        ]));
        let page = attribute_latest_projects(page, &artists);
        let slide = slides(&page)[0];
        assert_eq!(slide.name, "Jane");
        assert_eq!(slide.project.as_ref().unwrap().slug, "jane/shared");
    }

    #[test]
    fn empty_slug_not_rewritten() {
        let page = page_with_latest(vec![json!({ "_type": "project", "_id": "p1" })]);
        let artists = index(json!([
            { "_id": "a1", "name": "Jane", "slug": "jane", "projects": [{ "projects": ["p1"] }] }
        ]));
        let page = attribute_latest_projects(page, &artists);
        let slide = slides(&page)[0];
        assert_eq!(slide.name, "Jane");
        assert_eq!(slide.project.as_ref().unwrap().slug, "");
    }

    #[test]
    fn attribution_does_not_touch_other_components() {
        let page = Normalizer::default()
            .page(&raw_page(json!({
                "components": [{ "_type": "columned_text", "title": "About" }]
            })))
            .unwrap();
        let artists = index(json!([{ "_id": "a1", "projects": [{ "projects": ["p1"] }] }]));
        assert_eq!(attribute_latest_projects(page.clone(), &artists), page);
    }
}
