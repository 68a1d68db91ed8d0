//! Artists and their project grids.
//!
//! An artist's `projects` list is a layout: singles span the full width,
//! pairs share a row, trios form an L. Unlike media groupings, a project pair
//! or trio with a missing member is dropped outright rather than degraded to
//! a single, and projects flagged `hidden_from_artist_page` never appear.
//!
//! Every project in the grid gets an artist-relative slug (see
//! [`resolve_slug`]), and the artist's portfolio project, if any, is merged in
//! as the first entry.

use super::{NormalizeError, Normalizer, all_three};
use crate::raw::{RawArtist, RawDocument, RawPair, RawSlug, RawTrio};
use crate::slug::resolve_slug;
use crate::types::{Align, Artist, Project, ProjectEntry, ProjectPair, ProjectTrio};

const PORTFOLIO_TITLE: &str = "Portfolio";

impl Normalizer {
    /// Normalize an artist's project grid, rewriting every slug relative to
    /// `artist_slug`. Entries that are not projects, or fail to normalize,
    /// are dropped; order is preserved.
    pub fn artist_projects(&self, artist_slug: &str, raw: &[RawDocument]) -> Vec<ProjectEntry> {
        raw.iter()
            .filter_map(|entry| {
                let normalized = match entry {
                    RawDocument::ProjectTrio(trio) => self.project_trio(artist_slug, trio),
                    RawDocument::ProjectPair(pair) => self.project_pair(artist_slug, pair),
                    RawDocument::Project(project) if project.hidden_from_artist_page == Some(true) => {
                        tracing::debug!(id = ?project.id, "project hidden from artist page");
                        Ok(None)
                    }
                    RawDocument::Project(_) => self.project(Some(entry), true).map(|project| {
                        project.map(|p| ProjectEntry::Project(relative_to(artist_slug, p)))
                    }),
                    _ => Ok(None),
                };
                normalized.unwrap_or_else(|err| {
                    tracing::warn!(artist = artist_slug, %err, "dropping project entry");
                    None
                })
            })
            .collect()
    }

    fn project_pair(
        &self,
        artist_slug: &str,
        raw: &RawPair,
    ) -> Result<Option<ProjectEntry>, NormalizeError> {
        let left = self.project(raw.left.as_deref(), false)?;
        let right = self.project(raw.right.as_deref(), false)?;
        Ok(left.zip(right).map(|(left, right)| {
            ProjectEntry::ProjectPair(ProjectPair {
                left: relative_to(artist_slug, left),
                right: relative_to(artist_slug, right),
            })
        }))
    }

    fn project_trio(
        &self,
        artist_slug: &str,
        raw: &RawTrio,
    ) -> Result<Option<ProjectEntry>, NormalizeError> {
        let top = self.project(raw.top.as_deref(), false)?;
        let bottom = self.project(raw.bottom.as_deref(), false)?;
        let side = self.project(raw.side.as_deref(), false)?;
        Ok(all_three(top, bottom, side).map(|(top, bottom, side)| {
            ProjectEntry::ProjectTrio(ProjectTrio {
                top: relative_to(artist_slug, top),
                bottom: relative_to(artist_slug, bottom),
                side: relative_to(artist_slug, side),
                align: Align::parse(raw.align.as_deref()),
            })
        }))
    }

    /// Normalize an `artist` record; anything else is `None`.
    ///
    /// Featured media and grid entries that fail are dropped with a warning.
    /// A portfolio that fails is an error, since it always heads the grid.
    pub fn artist(&self, raw: Option<&RawDocument>) -> Result<Option<Artist>, NormalizeError> {
        let Some(RawDocument::Artist(raw)) = raw else {
            return Ok(None);
        };
        let slug = raw
            .slug
            .as_ref()
            .map(RawSlug::as_str)
            .unwrap_or_default()
            .to_string();

        let featured = raw.featured.as_ref().map(|featured| {
            featured
                .iter()
                .filter_map(|media| {
                    self.media(Some(media), true).unwrap_or_else(|err| {
                        tracing::warn!(artist = %slug, %err, "dropping featured media");
                        None
                    })
                })
                .collect()
        });
        let portfolio = self.project(raw.portfolio.as_deref(), true)?;
        let projects = self.artist_projects(&slug, raw.projects.as_deref().unwrap_or_default());

        let artist = Artist {
            id: raw.id.clone().unwrap_or_default(),
            name: raw.name.clone().unwrap_or_default(),
            nickname: raw.nickname.clone().unwrap_or_default(),
            bio: raw.bio.clone(),
            clients: clients_html(raw),
            links: raw.links.clone().unwrap_or_default(),
            featured,
            projects,
            tags: raw.tags.clone().unwrap_or_default(),
            location: raw.location.clone().unwrap_or_default(),
            slug,
        };
        Ok(Some(merge_portfolio(artist, portfolio)))
    }
}

/// Put `portfolio` at the head of the artist's grid, titled "Portfolio" and
/// with an artist-relative slug. Without a portfolio the artist is returned
/// as is.
pub fn merge_portfolio(mut artist: Artist, portfolio: Option<Project>) -> Artist {
    if let Some(mut portfolio) = portfolio {
        portfolio.title = PORTFOLIO_TITLE.to_string();
        portfolio.short_name = PORTFOLIO_TITLE.to_string();
        let portfolio = relative_to(&artist.slug, portfolio);
        artist.projects.insert(0, ProjectEntry::Project(portfolio));
    }
    artist
}

fn relative_to(artist_slug: &str, mut project: Project) -> Project {
    project.slug = resolve_slug(artist_slug, &project.slug).to_string();
    project
}

fn clients_html(raw: &RawArtist) -> String {
    raw.clients
        .as_deref()
        .unwrap_or_default()
        .replace('\n', "<br/>")
}
