//! Projects, in the two shapes the site renders them.
//!
//! - [`Normalizer::project`]: the list view used in artist grids, latest
//!   project strips and portfolio slots. No credits, no media.
//! - [`Normalizer::project_page`]: the detail view behind
//!   `/artists/{artist}/{project}`, with the full media column and a
//!   browser title carrying the artist and site names.

use super::{NormalizeError, Normalizer};
use crate::cloudinary::DeriveOptions;
use crate::raw::{RawDocument, RawProject, RawSlug};
use crate::types::{MediaKind, Project, ProjectType};

impl Normalizer {
    /// Normalize a `project` record for list views; anything else is `None`.
    ///
    /// `is_single` is false for members of a pair or trio, which share a row
    /// and so need a narrower `lg` image.
    pub fn project(
        &self,
        raw: Option<&RawDocument>,
        is_single: bool,
    ) -> Result<Option<Project>, NormalizeError> {
        let Some(RawDocument::Project(raw)) = raw else {
            return Ok(None);
        };
        let image = self.image(raw.image.as_ref(), None, DeriveOptions::single(is_single))?;
        let mut project = base_project(raw);
        project.page_title = project.name.clone();
        project.image = image;
        Ok(Some(project))
    }

    /// Normalize a `project` record for its detail page.
    ///
    /// `artist_name` is the owning artist's display name, when the artist
    /// record resolved.
    pub fn project_page(
        &self,
        raw: Option<&RawDocument>,
        artist_name: Option<&str>,
    ) -> Result<Option<Project>, NormalizeError> {
        let Some(RawDocument::Project(raw)) = raw else {
            return Ok(None);
        };
        let image = self.image(
            raw.image.as_ref(),
            raw.image_mobile.as_ref(),
            DeriveOptions::default(),
        )?;
        let media = self.media_list(raw.media.as_deref().unwrap_or_default())?;

        let mut project = base_project(raw);
        project.page_title = match artist_name.filter(|name| !name.is_empty()) {
            Some(artist) => format!("{} | {artist} | {}", project.title, self.site_name),
            None => format!("{} | {}", project.title, self.site_name),
        };
        project.image = image;
        project.credits = raw.credits.clone().unwrap_or_default();
        project.media = Some(media);
        Ok(Some(project))
    }
}

/// Fields shared by both views, with every fallback applied.
fn base_project(raw: &RawProject) -> Project {
    let name = raw.name.clone().unwrap_or_default();
    let title = non_empty(raw.title.as_deref()).unwrap_or(&name).to_string();
    let short_name = non_empty(raw.short_name.as_deref())
        .or(non_empty(Some(title.as_str())))
        .unwrap_or_default()
        .to_string();

    Project {
        id: raw.id.clone().unwrap_or_default(),
        project_type: match raw.project_type.as_deref() {
            Some("portfolio") => ProjectType::Portfolio,
            _ => ProjectType::Project,
        },
        page_title: String::new(),
        name,
        title,
        short_name,
        meta_description: raw.meta_description.clone(),
        slug: raw
            .slug
            .as_ref()
            .map(RawSlug::as_str)
            .unwrap_or_default()
            .to_string(),
        description: raw.description.clone(),
        description_intro: raw.description_intro.clone(),
        client: raw.client.clone(),
        kind: MediaKind::parse(raw.kind.as_deref()),
        image: None,
        video_bg_src: raw.thumb_vimeo_src.clone(),
        video_bg_src_hd: raw.thumb_vimeo_src_hd.clone(),
        bg_color: raw.bg_color.as_ref().and_then(|c| c.value.clone()),
        tags: raw.tags.clone().unwrap_or_default(),
        credits: Vec::new(),
        media: None,
        related_projects: Vec::new(),
        show_related_projects: false,
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
