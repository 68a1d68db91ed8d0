//! Canonical, render-ready entities.
//!
//! These are what the templates consume. Every fallback and default has
//! already been applied and field names are camelCase.
//!
//! Every entity the rendering layer dispatches on serializes with a leading
//! `_type` discriminant, wherever it appears: at the top level, inside a
//! pair, or as an element of a polymorphic sequence. The tag lives on the
//! struct itself, so the sequence enums ([`MediaEntry`], [`ProjectEntry`])
//! are untagged and never emit it twice.
//!
//! | Entity | `_type` |
//! |--------|---------|
//! | [`ProjectMedia`] | `project_media` |
//! | [`ProjectMediaPair`] / [`ProjectMediaTrio`] | `item_pair` / `item_trio` |
//! | [`Project`] | `project` |
//! | [`ProjectPair`] / [`ProjectTrio`] | `project_pair` / `project_trio` |
//! | [`Artist`] | `artist` |
//! | [`Hero`], [`ArtistHero`] | `hero` |
//! | [`Page`] | `page` |

use crate::raw::{ArtistLink, Credit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One logical image with its three breakpoint variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudinaryImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<ImageSizes>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSizes {
    pub sm: String,
    pub md: String,
    pub lg: String,
}

/// How a media tile or project thumbnail renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Image,
    VideoBg,
    VideoPlayer,
}

impl MediaKind {
    /// Map a raw `kind` string. Unknown values map to `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "image" => Some(MediaKind::Image),
            "video-bg" => Some(MediaKind::VideoBg),
            "video-player" => Some(MediaKind::VideoPlayer),
            _ => None,
        }
    }
}

/// Trio layouts put the tall member on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

impl Align {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "left" => Some(Align::Left),
            "right" => Some(Align::Right),
            _ => None,
        }
    }
}

// ============================================================================
// Media
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "project_media", rename_all = "camelCase")]
pub struct ProjectMedia {
    #[serde(rename = "_key")]
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<CloudinaryImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    pub video_player_src: String,
    pub video_bg_src: String,
    pub video_bg_src_hd: String,
    pub use_original_quality: bool,
    pub autoplay: bool,
    pub fill_container: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "item_pair")]
pub struct ProjectMediaPair {
    pub left: ProjectMedia,
    pub right: ProjectMedia,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "item_trio")]
pub struct ProjectMediaTrio {
    pub top: ProjectMedia,
    pub bottom: ProjectMedia,
    pub side: ProjectMedia,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

/// One block of a project's media column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaEntry {
    ProjectMedia(ProjectMedia),
    ItemPair(ProjectMediaPair),
    ItemTrio(ProjectMediaTrio),
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Project,
    Portfolio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "project", rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub page_title: String,
    pub name: String,
    pub title: String,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// Artist-relative once the project sits in an artist's project list.
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_intro: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<CloudinaryImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bg_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bg_src_hd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<Credit>,
    /// Only populated on the project detail view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaEntry>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_projects: Vec<Project>,
    #[serde(default)]
    pub show_related_projects: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "project_pair")]
pub struct ProjectPair {
    pub left: Project,
    pub right: Project,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "project_trio")]
pub struct ProjectTrio {
    pub top: Project,
    pub bottom: Project,
    pub side: Project,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

/// One block of an artist's project grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectEntry {
    Project(Project),
    ProjectPair(ProjectPair),
    ProjectTrio(ProjectTrio),
}

impl ProjectEntry {
    /// The projects of this block in layout order.
    pub fn projects(&self) -> Vec<&Project> {
        match self {
            ProjectEntry::Project(p) => vec![p],
            ProjectEntry::ProjectPair(pair) => vec![&pair.left, &pair.right],
            ProjectEntry::ProjectTrio(trio) => vec![&trio.top, &trio.bottom, &trio.side],
        }
    }
}

// ============================================================================
// Artists
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "artist", rename_all = "camelCase")]
pub struct Artist {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<Value>,
    /// Newline-separated client list with line breaks as `<br/>`.
    pub clients: String,
    #[serde(default)]
    pub links: Vec<ArtistLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<Vec<ProjectMedia>>,
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: String,
}

// ============================================================================
// Heroes
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroKind {
    #[default]
    Image,
    VideoBg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroArtist {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<CloudinaryImage>,
    pub kind: HeroKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bg_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bg_src_hd: Option<String>,
    pub still_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "hero", rename_all = "camelCase")]
pub struct Hero {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub artists: Vec<HeroArtist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_instructions: Option<String>,
}

/// A slide in a latest-projects strip: a project dressed as a hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "hero", rename_all = "camelCase")]
pub struct ArtistHero {
    #[serde(rename = "_id")]
    pub id: String,
    /// Empty until the slide is attributed to an artist.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_desktop: Option<CloudinaryImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bg_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bg_src_hd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistsGrid {
    pub name: String,
    pub artists: Vec<Artist>,
}

/// Multi-column text block. The query already returns it in render shape,
/// so the same type serves as raw input and canonical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnedText {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default)]
    pub body: Vec<TextColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextColumn {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestProjects {
    pub title: String,
    pub projects: Vec<ArtistHero>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
pub enum PageComponent {
    ArtistsGrid(ArtistsGrid),
    ColumnedText(ColumnedText),
    LatestProjects(LatestProjects),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "page", rename_all = "camelCase")]
pub struct Page {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,
    pub components: Vec<PageComponent>,
    pub footer_has_contact_info: bool,
}
