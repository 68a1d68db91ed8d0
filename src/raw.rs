//! Raw CMS records as they come back from the content store's queries.
//!
//! Everything here mirrors the store's snake_case field names and is as
//! lenient as the data in the wild: almost every field is optional, and a
//! missing field is the normalizers' problem, not the decoder's.
//!
//! ## Documents
//!
//! Records that carry a `_type` discriminant decode into [`RawDocument`], a
//! closed enum with one variant per kind the pipeline understands. Decoding a
//! document never fails: a record whose `_type` is unknown, missing, or whose
//! body does not fit the declared kind becomes [`RawDocument::Unrecognized`].
//! This keeps a single bad entry (a dangling reference resolves to `null`,
//! an editor adds a new component type) from sinking a whole page.
//!
//! Records that are always fetched in a fixed position (images, heroes, the
//! page itself) decode into plain structs.
//!
//! ## Leaf fields
//!
//! Query results are full of holes that are not the record's fault: a
//! deleted tag dereferences to `null` inside `tags`, an image without
//! precomputed variants comes back with `derived: null`. Lists, images,
//! slugs and colors therefore decode leniently: `null` or misshapen list
//! elements are skipped and a misshapen value reads as absent. An image that
//! is not an object at all decodes as an empty record, so the normalizer
//! reports it as an image error instead of the record disappearing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ============================================================================
// Lenient field decoding
// ============================================================================

/// A value of the wrong shape reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], falling back to `T::default()`.
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// A list whose `null` or misshapen elements are skipped. Anything but an
/// array reads as absent.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    lenient_list(deserializer).map(Option::unwrap_or_default)
}

/// A slug as returned by a query: either projected to a string
/// (`"slug": slug.current`) or left in the store's `{ current }` object form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawSlug {
    Plain(String),
    Object {
        #[serde(default)]
        current: String,
    },
}

impl RawSlug {
    pub fn as_str(&self) -> &str {
        match self {
            RawSlug::Plain(s) => s,
            RawSlug::Object { current } => current,
        }
    }
}

/// A color picker value; only `value` (a CSS color) is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawColor {
    pub value: Option<String>,
}

/// A Cloudinary asset record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawImage {
    pub format: Option<String>,
    pub secure_url: Option<String>,
    /// Variants precomputed by the CMS plugin; only the first one is used.
    pub derived: Vec<RawDerivedImage>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl<'de> Deserialize<'de> for RawImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            #[serde(default, deserialize_with = "lenient")]
            format: Option<String>,
            #[serde(default, deserialize_with = "lenient")]
            secure_url: Option<String>,
            #[serde(default, deserialize_with = "lenient_vec")]
            derived: Vec<RawDerivedImage>,
            #[serde(default, deserialize_with = "lenient")]
            width: Option<u32>,
            #[serde(default, deserialize_with = "lenient")]
            height: Option<u32>,
        }

        let value = Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value::<Fields>(value) {
            Ok(fields) => RawImage {
                format: fields.format,
                secure_url: fields.secure_url,
                derived: fields.derived,
                width: fields.width,
                height: fields.height,
            },
            Err(err) => {
                tracing::debug!(%err, "image record is not an object");
                RawImage::default()
            }
        })
    }
}

impl RawImage {
    /// URL of the first precomputed variant, if any.
    pub fn derived_url(&self) -> Option<&str> {
        self.derived.first().and_then(|d| d.secure_url.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDerivedImage {
    #[serde(default, deserialize_with = "lenient")]
    pub secure_url: Option<String>,
}

/// One entry of a project's credit list, passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct Credit {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub credit: String,
}

/// An external profile link on an artist, passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ArtistLink {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<String>,
}

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawProject {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<RawSlug>,
    pub description: Option<Value>,
    pub description_intro: Option<Value>,
    pub client: Option<String>,
    pub kind: Option<String>,
    pub image: Option<RawImage>,
    pub image_mobile: Option<RawImage>,
    pub thumb_vimeo_src: Option<String>,
    pub thumb_vimeo_src_hd: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bg_color: Option<RawColor>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub credits: Option<Vec<Credit>>,
    #[serde(default, deserialize_with = "lenient")]
    pub hidden_from_artist_page: Option<bool>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub media: Option<Vec<RawDocument>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawProjectMedia {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub image: Option<RawImage>,
    pub image_mobile: Option<RawImage>,
    pub use_original_quality: Option<bool>,
    pub vimeo_player_src: Option<String>,
    pub thumb_vimeo_src: Option<String>,
    pub thumb_vimeo_src_hd: Option<String>,
    pub autoplay: Option<bool>,
    pub fill_container: Option<bool>,
}

/// Two side-by-side members, used for both `project_pair` and `item_pair`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPair {
    pub left: Option<Box<RawDocument>>,
    pub right: Option<Box<RawDocument>>,
}

/// Three members in an L layout, used for both `project_trio` and `item_trio`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTrio {
    pub top: Option<Box<RawDocument>>,
    pub bottom: Option<Box<RawDocument>>,
    pub side: Option<Box<RawDocument>>,
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawArtist {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<RawSlug>,
    pub bio: Option<Value>,
    pub clients: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub links: Option<Vec<ArtistLink>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub featured: Option<Vec<RawDocument>>,
    pub portfolio: Option<Box<RawDocument>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub projects: Option<Vec<RawDocument>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawArtistsGrid {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub artists: Option<Vec<RawDocument>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLatestProjects {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub projects: Option<Vec<RawDocument>>,
}

/// A raw record dispatched on its `_type` discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDocument {
    Project(Box<RawProject>),
    ProjectMedia(Box<RawProjectMedia>),
    ProjectPair(RawPair),
    ProjectTrio(RawTrio),
    ItemPair(RawPair),
    ItemTrio(RawTrio),
    Artist(Box<RawArtist>),
    ArtistsGrid(RawArtistsGrid),
    ColumnedText(crate::types::ColumnedText),
    LatestProjects(RawLatestProjects),
    /// Unknown or missing discriminant, or a body that did not fit its kind.
    Unrecognized { kind: Option<String> },
}

impl RawDocument {
    /// Decode a JSON value by its `_type` field.
    pub fn from_value(value: Value) -> Self {
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let Some(kind) = kind else {
            return RawDocument::Unrecognized { kind: None };
        };

        let decoded = match kind.as_str() {
            "project" => serde_json::from_value(value).map(|p| RawDocument::Project(Box::new(p))),
            "project_media" => {
                serde_json::from_value(value).map(|m| RawDocument::ProjectMedia(Box::new(m)))
            }
            "project_pair" => serde_json::from_value(value).map(RawDocument::ProjectPair),
            "project_trio" => serde_json::from_value(value).map(RawDocument::ProjectTrio),
            "item_pair" => serde_json::from_value(value).map(RawDocument::ItemPair),
            "item_trio" => serde_json::from_value(value).map(RawDocument::ItemTrio),
            "artist" => serde_json::from_value(value).map(|a| RawDocument::Artist(Box::new(a))),
            "artists_grid" => serde_json::from_value(value).map(RawDocument::ArtistsGrid),
            "columned_text" => serde_json::from_value(value).map(RawDocument::ColumnedText),
            "latest_projects" => serde_json::from_value(value).map(RawDocument::LatestProjects),
            _ => return RawDocument::Unrecognized { kind: Some(kind) },
        };

        decoded.unwrap_or_else(|err| {
            tracing::debug!(%kind, %err, "raw document does not fit its declared type");
            RawDocument::Unrecognized { kind: Some(kind) }
        })
    }

    /// The `_type` discriminant this document was decoded from.
    pub fn kind(&self) -> Option<&str> {
        match self {
            RawDocument::Project(_) => Some("project"),
            RawDocument::ProjectMedia(_) => Some("project_media"),
            RawDocument::ProjectPair(_) => Some("project_pair"),
            RawDocument::ProjectTrio(_) => Some("project_trio"),
            RawDocument::ItemPair(_) => Some("item_pair"),
            RawDocument::ItemTrio(_) => Some("item_trio"),
            RawDocument::Artist(_) => Some("artist"),
            RawDocument::ArtistsGrid(_) => Some("artists_grid"),
            RawDocument::ColumnedText(_) => Some("columned_text"),
            RawDocument::LatestProjects(_) => Some("latest_projects"),
            RawDocument::Unrecognized { kind } => kind.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawDocument::from_value)
    }
}

// ============================================================================
// Heroes and pages
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHero {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Seconds per still slide; editors have stored both numbers and strings.
    pub still_duration: Option<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub artists: Option<Vec<RawHeroArtist>>,
    pub scroll_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHeroArtist {
    pub artist: Option<String>,
    pub kind: Option<String>,
    pub image_desktop: Option<RawImage>,
    pub image_mobile: Option<RawImage>,
    pub thumb_vimeo_src: Option<String>,
    pub thumb_vimeo_src_hd: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPage {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<RawSlug>,
    pub description: Option<String>,
    #[serde(rename = "bgColor", default, deserialize_with = "lenient")]
    pub bg_color: Option<RawColor>,
    pub hero: Option<RawHero>,
    pub footer_has_contact_info: Option<bool>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub components: Option<Vec<RawDocument>>,
}

// ============================================================================
// Lookup records
// ============================================================================

/// A bare `{ "_id": … }` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRef {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// A bare `{ "slug": … }` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSlugRef {
    pub slug: Option<RawSlug>,
}

/// One entry of an artist's project list, reduced to the slugs it references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProjectRef {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub slug: Option<RawSlug>,
    pub left: Option<RawSlugRef>,
    pub right: Option<RawSlugRef>,
    pub top: Option<RawSlugRef>,
    pub bottom: Option<RawSlugRef>,
    pub side: Option<RawSlugRef>,
}

/// The slim artist record fetched to resolve `/artists/{artist}/{project}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArtistRoute {
    pub slug: Option<RawSlug>,
    pub portfolio: Option<RawSlugRef>,
    #[serde(default)]
    pub projects: Vec<RawProjectRef>,
}

/// The project ids one entry of an artist's project list references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProjectIds {
    #[serde(default)]
    pub projects: Vec<Option<String>>,
}

/// The slim artist record used to attribute latest projects to artists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArtistIndex {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<RawSlug>,
    pub portfolio: Option<RawRef>,
    pub projects: Option<Vec<RawProjectIds>>,
}

impl RawArtistIndex {
    /// Every project id this artist references, portfolio first.
    pub fn project_ids(&self) -> Vec<&str> {
        let portfolio = self.portfolio.as_ref().and_then(|p| p.id.as_deref());
        let listed = self
            .projects
            .iter()
            .flatten()
            .flat_map(|entry| entry.projects.iter().flatten())
            .map(String::as_str);
        portfolio.into_iter().chain(listed).collect()
    }
}
