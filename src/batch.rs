//! Batch normalization of saved query results.
//!
//! The website fetches raw records from the content store and normalizes them
//! per request. This module runs the same pipeline over query results saved
//! as JSON files, which is how content is checked before publishing and how
//! fixtures for the front-end are produced.
//!
//! ## Inputs
//!
//! Each file holds one query result: either the record itself or the array a
//! query returns, in which case the first element is used. Directories are
//! walked recursively for `*.json` files.
//!
//! ## Kinds
//!
//! | Kind | Record | Output |
//! |------|--------|--------|
//! | `page` | page with hero and components | `Page` |
//! | `artist` | artist with portfolio and project grid | `Artist` |
//! | `project` | project with media column | `Project` (detail view) |
//! | `hero` | a bare hero | `Hero` or `null` |
//!
//! Files are normalized in parallel with [rayon](https://docs.rs/rayon);
//! results come back in input order and one bad file never stops the rest.

use crate::normalize::{NormalizeError, Normalizer, attribute_latest_projects};
use crate::raw::{RawArtistIndex, RawDocument, RawHero, RawPage};
use crate::types::{Artist, Hero, Page, Project};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("Query result is an empty array: {0}")]
    EmptyResult(PathBuf),
    #[error("No {kind} record found in {path}")]
    NotFound { kind: DocumentKind, path: PathBuf },
}

/// What a batch input holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentKind {
    Page,
    Artist,
    Project,
    Hero,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DocumentKind::Page => "page",
            DocumentKind::Artist => "artist",
            DocumentKind::Project => "project",
            DocumentKind::Hero => "hero",
        })
    }
}

/// One normalized input, serialized exactly as the entity it wraps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    Page(Page),
    Artist(Box<Artist>),
    Project(Box<Project>),
    Hero(Option<Hero>),
}

/// The normalizer plus the side records some kinds need.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub normalizer: Normalizer,
    /// Artist index used to credit latest-project slides on pages.
    pub artist_index: Vec<RawArtistIndex>,
    /// Display name of the artist owning the projects being normalized.
    pub artist_name: Option<String>,
}

impl Pipeline {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            ..Self::default()
        }
    }

    pub fn with_artist_index(mut self, artist_index: Vec<RawArtistIndex>) -> Self {
        self.artist_index = artist_index;
        self
    }

    pub fn with_artist_name(mut self, artist_name: Option<String>) -> Self {
        self.artist_name = artist_name;
        self
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub result: Result<Normalized, BatchError>,
}

/// Expand `paths` into the list of JSON files to process.
///
/// Files are taken as given. Directories are walked recursively and their
/// `*.json` files added in sorted order.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, BatchError> {
    let mut inputs = Vec::new();
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file() && is_json(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        inputs.extend(found);
    }
    Ok(inputs)
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

/// Read one query result. An array result yields its first element.
pub fn load_document(path: &Path) -> Result<Value, BatchError> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| BatchError::EmptyResult(path.to_path_buf())),
        value => Ok(value),
    }
}

/// Load a saved artist index query. Unlike documents this is the whole array.
pub fn load_artist_index(path: &Path) -> Result<Vec<RawArtistIndex>, BatchError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Decode and normalize one raw record. `path` only labels errors.
pub fn normalize_value(
    kind: DocumentKind,
    value: Value,
    pipeline: &Pipeline,
    path: &Path,
) -> Result<Normalized, BatchError> {
    let normalizer = &pipeline.normalizer;
    let not_found = || BatchError::NotFound {
        kind,
        path: path.to_path_buf(),
    };
    match kind {
        DocumentKind::Page => {
            if value.is_null() {
                return Err(not_found());
            }
            let raw: RawPage = serde_json::from_value(value)?;
            let page = normalizer.page(&raw)?;
            Ok(Normalized::Page(attribute_latest_projects(page, &pipeline.artist_index)))
        }
        DocumentKind::Artist => {
            let raw = RawDocument::from_value(value);
            let artist = normalizer.artist(Some(&raw))?.ok_or_else(not_found)?;
            Ok(Normalized::Artist(Box::new(artist)))
        }
        DocumentKind::Project => {
            let raw = RawDocument::from_value(value);
            let project = normalizer
                .project_page(Some(&raw), pipeline.artist_name.as_deref())?
                .ok_or_else(not_found)?;
            Ok(Normalized::Project(Box::new(project)))
        }
        DocumentKind::Hero => {
            let raw: Option<RawHero> = serde_json::from_value(value)?;
            Ok(Normalized::Hero(normalizer.hero(raw.as_ref())?))
        }
    }
}

/// Load and normalize one file.
pub fn normalize_file(
    kind: DocumentKind,
    path: &Path,
    pipeline: &Pipeline,
) -> Result<Normalized, BatchError> {
    let value = load_document(path)?;
    normalize_value(kind, value, pipeline, path)
}

/// Normalize every input in parallel. Results are in input order.
pub fn run(kind: DocumentKind, inputs: &[PathBuf], pipeline: &Pipeline) -> Vec<Outcome> {
    inputs
        .par_iter()
        .map(|path| {
            let result = normalize_file(kind, path, pipeline);
            match &result {
                Ok(_) => tracing::info!(%kind, path = %path.display(), "normalized"),
                Err(err) => tracing::warn!(%kind, path = %path.display(), %err, "failed"),
            }
            Outcome {
                path: path.clone(),
                result,
            }
        })
        .collect()
}

/// Output file name for `input` under `--out`: same stem, `.json`.
pub fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{stem}.json"))
}
