//! Raw CMS records → canonical entities.
//!
//! Every normalizer is a method on [`Normalizer`], which carries nothing but
//! immutable configuration, so one instance can serve any number of
//! concurrent calls.
//!
//! ## Absent vs. failed
//!
//! Normalizers return `Result<Option<T>, NormalizeError>`:
//!
//! - `Ok(None)`: the record is absent or is not the kind this normalizer
//!   handles. Callers filter these out; a pair or trio missing members
//!   degrades or disappears according to its grouping rules.
//! - `Err(_)`: the record is the right kind but its data is broken in a way
//!   the page cannot paper over (an image without a usable delivery URL).
//!
//! | Module | Entities |
//! |--------|----------|
//! | [`media`] | `ProjectMedia`, media pairs/trios, project media lists |
//! | [`project`] | `Project` (list and detail views) |
//! | [`artist`] | artist project grids, portfolio merge, `Artist` |
//! | [`hero`] | `Hero` slideshows |
//! | [`page`] | page components, `Page`, latest-project attribution |

pub mod artist;
pub mod hero;
pub mod media;
pub mod page;
pub mod project;

pub use artist::merge_portfolio;
pub use page::attribute_latest_projects;

use crate::cloudinary::{Breakpoints, DeriveOptions, ImageError, derive_image};
use crate::config::SiteConfig;
use crate::raw::RawImage;
use crate::types::CloudinaryImage;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("image error: {0}")]
    Image(#[from] ImageError),
}

/// Normalization entry point; holds the configuration every rule reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    widths: Breakpoints,
    still_duration: f64,
    site_name: String,
}

impl Normalizer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            widths: config.images,
            still_duration: config.hero.still_duration,
            site_name: config.site_name.clone(),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub(crate) fn image(
        &self,
        image: Option<&RawImage>,
        mobile: Option<&RawImage>,
        options: DeriveOptions,
    ) -> Result<Option<CloudinaryImage>, NormalizeError> {
        Ok(derive_image(image, mobile, options, &self.widths)?)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&SiteConfig::default())
    }
}

/// Keep every `Ok(Some(_))`, drop `Ok(None)`, stop at the first error.
pub(crate) fn collect_present<T>(
    items: impl IntoIterator<Item = Result<Option<T>, NormalizeError>>,
) -> Result<Vec<T>, NormalizeError> {
    let mut out = Vec::new();
    for item in items {
        if let Some(value) = item? {
            out.push(value);
        }
    }
    Ok(out)
}

/// All three or nothing.
pub(crate) fn all_three<A, B, C>(a: Option<A>, b: Option<B>, c: Option<C>) -> Option<(A, B, C)> {
    a.zip(b).zip(c).map(|((a, b), c)| (a, b, c))
}
