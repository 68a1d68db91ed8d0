//! Project media tiles and their groupings.
//!
//! A project's media column is a list of blocks: a single tile, a pair side
//! by side, or a trio in an L layout. Members are references that may dangle
//! (an editor deletes a media document), so groupings degrade:
//!
//! | Members that normalize | Pair | Trio |
//! |---|---|---|
//! | all | pair | trio |
//! | some | the surviving tile alone | dropped |
//! | none | dropped | dropped |
//!
//! Project groupings (see [`artist`](super::artist)) do not degrade the same
//! way; both rules are deliberate and kept separate.

use super::{NormalizeError, Normalizer, all_three, collect_present};
use crate::cloudinary::DeriveOptions;
use crate::raw::{RawDocument, RawPair, RawTrio};
use crate::types::{Align, MediaEntry, MediaKind, ProjectMedia, ProjectMediaPair, ProjectMediaTrio};

impl Normalizer {
    /// Normalize one `project_media` record; anything else is `None`.
    pub fn media(
        &self,
        raw: Option<&RawDocument>,
        is_single: bool,
    ) -> Result<Option<ProjectMedia>, NormalizeError> {
        let Some(RawDocument::ProjectMedia(media)) = raw else {
            return Ok(None);
        };
        let use_original_quality = media.use_original_quality.unwrap_or(false);
        let image = self.image(
            media.image.as_ref(),
            media.image_mobile.as_ref(),
            DeriveOptions::single(is_single).original_quality(use_original_quality),
        )?;

        Ok(Some(ProjectMedia {
            key: media.id.clone().unwrap_or_default(),
            name: media.name.clone().unwrap_or_default(),
            image,
            kind: MediaKind::parse(media.kind.as_deref()),
            video_player_src: media.vimeo_player_src.clone().unwrap_or_default(),
            video_bg_src: media.thumb_vimeo_src.clone().unwrap_or_default(),
            video_bg_src_hd: media.thumb_vimeo_src_hd.clone().unwrap_or_default(),
            use_original_quality,
            autoplay: media.autoplay.unwrap_or(false),
            fill_container: media.fill_container.unwrap_or(false),
        }))
    }

    /// Normalize a pair; a lone survivor stands on its own.
    pub fn media_pair(&self, raw: &RawPair) -> Result<Option<MediaEntry>, NormalizeError> {
        let left = self.media(raw.left.as_deref(), false)?;
        let right = self.media(raw.right.as_deref(), false)?;
        Ok(match (left, right) {
            (Some(left), Some(right)) => Some(MediaEntry::ItemPair(ProjectMediaPair { left, right })),
            (Some(single), None) | (None, Some(single)) => Some(MediaEntry::ProjectMedia(single)),
            (None, None) => None,
        })
    }

    /// Normalize a trio; it survives only if all three members do.
    pub fn media_trio(&self, raw: &RawTrio) -> Result<Option<MediaEntry>, NormalizeError> {
        let top = self.media(raw.top.as_deref(), false)?;
        let bottom = self.media(raw.bottom.as_deref(), false)?;
        let side = self.media(raw.side.as_deref(), false)?;
        Ok(all_three(top, bottom, side).map(|(top, bottom, side)| {
            MediaEntry::ItemTrio(ProjectMediaTrio {
                top,
                bottom,
                side,
                align: Align::parse(raw.align.as_deref()),
            })
        }))
    }

    /// Normalize a project's media column, keeping block order.
    pub fn media_list(&self, raw: &[RawDocument]) -> Result<Vec<MediaEntry>, NormalizeError> {
        collect_present(raw.iter().map(|entry| match entry {
            RawDocument::ProjectMedia(_) => Ok(self
                .media(Some(entry), true)?
                .map(MediaEntry::ProjectMedia)),
            RawDocument::ItemPair(pair) => self.media_pair(pair),
            RawDocument::ItemTrio(trio) => self.media_trio(trio),
            other => {
                tracing::debug!(kind = ?other.kind(), "skipping media entry");
                Ok(None)
            }
        }))
    }
}
