//! Hero slideshows at the top of a page.

use super::{NormalizeError, Normalizer};
use crate::cloudinary::DeriveOptions;
use crate::raw::{RawHero, RawHeroArtist};
use crate::types::{Hero, HeroArtist, HeroKind};
use serde_json::Value;

impl Normalizer {
    /// Normalize a page hero. A hero without a `_type` was never filled in by
    /// an editor and is `None`.
    pub fn hero(&self, raw: Option<&RawHero>) -> Result<Option<Hero>, NormalizeError> {
        let Some(raw) = raw.filter(|h| h.kind.as_deref().is_some_and(|k| !k.is_empty())) else {
            return Ok(None);
        };
        let still_duration = self.still_duration(raw.still_duration.as_ref());
        let artists = raw
            .artists
            .iter()
            .flatten()
            .map(|artist| self.hero_artist(artist, still_duration))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Hero {
            name: raw.title.clone().unwrap_or_default(),
            subtitle: raw.subtitle.clone(),
            artists,
            scroll_instructions: raw.scroll_instructions.clone(),
        }))
    }

    fn hero_artist(
        &self,
        raw: &RawHeroArtist,
        still_duration: f64,
    ) -> Result<HeroArtist, NormalizeError> {
        Ok(HeroArtist {
            name: raw.artist.clone().unwrap_or_default(),
            image: self.image(
                raw.image_desktop.as_ref(),
                raw.image_mobile.as_ref(),
                DeriveOptions::default(),
            )?,
            kind: match raw.kind.as_deref() {
                Some("video-bg") => HeroKind::VideoBg,
                _ => HeroKind::Image,
            },
            video_bg_src: raw.thumb_vimeo_src.clone(),
            video_bg_src_hd: raw.thumb_vimeo_src_hd.clone(),
            still_duration,
        })
    }

    /// Seconds per still slide: the record's value when it is a non-zero
    /// number (or a string holding one), the configured default otherwise.
    /// Negative values are passed through as the editor entered them.
    fn still_duration(&self, raw: Option<&Value>) -> f64 {
        let parsed = match raw {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|secs| secs.is_finite() && *secs != 0.0)
            .unwrap_or(self.still_duration)
    }
}
