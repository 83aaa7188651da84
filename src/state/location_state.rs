// ============================================================================
// LOCATION STATE - Latest known user position
// ============================================================================
// Three sources feed one value: a fast (maybe cached) fix, a precise fix and
// the continuous watch. A fast fix that arrives after a precise one is stale
// and must not move the marker back.
// ============================================================================

use crate::models::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FixQuality {
    #[default]
    NoFix,
    FastFix,
    PreciseFix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixSource {
    Fast,
    Precise,
    Watch,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationTracker {
    quality: FixQuality,
    latest: Option<LatLng>,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality(&self) -> FixQuality {
        self.quality
    }

    pub fn latest(&self) -> Option<LatLng> {
        self.latest
    }

    /// Record a fix. Returns false when the fix is dropped.
    pub fn accept(&mut self, source: FixSource, position: LatLng) -> bool {
        if !position.is_valid() {
            return false;
        }

        let quality = match source {
            FixSource::Fast if self.quality != FixQuality::NoFix => return false,
            FixSource::Fast => FixQuality::FastFix,
            FixSource::Precise | FixSource::Watch => FixQuality::PreciseFix,
        };

        self.quality = quality;
        self.latest = Some(position);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
