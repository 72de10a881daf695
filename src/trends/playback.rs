//! Year playback state. Each operation returns the next state; nothing is
//! mutated in place.

use serde::{Deserialize, Serialize};

use crate::config::YearBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playback {
    pub year: i32,
    pub playing: bool,
}

impl Playback {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            playing: false,
        }
    }

    pub fn toggle(self) -> Self {
        Self {
            playing: !self.playing,
            ..self
        }
    }

    pub fn stop(self) -> Self {
        Self {
            playing: false,
            ..self
        }
    }

    /// Advances one year while playing, wrapping past the last year back to
    /// the first. A paused playback is returned unchanged.
    pub fn tick(self, bounds: YearBounds) -> Self {
        if !self.playing {
            return self;
        }
        let next = self.year + 1;
        Self {
            year: if next > bounds.max { bounds.min } else { next },
            ..self
        }
    }

    /// Jumps to the year at `ratio` along the slider; the ratio is clamped
    /// to `[0, 1]`.
    pub fn scrub(self, ratio: f64, bounds: YearBounds) -> Self {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let year = (bounds.min as f64 + ratio * bounds.span() as f64).round() as i32;
        Self { year, ..self }
    }

    /// Slider position of the current year.
    pub fn ratio(&self, bounds: YearBounds) -> f64 {
        if bounds.span() == 0 {
            return 0.0;
        }
        f64::from(self.year - bounds.min) / f64::from(bounds.span())
    }
}
