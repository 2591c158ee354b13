use crate::geometry::Length;
use crate::packing::{Arrangement, symmetric_arrangement};
use anyhow::{Result, ensure};

/// Strips stacked side by side in a flat rectangle of `width` (along the strips) by `height` (across them).
#[derive(Clone, Debug, PartialEq)]
pub struct PlanePacking {
    pub width: Length,
    pub height: Length,
    /// Strip offsets along y
    pub arrangement: Arrangement<Length>,
}

impl PlanePacking {
    /// * `strip_length` - full length of a strip, must not exceed `width`
    /// * `strip_pitch` - full (padded) width of a strip
    pub fn new(width: Length, height: Length, strip_length: Length, strip_pitch: Length) -> Result<Self> {
        ensure!(
            strip_pitch > Length::ZERO && strip_pitch.is_finite(),
            "strip pitch must be positive, got {strip_pitch}"
        );
        ensure!(
            strip_length <= width,
            "strips of length {strip_length} do not fit in a plane of width {width}"
        );
        ensure!(height.is_finite(), "plane height is not finite: {height}");
        let n_strips = (height / strip_pitch).floor().max(0.0) as usize;
        ensure!(
            n_strips > 0,
            "no strips of pitch {strip_pitch} fit in a plane of height {height}"
        );
        Ok(Self {
            width,
            height,
            arrangement: symmetric_arrangement(n_strips, strip_pitch),
        })
    }

    pub fn n_strips(&self) -> usize {
        self.arrangement.len()
    }

    /// Height actually occupied by strips
    pub fn occupied_height(&self) -> Length {
        self.arrangement.extent()
    }
}
