use crate::geometry::Length;
use crate::packing::{Arrangement, symmetric_arrangement};
use anyhow::{Result, ensure};

/// Upper bound on the number of tiles in one strip
pub const MAX_TILES: usize = 1 << 20;

/// How many tiles go into a strip and where, along the strip's length.
#[derive(Clone, Debug, PartialEq)]
pub struct StripPacking {
    /// Center-to-center distance between tiles: tile width + gap
    pub pitch: Length,
    pub arrangement: Arrangement<Length>,
}

impl StripPacking {
    /// * `length` - length budget of the strip
    /// * `tile_width` - full width of one tile along the strip
    /// * `gap` - space between adjacent tiles
    /// * `n_tiles` - explicit number of tiles, derived from `length` if `None`
    ///
    /// The derived count is rounded down: the occupied length never exceeds `length`.
    pub fn new(length: Length, tile_width: Length, gap: Length, n_tiles: Option<usize>) -> Result<Self> {
        let pitch = tile_width + gap;
        ensure!(
            pitch > Length::ZERO && pitch.is_finite(),
            "tile pitch must be positive, tile width: {tile_width}, gap: {gap}"
        );
        ensure!(gap >= Length::ZERO, "gap between tiles must not be negative: {gap}");
        let n_tiles = match n_tiles {
            Some(n) => n,
            None => {
                ensure!(length.is_finite(), "strip length is not finite: {length}");
                (length / pitch).floor().max(0.0) as usize
            }
        };
        ensure!(
            n_tiles > 0,
            "no tiles fit in a strip of length {length} with pitch {pitch}"
        );
        ensure!(
            n_tiles <= MAX_TILES,
            "{n_tiles} tiles requested, a strip holds at most {MAX_TILES}"
        );
        Ok(Self {
            pitch,
            arrangement: symmetric_arrangement(n_tiles, pitch),
        })
    }

    pub fn n_tiles(&self) -> usize {
        self.arrangement.len()
    }

    /// `n_tiles·pitch`
    pub fn occupied_length(&self) -> Length {
        self.arrangement.extent()
    }
}
