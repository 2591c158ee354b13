use std::f64::consts::SQRT_2;

use crate::geometry::{Length, Point};
use crate::packing::{Arrangement, organize_by_rows, symmetric_arrangement};
use crate::util::assertions;
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::debug;

/// Square tiles packed inside a circle of radius `r_disc`.
///
/// The largest grid square that fits inside the circle is filled first. The caps between its edges and
/// the circle are then filled column by column (for one edge) and mirrored onto the other three edges.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscPacking {
    pub r_disc: Length,
    /// Tile pitch, identical in x and y
    pub pitch: Length,
    /// Arrangement of the inscribed square's columns (and, by symmetry, rows)
    pub square: Arrangement<Length>,
    /// Tiles added beyond the top edge of the inscribed square, before mirroring
    pub cap: Vec<Point>,
    /// All tile centers, grouped by row (ascending y), each row ascending in x
    pub rows: Vec<Vec<Point>>,
}

impl DiscPacking {
    pub fn new(r_disc: Length, pitch: Length) -> Result<Self> {
        ensure!(
            r_disc > Length::ZERO && r_disc.is_finite(),
            "disc radius must be positive, got {r_disc}"
        );
        ensure!(
            pitch > Length::ZERO && pitch.is_finite(),
            "tile pitch must be positive, got {pitch}"
        );

        // diagonal bound: a square of side n·pitch fits in the circle if n·pitch·√2 <= 2·r
        let n_edge_tiles = (SQRT_2 * r_disc / pitch).floor() as usize;
        ensure!(
            n_edge_tiles > 0,
            "no tile of pitch {pitch} fits inside a disc of radius {r_disc}"
        );
        let square = symmetric_arrangement(n_edge_tiles, pitch);
        let y_top = square.max_offset().context("inscribed square is empty")?;

        let cap = square
            .offsets()
            .flat_map(|x| {
                (1..)
                    .map(move |k| Point(x, y_top + pitch * k as f64))
                    .take_while(move |p| tile_inside_circle(*p, pitch, r_disc))
            })
            .collect_vec();

        let inscribed = square
            .offsets()
            .cartesian_product(square.offsets().collect_vec())
            .map(Point::from);
        let mirrored = cap.iter().flat_map(|&Point(x, y)| {
            [Point(x, y), Point(x, -y), Point(y, x), Point(-y, x)]
        });
        let all = inscribed.chain(mirrored).collect_vec();

        debug!(
            "[DISC] {} tiles in inscribed square, {} outside of it",
            n_edge_tiles * n_edge_tiles,
            4 * cap.len()
        );

        let dp = Self {
            r_disc,
            pitch,
            square,
            cap,
            rows: organize_by_rows(&all),
        };
        debug_assert!(assertions::rows_are_ordered(&dp.rows));
        debug_assert!(assertions::tiles_inside_disc(&dp));
        Ok(dp)
    }

    pub fn n_edge_tiles(&self) -> usize {
        self.square.len()
    }

    pub fn n_tiles(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    /// Half-diagonal of the inscribed square, i.e. the radius of the circle circumscribing it
    pub fn r_inscribed(&self) -> Length {
        self.square.extent() / SQRT_2
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.rows.iter().flatten()
    }
}

/// True if the square tile of width `width` centered on `center` lies inside the circle of radius `r`
/// (all four corners within `r` of the origin).
pub fn tile_inside_circle(center: Point, width: Length, r: Length) -> bool {
    center
        .square_corners(width / 2.0)
        .iter()
        .all(|c| c.radius() <= r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use std::collections::HashSet;

    fn key(p: &Point) -> (u64, u64) {
        // + 0.0 folds -0.0 onto 0.0
        ((p.x().to_mm() + 0.0).to_bits(), (p.y().to_mm() + 0.0).to_bits())
    }

    #[test]
    fn small_disc() -> Result<()> {
        let dp = DiscPacking::new(Length::mm(100.0), Length::mm(20.0))?;
        assert_eq!(dp.n_edge_tiles(), 7);
        assert_eq!(dp.cap.len(), 3);
        assert_eq!(dp.n_tiles(), 49 + 12);
        let row_sizes = dp.rows.iter().map(|r| r.len()).collect_vec();
        assert_eq!(row_sizes, vec![3, 7, 7, 9, 9, 9, 7, 7, 3]);
        assert!(approx_eq!(f64, dp.r_inscribed().to_mm(), 140.0 / SQRT_2));
        Ok(())
    }

    #[test]
    fn even_edge_disc() -> Result<()> {
        let dp = DiscPacking::new(Length::mm(100.0), Length::mm(30.1))?;
        assert_eq!(dp.n_edge_tiles(), 4);
        assert_eq!(dp.n_tiles(), 24);
        let row_sizes = dp.rows.iter().map(|r| r.len()).collect_vec();
        assert_eq!(row_sizes, vec![2, 4, 6, 6, 4, 2]);
        Ok(())
    }

    #[test]
    fn tiles_are_unique_and_inside() -> Result<()> {
        let r = Length::m(1.0);
        let pitch = Length::mm(30.1);
        let dp = DiscPacking::new(r, pitch)?;
        assert_eq!(dp.n_edge_tiles(), 46);
        assert_eq!(dp.n_tiles(), 46 * 46 + 4 * 302);

        let unique = dp.points().map(key).collect::<HashSet<_>>();
        assert_eq!(unique.len(), dp.n_tiles());
        assert!(dp.points().all(|p| tile_inside_circle(*p, pitch, r)));
        Ok(())
    }

    #[test]
    fn layout_is_symmetric() -> Result<()> {
        let dp = DiscPacking::new(Length::mm(250.0), Length::mm(20.0))?;
        let set = dp.points().map(key).collect::<HashSet<_>>();
        for &Point(x, y) in dp.points() {
            for q in [Point(-x, y), Point(x, -y), Point(y, x)] {
                assert!(set.contains(&key(&q)), "missing mirror image of ({x}, {y})");
            }
        }
        Ok(())
    }

    #[test]
    fn corner_test() {
        let w = Length::mm(20.0);
        assert!(tile_inside_circle(Point(Length::ZERO, Length::mm(80.0)), w, Length::mm(100.0)));
        assert!(!tile_inside_circle(Point(Length::mm(40.0), Length::mm(80.0)), w, Length::mm(100.0)));
    }

    #[test]
    fn disc_smaller_than_a_tile_is_an_error() {
        assert!(DiscPacking::new(Length::mm(10.0), Length::mm(20.0)).is_err());
    }
}
