use crate::geometry::{Angle, Length, Point, Quantity};
use crate::packing::{Arrangement, CylinderPacking, DiscPacking, tile_inside_circle};
use crate::util::FPA;
use itertools::Itertools;
use log::error;
use ordered_float::OrderedFloat;
//Various checks to verify correctness of the packings
//Used in debug_assertion!() blocks

const TOLERANCE: f64 = 1e-9;

pub fn arrangement_is_symmetric<Q: Quantity>(arr: &Arrangement<Q>) -> bool {
    let sum = arr.offsets().map(|o| o.raw()).sum::<f64>();
    if FPA(sum) != FPA(0.0) && sum.abs() > 1e-9 * arr.extent().raw().abs() {
        error!("arrangement is not centered, sum of offsets: {sum}");
        return false;
    }
    let sorted = arr
        .offsets()
        .map(|o| o.raw())
        .sorted_by_key(|o| OrderedFloat(*o))
        .collect_vec();
    let pitch = arr.pitch().raw();
    sorted
        .iter()
        .tuple_windows()
        .all(|(a, b)| ((b - a) - pitch).abs() <= 1e-9 * pitch.abs().max(1.0))
}

pub fn rows_are_ordered(rows: &[Vec<Point>]) -> bool {
    for row in rows {
        let Some(first) = row.first() else {
            error!("empty row");
            return false;
        };
        if row.iter().any(|p| p.y() != first.y()) {
            error!("row at y = {} contains points with a different y", first.y());
            return false;
        }
        if !row.iter().tuple_windows().all(|(a, b)| a.x() <= b.x()) {
            error!("row at y = {} is not sorted in x", first.y());
            return false;
        }
    }
    rows.iter()
        .map(|r| r[0].y())
        .tuple_windows()
        .all(|(a, b)| a < b)
}

pub fn strips_within_covered_range(cp: &CylinderPacking) -> bool {
    let half = cp.dphi / 2.0;
    let tol = Angle::rad(TOLERANCE);
    cp.strip_angles().all(|(i, phi)| {
        let inside = phi - half >= cp.phi_start - tol && phi + half <= cp.phi_end + tol;
        if !inside {
            error!("strip {i} at {phi} sticks out of [{}, {}]", cp.phi_start, cp.phi_end);
        }
        inside
    })
}

pub fn tiles_inside_disc(dp: &DiscPacking) -> bool {
    let r_max = dp.r_disc + Length::mm(TOLERANCE * dp.r_disc.to_mm());
    dp.points().all(|p| {
        let inside = tile_inside_circle(*p, dp.pitch, r_max);
        if !inside {
            error!("tile at {p} sticks out of the disc of radius {}", dp.r_disc);
        }
        inside
    })
}

/// Children (given by their center offset along one axis and their half-width) do not stick out of `[-half, half]`.
pub fn children_within_extent(offsets: impl IntoIterator<Item = Length>, child_half: Length, half: Length) -> bool {
    let tol = Length::mm(TOLERANCE * half.to_mm().abs().max(1.0));
    offsets
        .into_iter()
        .all(|o| o - child_half >= -half - tol && o + child_half <= half + tol)
}
