use crate::geometry::Point;
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Groups points into rows of identical y, ordered by ascending y, each row ordered by ascending x.
///
/// Equality of y is exact: points that are meant to share a row must derive their y from the same
/// computation (e.g. the same [`symmetric_arrangement`](crate::packing::symmetric_arrangement)),
/// which makes them bit-identical. An empty input yields no rows.
pub fn organize_by_rows(points: &[Point]) -> Vec<Vec<Point>> {
    points
        .iter()
        .copied()
        .sorted_by_key(|p| (OrderedFloat(p.y().to_mm()), OrderedFloat(p.x().to_mm())))
        .chunk_by(|p| p.y())
        .into_iter()
        .map(|(_, row)| row.collect_vec())
        .collect_vec()
}
