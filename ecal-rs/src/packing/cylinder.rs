use crate::geometry::{Angle, Length, Point, Rotation};
use crate::packing::{Arrangement, symmetric_arrangement};
use crate::util::assertions;
use anyhow::{Result, ensure};

/// Strips arranged side by side around a cylinder (axis along z), their inner faces touching radius `r_inner`.
///
/// Strips are never stretched to fill the requested angular range: the part of the range that cannot hold
/// a whole strip is split evenly between both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct CylinderPacking {
    pub r_inner: Length,
    /// Radius of the outer corners of the strips
    pub r_outer: Length,
    /// Radius at which the strip centers sit
    pub r_center: Length,
    /// Angle subtended by one strip
    pub dphi: Angle,
    /// Start of the covered range (requested start + half the leftover)
    pub phi_start: Angle,
    /// End of the covered range (requested end - half the leftover)
    pub phi_end: Angle,
    /// Strip angles relative to the center of the covered range
    pub arrangement: Arrangement<Angle>,
}

impl CylinderPacking {
    /// * `r` - inner radius
    /// * `phi_range` - requested angular range `[start, end]`
    /// * `strip_width` - full (padded) width of a strip, tangential to the cylinder
    /// * `strip_depth` - full depth of a strip, radial
    pub fn new(r: Length, phi_range: [Angle; 2], strip_width: Length, strip_depth: Length) -> Result<Self> {
        let [phi_min, phi_max] = phi_range;
        ensure!(r > Length::ZERO && r.is_finite(), "cylinder radius must be positive, got {r}");
        ensure!(
            strip_width > Length::ZERO && strip_depth >= Length::ZERO,
            "invalid strip dimensions, width: {strip_width}, depth: {strip_depth}"
        );
        let wanted = phi_max - phi_min;
        ensure!(
            wanted > Angle::ZERO && wanted <= Angle::deg(360.0),
            "invalid angular range [{phi_min}, {phi_max}]"
        );

        let dphi = Angle::subtended(strip_width, r);
        let n_strips = (wanted / dphi).floor() as usize;
        ensure!(
            n_strips > 0,
            "no strips of width {strip_width} fit in [{phi_min}, {phi_max}] at radius {r}"
        );
        let arrangement = symmetric_arrangement(n_strips, dphi);

        let leftover = wanted - arrangement.extent();
        let phi_start = phi_min + leftover / 2.0;
        let phi_end = phi_max - leftover / 2.0;

        // circumscribing radius of the outer corners of a strip
        let r_outer = (r + strip_depth).hypot(strip_width / 2.0);

        let cp = Self {
            r_inner: r,
            r_outer,
            r_center: r + strip_depth / 2.0,
            dphi,
            phi_start,
            phi_end,
            arrangement,
        };
        debug_assert!(assertions::strips_within_covered_range(&cp));
        Ok(cp)
    }

    pub fn n_strips(&self) -> usize {
        self.arrangement.len()
    }

    /// Angle actually covered by strips: `n·dphi`
    pub fn coverage(&self) -> Angle {
        self.arrangement.extent()
    }

    /// Center of the covered range, which equals the center of the requested range
    pub fn phi_mid(&self) -> Angle {
        self.phi_start + self.coverage() / 2.0
    }

    /// (index, angle) of every strip, in arrangement order
    pub fn strip_angles(&self) -> impl Iterator<Item = (i64, Angle)> + '_ {
        // arrangement is centered on phi = 0, shift it onto the covered range
        let shift = self.phi_start + self.coverage() / 2.0;
        self.arrangement.iter().map(move |(i, phi)| (i, phi + shift))
    }

    /// Center of a strip at angle `phi`, in the xy-plane
    pub fn strip_center(&self, phi: Angle) -> Point {
        Point(self.r_center * phi.cos(), self.r_center * phi.sin())
    }

    /// Orientation of a strip at angle `phi`.
    ///
    /// Strips are built flat in the xy-plane, normal along z, length along x. The intrinsic X-Y-Z triple
    /// `(90°, phi - 90°, 90°)` turns the normal radially outward and the length along the cylinder axis
    /// in the convention of the consuming GDML reader. It was found by matching that reader, not derived
    /// for rotations in general: a consumer with another convention needs another triple.
    pub fn strip_rotation(phi: Angle) -> Rotation {
        Rotation::new(Angle::deg(90.0), phi - Angle::deg(90.0), Angle::deg(90.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use itertools::Itertools;

    fn reference() -> CylinderPacking {
        CylinderPacking::new(
            Length::m(2.5),
            [Angle::deg(0.0), Angle::deg(360.0)],
            Length::mm(20.2),
            Length::mm(8.3),
        )
        .unwrap()
    }

    #[test]
    fn full_circle_strip_count() {
        let cp = reference();
        let dphi = 2.0 * (20.2f64 / 5000.0).atan();
        assert!(approx_eq!(f64, cp.dphi.to_rad(), dphi));
        assert_eq!(cp.n_strips(), (2.0 * std::f64::consts::PI / dphi).floor() as usize);
        assert_eq!(cp.n_strips(), 777);
        assert!(cp.coverage() <= Angle::deg(360.0));
        assert!(approx_eq!(f64, (cp.phi_end - cp.phi_start).to_rad(), cp.coverage().to_rad(), epsilon = 1e-12));
    }

    #[test]
    fn outer_radius_encloses_strip_corners() {
        let cp = reference();
        let expected = ((2500.0f64 + 8.3).powi(2) + 10.1f64.powi(2)).sqrt();
        assert!(approx_eq!(f64, cp.r_outer.to_mm(), expected));
        assert!(approx_eq!(f64, cp.r_center.to_mm(), 2500.0 + 4.15));
    }

    #[test]
    fn partial_range_is_centered() {
        let cp = CylinderPacking::new(
            Length::m(1.0),
            [Angle::deg(10.0), Angle::deg(100.0)],
            Length::mm(50.0),
            Length::mm(10.0),
        )
        .unwrap();
        assert!(cp.coverage() <= Angle::deg(90.0));
        assert!(approx_eq!(f64, cp.phi_mid().to_deg(), 55.0, epsilon = 1e-9));

        let angles = cp.strip_angles().map(|(_, a)| a.to_deg()).collect_vec();
        assert_eq!(angles.len(), cp.n_strips());
        let mean = angles.iter().sum::<f64>() / angles.len() as f64;
        assert!(approx_eq!(f64, mean, 55.0, epsilon = 1e-9));
        let half = cp.dphi.to_deg() / 2.0;
        assert!(angles.iter().all(|a| *a - half >= cp.phi_start.to_deg() - 1e-9));
        assert!(angles.iter().all(|a| *a + half <= cp.phi_end.to_deg() + 1e-9));
    }

    #[test]
    fn strips_sit_on_center_radius() {
        let cp = reference();
        for (_, phi) in cp.strip_angles().take(10) {
            let c = cp.strip_center(phi);
            assert!(approx_eq!(f64, c.radius().to_mm(), cp.r_center.to_mm(), epsilon = 1e-9));
        }
    }

    #[test]
    fn rotation_points_normal_outward() {
        let phi = Angle::deg(42.0);
        let r = CylinderPacking::strip_rotation(phi);
        let n = r.apply([0.0, 0.0, 1.0]);
        assert!(approx_eq!(f64, n[0], phi.cos(), epsilon = 1e-12));
        assert!(approx_eq!(f64, n[1], phi.sin(), epsilon = 1e-12));
        assert!(approx_eq!(f64, r.y.to_deg(), -48.0, epsilon = 1e-12));
    }

    #[test]
    fn too_narrow_range_is_an_error() {
        let res = CylinderPacking::new(
            Length::m(1.0),
            [Angle::deg(0.0), Angle::deg(0.5)],
            Length::mm(50.0),
            Length::mm(10.0),
        );
        assert!(res.is_err());
    }
}
