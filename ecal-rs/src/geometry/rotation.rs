use std::fmt::Display;

use crate::geometry::Angle;

/// Orientation of a placed volume, expressed as three intrinsic rotations:
/// first about X, then about the new Y, then about the newer Z.
///
/// This is the convention of the GDML reader that consumes the placements (CLHEP `HepRotation`:
/// `rotateX`, `rotateY`, `rotateZ` in that order). The reader treats the composed matrix as a frame
/// rotation, the volume itself is turned by its transpose. See [`Rotation::object_matrix`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    pub x: Angle,
    pub y: Angle,
    pub z: Angle,
}

impl Rotation {
    pub fn new(x: Angle, y: Angle, z: Angle) -> Self {
        Self { x, y, z }
    }

    pub const fn identity() -> Self {
        Self {
            x: Angle::ZERO,
            y: Angle::ZERO,
            z: Angle::ZERO,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// `Rz(z)·Ry(y)·Rx(x)`
    pub fn frame_matrix(&self) -> [[f64; 3]; 3] {
        dot_prod(&rot_z(self.z), &dot_prod(&rot_y(self.y), &rot_x(self.x)))
    }

    /// Rotation applied to the placed volume (the transpose of [`Rotation::frame_matrix`]).
    pub fn object_matrix(&self) -> [[f64; 3]; 3] {
        transpose(&self.frame_matrix())
    }

    /// Rotates a vector expressed in the volume's local frame into its mother's frame.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let m = self.object_matrix();
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x: {:.3}°, y: {:.3}°, z: {:.3}°",
            self.x.to_deg(),
            self.y.to_deg(),
            self.z.to_deg()
        )
    }
}

fn rot_x(angle: Angle) -> [[f64; 3]; 3] {
    let (sin, cos) = angle.to_rad().sin_cos();
    [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]]
}

fn rot_y(angle: Angle) -> [[f64; 3]; 3] {
    let (sin, cos) = angle.to_rad().sin_cos();
    [[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]]
}

fn rot_z(angle: Angle) -> [[f64; 3]; 3] {
    let (sin, cos) = angle.to_rad().sin_cos();
    [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]]
}

fn transpose(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

#[inline(always)]
fn dot_prod(l: &[[f64; 3]; 3], r: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [
            l[0][0] * r[0][0] + l[0][1] * r[1][0] + l[0][2] * r[2][0],
            l[0][0] * r[0][1] + l[0][1] * r[1][1] + l[0][2] * r[2][1],
            l[0][0] * r[0][2] + l[0][1] * r[1][2] + l[0][2] * r[2][2],
        ],
        [
            l[1][0] * r[0][0] + l[1][1] * r[1][0] + l[1][2] * r[2][0],
            l[1][0] * r[0][1] + l[1][1] * r[1][1] + l[1][2] * r[2][1],
            l[1][0] * r[0][2] + l[1][1] * r[1][2] + l[1][2] * r[2][2],
        ],
        [
            l[2][0] * r[0][0] + l[2][1] * r[1][0] + l[2][2] * r[2][0],
            l[2][0] * r[0][1] + l[2][1] * r[1][1] + l[2][2] * r[2][1],
            l[2][0] * r[0][2] + l[2][1] * r[1][2] + l[2][2] * r[2][2],
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn assert_vec_eq(a: [f64; 3], b: [f64; 3]) {
        for i in 0..3 {
            assert!(approx_eq!(f64, a[i], b[i], epsilon = 1e-12), "{a:?} != {b:?}");
        }
    }

    #[test]
    fn identity_leaves_vectors_alone() {
        let r = Rotation::identity();
        assert!(r.is_identity());
        assert_vec_eq(r.apply([1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn object_matrix_is_orthonormal() {
        let r = Rotation::new(Angle::deg(90.0), Angle::deg(-17.0), Angle::deg(90.0));
        let m = r.object_matrix();
        let mt = r.frame_matrix();
        let p = dot_prod(&m, &mt);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(approx_eq!(f64, p[i][j], expected, epsilon = 1e-12));
            }
        }
    }

    #[test]
    fn radial_triple_orients_strip() {
        for phi_deg in [0.0, 30.0, 90.0, 135.0, 210.0, 359.5] {
            let phi = Angle::deg(phi_deg);
            let r = Rotation::new(Angle::deg(90.0), phi - Angle::deg(90.0), Angle::deg(90.0));
            // strip normal -> radial direction, strip length -> cylinder axis
            assert_vec_eq(r.apply([0.0, 0.0, 1.0]), [phi.cos(), phi.sin(), 0.0]);
            assert_vec_eq(r.apply([1.0, 0.0, 0.0]), [0.0, 0.0, 1.0]);
        }
    }
}
