use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric value tagged with a physical dimension.
///
/// Only quantities of the same dimension can be added or subtracted. Dividing two quantities of the
/// same dimension yields a dimensionless `f64`.
pub trait Quantity:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Div<Self, Output = f64>
{
    const ZERO: Self;

    /// The value in the unit it is stored in (mm or rad), stripped of its dimension.
    fn raw(self) -> f64;
}

/// Length, stored in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Length(f64);

/// Angle, stored in radians.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub const fn mm(value: f64) -> Self {
        Length(value)
    }

    pub const fn cm(value: f64) -> Self {
        Length(value * 10.0)
    }

    pub const fn m(value: f64) -> Self {
        Length(value * 1000.0)
    }

    pub fn to_mm(self) -> f64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Length(self.0.abs())
    }

    /// `sqrt(self² + other²)`, computed on the unit-stripped values and re-tagged as a length.
    pub fn hypot(self, other: Length) -> Length {
        Length(self.0.hypot(other.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn deg(value: f64) -> Self {
        Angle(value.to_radians())
    }

    pub const fn rad(value: f64) -> Self {
        Angle(value)
    }

    pub fn to_deg(self) -> f64 {
        self.0.to_degrees()
    }

    pub fn to_rad(self) -> f64 {
        self.0
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// Angle subtended by a chord of length `chord` whose midpoint lies at distance `radius` from the origin:
    /// `2·atan(chord / 2·radius)`.
    pub fn subtended(chord: Length, radius: Length) -> Angle {
        Angle(2.0 * (chord / (radius * 2.0)).atan())
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

macro_rules! impl_quantity_ops {
    ($t:ident) => {
        impl Quantity for $t {
            const ZERO: Self = $t(0.0);

            fn raw(self) -> f64 {
                self.0
            }
        }

        impl Add for $t {
            type Output = $t;
            fn add(self, rhs: $t) -> $t {
                $t(self.0 + rhs.0)
            }
        }

        impl AddAssign for $t {
            fn add_assign(&mut self, rhs: $t) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $t {
            type Output = $t;
            fn sub(self, rhs: $t) -> $t {
                $t(self.0 - rhs.0)
            }
        }

        impl SubAssign for $t {
            fn sub_assign(&mut self, rhs: $t) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $t {
            type Output = $t;
            fn neg(self) -> $t {
                $t(-self.0)
            }
        }

        impl Mul<f64> for $t {
            type Output = $t;
            fn mul(self, rhs: f64) -> $t {
                $t(self.0 * rhs)
            }
        }

        impl Mul<$t> for f64 {
            type Output = $t;
            fn mul(self, rhs: $t) -> $t {
                $t(self * rhs.0)
            }
        }

        impl Div<f64> for $t {
            type Output = $t;
            fn div(self, rhs: f64) -> $t {
                $t(self.0 / rhs)
            }
        }

        impl Div<$t> for $t {
            type Output = f64;
            fn div(self, rhs: $t) -> f64 {
                self.0 / rhs.0
            }
        }

        impl Sum for $t {
            fn sum<I: Iterator<Item = $t>>(iter: I) -> $t {
                iter.fold($t::ZERO, |acc, q| acc + q)
            }
        }
    };
}

impl_quantity_ops!(Length);
impl_quantity_ops!(Angle);

impl Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)?;
        write!(f, "mm")
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_deg(), f)?;
        write!(f, "deg")
    }
}

// Lengths are (de)serialized as millimetres, angles as degrees.

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Length::mm)
    }
}

impl Serialize for Angle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_deg())
    }
}

impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Angle::deg)
    }
}
