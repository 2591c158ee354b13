use crate::geometry::{Angle, Length};
use anyhow::{Result, bail};
use slotmap::new_key_type;

new_key_type! {
    /// Unique key for each [`Shape`] in a [`GeoRegistry`](crate::store::GeoRegistry)
    pub struct ShapeKey;
}

/// Named solid
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub name: String,
    pub solid: Solid,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Solid {
    /// Axis-aligned box, given by its half-extents
    Box { dx: Length, dy: Length, dz: Length },
    /// Cylindrical shell from `rmin` to `rmax`, covering `[sphi, sphi + dphi]`, half-length `dz`
    Tube {
        rmin: Length,
        rmax: Length,
        sphi: Angle,
        dphi: Angle,
        dz: Length,
    },
}

/// Half-extents of a rectangular unit, used by parent builders to compute their packing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub dx: Length,
    pub dy: Length,
    pub dz: Length,
}

impl Footprint {
    pub fn width(&self) -> Length {
        self.dx * 2.0
    }

    pub fn height(&self) -> Length {
        self.dy * 2.0
    }

    pub fn depth(&self) -> Length {
        self.dz * 2.0
    }
}

impl Shape {
    /// Footprint of a box shape. Fails for any other solid.
    pub fn footprint(&self) -> Result<Footprint> {
        match self.solid {
            Solid::Box { dx, dy, dz } => Ok(Footprint { dx, dy, dz }),
            Solid::Tube { .. } => bail!("shape {} is a tube and has no rectangular footprint", self.name),
        }
    }
}
