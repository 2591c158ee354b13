mod placement;
mod registry;
mod shape;
mod volume;

#[doc(inline)]
pub use placement::Placement;
#[doc(inline)]
pub use placement::PlacementKey;
#[doc(inline)]
pub use placement::Position;
#[doc(inline)]
pub use placement::PositionKey;
#[doc(inline)]
pub use placement::RotationKey;
#[doc(inline)]
pub use placement::RotationRecord;
#[doc(inline)]
pub use registry::GeoRegistry;
#[doc(inline)]
pub use shape::Footprint;
#[doc(inline)]
pub use shape::Shape;
#[doc(inline)]
pub use shape::ShapeKey;
#[doc(inline)]
pub use shape::Solid;
#[doc(inline)]
pub use volume::Volume;
#[doc(inline)]
pub use volume::VolumeKey;

use crate::geometry::{Angle, Length, Rotation};
use anyhow::Result;

/// Interface through which the builders record solids, volumes and placements.
///
/// Volumes own their list of child placements, which only ever grows.
/// Placements refer to (never own) the child volume they place, so a single volume can be instanced many times.
pub trait GeoStore {
    /// Box solid from its half-extents.
    fn make_box(&mut self, name: &str, dx: Length, dy: Length, dz: Length) -> Result<ShapeKey>;

    /// Cylindrical shell (or sector of one) with half-length `dz` along the z-axis.
    fn make_tube(
        &mut self,
        name: &str,
        rmin: Length,
        rmax: Length,
        sphi: Angle,
        dphi: Angle,
        dz: Length,
    ) -> Result<ShapeKey>;

    /// Binds a solid to a material, producing a volume without any children yet.
    fn make_volume(&mut self, name: &str, material: &str, shape: ShapeKey) -> Result<VolumeKey>;

    fn make_position(&mut self, name: &str, x: Length, y: Length, z: Length) -> Result<PositionKey>;

    fn make_rotation(&mut self, name: &str, rotation: Rotation) -> Result<RotationKey>;

    /// Places `volume` at `position` (and `rotation`, if any). Does not attach it to a mother yet.
    fn make_placement(
        &mut self,
        name: &str,
        volume: VolumeKey,
        position: PositionKey,
        rotation: Option<RotationKey>,
        copy_number: Option<usize>,
    ) -> Result<PlacementKey>;

    /// Appends a placement to the child list of `mother`.
    fn append_placement(&mut self, mother: VolumeKey, placement: PlacementKey) -> Result<()>;

    /// The shape of a previously constructed volume.
    fn lookup_shape(&self, volume: VolumeKey) -> Result<&Shape>;

    fn volume(&self, volume: VolumeKey) -> Result<&Volume>;
}
