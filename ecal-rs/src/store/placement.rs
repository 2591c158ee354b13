use crate::geometry::{Length, Rotation};
use crate::store::VolumeKey;
use slotmap::new_key_type;

new_key_type! {
    /// Unique key for each [`Position`] in a [`GeoRegistry`](crate::store::GeoRegistry)
    pub struct PositionKey;
    /// Unique key for each [`RotationRecord`] in a [`GeoRegistry`](crate::store::GeoRegistry)
    pub struct RotationKey;
    /// Unique key for each [`Placement`] in a [`GeoRegistry`](crate::store::GeoRegistry)
    pub struct PlacementKey;
}

/// Named offset, relative to the center of the mother volume
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub name: String,
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RotationRecord {
    pub name: String,
    pub rotation: Rotation,
}

/// A volume placed at a position (and orientation) inside some mother volume.
/// Created once, never modified afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub name: String,
    /// The placed volume, shared with all other placements of it
    pub volume: VolumeKey,
    pub position: PositionKey,
    pub rotation: Option<RotationKey>,
    pub copy_number: Option<usize>,
}
