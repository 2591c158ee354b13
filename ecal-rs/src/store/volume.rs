use crate::store::{PlacementKey, ShapeKey};
use slotmap::new_key_type;

new_key_type! {
    /// Unique key for each [`Volume`] in a [`GeoRegistry`](crate::store::GeoRegistry)
    pub struct VolumeKey;
}

/// A solid filled with a material, which can hold placements of other volumes.
#[derive(Clone, Debug)]
pub struct Volume {
    pub name: String,
    pub material: String,
    pub shape: ShapeKey,
    placements: Vec<PlacementKey>,
}

impl Volume {
    pub fn new(name: String, material: String, shape: ShapeKey) -> Self {
        Self {
            name,
            material,
            shape,
            placements: vec![],
        }
    }

    /// Child placements, in the order they were appended
    pub fn placements(&self) -> &[PlacementKey] {
        &self.placements
    }

    pub(crate) fn push_placement(&mut self, pk: PlacementKey) {
        self.placements.push(pk);
    }
}
