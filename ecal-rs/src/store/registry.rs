use std::collections::HashSet;

use crate::geometry::{Angle, Length, Rotation};
use crate::store::{
    GeoStore, Placement, PlacementKey, Position, PositionKey, RotationKey, RotationRecord, Shape,
    ShapeKey, Solid, Volume, VolumeKey,
};
use anyhow::{Context, Result, ensure};
use log::trace;
use slotmap::SlotMap;

/// In-memory [`GeoStore`]: every record lives in an arena and is referred to by key.
/// Names are unique per kind of record.
#[derive(Clone, Debug, Default)]
pub struct GeoRegistry {
    shapes: SlotMap<ShapeKey, Shape>,
    volumes: SlotMap<VolumeKey, Volume>,
    positions: SlotMap<PositionKey, Position>,
    rotations: SlotMap<RotationKey, RotationRecord>,
    placements: SlotMap<PlacementKey, Placement>,
    names: Names,
}

#[derive(Clone, Debug, Default)]
struct Names {
    shapes: HashSet<String>,
    volumes: HashSet<String>,
    positions: HashSet<String>,
    rotations: HashSet<String>,
    placements: HashSet<String>,
}

impl GeoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &SlotMap<ShapeKey, Shape> {
        &self.shapes
    }

    pub fn volumes(&self) -> &SlotMap<VolumeKey, Volume> {
        &self.volumes
    }

    pub fn positions(&self) -> &SlotMap<PositionKey, Position> {
        &self.positions
    }

    pub fn rotations(&self) -> &SlotMap<RotationKey, RotationRecord> {
        &self.rotations
    }

    pub fn placements(&self) -> &SlotMap<PlacementKey, Placement> {
        &self.placements
    }

    pub fn volume_by_name(&self, name: &str) -> Option<VolumeKey> {
        self.volumes
            .iter()
            .find(|(_, v)| v.name == name)
            .map(|(vk, _)| vk)
    }

    /// The placements of `mother`, resolved, in the order they were appended.
    pub fn children(&self, mother: VolumeKey) -> Result<Vec<&Placement>> {
        self.volume(mother)?
            .placements()
            .iter()
            .map(|pk| {
                self.placements
                    .get(*pk)
                    .context("volume refers to an unknown placement")
            })
            .collect()
    }

    /// Position of a placement, looked up through its key
    pub fn position_of(&self, placement: &Placement) -> Result<&Position> {
        self.positions
            .get(placement.position)
            .with_context(|| format!("placement {} refers to an unknown position", placement.name))
    }

    /// Rotation of a placement, identity if it has none
    pub fn rotation_of(&self, placement: &Placement) -> Result<Rotation> {
        match placement.rotation {
            None => Ok(Rotation::identity()),
            Some(rk) => self
                .rotations
                .get(rk)
                .map(|r| r.rotation)
                .with_context(|| format!("placement {} refers to an unknown rotation", placement.name)),
        }
    }

    fn insert_shape(&mut self, shape: Shape) -> Result<ShapeKey> {
        claim_name(&mut self.names.shapes, &shape.name, "shape")?;
        trace!("[REG] shape {}: {:?}", shape.name, shape.solid);
        Ok(self.shapes.insert(shape))
    }
}

impl GeoStore for GeoRegistry {
    fn make_box(&mut self, name: &str, dx: Length, dy: Length, dz: Length) -> Result<ShapeKey> {
        for (label, v) in [("dx", dx), ("dy", dy), ("dz", dz)] {
            ensure!(
                v.is_finite() && v >= Length::ZERO,
                "box {name}: {label} must be finite and non-negative, got {v}"
            );
        }
        self.insert_shape(Shape {
            name: name.to_string(),
            solid: Solid::Box { dx, dy, dz },
        })
    }

    fn make_tube(
        &mut self,
        name: &str,
        rmin: Length,
        rmax: Length,
        sphi: Angle,
        dphi: Angle,
        dz: Length,
    ) -> Result<ShapeKey> {
        ensure!(
            rmin.is_finite() && rmax.is_finite() && rmin >= Length::ZERO && rmin < rmax,
            "tube {name}: invalid radii, rmin: {rmin}, rmax: {rmax}"
        );
        ensure!(
            sphi.is_finite() && dphi > Angle::ZERO && dphi <= Angle::deg(360.0),
            "tube {name}: invalid angular range, sphi: {sphi}, dphi: {dphi}"
        );
        ensure!(
            dz.is_finite() && dz >= Length::ZERO,
            "tube {name}: dz must be finite and non-negative, got {dz}"
        );
        self.insert_shape(Shape {
            name: name.to_string(),
            solid: Solid::Tube {
                rmin,
                rmax,
                sphi,
                dphi,
                dz,
            },
        })
    }

    fn make_volume(&mut self, name: &str, material: &str, shape: ShapeKey) -> Result<VolumeKey> {
        ensure!(
            self.shapes.contains_key(shape),
            "volume {name} refers to an unknown shape"
        );
        ensure!(!material.is_empty(), "volume {name} has no material");
        claim_name(&mut self.names.volumes, name, "volume")?;
        Ok(self.volumes.insert(Volume::new(
            name.to_string(),
            material.to_string(),
            shape,
        )))
    }

    fn make_position(&mut self, name: &str, x: Length, y: Length, z: Length) -> Result<PositionKey> {
        ensure!(
            x.is_finite() && y.is_finite() && z.is_finite(),
            "position {name} is not finite: ({x}, {y}, {z})"
        );
        claim_name(&mut self.names.positions, name, "position")?;
        Ok(self.positions.insert(Position {
            name: name.to_string(),
            x,
            y,
            z,
        }))
    }

    fn make_rotation(&mut self, name: &str, rotation: Rotation) -> Result<RotationKey> {
        ensure!(
            rotation.x.is_finite() && rotation.y.is_finite() && rotation.z.is_finite(),
            "rotation {name} is not finite: {rotation}"
        );
        claim_name(&mut self.names.rotations, name, "rotation")?;
        Ok(self.rotations.insert(RotationRecord {
            name: name.to_string(),
            rotation,
        }))
    }

    fn make_placement(
        &mut self,
        name: &str,
        volume: VolumeKey,
        position: PositionKey,
        rotation: Option<RotationKey>,
        copy_number: Option<usize>,
    ) -> Result<PlacementKey> {
        ensure!(
            self.volumes.contains_key(volume),
            "placement {name} refers to an unknown volume"
        );
        ensure!(
            self.positions.contains_key(position),
            "placement {name} refers to an unknown position"
        );
        if let Some(rk) = rotation {
            ensure!(
                self.rotations.contains_key(rk),
                "placement {name} refers to an unknown rotation"
            );
        }
        claim_name(&mut self.names.placements, name, "placement")?;
        Ok(self.placements.insert(Placement {
            name: name.to_string(),
            volume,
            position,
            rotation,
            copy_number,
        }))
    }

    fn append_placement(&mut self, mother: VolumeKey, placement: PlacementKey) -> Result<()> {
        let child = self
            .placements
            .get(placement)
            .context("cannot append an unknown placement")?
            .volume;
        ensure!(child != mother, "a volume cannot be placed inside itself");
        self.volumes
            .get_mut(mother)
            .context("cannot append a placement to an unknown mother volume")?
            .push_placement(placement);
        Ok(())
    }

    fn lookup_shape(&self, volume: VolumeKey) -> Result<&Shape> {
        let v = self.volume(volume)?;
        self.shapes
            .get(v.shape)
            .with_context(|| format!("volume {} refers to an unknown shape", v.name))
    }

    fn volume(&self, volume: VolumeKey) -> Result<&Volume> {
        self.volumes.get(volume).context("unknown volume")
    }
}

fn claim_name(names: &mut HashSet<String>, name: &str, kind: &str) -> Result<()> {
    ensure!(!name.is_empty(), "{kind} name must not be empty");
    ensure!(names.insert(name.to_string()), "duplicate {kind} name: {name}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placements_share_child_volume() -> Result<()> {
        let mut reg = GeoRegistry::new();
        let sk = reg.make_box("tile", Length::mm(15.0), Length::mm(15.0), Length::mm(5.0))?;
        let tile = reg.make_volume("tile_vol", "Air", sk)?;
        let mk = reg.make_box("strip", Length::mm(45.0), Length::mm(15.0), Length::mm(5.0))?;
        let strip = reg.make_volume("strip_vol", "Air", mk)?;

        for (i, x) in [-30.0, 0.0, 30.0].into_iter().enumerate() {
            let pos = reg.make_position(&format!("t_{i}_pos"), Length::mm(x), Length::ZERO, Length::ZERO)?;
            let pla = reg.make_placement(&format!("t_{i}_pla"), tile, pos, None, None)?;
            reg.append_placement(strip, pla)?;
        }

        let children = reg.children(strip)?;
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|p| p.volume == tile));
        assert_eq!(reg.volumes().len(), 2);
        assert_eq!(reg.position_of(children[0])?.x, Length::mm(-30.0));
        Ok(())
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut reg = GeoRegistry::new();
        let b = Length::mm(1.0);
        assert!(reg.make_box("a", b, b, b).is_ok());
        assert!(reg.make_box("a", b, b, b).is_err());
        assert_eq!(reg.shapes().len(), 1);
    }

    #[test]
    fn invalid_solids_are_rejected() {
        let mut reg = GeoRegistry::new();
        let b = Length::mm(1.0);
        assert!(reg.make_box("neg", -b, b, b).is_err());
        assert!(reg.make_box("zero", b, b, Length::ZERO).is_ok());
        assert!(
            reg.make_tube("inv", Length::mm(5.0), Length::mm(4.0), Angle::ZERO, Angle::deg(90.0), b)
                .is_err()
        );
        assert!(
            reg.make_tube("wide", Length::ZERO, b, Angle::ZERO, Angle::deg(400.0), b)
                .is_err()
        );
    }

    #[test]
    fn self_placement_is_rejected() -> Result<()> {
        let mut reg = GeoRegistry::new();
        let b = Length::mm(1.0);
        let sk = reg.make_box("b", b, b, b)?;
        let vk = reg.make_volume("b_vol", "Air", sk)?;
        let pos = reg.make_position("p", b, b, b)?;
        let pla = reg.make_placement("pla", vk, pos, None, None)?;
        assert!(reg.append_placement(vk, pla).is_err());
        assert!(reg.volume(vk)?.placements().is_empty());
        Ok(())
    }
}
