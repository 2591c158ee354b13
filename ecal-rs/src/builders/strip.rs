use crate::builders::{BuildContext, Builder, BuiltStrip, Role};
use crate::geometry::Length;
use crate::packing::StripPacking;
use crate::store::{Footprint, GeoStore, VolumeKey};
use crate::util::assertions;
use anyhow::{Context, Result, ensure};
use log::{info, trace};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    pub name: String,
    /// Length budget along x
    pub length: Length,
    /// Number of tiles, 0 to derive it from `length`
    pub n_tiles: usize,
    /// Space between adjacent tiles
    pub gap: Length,
    pub material: String,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            name: "MPTECalStrip".to_string(),
            length: Length::m(1.0),
            n_tiles: 0,
            gap: Length::mm(0.1),
            material: "Air".to_string(),
        }
    }
}

/// Packs tiles side by side along x.
#[derive(Clone, Debug, Default)]
pub struct StripBuilder {
    pub config: StripConfig,
}

impl StripBuilder {
    pub fn new(config: StripConfig) -> Self {
        Self { config }
    }

    pub fn packing(&self, tile: &Footprint) -> Result<StripPacking> {
        let n_tiles = (self.config.n_tiles > 0).then_some(self.config.n_tiles);
        StripPacking::new(self.config.length, tile.width(), self.config.gap, n_tiles)
            .with_context(|| format!("cannot pack strip {}", self.config.name))
    }
}

impl Builder for StripBuilder {
    const ROLE: Role = Role::Strip;

    fn construct<S: GeoStore>(&self, geom: &mut S, ctx: &mut BuildContext) -> Result<VolumeKey> {
        ctx.ensure_vacant(Self::ROLE)?;
        let StripConfig { name, material, .. } = &self.config;
        ensure!(!material.is_empty(), "strip {name} has no material");

        let tile_vol = ctx.tile()?.volume;
        let tile = geom
            .lookup_shape(tile_vol)?
            .footprint()
            .context("tiles must be boxes to be packed into a strip")?;
        let packing = self.packing(&tile)?;

        let footprint = Footprint {
            dx: packing.occupied_length() / 2.0,
            dy: tile.dy,
            dz: tile.dz,
        };
        debug_assert!(assertions::children_within_extent(
            packing.arrangement.offsets(),
            tile.dx,
            footprint.dx
        ));

        let shape = geom.make_box(name, footprint.dx, footprint.dy, footprint.dz)?;
        let strip_vol = geom.make_volume(&format!("{name}_vol"), material, shape)?;

        let tile_name = geom.volume(tile_vol)?.name.clone();
        for (i, x) in packing.arrangement.iter() {
            let pos = geom.make_position(&format!("{tile_name}_{i}_pos"), x, Length::ZERO, Length::ZERO)?;
            let pla = geom.make_placement(&format!("{tile_name}_{i}_pla"), tile_vol, pos, None, None)?;
            geom.append_placement(strip_vol, pla)?;
            trace!("[STRIP] tile {i} at x = {x}");
        }

        info!(
            "[STRIP] {name}: {} tiles at pitch {}, occupying {} of {}",
            packing.n_tiles(),
            packing.pitch,
            packing.occupied_length(),
            self.config.length
        );

        ctx.register_strip(BuiltStrip {
            config: self.config.clone(),
            volume: strip_vol,
            footprint,
            packing,
        })?;
        Ok(strip_vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TileBuilder;
    use crate::store::GeoRegistry;
    use float_cmp::approx_eq;

    fn with_tile() -> Result<(GeoRegistry, BuildContext)> {
        let mut reg = GeoRegistry::new();
        let mut ctx = BuildContext::new();
        TileBuilder::default().construct(&mut reg, &mut ctx)?;
        Ok((reg, ctx))
    }

    #[test]
    fn default_strip() -> Result<()> {
        let (mut reg, mut ctx) = with_tile()?;
        let vk = StripBuilder::default().construct(&mut reg, &mut ctx)?;

        let fp = reg.lookup_shape(vk)?.footprint()?;
        assert!(approx_eq!(f64, fp.width().to_mm(), 993.3, epsilon = 1e-9));
        assert_eq!(fp.dy, Length::mm(15.0));
        assert!(approx_eq!(f64, fp.depth().to_mm(), 10.2, epsilon = 1e-12));

        let tile_vol = ctx.tile()?.volume;
        let children = reg.children(vk)?;
        assert_eq!(children.len(), 33);
        assert!(children.iter().all(|p| p.volume == tile_vol));
        assert_eq!(children[0].name, "MPTECalTile_vol_0_pla");
        assert_eq!(reg.position_of(children[0])?.x, Length::ZERO);

        let xs = children
            .iter()
            .map(|p| reg.position_of(p).map(|pos| pos.x.to_mm()))
            .collect::<Result<Vec<_>>>()?;
        assert!(approx_eq!(f64, xs.iter().sum::<f64>(), 0.0, epsilon = 1e-9));
        assert!(xs.iter().all(|x| x.abs() + 15.0 <= fp.dx.to_mm() + 1e-9));
        Ok(())
    }

    #[test]
    fn explicit_tile_count() -> Result<()> {
        let (mut reg, mut ctx) = with_tile()?;
        let config = StripConfig {
            n_tiles: 4,
            gap: Length::ZERO,
            ..StripConfig::default()
        };
        let vk = StripBuilder::new(config).construct(&mut reg, &mut ctx)?;
        assert_eq!(reg.children(vk)?.len(), 4);
        assert_eq!(ctx.strip()?.footprint.width(), Length::mm(120.0));
        Ok(())
    }

    #[test]
    fn strip_needs_a_tile() {
        let mut reg = GeoRegistry::new();
        let mut ctx = BuildContext::new();
        let err = StripBuilder::default().construct(&mut reg, &mut ctx).unwrap_err();
        assert!(err.to_string().contains("tile"));
        assert!(reg.volumes().is_empty());
    }

    #[test]
    fn strip_without_material_leaves_no_shape() -> Result<()> {
        let (mut reg, mut ctx) = with_tile()?;
        let n_shapes = reg.shapes().len();
        let config = StripConfig {
            material: String::new(),
            ..StripConfig::default()
        };
        assert!(StripBuilder::new(config).construct(&mut reg, &mut ctx).is_err());
        assert_eq!(reg.shapes().len(), n_shapes);
        Ok(())
    }

    #[test]
    fn strip_shorter_than_a_tile_is_rejected() -> Result<()> {
        let (mut reg, mut ctx) = with_tile()?;
        let n_volumes = reg.volumes().len();
        let config = StripConfig {
            length: Length::mm(20.0),
            ..StripConfig::default()
        };
        assert!(StripBuilder::new(config).construct(&mut reg, &mut ctx).is_err());
        assert_eq!(reg.volumes().len(), n_volumes);
        assert!(ctx.strip().is_err());
        Ok(())
    }
}
