use crate::builders::{BuildContext, Builder, BuiltTile, Role};
use crate::geometry::Length;
use crate::store::{Footprint, GeoStore, VolumeKey};
use crate::util::assertions;
use anyhow::{Result, ensure};
use itertools::Itertools;
use log::{info, trace};
use serde::{Deserialize, Serialize};

/// One material layer of a tile, followed by `gap` of empty space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub depth: Length,
    pub gap: Length,
    pub material: String,
}

impl LayerSpec {
    pub fn new(depth: Length, gap: Length, material: &str) -> Self {
        Self {
            depth,
            gap,
            material: material.to_string(),
        }
    }
}

/// Configuration of a tile: a box of `2·dx` by `2·dy` filled with a stack of layers along z
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    pub name: String,
    pub dx: Length,
    pub dy: Length,
    /// Layers from front (-z) to back (+z)
    pub layers: Vec<LayerSpec>,
    /// Material filling the tile around and between the layers
    pub material: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            name: "MPTECalTile".to_string(),
            dx: Length::mm(15.0),
            dy: Length::mm(15.0),
            layers: vec![
                LayerSpec::new(Length::mm(2.0), Length::mm(0.1), "Copper"),
                LayerSpec::new(Length::mm(5.0), Length::mm(0.1), "Scintillator"),
                LayerSpec::new(Length::mm(1.0), Length::mm(2.0), "FR4"),
            ],
            material: "Air".to_string(),
        }
    }
}

/// Stacks the configured layers into a single box.
#[derive(Clone, Debug, Default)]
pub struct TileBuilder {
    pub config: TileConfig,
}

impl TileBuilder {
    pub fn new(config: TileConfig) -> Self {
        Self { config }
    }

    /// Total depth of the stack, every layer counted with its trailing gap
    pub fn depth(&self) -> Length {
        self.config.layers.iter().map(|l| l.depth + l.gap).sum()
    }

    /// z-coordinate of the center of every layer, relative to the center of the tile
    pub fn layer_offsets(&self) -> Vec<Length> {
        let half_depth = self.depth() / 2.0;
        self.config
            .layers
            .iter()
            .scan(Length::ZERO, |front, l| {
                let center = *front + l.depth / 2.0;
                *front += l.depth + l.gap;
                Some(center - half_depth)
            })
            .collect_vec()
    }

    pub fn footprint(&self) -> Footprint {
        Footprint {
            dx: self.config.dx,
            dy: self.config.dy,
            dz: self.depth() / 2.0,
        }
    }
}

impl Builder for TileBuilder {
    const ROLE: Role = Role::Tile;

    fn construct<S: GeoStore>(&self, geom: &mut S, ctx: &mut BuildContext) -> Result<VolumeKey> {
        ctx.ensure_vacant(Self::ROLE)?;
        let TileConfig {
            name,
            dx,
            dy,
            layers,
            material,
        } = &self.config;
        ensure!(!material.is_empty(), "tile {name} has no filler material");
        for (k, l) in layers.iter().enumerate() {
            ensure!(!l.material.is_empty(), "tile {name}: layer {} has no material", k + 1);
            ensure!(
                l.depth >= Length::ZERO && l.gap >= Length::ZERO,
                "tile {name}: layer {} has a negative depth ({}) or gap ({})",
                k + 1,
                l.depth,
                l.gap
            );
        }

        let footprint = self.footprint();
        let offsets = self.layer_offsets();
        debug_assert!(
            layers
                .iter()
                .zip(offsets.iter())
                .all(|(l, z)| assertions::children_within_extent([*z], l.depth / 2.0, footprint.dz))
        );

        let shape = geom.make_box(name, *dx, *dy, footprint.dz)?;
        let tile_vol = geom.make_volume(&format!("{name}_vol"), material, shape)?;

        for (k, (l, z)) in layers.iter().zip(offsets).enumerate() {
            let lname = format!("{name}_L{}", k + 1);
            let shape = geom.make_box(&lname, *dx, *dy, l.depth / 2.0)?;
            let vol = geom.make_volume(&format!("{lname}_vol"), &l.material, shape)?;
            let pos = geom.make_position(&format!("{lname}_pos"), Length::ZERO, Length::ZERO, z)?;
            let pla = geom.make_placement(&format!("{lname}_pla"), vol, pos, None, None)?;
            geom.append_placement(tile_vol, pla)?;
            trace!("[TILE] {lname}: {} of {} at z = {z}", l.depth, l.material);
        }

        info!(
            "[TILE] {name}: {} layers, {} x {} x {}",
            layers.len(),
            footprint.width(),
            footprint.height(),
            footprint.depth()
        );

        ctx.register_tile(BuiltTile {
            config: self.config.clone(),
            volume: tile_vol,
            footprint,
        })?;
        Ok(tile_vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GeoRegistry;
    use float_cmp::approx_eq;
    use test_case::test_case;

    #[test]
    fn default_tile_stack() -> Result<()> {
        let builder = TileBuilder::default();
        assert!(approx_eq!(f64, builder.depth().to_mm(), 10.2, epsilon = 1e-12));

        let expected = [-4.1, -0.5, 2.6];
        for (z, e) in builder.layer_offsets().iter().zip(expected) {
            assert!(approx_eq!(f64, z.to_mm(), e, epsilon = 1e-12));
        }

        let mut reg = GeoRegistry::new();
        let mut ctx = BuildContext::new();
        let vk = builder.construct(&mut reg, &mut ctx)?;

        assert_eq!(ctx.output_volume(Role::Tile)?, vk);
        assert_eq!(reg.volume(vk)?.name, "MPTECalTile_vol");
        let children = reg.children(vk)?;
        assert_eq!(children.len(), 3);
        assert_eq!(children[1].name, "MPTECalTile_L2_pla");
        assert_eq!(reg.volume(children[1].volume)?.material, "Scintillator");
        assert!(children.iter().all(|p| p.copy_number.is_none() && p.rotation.is_none()));

        let fp = reg.lookup_shape(vk)?.footprint()?;
        assert_eq!(fp, ctx.tile()?.footprint);
        Ok(())
    }

    #[test_case(vec![]; "no layers")]
    #[test_case(vec![(2.0, 0.0)]; "single layer")]
    #[test_case(vec![(0.5, 0.25), (3.0, 0.0), (1.5, 4.0), (0.0, 1.0)]; "irregular")]
    fn depth_is_sum_of_layers_and_gaps(layers: Vec<(f64, f64)>) {
        let expected: f64 = layers.iter().map(|(d, g)| d + g).sum();
        let config = TileConfig {
            layers: layers
                .iter()
                .map(|(d, g)| LayerSpec::new(Length::mm(*d), Length::mm(*g), "Lead"))
                .collect(),
            ..TileConfig::default()
        };
        let builder = TileBuilder::new(config);
        assert!(approx_eq!(f64, builder.depth().to_mm(), expected, epsilon = 1e-12));

        let mut reg = GeoRegistry::new();
        let mut ctx = BuildContext::new();
        let vk = builder.construct(&mut reg, &mut ctx).unwrap();
        let fp = reg.lookup_shape(vk).unwrap().footprint().unwrap();
        assert!(approx_eq!(f64, fp.depth().to_mm(), expected, epsilon = 1e-12));
        assert_eq!(reg.children(vk).unwrap().len(), layers.len());
    }

    #[test]
    fn layers_do_not_overlap() {
        let builder = TileBuilder::default();
        let offsets = builder.layer_offsets();
        let layers = &builder.config.layers;
        for i in 1..layers.len() {
            let prev_back = offsets[i - 1] + layers[i - 1].depth / 2.0;
            let front = offsets[i] - layers[i].depth / 2.0;
            assert!(approx_eq!(f64, (front - prev_back).to_mm(), layers[i - 1].gap.to_mm(), epsilon = 1e-12));
        }
    }

    #[test]
    fn missing_material_is_rejected_before_registration() {
        let mut layers = TileConfig::default().layers;
        layers[2].material.clear();
        for config in [
            TileConfig {
                material: String::new(),
                ..TileConfig::default()
            },
            TileConfig {
                layers,
                ..TileConfig::default()
            },
        ] {
            let mut reg = GeoRegistry::new();
            let mut ctx = BuildContext::new();
            assert!(TileBuilder::new(config).construct(&mut reg, &mut ctx).is_err());
            assert!(reg.shapes().is_empty());
            assert!(reg.volumes().is_empty());
        }
    }

    #[test]
    fn negative_layer_is_rejected() {
        let config = TileConfig {
            layers: vec![LayerSpec::new(Length::mm(-1.0), Length::ZERO, "Lead")],
            ..TileConfig::default()
        };
        let mut reg = GeoRegistry::new();
        let mut ctx = BuildContext::new();
        assert!(TileBuilder::new(config).construct(&mut reg, &mut ctx).is_err());
        assert!(reg.volumes().is_empty());
    }
}
