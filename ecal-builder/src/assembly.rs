use std::fmt::Display;

use anyhow::Result;
use ecal_rs::builders::{
    BuildContext, Builder, LayerBuilder, LayerPacking, Role, StripBuilder, TileBuilder,
};
use ecal_rs::store::{GeoRegistry, GeoStore, VolumeKey};
use log::info;
use thousands::Separable;

use crate::config::EcalConfig;

/// A fully constructed assembly and the store holding its geometry
#[derive(Debug)]
pub struct Assembly {
    pub registry: GeoRegistry,
    pub context: BuildContext,
}

/// Constructs tile, strip and layer, bottom-up, into a fresh [`GeoRegistry`].
pub fn build(config: &EcalConfig) -> Result<Assembly> {
    let mut registry = GeoRegistry::new();
    let context = build_into(config, &mut registry)?;
    Ok(Assembly { registry, context })
}

/// Constructs tile, strip and layer, bottom-up, into any [`GeoStore`].
///
/// The strip is constructed in disc mode too: the disc takes its tile spacing along x from it.
pub fn build_into<S: GeoStore>(config: &EcalConfig, geom: &mut S) -> Result<BuildContext> {
    let mut ctx = BuildContext::new();
    TileBuilder::new(config.tile.clone()).construct(geom, &mut ctx)?;
    StripBuilder::new(config.strip.clone()).construct(geom, &mut ctx)?;
    LayerBuilder::new(config.layer.clone()).construct(geom, &mut ctx)?;
    info!("[ASM] assembly constructed");
    Ok(ctx)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerMode {
    Cylinder,
    Disc,
    Plane,
}

impl Display for LayerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerMode::Cylinder => write!(f, "cylinder"),
            LayerMode::Disc => write!(f, "disc"),
            LayerMode::Plane => write!(f, "plane"),
        }
    }
}

/// Counts describing a constructed assembly
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub mode: LayerMode,
    pub tiles_per_strip: usize,
    /// Strips in the layer, 0 for a disc
    pub n_strips: usize,
    /// Tiles in the layer, through strips or placed directly
    pub n_tiles: usize,
    pub n_volumes: usize,
    pub n_placements: usize,
}

impl Assembly {
    pub fn summary(&self) -> Result<Summary> {
        let tiles_per_strip = self.context.strip()?.packing.n_tiles();
        let layer = self.context.layer()?;
        let (mode, n_strips, n_tiles) = match &layer.packing {
            LayerPacking::Cylinder(cp) => (LayerMode::Cylinder, cp.n_strips(), cp.n_strips() * tiles_per_strip),
            LayerPacking::Plane(pp) => (LayerMode::Plane, pp.n_strips(), pp.n_strips() * tiles_per_strip),
            LayerPacking::Disc(dp) => (LayerMode::Disc, 0, dp.n_tiles()),
        };
        Ok(Summary {
            mode,
            tiles_per_strip,
            n_strips,
            n_tiles,
            n_volumes: self.registry.volumes().len(),
            n_placements: self.registry.placements().len(),
        })
    }

    /// Top-level volume of the assembly
    pub fn world(&self) -> Result<VolumeKey> {
        self.context.output_volume(Role::Layer)
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} layer: {} strips of {} tiles, {} tiles in total ({} volumes, {} placements)",
            self.mode,
            self.n_strips.separate_with_commas(),
            self.tiles_per_strip,
            self.n_tiles.separate_with_commas(),
            self.n_volumes,
            self.n_placements.separate_with_commas()
        )
    }
}
