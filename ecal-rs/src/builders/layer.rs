use crate::builders::{BuildContext, Builder, BuiltLayer, Role};
use crate::geometry::{Angle, Length, Point};
use crate::packing::{CylinderPacking, DiscPacking, PlanePacking};
use crate::store::{Footprint, GeoStore, VolumeKey};
use crate::util::FPA;
use anyhow::{Context, Result, ensure};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

/// Shape of the region a layer fills
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "params")]
pub enum LayerGeometry {
    /// Strips around a cylindrical shell of inner radius `r`, within `phi_range`
    #[serde(rename = "cylinder")]
    Cylinder { r: Length, phi_range: [Angle; 2] },
    /// Tiles inside a flat circle of radius `r`
    #[serde(rename = "disc")]
    Disc { r: Length },
    /// Strips stacked in a flat `x` by `y` rectangle
    #[serde(rename = "plane")]
    Plane { x: Length, y: Length },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub name: String,
    pub geometry: LayerGeometry,
    /// Extra space between adjacent strips (tile rows in disc mode)
    pub gap: Length,
    pub material: String,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            name: "MPTECalLayer".to_string(),
            geometry: LayerGeometry::Cylinder {
                r: Length::m(2.5),
                phi_range: [Angle::deg(0.0), Angle::deg(360.0)],
            },
            gap: Length::mm(0.1),
            material: "Air".to_string(),
        }
    }
}

/// Packing decision of a layer, one per [`LayerGeometry`]
#[derive(Clone, Debug, PartialEq)]
pub enum LayerPacking {
    Cylinder(CylinderPacking),
    Disc(DiscPacking),
    Plane(PlanePacking),
}

impl LayerPacking {
    /// Number of strips (or tiles, for a disc) placed in the layer
    pub fn n_units(&self) -> usize {
        match self {
            LayerPacking::Cylinder(cp) => cp.n_strips(),
            LayerPacking::Disc(dp) => dp.n_tiles(),
            LayerPacking::Plane(pp) => pp.n_strips(),
        }
    }
}

/// Arranges strips around a cylinder or in a plane, or tiles inside a disc.
#[derive(Clone, Debug, Default)]
pub struct LayerBuilder {
    pub config: LayerConfig,
}

impl LayerBuilder {
    pub fn new(config: LayerConfig) -> Self {
        Self { config }
    }

    /// Decides how many units fit in the layer and where they go, without touching `geom`.
    pub fn packing<S: GeoStore>(&self, geom: &S, ctx: &BuildContext) -> Result<LayerPacking> {
        let gap = self.config.gap;
        ensure!(gap >= Length::ZERO, "gap between strips must not be negative: {gap}");
        ensure!(!self.config.material.is_empty(), "layer {} has no material", self.config.name);
        match self.config.geometry {
            LayerGeometry::Cylinder { r, phi_range } => {
                let strip = unit_footprint(geom, ctx.strip()?.volume)?;
                let cp = CylinderPacking::new(r, phi_range, (strip.dy + gap) * 2.0, strip.depth())?;
                Ok(LayerPacking::Cylinder(cp))
            }
            LayerGeometry::Disc { r } => {
                let strip_gap = ctx.strip()?.config.gap;
                let tile = unit_footprint(geom, ctx.tile()?.volume)?;
                let pitch_x = tile.width() + strip_gap;
                let pitch_y = tile.height() + gap;
                ensure!(
                    FPA::of(pitch_x) == FPA::of(pitch_y),
                    "disc layers need square tiles, padded tile size: {pitch_x} x {pitch_y}"
                );
                Ok(LayerPacking::Disc(DiscPacking::new(r, pitch_x)?))
            }
            LayerGeometry::Plane { x, y } => {
                let strip = unit_footprint(geom, ctx.strip()?.volume)?;
                let pp = PlanePacking::new(x, y, strip.width(), (strip.dy + gap) * 2.0)?;
                Ok(LayerPacking::Plane(pp))
            }
        }
    }

    fn place_cylinder<S: GeoStore>(&self, geom: &mut S, strip_vol: VolumeKey, cp: &CylinderPacking) -> Result<VolumeKey> {
        let LayerConfig { name, material, .. } = &self.config;
        let strip = unit_footprint(geom, strip_vol)?;

        let shape = geom.make_tube(
            name,
            cp.r_inner,
            cp.r_outer,
            cp.phi_start,
            cp.coverage(),
            strip.width() / 2.0,
        )?;
        let layer_vol = geom.make_volume(&format!("{name}_vol"), material, shape)?;

        let strip_name = geom.volume(strip_vol)?.name.clone();
        for (copy, (i, phi)) in cp.strip_angles().enumerate() {
            let Point(x, y) = cp.strip_center(phi);
            let pos = geom.make_position(&format!("{strip_name}_{i}_pos"), x, y, Length::ZERO)?;
            let rot = geom.make_rotation(&format!("{strip_name}_{i}_rot"), CylinderPacking::strip_rotation(phi))?;
            let pla = geom.make_placement(&format!("{strip_name}_{i}_pla"), strip_vol, pos, Some(rot), Some(copy))?;
            geom.append_placement(layer_vol, pla)?;
            trace!("[CYL] strip {i} at phi = {phi}");
        }
        debug!(
            "[CYL] {} strips of {} between {} and {}, r = [{}, {}]",
            cp.n_strips(),
            cp.dphi,
            cp.phi_start,
            cp.phi_end,
            cp.r_inner,
            cp.r_outer
        );
        Ok(layer_vol)
    }

    fn place_disc<S: GeoStore>(&self, geom: &mut S, tile_vol: VolumeKey, dp: &DiscPacking) -> Result<VolumeKey> {
        let LayerConfig { name, material, .. } = &self.config;
        let tile = unit_footprint(geom, tile_vol)?;

        let shape = geom.make_tube(
            name,
            Length::ZERO,
            dp.r_inscribed(),
            Angle::ZERO,
            Angle::deg(360.0),
            tile.dz,
        )?;
        let layer_vol = geom.make_volume(&format!("{name}_vol"), material, shape)?;

        let tile_name = geom.volume(tile_vol)?.name.clone();
        let tiles = dp
            .rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, p)| (i, j, *p)));
        for (copy, (i, j, Point(x, y))) in tiles.enumerate() {
            let pos = geom.make_position(&format!("{tile_name}_{i}_{j}_pos"), x, y, Length::ZERO)?;
            let pla = geom.make_placement(&format!("{tile_name}_{i}_{j}_pla"), tile_vol, pos, None, Some(copy))?;
            geom.append_placement(layer_vol, pla)?;
        }
        for row in &dp.rows {
            trace!("[DISC] {} tiles at y = {}", row.len(), row[0].y());
        }
        Ok(layer_vol)
    }

    fn place_plane<S: GeoStore>(&self, geom: &mut S, strip_vol: VolumeKey, pp: &PlanePacking) -> Result<VolumeKey> {
        let LayerConfig { name, material, .. } = &self.config;
        let strip = unit_footprint(geom, strip_vol)?;

        let shape = geom.make_box(name, strip.dx, pp.occupied_height() / 2.0, strip.dz)?;
        let layer_vol = geom.make_volume(&format!("{name}_vol"), material, shape)?;

        let strip_name = geom.volume(strip_vol)?.name.clone();
        for (copy, (i, y)) in pp.arrangement.iter().enumerate() {
            let pos = geom.make_position(&format!("{strip_name}_{i}_pos"), Length::ZERO, y, Length::ZERO)?;
            let pla = geom.make_placement(&format!("{strip_name}_{i}_pla"), strip_vol, pos, None, Some(copy))?;
            geom.append_placement(layer_vol, pla)?;
        }
        Ok(layer_vol)
    }
}

impl Builder for LayerBuilder {
    const ROLE: Role = Role::Layer;

    fn construct<S: GeoStore>(&self, geom: &mut S, ctx: &mut BuildContext) -> Result<VolumeKey> {
        ctx.ensure_vacant(Self::ROLE)?;
        let name = &self.config.name;
        // every configuration error surfaces here, before anything is registered
        let packing = self
            .packing(geom, ctx)
            .with_context(|| format!("cannot pack layer {name}"))?;

        let layer_vol = match &packing {
            LayerPacking::Cylinder(cp) => self.place_cylinder(geom, ctx.strip()?.volume, cp)?,
            LayerPacking::Disc(dp) => self.place_disc(geom, ctx.tile()?.volume, dp)?,
            LayerPacking::Plane(pp) => self.place_plane(geom, ctx.strip()?.volume, pp)?,
        };

        info!("[LAYER] {name}: {} units placed", packing.n_units());

        ctx.register_layer(BuiltLayer {
            config: self.config.clone(),
            volume: layer_vol,
            packing,
        })?;
        Ok(layer_vol)
    }
}

fn unit_footprint<S: GeoStore>(geom: &S, volume: VolumeKey) -> Result<Footprint> {
    geom.lookup_shape(volume)?.footprint()
}
