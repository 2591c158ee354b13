use std::collections::HashMap;
use std::fmt::Display;

use crate::builders::{LayerConfig, LayerPacking, StripConfig, TileConfig};
use crate::packing::StripPacking;
use crate::store::{Footprint, VolumeKey};
use anyhow::{Context, Result, ensure};
use log::debug;

/// The role a unit plays in the assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Tile,
    Strip,
    Layer,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Tile => write!(f, "tile"),
            Role::Strip => write!(f, "strip"),
            Role::Layer => write!(f, "layer"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BuiltTile {
    pub config: TileConfig,
    pub volume: VolumeKey,
    pub footprint: Footprint,
}

#[derive(Clone, Debug)]
pub struct BuiltStrip {
    pub config: StripConfig,
    pub volume: VolumeKey,
    pub footprint: Footprint,
    pub packing: StripPacking,
}

#[derive(Clone, Debug)]
pub struct BuiltLayer {
    pub config: LayerConfig,
    pub volume: VolumeKey,
    pub packing: LayerPacking,
}

/// Directory of the units constructed so far, passed down the construction chain.
///
/// Every role is constructed at most once. Parent builders resolve their sub-units through it.
#[derive(Debug, Default)]
pub struct BuildContext {
    tile: Option<BuiltTile>,
    strip: Option<BuiltStrip>,
    layer: Option<BuiltLayer>,
    outputs: HashMap<Role, VolumeKey>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile(&self) -> Result<&BuiltTile> {
        self.tile.as_ref().with_context(|| not_built(Role::Tile))
    }

    pub fn strip(&self) -> Result<&BuiltStrip> {
        self.strip.as_ref().with_context(|| not_built(Role::Strip))
    }

    pub fn layer(&self) -> Result<&BuiltLayer> {
        self.layer.as_ref().with_context(|| not_built(Role::Layer))
    }

    /// The top-level volume registered for `role`
    pub fn output_volume(&self, role: Role) -> Result<VolumeKey> {
        self.outputs.get(&role).copied().with_context(|| not_built(role))
    }

    pub fn is_built(&self, role: Role) -> bool {
        self.outputs.contains_key(&role)
    }

    /// Fails if a unit has already been registered for `role`.
    pub fn ensure_vacant(&self, role: Role) -> Result<()> {
        ensure!(!self.is_built(role), "a {role} has already been constructed");
        Ok(())
    }

    /// Registers the single top-level volume produced for `role`.
    pub fn register_output_volume(&mut self, role: Role, volume: VolumeKey) -> Result<()> {
        self.ensure_vacant(role)?;
        debug!("[CTX] registered output volume for {role}");
        self.outputs.insert(role, volume);
        Ok(())
    }

    pub(crate) fn register_tile(&mut self, built: BuiltTile) -> Result<()> {
        self.register_output_volume(Role::Tile, built.volume)?;
        self.tile = Some(built);
        Ok(())
    }

    pub(crate) fn register_strip(&mut self, built: BuiltStrip) -> Result<()> {
        self.register_output_volume(Role::Strip, built.volume)?;
        self.strip = Some(built);
        Ok(())
    }

    pub(crate) fn register_layer(&mut self, built: BuiltLayer) -> Result<()> {
        self.register_output_volume(Role::Layer, built.volume)?;
        self.layer = Some(built);
        Ok(())
    }
}

fn not_built(role: Role) -> String {
    format!("no {role} has been constructed yet, construct it before its parent")
}
