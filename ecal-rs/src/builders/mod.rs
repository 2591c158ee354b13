mod context;
mod layer;
mod strip;
mod tile;

#[doc(inline)]
pub use context::BuildContext;
#[doc(inline)]
pub use context::BuiltLayer;
#[doc(inline)]
pub use context::BuiltStrip;
#[doc(inline)]
pub use context::BuiltTile;
#[doc(inline)]
pub use context::Role;
#[doc(inline)]
pub use layer::LayerBuilder;
#[doc(inline)]
pub use layer::LayerConfig;
#[doc(inline)]
pub use layer::LayerGeometry;
#[doc(inline)]
pub use layer::LayerPacking;
#[doc(inline)]
pub use strip::StripBuilder;
#[doc(inline)]
pub use strip::StripConfig;
#[doc(inline)]
pub use tile::LayerSpec;
#[doc(inline)]
pub use tile::TileBuilder;
#[doc(inline)]
pub use tile::TileConfig;

use crate::store::{GeoStore, VolumeKey};
use anyhow::Result;

/// A component of the assembly which can construct itself into a [`GeoStore`].
pub trait Builder {
    /// Role under which the constructed unit is registered in the [`BuildContext`]
    const ROLE: Role;

    /// Constructs the unit, registers it in `ctx` and returns its top-level volume.
    ///
    /// Sub-units are resolved through `ctx` and have to be constructed beforehand.
    fn construct<S: GeoStore>(&self, geom: &mut S, ctx: &mut BuildContext) -> Result<VolumeKey>;
}
