use ecal_rs::builders::{LayerConfig, StripConfig, TileConfig};
use serde::{Deserialize, Serialize};

/// Configuration of a complete tile → strip → layer assembly.
/// Missing sections fall back to the reference detector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcalConfig {
    pub tile: TileConfig,
    pub strip: StripConfig,
    pub layer: LayerConfig,
}
