//! Placement geometry for segmented calorimeter assemblies.
//!
//! Tiles (layered boxes) are packed into strips, strips are arranged on a cylindrical shell, a flat
//! plane or tiles are packed into a circular disc. The resulting volumes and placements are recorded
//! through the [`GeoStore`](store::GeoStore) interface.

/// Builders composing tiles, strips and layers on top of a [`GeoStore`](store::GeoStore)
pub mod builders;

/// Typed quantities, rotations and points
pub mod geometry;

/// Pure packing algorithms: how many units fit and where they go
pub mod packing;

/// Shapes, volumes and placements, and the interface to record them
pub mod store;

/// Helper functions which do not belong to any specific module
pub mod util;
