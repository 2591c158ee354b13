mod cylinder;
mod disc;
mod plane;
mod rows;
mod strip;
mod symmetric;

#[doc(inline)]
pub use cylinder::CylinderPacking;
#[doc(inline)]
pub use disc::DiscPacking;
#[doc(inline)]
pub use disc::tile_inside_circle;
#[doc(inline)]
pub use plane::PlanePacking;
#[doc(inline)]
pub use rows::organize_by_rows;
#[doc(inline)]
pub use strip::StripPacking;
#[doc(inline)]
pub use symmetric::Arrangement;
#[doc(inline)]
pub use symmetric::Slot;
#[doc(inline)]
pub use symmetric::symmetric_arrangement;
