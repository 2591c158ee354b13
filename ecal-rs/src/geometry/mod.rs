mod point;
mod quantity;
mod rotation;

#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use quantity::Angle;
#[doc(inline)]
pub use quantity::Length;
#[doc(inline)]
pub use quantity::Quantity;
#[doc(inline)]
pub use rotation::Rotation;
