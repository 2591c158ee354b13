use std::fmt::Display;

use crate::geometry::Length;

/// Point in the xy-plane of a mother volume
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Point(pub Length, pub Length);

impl Point {
    pub fn x(&self) -> Length {
        self.0
    }

    pub fn y(&self) -> Length {
        self.1
    }

    /// Distance to the origin
    pub fn radius(&self) -> Length {
        self.0.hypot(self.1)
    }

    /// The four corners of the axis-aligned square of half-width `hw` centered on `self`.
    pub fn square_corners(&self, hw: Length) -> [Point; 4] {
        let Point(x, y) = *self;
        [
            Point(x + hw, y + hw),
            Point(x - hw, y + hw),
            Point(x - hw, y - hw),
            Point(x + hw, y - hw),
        ]
    }
}

impl From<(Length, Length)> for Point {
    fn from(p: (Length, Length)) -> Self {
        Point(p.0, p.1)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pair() {
        let p = Point::from((Length::mm(3.0), Length::mm(-4.0)));
        assert_eq!(p.x(), Length::mm(3.0));
        assert_eq!(p.y(), Length::mm(-4.0));
        assert_eq!(p.radius(), Length::mm(5.0));
    }
}
