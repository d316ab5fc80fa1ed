use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Integer grid coordinate. Positions and deltas share this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Unit steps in the four cardinal directions: up, right, down, left.
    pub const CARDINAL: [Point; 4] = [
        Point::new(0, -1),
        Point::new(1, 0),
        Point::new(0, 1),
        Point::new(-1, 0),
    ];

    /// Translate by a signed shift.
    pub fn shift_by(self, dx: i32, dy: i32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Signed delta that translates this point onto `other`.
    pub fn delta_to(self, other: Point) -> Point {
        other - self
    }

    /// Component-wise wrap onto a `bounds.x` by `bounds.y` torus.
    /// Negative coordinates wrap to the far edge.
    pub fn wrap(self, bounds: Point) -> Point {
        Point::new(self.x.rem_euclid(bounds.x), self.y.rem_euclid(bounds.y))
    }

    /// True when the point lies in the half-open box `[0, bounds)`.
    pub fn within(self, bounds: Point) -> bool {
        (0..bounds.x).contains(&self.x) && (0..bounds.y).contains(&self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
