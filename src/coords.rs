use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// An axial coordinate pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PointAxial(pub isize, pub isize);

impl PointAxial {
    /// The third cubic component; the cubic coordinates of `(p, q)` are
    /// `(p, q, -p - q)`.
    pub fn z(self) -> isize {
        -self.0 - self.1
    }

    /// The ring this hex lies on, i.e. its hexagonal distance from the
    /// origin: half the manhattan distance in cubic coordinates.
    pub fn ring(self) -> usize {
        ((self.0.abs() + self.1.abs() + self.z().abs()) / 2) as usize
    }
}

/// Number of hexes inside a hexagon made of `rings` rings around the
/// origin, the centered hexagonal number.
pub fn hex_count(rings: usize) -> usize {
    if rings == 0 {
        0
    } else {
        3 * rings * (rings - 1) + 1
    }
}

/// One of the three cubic axes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Rotates the axis by the given number of steps, wrapping in both
    /// directions.
    pub fn rotate(self, steps: isize) -> Axis {
        match (self as isize + steps).rem_euclid(3) {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

impl Add for PointAxial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        PointAxial(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign for PointAxial {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl Sub for PointAxial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        PointAxial(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl SubAssign for PointAxial {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
        self.1 -= rhs.1;
    }
}

impl fmt::Display for PointAxial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        })
    }
}
