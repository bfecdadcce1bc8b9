//! # Position Module
//!
//! Points in lattice space and the quantized key used to compare them.

use std::ops::Add;

/// A point in lattice space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Coordinates are rounded to this many units per lattice unit before being
/// compared.
const KEY_SCALE: f64 = 1e6;

/// A hashable stand-in for a [`Position`].
///
/// Two positions with the same key are treated as the same point when
/// looking up neighbors and matching link endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey(i64, i64, i64);

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point at `angle` radians clockwise from the +y axis, `radius` away
    /// from the origin in the z = 0 plane.
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.sin(), radius * angle.cos(), 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn key(&self) -> PositionKey {
        PositionKey(quantize(self.x), quantize(self.y), quantize(self.z))
    }

    /// Whether both positions quantize to the same key.
    pub fn same_point(&self, other: &Position) -> bool {
        self.key() == other.key()
    }

    /// This position shifted by `delta` along one axis (0 = x, 1 = y, 2 = z).
    pub fn offset_axis(&self, axis: usize, delta: f64) -> Self {
        let mut shifted = *self;
        match axis {
            0 => shifted.x += delta,
            1 => shifted.y += delta,
            _ => shifted.z += delta,
        }
        shifted
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

fn quantize(v: f64) -> i64 {
    // -0.0 and 0.0 both round to 0.
    (v * KEY_SCALE).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_zero_angle_points_up() {
        let p = Position::polar(2.0, 0.0);
        assert!(p.same_point(&Position::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn key_absorbs_float_noise() {
        let full_turn = Position::polar(2.0, std::f64::consts::TAU);
        assert!(full_turn.same_point(&Position::new(0.0, 2.0, 0.0)));
        assert!(Position::new(-0.0, 0.0, 0.0).same_point(&Position::ORIGIN));
    }

    #[test]
    fn offsets_one_axis() {
        let p = Position::new(1.0, 2.0, 3.0);
        assert_eq!(p.offset_axis(1, -2.0), Position::new(1.0, 0.0, 3.0));
        assert_eq!(p.distance(&p.offset_axis(2, 2.0)), 2.0);
    }
}
