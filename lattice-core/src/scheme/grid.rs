//! # Grid Scheme
//!
//! Places a ratio by reading its exponents of 3, 5 and 7 straight off as
//! x, y and z steps. Octaves (prime 2) collapse onto the same point, and any
//! other prime is ignored, so only 7-limit ratios land where expected.

use tracing::debug;

use super::{NodeLookup, NewNode, Placement};
use crate::error::Result;
use crate::factor::{factorize, FactorMap};
use crate::position::Position;
use crate::ratio::Ratio;

/// Primes mapped onto the x, y and z axes, in that order.
pub const AXIS_PRIMES: [u64; 3] = [3, 5, 7];

#[derive(Debug, Clone, PartialEq)]
pub struct GridScheme {
    spacing: f64,
}

impl GridScheme {
    pub fn new(spacing: f64) -> Self {
        Self { spacing }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn position_for(&self, factors: &FactorMap) -> Position {
        let [x, y, z] = AXIS_PRIMES.map(|prime| factors.exponent(prime) as f64 * self.spacing);
        Position::new(x, y, z)
    }

    /// Places `ratio` and links it to every occupied point exactly one
    /// spacing away along a single axis.
    pub fn resolve(&self, ratio: &Ratio, lookup: &impl NodeLookup) -> Result<Placement> {
        let factors = factorize(ratio);
        let position = self.position_for(&factors);

        let mut placement = Placement::new(NewNode {
            label: ratio.to_string(),
            ratio: *ratio,
            position,
            represented_value: None,
        });

        for axis in 0..AXIS_PRIMES.len() {
            for delta in [-self.spacing, self.spacing] {
                let neighbour = position.offset_axis(axis, delta);
                if lookup.is_occupied(&neighbour) {
                    placement.link(neighbour, position);
                }
            }
        }

        debug!(
            target: "scheme::grid",
            "{} -> ({}, {}, {}) with {} neighbour link(s)",
            ratio, position.x, position.y, position.z, placement.links.len()
        );
        Ok(placement)
    }
}
