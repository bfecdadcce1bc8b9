//! # Radial Scheme
//!
//! Lays ratios out around a reference circle. One full turn of the circle is
//! one octave, so a ratio's angle is `2π · log2(ratio)` and octave-equivalent
//! primes line up on the same spoke.
//!
//! The numerator's classification picks the rule:
//! - **Prime**: on the circle, at the angle of the ratio itself
//! - **Perfect power** `b^e`: at the angle of `b`, `e` times further out
//! - **Composite** `p1^e1 · p2^e2`: the vector sum of one spoke per prime
//!
//! Composites are linked to the prime nodes they are built from, and those
//! prime nodes are created on demand.

use std::f64::consts::TAU;

use tracing::{debug, warn};

use super::{NodeLookup, NewNode, Placement};
use crate::classify::{classify, Classification};
use crate::error::{LatticeError, Result};
use crate::factor::{factorize, FactorMap};
use crate::position::Position;
use crate::ratio::Ratio;

/// Half the width of the reference ring's band.
const RING_HALF_WIDTH: f64 = 0.025;

/// The circle that marks one octave's worth of angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRing {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl ReferenceRing {
    pub fn radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialScheme {
    radius: f64,
}

impl RadialScheme {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn reference_ring(&self) -> ReferenceRing {
        ReferenceRing {
            inner_radius: self.radius - RING_HALF_WIDTH,
            outer_radius: self.radius + RING_HALF_WIDTH,
        }
    }

    /// Computes where `ratio` sits, given its factors and the
    /// classification of its numerator.
    ///
    /// A composite numerator without exactly two positive prime factors has
    /// no defined position and stays at the origin.
    pub fn position_for(
        &self,
        ratio: &Ratio,
        factors: &FactorMap,
        classification: Classification,
    ) -> Position {
        match classification {
            Classification::Prime => Position::polar(self.radius, TAU * ratio.octaves()),
            Classification::PerfectPower { base, exponent } => Position::polar(
                self.radius * exponent as f64,
                TAU * (base as f64).log2(),
            ),
            Classification::Composite => match factors.positive_factors().as_slice() {
                [(p1, e1), (p2, e2)] => {
                    self.spoke(*p1, *e1) + self.spoke(*p2, *e2)
                }
                other => {
                    if ratio.numerator >= 2 {
                        warn!(
                            target: "scheme::radial",
                            "{} has {} positive prime factor(s); placing at origin",
                            ratio,
                            other.len()
                        );
                    }
                    Position::ORIGIN
                }
            },
        }
    }

    fn spoke(&self, prime: u64, exponent: i32) -> Position {
        Position::polar(self.radius * exponent as f64, TAU * (prime as f64).log2())
    }

    /// Places `ratio` and works out the links that connect it to the
    /// lattice.
    ///
    /// # Arguments
    /// * `ratio` - The submitted ratio
    /// * `lookup` - The nodes already placed, keyed by numerator
    ///
    /// # Returns
    /// * `Ok(placement)` - The new node first, then any prime nodes it needed
    /// * `Err(DegeneratePosition)` - The computed position was not finite
    pub fn resolve(&self, ratio: &Ratio, lookup: &impl NodeLookup) -> Result<Placement> {
        let factors = factorize(ratio);
        let classification = classify(ratio.numerator);
        let position = self.position_for(ratio, &factors, classification);
        if !position.is_finite() {
            return Err(LatticeError::DegeneratePosition { ratio: ratio.to_string() });
        }

        let mut placement = Placement::new(NewNode {
            label: ratio.to_string(),
            ratio: *ratio,
            position,
            represented_value: Some(ratio.numerator),
        });

        match classification {
            Classification::Prime => placement.link(Position::ORIGIN, position),
            Classification::PerfectPower { base, .. } => {
                let from = lookup
                    .position_of_value(ratio.numerator / base)
                    .unwrap_or(Position::ORIGIN);
                placement.link(from, position);
            }
            Classification::Composite => {
                for (prime, _) in factors.positive_factors() {
                    let prime_position = match lookup.position_of_value(prime) {
                        Some(existing) => existing,
                        None => {
                            let node = self.prime_node(prime)?;
                            let at = node.position;
                            placement.push_node(node);
                            placement.link(Position::ORIGIN, at);
                            at
                        }
                    };
                    placement.link(prime_position, position);
                }
            }
        }

        debug!(
            target: "scheme::radial",
            "{} ({:?}) -> ({:.3}, {:.3}) adding {} node(s), {} link(s)",
            ratio,
            classification,
            position.x,
            position.y,
            placement.nodes.len(),
            placement.links.len()
        );
        Ok(placement)
    }

    /// The node standing in for `prime`, octave-reduced against the largest
    /// power of two not above it (3 becomes `3/2`, 7 becomes `7/4`).
    fn prime_node(&self, prime: u64) -> Result<NewNode> {
        let ratio = Ratio::new(prime, largest_power_of_two_below(prime))?;
        let position = self.position_for(&ratio, &factorize(&ratio), classify(prime));
        Ok(NewNode {
            label: ratio.to_string(),
            ratio,
            position,
            represented_value: Some(prime),
        })
    }
}

/// `2^⌊log2 n⌋` for `n ≥ 1`.
fn largest_power_of_two_below(n: u64) -> u64 {
    1 << (u64::BITS - 1 - n.leading_zeros())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Registry(HashMap<u64, Position>);

    impl NodeLookup for Registry {
        fn position_of_value(&self, value: u64) -> Option<Position> {
            self.0.get(&value).copied()
        }

        fn is_occupied(&self, position: &Position) -> bool {
            self.0.values().any(|p| p.same_point(position))
        }
    }

    fn scheme() -> RadialScheme {
        RadialScheme::new(2.0)
    }

    fn resolve(input: &str, registry: &Registry) -> Placement {
        scheme().resolve(&input.parse().unwrap(), registry).unwrap()
    }

    fn assert_near(actual: Position, expected: Position) {
        assert!(
            actual.distance(&expected) < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn octave_sits_at_top_of_circle() {
        let placement = resolve("2/1", &Registry::default());
        assert_near(placement.primary().position, Position::new(0.0, 2.0, 0.0));
        assert_eq!(placement.links.len(), 1);
        assert_eq!(placement.links[0].0, Position::ORIGIN);
    }

    #[test]
    fn prime_angle_uses_ratio_value() {
        let fifth = resolve("3/2", &Registry::default()).primary().position;
        let twelfth = resolve("3/1", &Registry::default()).primary().position;
        // An octave apart, so a full turn apart.
        assert_near(fifth, twelfth);
        assert!((fifth.distance(&Position::ORIGIN) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn perfect_power_links_to_previous_power() {
        let mut registry = Registry::default();
        let nine = resolve("9/1", &registry);
        assert_near(
            nine.primary().position,
            Position::polar(4.0, TAU * 3f64.log2()),
        );
        assert_eq!(nine.links, vec![(Position::ORIGIN, nine.primary().position)]);

        let three_at = Position::new(1.0, 1.0, 0.0);
        registry.0.insert(3, three_at);
        let nine = resolve("9/8", &registry);
        assert_eq!(nine.links[0].0, three_at);
    }

    #[test]
    fn composite_creates_missing_prime_nodes() {
        let placement = resolve("15/8", &Registry::default());
        let labels: Vec<_> = placement.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["15/8", "3/2", "5/4"]);

        let expected = Position::polar(2.0, TAU * 3f64.log2()) + Position::polar(2.0, TAU * 5f64.log2());
        assert_near(placement.primary().position, expected);

        // origin -> 3/2, 3/2 -> 15/8, origin -> 5/4, 5/4 -> 15/8
        assert_eq!(placement.links.len(), 4);
        assert_eq!(placement.nodes[1].represented_value, Some(3));
        assert_eq!(placement.nodes[2].represented_value, Some(5));
    }

    #[test]
    fn composite_reuses_existing_prime_nodes() {
        let mut registry = Registry::default();
        registry.0.insert(3, Position::new(0.5, 0.5, 0.0));
        let placement = resolve("6/1", &registry);
        let labels: Vec<_> = placement.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["6/1", "2/2"]);
        assert!(placement.links.contains(&(Position::new(0.5, 0.5, 0.0), placement.primary().position)));
    }

    #[test]
    fn composite_without_two_primes_defaults_to_origin() {
        // 18/2 cancels to 3^2: a single positive prime.
        let single = resolve("18/2", &Registry::default());
        assert_eq!(single.primary().position, Position::ORIGIN);

        let triple = resolve("105/1", &Registry::default());
        assert_eq!(triple.primary().position, Position::ORIGIN);
        assert_eq!(triple.nodes.len(), 4);
    }

    #[test]
    fn unison_has_no_links() {
        let placement = resolve("1/1", &Registry::default());
        assert_eq!(placement.primary().position, Position::ORIGIN);
        assert!(placement.links.is_empty());
        assert_eq!(placement.nodes.len(), 1);
    }

    #[test]
    fn powers_of_two() {
        assert_eq!(largest_power_of_two_below(1), 1);
        assert_eq!(largest_power_of_two_below(3), 2);
        assert_eq!(largest_power_of_two_below(7), 4);
        assert_eq!(largest_power_of_two_below(8), 8);
    }

    #[test]
    fn ring_brackets_radius() {
        let ring = scheme().reference_ring();
        assert!((ring.inner_radius - 1.975).abs() < 1e-12);
        assert!((ring.outer_radius - 2.025).abs() < 1e-12);
        assert!((ring.radius() - 2.0).abs() < 1e-12);
    }
}
