//! # Position Schemes
//!
//! A position scheme turns a parsed ratio into a [`Placement`]: the node for
//! the ratio itself, any auxiliary nodes it needs, and the links to draw.
//! Schemes never touch the lattice directly; they read it through
//! [`NodeLookup`] and the lattice applies the placement.
//!
//! Two schemes exist:
//! - **Radial**: angle from `log2` of the ratio, radius from exponents
//! - **Grid**: primes 3, 5 and 7 mapped onto the x, y and z axes

pub mod grid;
pub mod radial;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::LatticeConfig;
use crate::error::Result;
use crate::position::Position;
use crate::ratio::Ratio;

pub use grid::GridScheme;
pub use radial::{RadialScheme, ReferenceRing};

/// Which scheme a lattice uses. Selected through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    #[default]
    Radial,
    Grid,
}

impl SchemeKind {
    pub fn name(self) -> &'static str {
        match self {
            SchemeKind::Radial => "radial",
            SchemeKind::Grid => "grid",
        }
    }

    /// The other scheme, for the view toggle.
    pub fn toggled(self) -> Self {
        match self {
            SchemeKind::Radial => SchemeKind::Grid,
            SchemeKind::Grid => SchemeKind::Radial,
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read access a scheme needs to the nodes already placed.
pub trait NodeLookup {
    /// Position of the node registered for `value`, if one exists.
    fn position_of_value(&self, value: u64) -> Option<Position>;

    /// Whether any node sits at `position`.
    fn is_occupied(&self, position: &Position) -> bool;
}

/// A node a placement asks the lattice to append.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    pub label: String,
    pub ratio: Ratio,
    pub position: Position,
    pub represented_value: Option<u64>,
}

/// Everything a single submission adds to the lattice.
///
/// `nodes[0]` is always the submitted ratio; auxiliary nodes follow.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub nodes: Vec<NewNode>,
    pub links: Vec<(Position, Position)>,
}

impl Placement {
    fn new(primary: NewNode) -> Self {
        Self { nodes: vec![primary], links: Vec::new() }
    }

    pub fn primary(&self) -> &NewNode {
        &self.nodes[0]
    }

    fn push_node(&mut self, node: NewNode) {
        self.nodes.push(node);
    }

    fn link(&mut self, from: Position, to: Position) {
        self.links.push((from, to));
    }
}

/// The active placement strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionScheme {
    Grid(GridScheme),
    Radial(RadialScheme),
}

impl PositionScheme {
    /// Builds the scheme named by `config.scheme` with its configured
    /// spacing or radius.
    pub fn from_config(config: &LatticeConfig) -> Self {
        match config.scheme {
            SchemeKind::Grid => PositionScheme::Grid(GridScheme::new(config.grid_spacing)),
            SchemeKind::Radial => PositionScheme::Radial(RadialScheme::new(config.radial_radius)),
        }
    }

    pub fn kind(&self) -> SchemeKind {
        match self {
            PositionScheme::Grid(_) => SchemeKind::Grid,
            PositionScheme::Radial(_) => SchemeKind::Radial,
        }
    }

    /// Resolves `ratio` against the nodes visible through `lookup`.
    pub fn resolve(&self, ratio: &Ratio, lookup: &impl NodeLookup) -> Result<Placement> {
        match self {
            PositionScheme::Grid(grid) => grid.resolve(ratio, lookup),
            PositionScheme::Radial(radial) => radial.resolve(ratio, lookup),
        }
    }

    /// Whether the lattice can remove this scheme's placements one by one.
    ///
    /// Radial placements can add several auxiliary nodes and share links
    /// between them, so only the grid supports undo.
    pub fn supports_undo(&self) -> bool {
        matches!(self, PositionScheme::Grid(_))
    }

    /// Scene decoration added the first time a ratio is submitted.
    pub fn reference_ring(&self) -> Option<ReferenceRing> {
        match self {
            PositionScheme::Grid(_) => None,
            PositionScheme::Radial(radial) => Some(radial.reference_ring()),
        }
    }
}
