//! # Lattice Graph Store
//!
//! Owns every node and link in the lattice. The store only changes through
//! three operations:
//! - **add**: parse a ratio, resolve it with the active scheme, append the
//!   resulting nodes and links
//! - **undo**: pop the newest node and every link touching its position
//!   (grid scheme only)
//! - **reset**: clear everything and re-seed with the configured ratio
//!
//! Renderers read the store through [`Lattice::snapshot`] or the slice
//! accessors and never mutate it.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::LatticeConfig;
use crate::error::{LatticeError, Result};
use crate::position::{Position, PositionKey};
use crate::ratio::Ratio;
use crate::scheme::{NodeLookup, Placement, PositionScheme, ReferenceRing, SchemeKind};

/// Index of a node in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A placed ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: String,
    pub ratio: Ratio,
    pub position: Position,
    /// Numerator used for neighbour lookup by the radial scheme.
    pub represented_value: Option<u64>,
}

/// An edge between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Position,
    pub to: Position,
}

impl Link {
    pub fn touches(&self, position: &Position) -> bool {
        self.from.same_point(position) || self.to.same_point(position)
    }
}

/// An owned copy of the lattice for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeSnapshot {
    pub scheme: SchemeKind,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub reference_ring: Option<ReferenceRing>,
}

#[derive(Debug, Clone)]
pub struct Lattice {
    config: LatticeConfig,
    scheme: PositionScheme,
    nodes: Vec<Node>,
    links: Vec<Link>,
    reference_ring: Option<ReferenceRing>,
    // First node registered for each represented value. Later nodes with
    // the same value reuse it and are never registered.
    by_value: HashMap<u64, NodeId>,
    by_position: HashMap<PositionKey, Vec<NodeId>>,
}

impl Lattice {
    /// Creates a lattice using the configured scheme, seeded with the
    /// configured seed ratio.
    pub fn new(config: LatticeConfig) -> Self {
        let scheme = PositionScheme::from_config(&config);
        let mut lattice = Self {
            config,
            scheme,
            nodes: Vec::new(),
            links: Vec::new(),
            reference_ring: None,
            by_value: HashMap::new(),
            by_position: HashMap::new(),
        };
        lattice.reset();
        lattice
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    pub fn scheme_kind(&self) -> SchemeKind {
        self.scheme.kind()
    }

    pub fn supports_undo(&self) -> bool {
        self.scheme.supports_undo()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn reference_ring(&self) -> Option<ReferenceRing> {
        self.reference_ring
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn snapshot(&self) -> LatticeSnapshot {
        LatticeSnapshot {
            scheme: self.scheme_kind(),
            nodes: self.nodes.clone(),
            links: self.links.clone(),
            reference_ring: self.reference_ring,
        }
    }

    /// Adds the ratio written in `input` to the lattice.
    ///
    /// # Arguments
    /// * `input` - A ratio of the form `digits/digits`
    ///
    /// # Returns
    /// * `Ok(id)` - Id of the node placed for `input`
    /// * `Err(e)` - The input was malformed or resolved to a degenerate
    ///   position; the lattice is unchanged apart from the reference ring
    pub fn add_ratio(&mut self, input: &str) -> Result<NodeId> {
        if self.reference_ring.is_none() {
            self.reference_ring = self.scheme.reference_ring();
        }

        let ratio = input.parse::<Ratio>().inspect_err(|e| {
            warn!(target: "lattice", "rejected submission: {}", e);
        })?;
        let placement = self.scheme.resolve(&ratio, &*self).inspect_err(|e| {
            warn!(target: "lattice", "placement aborted: {}", e);
        })?;

        Ok(self.apply(placement))
    }

    fn apply(&mut self, placement: Placement) -> NodeId {
        let primary = NodeId(self.nodes.len());
        for new_node in placement.nodes {
            let id = NodeId(self.nodes.len());
            if let Some(value) = new_node.represented_value {
                self.by_value.entry(value).or_insert(id);
            }
            self.by_position.entry(new_node.position.key()).or_default().push(id);
            self.nodes.push(Node {
                label: new_node.label,
                ratio: new_node.ratio,
                position: new_node.position,
                represented_value: new_node.represented_value,
            });
        }
        self.links.extend(
            placement
                .links
                .into_iter()
                .map(|(from, to)| Link { from, to }),
        );
        debug!(
            target: "lattice",
            "placed {} ({} nodes, {} links)",
            self.nodes[primary.0].label,
            self.nodes.len(),
            self.links.len()
        );
        primary
    }

    /// Removes the most recently added node and every link with an endpoint
    /// at its position.
    ///
    /// # Returns
    /// * `Ok(node)` - The removed node
    /// * `Err(UndoUnsupported)` - The active scheme cannot undo
    /// * `Err(NothingToUndo)` - The lattice is empty
    pub fn undo_last(&mut self) -> Result<Node> {
        if !self.scheme.supports_undo() {
            let err = LatticeError::UndoUnsupported { scheme: self.scheme_kind().name() };
            warn!(target: "lattice", "{}", err);
            return Err(err);
        }
        let Some(node) = self.nodes.pop() else {
            warn!(target: "lattice", "{}", LatticeError::NothingToUndo);
            return Err(LatticeError::NothingToUndo);
        };
        let id = NodeId(self.nodes.len());

        if let Some(value) = node.represented_value {
            if self.by_value.get(&value) == Some(&id) {
                self.by_value.remove(&value);
            }
        }
        let key = node.position.key();
        if let Some(ids) = self.by_position.get_mut(&key) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.by_position.remove(&key);
            }
        }

        let before = self.links.len();
        self.links.retain(|link| !link.touches(&node.position));
        debug!(
            target: "lattice",
            "undid {} and {} link(s)",
            node.label,
            before - self.links.len()
        );
        Ok(node)
    }

    /// Clears the lattice and places the seed ratio again.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.reference_ring = None;
        self.by_value.clear();
        self.by_position.clear();

        let seed = self.config.seed_ratio.clone();
        if let Err(e) = self.add_ratio(&seed) {
            warn!(target: "lattice", "seed ratio {:?} could not be placed: {}", seed, e);
        }
        info!(target: "lattice", "reset {} lattice", self.scheme_kind());
    }

    /// Switches to `kind` and resets. Does nothing if `kind` is already
    /// active.
    pub fn set_scheme(&mut self, kind: SchemeKind) {
        if kind == self.scheme_kind() {
            return;
        }
        self.config.scheme = kind;
        self.scheme = PositionScheme::from_config(&self.config);
        info!(target: "lattice", "switched to {} scheme", kind);
        self.reset();
    }
}

impl NodeLookup for Lattice {
    fn position_of_value(&self, value: u64) -> Option<Position> {
        self.by_value.get(&value).map(|id| self.nodes[id.0].position)
    }

    fn is_occupied(&self, position: &Position) -> bool {
        self.by_position.contains_key(&position.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Lattice {
        Lattice::new(LatticeConfig { scheme: SchemeKind::Grid, ..LatticeConfig::default() })
    }

    fn radial() -> Lattice {
        Lattice::new(LatticeConfig::default())
    }

    fn labels(lattice: &Lattice) -> Vec<&str> {
        lattice.nodes().iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn starts_with_identity_node() {
        for lattice in [grid(), radial()] {
            assert_eq!(labels(&lattice), vec!["1/1"]);
            assert_eq!(lattice.nodes()[0].position, Position::ORIGIN);
            assert!(lattice.links().is_empty());
        }
    }

    #[test]
    fn ring_only_for_radial() {
        assert!(radial().reference_ring().is_some());
        assert!(grid().reference_ring().is_none());
    }

    #[test]
    fn malformed_input_leaves_graph_unchanged() {
        let mut lattice = radial();
        let before = lattice.snapshot();
        for input in ["abc", "3/", "3/0", " 3/2", "-3/2", "0/5"] {
            let err = lattice.add_ratio(input).unwrap_err();
            assert!(err.is_malformed_input(), "{:?}", input);
        }
        assert_eq!(lattice.snapshot(), before);
    }

    #[test]
    fn radial_octave_links_from_origin() {
        let mut lattice = radial();
        let id = lattice.add_ratio("2/1").unwrap();
        let node = lattice.node(id).unwrap();
        assert!(node.position.distance(&Position::new(0.0, 2.0, 0.0)) < 1e-9);
        assert_eq!(node.represented_value, Some(2));
        assert_eq!(lattice.links().len(), 1);
        assert_eq!(lattice.links()[0].from, Position::ORIGIN);
    }

    #[test]
    fn radial_nine_is_placed_without_error() {
        let mut lattice = radial();
        let id = lattice.add_ratio("9/1").unwrap();
        let node = lattice.node(id).unwrap();
        assert!((node.position.distance(&Position::ORIGIN) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn radial_degenerate_composites_sit_at_origin() {
        let mut lattice = radial();
        let single = lattice.add_ratio("18/2").unwrap();
        assert_eq!(lattice.node(single).unwrap().position, Position::ORIGIN);
        let triple = lattice.add_ratio("105/1").unwrap();
        assert_eq!(lattice.node(triple).unwrap().position, Position::ORIGIN);
    }

    #[test]
    fn radial_composites_share_prime_nodes() {
        let mut lattice = radial();
        lattice.add_ratio("15/8").unwrap();
        assert_eq!(labels(&lattice), vec!["1/1", "15/8", "3/2", "5/4"]);
        assert_eq!(lattice.links().len(), 4);

        lattice.add_ratio("45/32").unwrap();
        // 45 = 3^2 * 5: both prime nodes exist already.
        assert_eq!(labels(&lattice), vec!["1/1", "15/8", "3/2", "5/4", "45/32"]);
        assert_eq!(lattice.links().len(), 6);
    }

    #[test]
    fn radial_prime_node_is_reused_when_entered_first() {
        let mut lattice = radial();
        let three = lattice.add_ratio("3/1").unwrap();
        let three_at = lattice.node(three).unwrap().position;
        lattice.add_ratio("6/1").unwrap();
        assert_eq!(labels(&lattice), vec!["1/1", "3/1", "6/1", "2/2"]);
        assert!(lattice.links().iter().any(|l| l.from == three_at));
    }

    #[test]
    fn radial_undo_is_a_no_op() {
        let mut lattice = radial();
        lattice.add_ratio("3/2").unwrap();
        let before = lattice.snapshot();
        assert!(!lattice.supports_undo());
        assert_eq!(
            lattice.undo_last(),
            Err(LatticeError::UndoUnsupported { scheme: "radial" })
        );
        assert_eq!(lattice.snapshot(), before);
    }

    #[test]
    fn grid_neighbours_are_linked() {
        let mut lattice = grid();
        lattice.add_ratio("3/1").unwrap();
        lattice.add_ratio("9/1").unwrap();
        let positions: Vec<_> = lattice.nodes().iter().map(|n| n.position).collect();
        assert_eq!(positions[1], Position::new(2.0, 0.0, 0.0));
        assert_eq!(positions[2], Position::new(4.0, 0.0, 0.0));
        assert!(lattice.links().contains(&Link { from: positions[1], to: positions[2] }));
        // 1/1 -> 3/1 and 3/1 -> 9/1
        assert_eq!(lattice.links().len(), 2);
    }

    #[test]
    fn grid_undo_restores_previous_state() {
        let mut lattice = grid();
        lattice.add_ratio("5/4").unwrap();
        let before = lattice.snapshot();

        lattice.add_ratio("15/8").unwrap();
        assert_eq!(lattice.links().len(), 2);
        let removed = lattice.undo_last().unwrap();
        assert_eq!(removed.label, "15/8");
        assert_eq!(lattice.snapshot(), before);
        assert!(!lattice.is_occupied(&Position::new(2.0, 2.0, 0.0)));
    }

    #[test]
    fn undo_on_empty_lattice() {
        let mut lattice = grid();
        lattice.undo_last().unwrap();
        assert!(lattice.nodes().is_empty());
        assert_eq!(lattice.undo_last(), Err(LatticeError::NothingToUndo));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut lattice = radial();
        lattice.add_ratio("7/4").unwrap();
        lattice.add_ratio("35/32").unwrap();
        lattice.reset();
        let first = lattice.snapshot();
        lattice.reset();
        assert_eq!(lattice.snapshot(), first);
        assert_eq!(labels(&lattice), vec!["1/1"]);
        assert!(lattice.links().is_empty());
    }

    #[test]
    fn reset_clears_registries() {
        let mut lattice = radial();
        lattice.add_ratio("3/2").unwrap();
        lattice.reset();
        assert_eq!(lattice.position_of_value(3), None);
        lattice.add_ratio("15/8").unwrap();
        assert_eq!(labels(&lattice), vec!["1/1", "15/8", "3/2", "5/4"]);
    }

    #[test]
    fn switching_scheme_resets() {
        let mut lattice = radial();
        lattice.add_ratio("3/2").unwrap();
        lattice.set_scheme(SchemeKind::Grid);
        assert_eq!(lattice.scheme_kind(), SchemeKind::Grid);
        assert_eq!(labels(&lattice), vec!["1/1"]);
        assert!(lattice.reference_ring().is_none());
        assert!(lattice.supports_undo());
    }
}
