// lattice-core/src/lib.rs

//! The core logic for the ratio lattice.
//! This crate factorizes just-intonation ratios, decides where each one
//! sits in the lattice, and keeps the graph of placed nodes and links.
//! It is completely headless and contains no GUI code.

pub mod classify;
pub mod config;
pub mod error;
pub mod factor;
pub mod lattice;
pub mod position;
pub mod ratio;
pub mod scheme;

pub use config::LatticeConfig;
pub use error::{LatticeError, Result};
pub use lattice::{Lattice, LatticeSnapshot, Link, Node, NodeId};
pub use position::Position;
pub use ratio::Ratio;
pub use scheme::{ReferenceRing, SchemeKind};
