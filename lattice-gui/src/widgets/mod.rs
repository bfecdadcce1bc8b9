//! # Widgets
//!
//! Custom canvas widgets used by the main display.

pub mod lattice_canvas;
