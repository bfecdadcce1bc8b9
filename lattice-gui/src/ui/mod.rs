//! # UI Module
//!
//! Layout of the ratio lattice application window.

pub mod main_display;
