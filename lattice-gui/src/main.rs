//! # Ratio Lattice - Visual Just-Intonation Lattice GUI
//!
//! This module contains the main GUI application for the ratio lattice.
//! The user types ratios, each one is placed by the core placement engine,
//! and the resulting lattice is drawn in perspective on a canvas.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application; every lattice mutation happens
//!   synchronously in `update`
//! - **Core**: `lattice-core` owns the nodes and links; the canvas only
//!   draws a snapshot of them
//! - **Updates**: 60 FPS ticks via the subscription system drive the
//!   damped camera

mod camera;
mod ui;
mod widgets;

use std::path::Path;

use anyhow::Context;
use iced::{Element, Subscription, Theme};
use lattice_core::{Lattice, LatticeConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use camera::Camera;
use ui::main_display::create_main_view;

/// Configuration file read at start-up and written when the view changes.
const CONFIG_PATH: &str = "lattice_config.json";
/// Interval between camera updates (about 60 FPS).
const FRAME_INTERVAL_MS: u64 = 16;

/// Main entry point for the ratio lattice application.
pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(target: "main", "starting ratio lattice");
    let result = iced::application("Ratio Lattice", LatticeApp::update, LatticeApp::view)
        .subscription(LatticeApp::subscription)
        .theme(LatticeApp::theme)
        .run();
    info!(target: "main", "application finished with result: {:?}", result);
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    // Ratio entry
    RatioInputChanged(String),
    AddRatio,

    // Lattice actions
    Undo,
    Reset,
    ToggleScheme,

    // Camera control from the canvas
    Orbit { dx: f32, dy: f32 },
    Zoom(f32),

    // Continuous update message
    Tick,
}

/// Main application state.
#[derive(Debug)]
pub struct LatticeApp {
    pub(crate) lattice: Lattice,
    pub(crate) camera: Camera,
    pub(crate) ratio_input: String,
}

impl Default for LatticeApp {
    /// Creates the application from `lattice_config.json` if present,
    /// falling back to the default configuration.
    fn default() -> Self {
        let config = match load_config(Path::new(CONFIG_PATH)) {
            Ok(Some(config)) => config,
            Ok(None) => {
                info!(target: "main", "no {} found, using defaults", CONFIG_PATH);
                LatticeConfig::default()
            }
            Err(e) => {
                warn!(target: "main", "ignoring configuration: {:#}", e);
                LatticeConfig::default()
            }
        };
        Self::new(config)
    }
}

impl LatticeApp {
    fn new(config: LatticeConfig) -> Self {
        info!(target: "main", "creating {} lattice", config.scheme);
        Self {
            lattice: Lattice::new(config),
            camera: Camera::default(),
            ratio_input: String::new(),
        }
    }

    /// Handles application state updates based on incoming messages.
    ///
    /// Rejected submissions and unsupported undos are logged by the lattice
    /// itself; the view simply stays as it was.
    fn update(&mut self, message: Message) {
        match message {
            Message::RatioInputChanged(value) => {
                self.ratio_input = value;
            }
            Message::AddRatio => {
                let input = std::mem::take(&mut self.ratio_input);
                match self.lattice.add_ratio(&input) {
                    Ok(id) => debug!(target: "main", "added {} as node {}", input, id.0),
                    Err(e) => debug!(target: "main", "submission {:?} not added: {}", input, e),
                }
            }
            Message::Undo => {
                if self.lattice.supports_undo() {
                    if let Ok(node) = self.lattice.undo_last() {
                        debug!(target: "main", "removed {}", node.label);
                    }
                }
            }
            Message::Reset => {
                self.lattice.reset();
            }
            Message::ToggleScheme => {
                let next = self.lattice.scheme_kind().toggled();
                self.lattice.set_scheme(next);
                if let Err(e) = self.lattice.config().save(CONFIG_PATH) {
                    warn!(target: "main", "could not save configuration: {}", e);
                }
            }
            Message::Orbit { dx, dy } => {
                self.camera.orbit(dx, dy);
            }
            Message::Zoom(lines) => {
                self.camera.zoom(lines);
            }
            Message::Tick => {
                self.camera.update();
            }
        }
    }

    /// Renders the main application interface.
    fn view(&self) -> Element<'_, Message> {
        create_main_view(self)
    }

    /// Creates a subscription for continuous application updates.
    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(FRAME_INTERVAL_MS)).map(|_| Message::Tick)
    }

    /// Light theme to match the white drawing surface.
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Loads the configuration file if one exists.
///
/// # Returns
/// * `Ok(Some(config))` - File found and valid
/// * `Ok(None)` - No file at `path`
/// * `Err(e)` - File present but unreadable or invalid
fn load_config(path: &Path) -> anyhow::Result<Option<LatticeConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let config = LatticeConfig::load(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> LatticeApp {
        LatticeApp::new(LatticeConfig::default())
    }

    #[test]
    fn submit_clears_input_and_adds_node() {
        let mut app = app();
        app.update(Message::RatioInputChanged("3/2".into()));
        app.update(Message::AddRatio);
        assert!(app.ratio_input.is_empty());
        assert_eq!(app.lattice.nodes().len(), 2);
    }

    #[test]
    fn malformed_submit_is_ignored() {
        let mut app = app();
        app.update(Message::RatioInputChanged("3:2".into()));
        app.update(Message::AddRatio);
        assert!(app.ratio_input.is_empty());
        assert_eq!(app.lattice.nodes().len(), 1);
    }

    #[test]
    fn tick_does_not_touch_lattice() {
        let mut app = app();
        app.update(Message::Orbit { dx: 10.0, dy: 5.0 });
        let before = app.lattice.snapshot();
        let eye = app.camera.eye();
        app.update(Message::Tick);
        assert_eq!(app.lattice.snapshot(), before);
        assert_ne!(app.camera.eye(), eye);
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        assert!(load_config(Path::new("/nonexistent/lattice_config.json")).unwrap().is_none());
    }
}
