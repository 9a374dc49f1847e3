//! Seams to the host painting application.
//!
//! The panels only talk to the host through these traits. [`CanvasHost`] is
//! an in-memory host used by the CLI and the tests.
pub mod canvas;

pub use canvas::{CanvasDocument, CanvasHost, Layer};

use image::{Rgb, RgbaImage};

use crate::error::AppResult;

/// An open document that can receive new paint layers.
pub trait Document {
    /// Append a paint layer holding `pixels`, placed at the origin.
    fn create_paint_layer(&mut self, name: &str, pixels: &RgbaImage) -> AppResult<()>;
    fn refresh_projection(&mut self);
}

/// Services the panels need from the running application.
pub trait Host {
    fn active_document(&mut self) -> Option<&mut dyn Document>;
    /// Show a blocking warning dialog.
    fn warn(&mut self, title: &str, message: &str);
    /// Set the foreground colour of the active view. Returns `false` when
    /// there is no active view.
    fn set_foreground_color(&mut self, color: Rgb<u8>) -> bool;
    fn version(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockArea {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockRegistration {
    pub id: &'static str,
    pub title: &'static str,
    pub area: DockArea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRegistration {
    pub id: String,
    pub text: String,
    pub menu_location: String,
}

/// Registration surface used once at plugin load.
pub trait PluginHost {
    fn add_dock_widget(&mut self, dock: DockRegistration);
    fn create_action(&mut self, action: ActionRegistration);
}
