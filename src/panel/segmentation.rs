//! Segmentation palette panel: pick a class, paint with its colour.
use image::{Rgb, Rgba, RgbaImage};

use crate::host::Host;
use crate::panel::segmentation_classes::{SegmentationClass, CLASSES};

pub const PANEL_ID: &str = "segmentation_palette";
pub const PANEL_TITLE: &str = "AI - Segmentation Palette";
pub const SWATCH_SIZE: u32 = 64;

impl SegmentationClass {
    /// Solid square used as the class icon.
    pub fn swatch(&self, size: u32) -> RgbaImage {
        let Rgb([r, g, b]) = self.color;
        RgbaImage::from_pixel(size, size, Rgba([r, g, b, 255]))
    }

    pub fn hex(&self) -> String {
        let Rgb([r, g, b]) = self.color;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

#[derive(Debug, Clone)]
pub struct SegmentationPalette {
    classes: &'static [SegmentationClass],
    current: Option<usize>,
}

impl Default for SegmentationPalette {
    fn default() -> Self {
        SegmentationPalette { classes: CLASSES, current: None }
    }
}

impl SegmentationPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[SegmentationClass] {
        self.classes
    }

    pub fn current(&self) -> Option<&SegmentationClass> {
        self.current.and_then(|i| self.classes.get(i))
    }

    /// Classes whose name contains `query`, case-insensitively, with their
    /// palette index. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<(usize, &SegmentationClass)> {
        let needle = query.trim().to_lowercase();
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Make `index` current and hand its colour to the host's active view.
    /// Returns whether the colour was applied.
    pub fn select(&mut self, index: usize, host: &mut dyn Host) -> bool {
        let Some(class) = self.classes.get(index) else {
            return false;
        };
        self.current = Some(index);
        let applied = host.set_foreground_color(class.color);
        if !applied {
            tracing::debug!("No active view, '{}' not applied", class.name);
        }
        applied
    }
}
