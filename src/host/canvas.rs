//! In-memory host: one optional document holding a stack of layers.
use std::path::{Path, PathBuf};

use image::{Rgb, RgbaImage};

use crate::error::AppResult;
use crate::host::{ActionRegistration, DockRegistration, Document, Host, PluginHost};

#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub pixels: RgbaImage,
}

#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    layers: Vec<Layer>,
    refresh_count: usize,
}

impl CanvasDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Write every layer as `<dir>/<name>.png`, creating `dir` if needed.
    pub fn export_layers(&self, dir: &Path) -> AppResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let path = dir.join(format!("{}.png", file_stem(&layer.name)));
            layer.pixels.save(&path)?;
            tracing::info!("Wrote layer '{}' to {}", layer.name, path.display());
            written.push(path);
        }
        Ok(written)
    }
}

impl Document for CanvasDocument {
    fn create_paint_layer(&mut self, name: &str, pixels: &RgbaImage) -> AppResult<()> {
        self.layers.push(Layer { name: name.to_string(), pixels: pixels.clone() });
        Ok(())
    }

    fn refresh_projection(&mut self) {
        self.refresh_count += 1;
    }
}

/// Prompts make poor file names; keep alphanumerics and a few separators.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .take(120)
        .collect();
    if stem.is_empty() {
        "layer".to_string()
    } else {
        stem
    }
}

#[derive(Debug, Default)]
pub struct CanvasHost {
    pub document: Option<CanvasDocument>,
    pub has_active_view: bool,
    pub foreground: Option<Rgb<u8>>,
    pub warnings: Vec<(String, String)>,
    pub docks: Vec<DockRegistration>,
    pub actions: Vec<ActionRegistration>,
}

impl CanvasHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with an empty open document and an active view.
    pub fn with_document() -> Self {
        CanvasHost {
            document: Some(CanvasDocument::new()),
            has_active_view: true,
            ..Self::default()
        }
    }
}

impl Host for CanvasHost {
    fn active_document(&mut self) -> Option<&mut dyn Document> {
        self.document.as_mut().map(|d| d as &mut dyn Document)
    }

    fn warn(&mut self, title: &str, message: &str) {
        tracing::warn!("{}: {}", title, message);
        self.warnings.push((title.to_string(), message.to_string()));
    }

    fn set_foreground_color(&mut self, color: Rgb<u8>) -> bool {
        if !self.has_active_view {
            return false;
        }
        self.foreground = Some(color);
        true
    }

    fn version(&self) -> String {
        format!("canvas {}", env!("CARGO_PKG_VERSION"))
    }
}

impl PluginHost for CanvasHost {
    fn add_dock_widget(&mut self, dock: DockRegistration) {
        self.docks.push(dock);
    }

    fn create_action(&mut self, action: ActionRegistration) {
        self.actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_keep_insertion_order() {
        let mut doc = CanvasDocument::new();
        let pixels = RgbaImage::new(2, 2);
        doc.create_paint_layer("first", &pixels).unwrap();
        doc.create_paint_layer("second", &pixels).unwrap();
        let names: Vec<_> = doc.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn file_stem_sanitizes_prompts() {
        assert_eq!(file_stem("a cat, on a mat_0"), "a_cat__on_a_mat_0");
        assert_eq!(file_stem(""), "layer");
    }

    #[test]
    fn export_writes_png_per_layer() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = CanvasDocument::new();
        doc.create_paint_layer("fox_0", &RgbaImage::new(4, 3)).unwrap();
        let written = doc.export_layers(dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("fox_0.png")]);
        let reread = image::open(&written[0]).unwrap();
        assert_eq!((reread.width(), reread.height()), (4, 3));
    }

    #[test]
    fn foreground_requires_active_view() {
        let mut host = CanvasHost::new();
        assert!(!host.set_foreground_color(Rgb([1, 2, 3])));
        assert!(host.foreground.is_none());
        host.has_active_view = true;
        assert!(host.set_foreground_color(Rgb([1, 2, 3])));
        assert_eq!(host.foreground, Some(Rgb([1, 2, 3])));
    }
}
