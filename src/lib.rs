//! Arcane Illusion: text-to-image panels for a painting application.
//!
//! Modules:
//! - `sdapi`: Thin client for the text-to-image HTTP API.
//! - `settings`: Flat key-value persistence for options and parameters.
//! - `task`: Bounded worker pool and one-shot background tasks.
//! - `status`: Loading/Ready/Processing/Error machine and its status bar.
//! - `host`: Traits for the host application plus an in-memory host.
//! - `panel`: Image generation and segmentation palette panels.
//! - `extension`: Plugin identity and registration.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `SdApiClient`,
//! `Parameters`, `ImageGenerationPanel`, and `SegmentationPalette`.
pub mod config;
pub mod error;
pub mod extension;
pub mod host;
pub mod panel;
pub mod sdapi;
pub mod settings;
pub mod status;
pub mod task;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use panel::{ImageGenerationPanel, SegmentationPalette};
pub use sdapi::SdApiClient;
pub use settings::Parameters;
