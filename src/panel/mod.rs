pub mod controls;
pub mod image_generation;
pub mod parameter_form;
pub mod segmentation;
pub mod segmentation_classes;

pub use image_generation::{GenerateOutcome, ImageGenerationPanel};
pub use parameter_form::ParameterForm;
pub use segmentation::SegmentationPalette;
