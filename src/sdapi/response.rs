//! Typed response records for the text-to-image API.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a `txt2img` call.
///
/// `images` holds base64 blobs in generation order; `parameters` echoes the
/// request as the server understood it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub info: String,
}

impl GenerationResponse {
    /// The prompt echoed back by the server, if it is a string.
    pub fn prompt(&self) -> Option<&str> {
        self.parameters.get("prompt").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub progress: f64,
    pub eta_relative: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModelEntry {
    pub model_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SamplerEntry {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ControlNetModelList {
    pub model_list: Vec<String>,
}
