//! Thin HTTP client for the text-to-image API.
//!
//! - `models` lists checkpoints from `/sdapi/v1/sd-models`.
//! - `samplers` lists sampler names from `/sdapi/v1/samplers`.
//! - `generate` posts a parameter record to `/sdapi/v1/txt2img`.
//! - `progress` polls `/sdapi/v1/progress`.
//! - `control_net_models` lists `/controlnet/model_list`.
//!
//! No retries, no backoff; each call fails with a transport error when the
//! network call fails or the body is not the expected JSON.
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::extension::{EXTENSION_ID, EXTENSION_VERSION};
use crate::sdapi::response::{
    ControlNetModelList, GenerationResponse, ModelEntry, ProgressResponse, SamplerEntry,
};
use crate::settings::Parameters;

fn normalize(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone)]
pub struct SdApiClient {
    client: Client,
    base_url: String,
}

impl SdApiClient {
    pub fn new(base_url: impl AsRef<str>) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", EXTENSION_ID, EXTENSION_VERSION))
            .build()?;
        Ok(SdApiClient { client, base_url: normalize(base_url.as_ref()) })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Names of the available checkpoints, in server order.
    pub async fn models(&self) -> AppResult<Vec<String>> {
        let entries: Vec<ModelEntry> = self.get_json("/sdapi/v1/sd-models").await?;
        Ok(entries.into_iter().map(|m| m.model_name).collect())
    }

    /// Names of the available samplers, in server order.
    pub async fn samplers(&self) -> AppResult<Vec<String>> {
        let entries: Vec<SamplerEntry> = self.get_json("/sdapi/v1/samplers").await?;
        Ok(entries.into_iter().map(|s| s.name).collect())
    }

    /// Submit a generation request. Blocks until the server has produced
    /// every image; there is no timeout.
    pub async fn generate(&self, parameters: &Parameters) -> AppResult<GenerationResponse> {
        let url = format!("{}/sdapi/v1/txt2img", self.base_url);
        tracing::info!("Sending generation request to {}", url);
        tracing::debug!("Generation payload: {:?}", parameters);

        let response = self.client.post(&url).json(parameters).send().await?;
        let response: GenerationResponse = Self::read_json(response).await?;
        tracing::info!("Generation returned {} image(s)", response.images.len());
        Ok(response)
    }

    /// Poll generation progress.
    ///
    /// Not used by the panel: polling while a generation is running has
    /// crashed the host on some platforms.
    pub async fn progress(&self) -> AppResult<ProgressResponse> {
        self.get_json("/sdapi/v1/progress").await
    }

    pub async fn control_net_models(&self) -> AppResult<Vec<String>> {
        let list: ControlNetModelList = self.get_json("/controlnet/model_list").await?;
        Ok(list.model_list)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!("API request failed. Status: {}, Body: {}", status, body);
            Err(AppError::Api { status, body })
        }
    }
}
