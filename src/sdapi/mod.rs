pub mod client;
pub mod response;

pub use client::SdApiClient;
pub use response::{GenerationResponse, ProgressResponse};
