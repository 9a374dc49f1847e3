mod common;

use arcane_illusion::{AppError, Parameters, SdApiClient};
use common::{png_base64, refused_url, spawn_mock, MockBehavior};

#[tokio::test]
async fn lists_models_and_samplers_in_order() {
    let mock = spawn_mock(MockBehavior::default()).await;
    let client = SdApiClient::new(&mock.url).unwrap();

    assert_eq!(client.models().await.unwrap(), ["v1-5-pruned", "anything-v3"]);
    assert_eq!(client.samplers().await.unwrap(), ["Euler a", "DDIM"]);

    let agents = mock.recorded().user_agents;
    assert_eq!(agents.len(), 2);
    assert!(agents.iter().all(|a| a.starts_with("arcane_illusion/")));
}

#[tokio::test]
async fn generate_posts_parameter_record() {
    let image = png_base64(8, 8, [255, 0, 0, 255]);
    let mock = spawn_mock(MockBehavior { images: vec![image.clone()], ..Default::default() }).await;
    let client = SdApiClient::new(format!("{}/", mock.url)).unwrap();

    let params = Parameters {
        prompt: "a paper boat".into(),
        sampler: Some("DDIM".into()),
        ..Parameters::default()
    };
    let response = client.generate(&params).await.unwrap();
    assert_eq!(response.images, vec![image]);
    assert_eq!(response.prompt(), Some("a paper boat"));

    let recorded = mock.recorded();
    let body = &recorded.generation_bodies[0];
    assert_eq!(body["prompt"], "a paper boat");
    assert_eq!(body["sampler"], "DDIM");
    assert_eq!(body["steps"], 20);
    assert_eq!(body["cfg_scale"], 7.0);
    assert!(body["sd_model"].is_null());
}

#[tokio::test]
async fn progress_and_control_net_models() {
    let mock = spawn_mock(MockBehavior::default()).await;
    let client = SdApiClient::new(&mock.url).unwrap();

    let progress = client.progress().await.unwrap();
    assert_eq!(progress.progress, 0.25);
    assert_eq!(progress.eta_relative, 6.5);
    assert_eq!(client.control_net_models().await.unwrap(), ["control_sd15_seg [fef5e48e]"]);
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let mock = spawn_mock(MockBehavior { garbage_models: true, ..Default::default() }).await;
    let client = SdApiClient::new(&mock.url).unwrap();
    assert!(matches!(client.models().await, Err(AppError::HttpClient(_))));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let mock = spawn_mock(MockBehavior { fail_generation: true, ..Default::default() }).await;
    let client = SdApiClient::new(&mock.url).unwrap();
    match client.generate(&Parameters::default()).await {
        Err(AppError::Api { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "CUDA out of memory");
        }
        other => panic!("unexpected result {:?}", other.map(|r| r.images.len())),
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let client = SdApiClient::new(refused_url()).unwrap();
    assert!(matches!(client.samplers().await, Err(AppError::HttpClient(_))));
}
