mod common;

use arcane_illusion::host::CanvasHost;
use arcane_illusion::panel::GenerateOutcome;
use arcane_illusion::settings::{FileStore, MemoryStore, Parameters, SettingsStore};
use arcane_illusion::status::{Color, Status};
use arcane_illusion::task::{TaskEvent, WorkerPool};
use arcane_illusion::{ImageGenerationPanel, SdApiClient};
use common::{png_base64, refused_url, spawn_mock, MockBehavior};
use tempfile::tempdir;

fn panel_for(url: &str, store: Box<dyn SettingsStore>) -> ImageGenerationPanel {
    let client = SdApiClient::new(url).unwrap();
    let pool = WorkerPool::new(2).unwrap();
    ImageGenerationPanel::new(client, store, pool)
}

#[tokio::test]
async fn options_load_moves_to_ready() {
    let mock = spawn_mock(MockBehavior::default()).await;
    let mut panel = panel_for(&mock.url, Box::new(MemoryStore::new()));
    assert_eq!(panel.status(), &Status::Loading);
    assert!(panel.status_bar().is_busy());
    assert!(!panel.is_generate_enabled());

    panel.load_options().await.unwrap();
    assert_eq!(panel.status(), &Status::Ready);
    assert_eq!(panel.models(), ["v1-5-pruned", "anything-v3"]);
    assert_eq!(panel.samplers(), ["Euler a", "DDIM"]);
    assert_eq!(panel.status_bar().color(), Color::Green);
    assert!(panel.is_generate_enabled());

    // No saved choice: the first option is taken.
    let params = panel.parameters();
    assert_eq!(params.sd_model.as_deref(), Some("v1-5-pruned"));
    assert_eq!(params.sampler.as_deref(), Some("Euler a"));
}

#[tokio::test]
async fn unreachable_api_errors_but_generate_still_tries() {
    let mut panel = panel_for(&refused_url(), Box::new(MemoryStore::new()));
    panel.load_options().await.unwrap();

    assert_eq!(panel.status(), &Status::Error(Some("Cannot connect to API".into())));
    assert_eq!(panel.status_bar().text(), "Cannot connect to API");
    assert!(panel.is_generate_enabled());
    assert!(panel.models().is_empty());

    let mut host = CanvasHost::with_document();
    let task_id = match panel.generate(&mut host).unwrap() {
        GenerateOutcome::Submitted(id) => id,
        other => panic!("expected submission, got {:?}", other),
    };

    let started = panel.next_event().await.unwrap();
    assert!(matches!(started, TaskEvent::Started { task_id: id } if id == task_id));
    panel.handle_event(started, &mut host).unwrap();
    assert_eq!(panel.status(), &Status::Processing);
    assert_eq!(panel.status_bar().color(), Color::Blue);

    let failed = panel.next_event().await.unwrap();
    assert!(matches!(failed, TaskEvent::Failed { .. }));
    panel.handle_event(failed, &mut host).unwrap();
    match panel.status() {
        Status::Error(Some(message)) => assert!(message.starts_with("HTTP client error")),
        other => panic!("unexpected status {:?}", other),
    }
    assert!(panel.is_generate_enabled());
    assert!(host.document.unwrap().layers().is_empty());
}

#[tokio::test]
async fn generation_inserts_one_layer_per_image() {
    let images = vec![png_base64(4, 4, [255, 0, 0, 255]), png_base64(6, 2, [0, 0, 255, 255])];
    let mock = spawn_mock(MockBehavior { images, ..Default::default() }).await;
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");

    let mut panel = panel_for(&mock.url, Box::new(FileStore::open(&settings).unwrap()));
    panel.load_options().await.unwrap();
    panel.form_mut().prompt.set_text("lighthouse");
    panel.form_mut().steps.set_value(12);

    let mut host = CanvasHost::with_document();
    assert!(matches!(panel.generate(&mut host).unwrap(), GenerateOutcome::Submitted(_)));
    assert!(!panel.is_generate_enabled());
    panel.wait_for_generation(&mut host).await.unwrap();

    assert_eq!(panel.status(), &Status::Ready);
    let doc = host.document.as_ref().unwrap();
    let names: Vec<_> = doc.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["lighthouse_0", "lighthouse_1"]);
    assert_eq!(doc.layers()[1].pixels.dimensions(), (6, 2));
    assert_eq!(doc.refresh_count(), 1);

    let recorded = mock.recorded();
    let body = &recorded.generation_bodies[0];
    assert_eq!(body["prompt"], "lighthouse");
    assert_eq!(body["steps"], 12);

    // Parameters were saved before the request went out.
    let mut restored = Parameters::default();
    restored.load(&FileStore::open(&settings).unwrap());
    assert_eq!(restored, panel.parameters());
}

#[tokio::test]
async fn zero_images_returns_to_ready_without_layers() {
    let mock = spawn_mock(MockBehavior::default()).await;
    let mut panel = panel_for(&mock.url, Box::new(MemoryStore::new()));
    panel.load_options().await.unwrap();

    let mut host = CanvasHost::with_document();
    panel.generate(&mut host).unwrap();
    panel.wait_for_generation(&mut host).await.unwrap();

    assert_eq!(panel.status(), &Status::Ready);
    assert!(host.document.unwrap().layers().is_empty());
}

#[tokio::test]
async fn server_failure_surfaces_as_error() {
    let mock = spawn_mock(MockBehavior { fail_generation: true, ..Default::default() }).await;
    let mut panel = panel_for(&mock.url, Box::new(MemoryStore::new()));
    panel.load_options().await.unwrap();

    let mut host = CanvasHost::with_document();
    panel.generate(&mut host).unwrap();
    panel.wait_for_generation(&mut host).await.unwrap();

    assert_eq!(
        panel.status(),
        &Status::Error(Some("API returned HTTP 500: CUDA out of memory".into()))
    );
    assert_eq!(panel.status_bar().color(), Color::Red);
    assert!(panel.is_generate_enabled());
}

#[tokio::test]
async fn malformed_payload_downgrades_to_error() {
    let images = vec![png_base64(2, 2, [0, 0, 0, 255]), "bm90IGFuIGltYWdl".to_string()];
    let mock = spawn_mock(MockBehavior { images, ..Default::default() }).await;
    let mut panel = panel_for(&mock.url, Box::new(MemoryStore::new()));
    panel.load_options().await.unwrap();

    let mut host = CanvasHost::with_document();
    panel.generate(&mut host).unwrap();
    panel.wait_for_generation(&mut host).await.unwrap();

    match panel.status() {
        Status::Error(Some(message)) => assert!(message.starts_with("Image decode error")),
        other => panic!("unexpected status {:?}", other),
    }
    assert!(host.document.unwrap().layers().is_empty());
}

#[tokio::test]
async fn second_generate_while_in_flight_is_ignored() {
    let mock = spawn_mock(MockBehavior::default()).await;
    let mut panel = panel_for(&mock.url, Box::new(MemoryStore::new()));
    panel.load_options().await.unwrap();

    let mut host = CanvasHost::with_document();
    assert!(matches!(panel.generate(&mut host).unwrap(), GenerateOutcome::Submitted(_)));
    assert_eq!(panel.generate(&mut host).unwrap(), GenerateOutcome::Ignored);
    panel.wait_for_generation(&mut host).await.unwrap();

    assert_eq!(mock.recorded().generation_bodies.len(), 1);
    assert!(matches!(panel.generate(&mut host).unwrap(), GenerateOutcome::Submitted(_)));
    panel.wait_for_generation(&mut host).await.unwrap();
    assert_eq!(mock.recorded().generation_bodies.len(), 2);
}

#[tokio::test]
async fn missing_document_warns_without_request() {
    let mock = spawn_mock(MockBehavior::default()).await;
    let mut panel = panel_for(&mock.url, Box::new(MemoryStore::new()));
    panel.load_options().await.unwrap();

    let mut host = CanvasHost::new();
    assert_eq!(panel.generate(&mut host).unwrap(), GenerateOutcome::NoActiveDocument);
    assert_eq!(host.warnings.len(), 1);
    assert_eq!(panel.status(), &Status::Ready);
    assert!(panel.in_flight().is_none());
    assert!(mock.recorded().generation_bodies.is_empty());
}

#[tokio::test]
async fn saved_parameters_are_restored_at_construction() {
    let mock = spawn_mock(MockBehavior::default()).await;
    let mut store = MemoryStore::new();
    Parameters {
        sd_model: Some("anything-v3".into()),
        prompt: "saved prompt".into(),
        sampler: Some("DDIM".into()),
        seed: 77,
        ..Parameters::default()
    }
    .save(&mut store)
    .unwrap();

    let mut panel = panel_for(&mock.url, Box::new(store));
    assert_eq!(panel.form().prompt.text(), "saved prompt");
    panel.load_options().await.unwrap();

    assert_eq!(panel.form().model.current_text(), "anything-v3");
    assert_eq!(panel.form().sampler.current_text(), "DDIM");
    let params = panel.parameters();
    assert_eq!(params.sd_model.as_deref(), Some("anything-v3"));
    assert_eq!(params.seed, 77);
}
