#![allow(dead_code)]

use std::io::Cursor;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{Rgba, RgbaImage};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default)]
pub struct MockBehavior {
    pub images: Vec<String>,
    pub fail_generation: bool,
    pub garbage_models: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Recorded {
    pub generation_bodies: Vec<Value>,
    pub user_agents: Vec<String>,
}

#[derive(Clone)]
struct MockState {
    behavior: Arc<MockBehavior>,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct MockApi {
    pub url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockApi {
    pub fn recorded(&self) -> Recorded {
        self.recorded.lock().unwrap().clone()
    }
}

pub fn png_base64(width: u32, height: u32, rgba: [u8; 4]) -> String {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(width, height, Rgba(rgba))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    BASE64.encode(bytes)
}

/// A base URL nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub async fn spawn_mock(behavior: MockBehavior) -> MockApi {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let state = MockState { behavior: Arc::new(behavior), recorded: Arc::clone(&recorded) };

    let app = Router::new()
        .route("/sdapi/v1/sd-models", get(models))
        .route("/sdapi/v1/samplers", get(samplers))
        .route("/sdapi/v1/txt2img", post(txt2img))
        .route("/sdapi/v1/progress", get(progress))
        .route("/controlnet/model_list", get(control_net_models))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener).unwrap().serve(app.into_make_service());
    tokio::spawn(server);

    MockApi { url: format!("http://{}", addr), recorded }
}

fn record_agent(state: &MockState, headers: &HeaderMap) {
    if let Some(agent) = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()) {
        state.recorded.lock().unwrap().user_agents.push(agent.to_string());
    }
}

async fn models(State(state): State<MockState>, headers: HeaderMap) -> Response {
    record_agent(&state, &headers);
    if state.behavior.garbage_models {
        return "<html>not json</html>".into_response();
    }
    Json(json!([
        {"title": "v1-5-pruned.ckpt [e1441589a6]", "model_name": "v1-5-pruned", "hash": "e1441589a6"},
        {"title": "anything-v3.safetensors [abc]", "model_name": "anything-v3", "hash": "abc"}
    ]))
    .into_response()
}

async fn samplers(State(state): State<MockState>, headers: HeaderMap) -> Json<Value> {
    record_agent(&state, &headers);
    Json(json!([
        {"name": "Euler a", "aliases": ["k_euler_a"], "options": {}},
        {"name": "DDIM", "aliases": [], "options": {}}
    ]))
}

async fn txt2img(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_agent(&state, &headers);
    state.recorded.lock().unwrap().generation_bodies.push(body.clone());
    if state.behavior.fail_generation {
        return (StatusCode::INTERNAL_SERVER_ERROR, "CUDA out of memory").into_response();
    }
    Json(json!({
        "images": state.behavior.images,
        "parameters": body,
        "info": "{\"seed\": 1234}"
    }))
    .into_response()
}

async fn progress() -> Json<Value> {
    Json(json!({"progress": 0.25, "eta_relative": 6.5, "state": {}}))
}

async fn control_net_models() -> Json<Value> {
    Json(json!({"model_list": ["control_sd15_seg [fef5e48e]"]}))
}
