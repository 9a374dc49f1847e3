//! Image generation panel.
//!
//! Owns the parameter form, the status machine and the event queue of its
//! background task. All methods run on the owning (UI) task; the HTTP round
//! trip runs on the worker pool and reports back through the queue.
use std::cell::RefCell;
use std::rc::Rc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::host::Host;
use crate::panel::parameter_form::ParameterForm;
use crate::sdapi::{GenerationResponse, SdApiClient};
use crate::settings::{Parameters, SettingsStore};
use crate::status::{Status, StatusBar, StatusMachine};
use crate::task::{BackgroundTask, EventQueue, TaskEvent, WorkerPool};

pub const PANEL_ID: &str = "image_generation";
pub const PANEL_TITLE: &str = "AI - Image Generation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    Submitted(Uuid),
    /// Generation is disabled in the current state.
    Ignored,
    NoActiveDocument,
}

pub struct ImageGenerationPanel {
    parameters: Rc<RefCell<Parameters>>,
    form: ParameterForm,
    client: SdApiClient,
    store: Box<dyn SettingsStore>,
    pool: WorkerPool,
    status: StatusMachine,
    status_bar: StatusBar,
    generate_enabled: bool,
    models: Vec<String>,
    samplers: Vec<String>,
    in_flight: Option<Uuid>,
    events: EventQueue<GenerationResponse>,
}

impl ImageGenerationPanel {
    /// Build the panel in `Loading` with parameters restored from `store`.
    pub fn new(client: SdApiClient, store: Box<dyn SettingsStore>, pool: WorkerPool) -> Self {
        let mut parameters = Parameters::default();
        parameters.load(store.as_ref());
        let parameters = Rc::new(RefCell::new(parameters));
        let mut form = ParameterForm::new(Rc::clone(&parameters));
        form.populate_parameters();

        let mut panel = ImageGenerationPanel {
            parameters,
            form,
            client,
            store,
            pool,
            status: StatusMachine::new(),
            status_bar: StatusBar::new(),
            generate_enabled: false,
            models: Vec::new(),
            samplers: Vec::new(),
            in_flight: None,
            events: EventQueue::new(),
        };
        panel.update_ui();
        panel
    }

    /// Fetch model and sampler lists. Leaves `Loading` for `Ready`, or for
    /// `Error` when the API cannot be reached.
    pub async fn load_options(&mut self) -> AppResult<()> {
        let fetched = async {
            let models = self.client.models().await?;
            let samplers = self.client.samplers().await?;
            Ok::<_, AppError>((models, samplers))
        }
        .await;

        match fetched {
            Ok((models, samplers)) => {
                tracing::info!("Loaded {} model(s) and {} sampler(s)", models.len(), samplers.len());
                self.form.update_model_options(&models);
                self.form.update_sampler_options(&samplers);
                self.form.populate_parameters();
                self.models = models;
                self.samplers = samplers;
                self.status.options_loaded()?;
            }
            Err(e) => {
                tracing::error!("Failed to load options from {}: {}", self.client.base_url(), e);
                self.models.clear();
                self.samplers.clear();
                self.status.options_failed()?;
            }
        }
        self.update_ui();
        Ok(())
    }

    /// Save the parameters and start a generation task.
    ///
    /// A no-op while loading or while a task is in flight. Without an
    /// active document the host shows a warning and nothing is started.
    pub fn generate(&mut self, host: &mut dyn Host) -> AppResult<GenerateOutcome> {
        if !self.generate_enabled {
            tracing::debug!("Generate ignored while {}", self.status.status());
            return Ok(GenerateOutcome::Ignored);
        }
        if host.active_document().is_none() {
            host.warn("Warning", "No active document.");
            return Ok(GenerateOutcome::NoActiveDocument);
        }

        let snapshot = self.parameters.borrow().clone();
        if let Err(e) = snapshot.save(self.store.as_mut()) {
            tracing::warn!("Failed to persist parameters: {}", e);
        }

        let client = self.client.clone();
        let task_id = BackgroundTask::new(self.events.sender())
            .run(&self.pool, move || async move { client.generate(&snapshot).await });
        tracing::info!("Submitted generation task {}", task_id);

        self.in_flight = Some(task_id);
        self.update_ui();
        Ok(GenerateOutcome::Submitted(task_id))
    }

    /// Apply one task event. Events for a task other than the one in
    /// flight are dropped.
    pub fn handle_event(
        &mut self,
        event: TaskEvent<GenerationResponse>,
        host: &mut dyn Host,
    ) -> AppResult<()> {
        if self.in_flight != Some(event.task_id()) {
            tracing::warn!("Dropping event for unknown task {}", event.task_id());
            return Ok(());
        }

        let result = match event {
            TaskEvent::Started { .. } => self.status.task_started().map(|_| ()),
            TaskEvent::Finished { result, .. } => {
                self.in_flight = None;
                match insert_layers(&result, host) {
                    Ok(count) => {
                        tracing::info!("Inserted {} layer(s)", count);
                        self.status.task_finished().map(|_| ())
                    }
                    Err(e) => {
                        tracing::error!("Failed to apply generation result: {}", e);
                        self.status.task_failed(e.to_string()).map(|_| ())
                    }
                }
            }
            TaskEvent::Failed { error, .. } => {
                self.in_flight = None;
                self.status.task_failed(error.to_string()).map(|_| ())
            }
        };
        self.update_ui();
        result
    }

    /// Wait for the next event without applying it.
    pub async fn next_event(&mut self) -> Option<TaskEvent<GenerationResponse>> {
        self.events.recv().await
    }

    /// Drain events until no task is in flight.
    pub async fn wait_for_generation(&mut self, host: &mut dyn Host) -> AppResult<()> {
        while self.in_flight.is_some() {
            match self.events.recv().await {
                Some(event) => self.handle_event(event, host)?,
                None => break,
            }
        }
        Ok(())
    }

    fn update_ui(&mut self) {
        self.status_bar.update(self.status.status());
        self.generate_enabled = self.status.can_generate() && self.in_flight.is_none();
    }

    pub fn status(&self) -> &Status {
        self.status.status()
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn is_generate_enabled(&self) -> bool {
        self.generate_enabled
    }

    pub fn in_flight(&self) -> Option<Uuid> {
        self.in_flight
    }

    pub fn parameters(&self) -> Parameters {
        self.parameters.borrow().clone()
    }

    pub fn form(&self) -> &ParameterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ParameterForm {
        &mut self.form
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn samplers(&self) -> &[String] {
        &self.samplers
    }
}

pub fn layer_name(prompt: &str, index: usize) -> String {
    format!("{}_{}", prompt, index)
}

/// Decode a base64 image blob; the codec is picked from the bytes.
pub fn decode_image(encoded: &str) -> AppResult<RgbaImage> {
    let payload = match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(rest),
        None => encoded,
    };
    let bytes = BASE64.decode(payload.trim())?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Decode every image first so a bad payload inserts nothing, then add one
/// layer per image in response order.
fn insert_layers(response: &GenerationResponse, host: &mut dyn Host) -> AppResult<usize> {
    let document = host.active_document().ok_or(AppError::NoActiveDocument)?;
    if response.images.is_empty() {
        document.refresh_projection();
        return Ok(0);
    }
    let prompt = response
        .prompt()
        .ok_or_else(|| AppError::InvalidResponse("response parameters lack a prompt".into()))?;
    let decoded = response
        .images
        .iter()
        .map(|encoded| decode_image(encoded))
        .collect::<AppResult<Vec<_>>>()?;

    for (index, pixels) in decoded.iter().enumerate() {
        document.create_paint_layer(&layer_name(prompt, index), pixels)?;
    }
    document.refresh_projection();
    Ok(decoded.len())
}
