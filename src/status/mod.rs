//! Panel status and its transitions.
//!
//! ```text
//! Loading --options ok--> Ready --generate--> Processing --finished--> Ready
//! Loading --options err-> Error <--failed----  Processing
//! Error   --generate----> Processing
//! ```
//! Generation is allowed from `Ready` and `Error` only.
pub mod status_bar;

pub use status_bar::{Color, StatusBar};

use std::fmt;

use crate::error::{AppError, AppResult};

pub const CANNOT_CONNECT: &str = "Cannot connect to API";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Processing,
    Error(Option<String>),
}

impl Status {
    pub fn can_generate(&self) -> bool {
        matches!(self, Status::Ready | Status::Error(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Loading => "Loading",
            Status::Ready => "Ready",
            Status::Processing => "Processing",
            Status::Error(_) => "Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Error(Some(message)) => write!(f, "Error: {}", message),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMachine {
    status: Status,
}

impl Default for StatusMachine {
    fn default() -> Self {
        StatusMachine { status: Status::Loading }
    }
}

impl StatusMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn can_generate(&self) -> bool {
        self.status.can_generate()
    }

    pub fn options_loaded(&mut self) -> AppResult<&Status> {
        self.transition("options_loaded", |s| matches!(s, Status::Loading), Status::Ready)
    }

    pub fn options_failed(&mut self) -> AppResult<&Status> {
        self.transition(
            "options_failed",
            |s| matches!(s, Status::Loading),
            Status::Error(Some(CANNOT_CONNECT.to_string())),
        )
    }

    /// A background generation task reported `Started`.
    pub fn task_started(&mut self) -> AppResult<&Status> {
        self.transition("task_started", Status::can_generate, Status::Processing)
    }

    /// Result post-processing succeeded.
    pub fn task_finished(&mut self) -> AppResult<&Status> {
        self.transition("task_finished", |s| matches!(s, Status::Processing), Status::Ready)
    }

    /// The task failed, or its result could not be applied.
    pub fn task_failed(&mut self, message: impl Into<String>) -> AppResult<&Status> {
        self.transition(
            "task_failed",
            |s| matches!(s, Status::Processing),
            Status::Error(Some(message.into())),
        )
    }

    fn transition(
        &mut self,
        event: &'static str,
        allowed: impl Fn(&Status) -> bool,
        next: Status,
    ) -> AppResult<&Status> {
        if !allowed(&self.status) {
            return Err(AppError::InvalidTransition { from: self.status.to_string(), event });
        }
        tracing::debug!("Status {} -> {} ({})", self.status, next, event);
        self.status = next;
        Ok(&self.status)
    }
}
