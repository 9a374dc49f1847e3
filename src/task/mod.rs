pub mod background;
pub mod pool;

pub use background::{BackgroundTask, EventQueue, TaskEvent};
pub use pool::WorkerPool;
