//! Pipeline plumbing: gap resolution, the sliding window, configuration,
//! validation and the streaming runner.

mod config;
mod gap;
mod runner;
mod validator;
mod window;

pub use config::{ModelSettings, PipelineConfig, PipelineSpec};
pub use gap::{GapPolicy, Resolved};
pub use runner::{apply_pipelines, PipelineOutput, PipelineRunner, RunnerState};
pub use validator::Validator;
pub use window::SlidingWindow;
