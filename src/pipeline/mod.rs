//! Preview render pipeline.
//!
//! - [`RenderController`] - owns the file set and runs the pipeline on every change
//! - [`PipelineState`] - stage reached by the current render attempt
//! - [`Observers`] / [`PreviewEvent`] - change notifications

mod controller;
mod event;
mod state;

pub use controller::RenderController;
pub use event::{ObserverId, Observers, PreviewEvent};
pub use state::PipelineState;
