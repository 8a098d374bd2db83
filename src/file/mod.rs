//! In-memory project files.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    File Set Lifecycle                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  generation service ──► parse_generation_response()         │
//! │                              │                              │
//! │                              ▼                              │
//! │                       VirtualFileSet  ◄── with_content()    │
//! │                              │            (editor edits)    │
//! │                              ▼                              │
//! │                   RenderController::set_files()             │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`VirtualFileSet`] is never patched in place. Every edit or
//! regeneration produces a new set and consumers re-derive everything
//! from it.

mod content_type;
mod generation;
mod set;

pub use content_type::ContentType;
pub use generation::{
    GenerationError, GenerationRequest, GenerationResponse, parse_generation_response,
};
pub use set::{FileData, VirtualFileSet};
