//! # live-preview
//!
//! Render an in-memory, multi-file web project into an isolated, executable
//! document and relay the faults it raises back to the host.
//!
//! The files come from elsewhere (a code-generation service, an editor).
//! This crate never writes them to disk. Every change to the file set
//! re-runs the whole pipeline from scratch:
//!
//! ```text
//! VirtualFileSet ─► resolve_entry ─► rewrite_references ─► inject_preamble
//!                                                               │
//!                      FaultBridge ◄── postMessage ── IsolationHost::assign
//!                          │
//!                          ▼
//!                   RuntimeFaultLog
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use live_preview::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(BlobStore::new());
//! let mut preview = RenderController::new(HeadlessHost::default(), Arc::clone(&store));
//!
//! let files = parse_generation_response(&body)?;
//! preview.set_files(files);
//!
//! // Forward messages from the platform's listener
//! let bridge = preview.fault_bridge();
//! bridge.deliver(&message);
//!
//! println!("{}", preview.fault_summary());
//! ```
//!
//! ## Platform Seams
//!
//! The pipeline only talks to the rendering platform through two traits,
//! so it runs without a browser:
//!
//! - [`ResourceMaterializer`]: content + type tag → dereferenceable locator
//! - [`IsolationHost`]: assign a document to the restricted frame
//!
//! Inbound messages enter through [`FaultBridge::deliver`].
//!
//! ## Modules
//!
//! - [`config`]: Runtime configuration (sandbox policy, stale-fault policy)
//! - [`mod@file`]: File set, content types, generation-service payloads
//! - [`resource`]: Materializers and per-generation resource ownership
//! - [`host`]: Isolation host trait and sandbox policy
//! - [`fault`]: Fault envelopes, log, bridge and formatting
//! - [`pipeline`]: State machine and render controller

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod fault;
pub mod file;
pub mod host;
pub mod instrument;
pub mod pipeline;
pub mod resolve;
pub mod resource;
pub mod rewrite;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use live_preview::prelude::*;
/// ```
pub mod prelude {
    // Pipeline
    pub use crate::{PipelineState, PreviewEvent, RenderController};

    // Files
    pub use crate::{FileData, VirtualFileSet, parse_generation_response};

    // Platform seams
    pub use crate::{
        BlobStore, ContextId, DataUrlMaterializer, FrameDocument, HeadlessHost, IsolationHost,
        ResourceMaterializer, SandboxPolicy,
    };

    // Faults
    pub use crate::{Delivery, FaultBridge, InboundMessage, RuntimeFaultLog, StaleFaultPolicy};

    // Errors
    pub use crate::PreviewError;
}

// =============================================================================
// High-Level API
// =============================================================================

pub use pipeline::{ObserverId, Observers, PipelineState, PreviewEvent, RenderController};

// =============================================================================
// Pipeline Stages
// =============================================================================

pub use instrument::{inject_preamble, preamble};
pub use resolve::resolve_entry;
pub use rewrite::{Reference, ReferenceAction, Rewritten, rewrite_references};

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::{Config, ConfigBuilder};
pub use error::PreviewError;
pub use fault::{
    Delivery, FaultBridge, FaultEntry, FaultEnvelope, FaultLogOptions, FaultSummary,
    InboundMessage, RuntimeFaultLog, StaleFaultPolicy, format_fault_log,
};
pub use file::{
    ContentType, FileData, GenerationError, GenerationRequest, GenerationResponse, VirtualFileSet,
    parse_generation_response,
};
pub use host::{Capability, ContextId, FrameDocument, HeadlessHost, IsolationHost, SandboxPolicy};
pub use resource::{
    BlobStore, DataUrlMaterializer, GenerationResources, Locator, MaterializeError,
    ResourceMaterializer,
};
