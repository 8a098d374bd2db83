//! Runtime faults relayed out of the isolated frame.
//!
//! ```text
//! ┌────────── isolated frame ──────────┐
//! │ onerror / unhandledrejection hooks │
//! └─────────────────┬──────────────────┘
//!                   │ postMessage({type: "runtime-error", error})
//!                   ▼
//!        FaultBridge::deliver(InboundMessage)
//!                   │ origin == assigned context?
//!                   │ kind == runtime-error?
//!                   │ generation current? (RejectStale only)
//!                   ▼
//!            RuntimeFaultLog (arrival order)
//! ```

mod bridge;
mod format;
mod log;
mod message;

pub use bridge::{Delivery, FaultBridge, StaleFaultPolicy};
pub use format::{FaultLogOptions, FaultSummary, format_fault_log};
pub use log::{FaultEntry, RuntimeFaultLog};
pub use message::{
    FaultEnvelope, InboundMessage, RUNTIME_ERROR, format_error, format_rejection,
};
