//! # Tracepoint declaration model
//!
//! The build-time data model a GPU driver's tracepoint generator is driven
//! by. A generation pass populates one [`Registry`] with headers, forward
//! declarations, and tracepoint declarations, then hands it unchanged to
//! the generation engine that emits the instrumentation C.
//!
//! ```text
//! declarations ──▶ ScopedEvent ──▶ Registry ──▶ generation engine
//!                  (start/end       (ordered,      (emits source,
//!                   synthesis)       validated)     header, perfetto)
//! ```
//!
//! The model is pure data plus validation: no I/O, no globals. Every
//! declaration mistake (duplicate names, conflicting capture strategies,
//! malformed conversions) is rejected at registration time as a
//! [`ModelError`] instead of surfacing later as a C compile failure.
//!
//! Capture semantics: inline arguments are stored directly from the
//! emission-call parameters; capture-record fields are flat value copies of
//! opaque C expressions, with all formatting (including conversion
//! expressions) deferred to trace-consumption time so the emission call
//! stays cheap on the submission fast path.

pub mod arg;
pub mod error;
pub mod registry;
pub mod scoped;
pub mod tracepoint;

// Re-export the model surface for convenience
pub use arg::{Argument, Param};
pub use error::ModelError;
pub use registry::{ForwardDecl, HeaderRef, HeaderScope, Registry};
pub use scoped::ScopedEvent;
pub use tracepoint::{Tracepoint, TracepointBuilder};
