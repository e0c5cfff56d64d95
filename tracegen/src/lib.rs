//! # tracegen - GPU Tracepoint Instrumentation Generator
//!
//! Build-time generator that turns the driver's declarative tracepoint
//! list into runtime instrumentation C: paired begin/end emission calls
//! with structured argument capture, a default-enabled runtime toggle set,
//! and metadata for exporting the same events to perfetto. It runs once
//! per build and produces three artifacts the driver links against; it is
//! not a runtime component.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 tracepoints (declarations)                │
//! │   headers, forward decls, twelve scoped GPU events        │
//! └───────────────────────┬───────────────────────────────────┘
//!                         │ start/end pair synthesis
//!                         ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │              Registry  (tracegen-model crate)             │
//! │   ordered, validated, default-enablement bookkeeping      │
//! └───────────────────────┬───────────────────────────────────┘
//!                         │ handed over once, complete
//!                         ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                     emit (the engine)                     │
//! │  ┌────────────┐   ┌────────────┐   ┌─────────────────┐    │
//! │  │   header   │   │   source   │   │    perfetto     │    │
//! │  │ (gated     │   │ (flat-copy │   │ (export hooks   │    │
//! │  │  wrappers) │   │  bodies)   │   │  + extra data)  │    │
//! │  └────────────┘   └────────────┘   └─────────────────┘    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`tracepoints`]: the driver's declaration set, registered in source
//!   order against a fresh registry
//! - [`emit`]: the generation engine; walks the completed registry and
//!   writes the three artifacts deterministically
//! - [`cli`]: the four required path arguments the build system passes
//!
//! The declaration model itself (arguments, tracepoints, scoped events,
//! the registry) lives in the `tracegen-model` crate.
//!
//! ## Key Concepts
//!
//! - **Scoped event**: a start/end tracepoint pair sharing one runtime
//!   toggle; enablement is atomic per event, never per emission point
//! - **Capture record**: flat value copies at emission time, formatting
//!   deferred to trace consumption; keeps the hot path free of string work
//! - **Conversion expression**: maps a stored raw value to a printable
//!   primitive; applied only in generated formatting code

// Expose modules for testing
pub mod cli;
pub mod emit;
pub mod tracepoints;
