//! Scoped events: the start/end pair synthesizer.
//!
//! A scoped event is a driver operation bracketed by a start and an end
//! emission point sharing one runtime toggle. One declaration here expands
//! into exactly two registry entries: `start_<name>` carrying no payload
//! and `end_<name>` carrying the declared payload. Because both entries
//! share the toggle, enablement is atomic per scoped event; a consumer of
//! the generated toggle system can never observe a start without a matching
//! possible end.

use crate::arg::{is_c_identifier, Argument, Param};
use crate::error::ModelError;
use crate::registry::Registry;
use crate::tracepoint::Tracepoint;

/// One logical operation bounded by start/end emission points.
///
/// Scoped events are enabled by default; pass `false` to
/// [`ScopedEvent::default_enabled`] to ship one disabled.
#[derive(Debug, Clone)]
pub struct ScopedEvent {
    name: String,
    params: Vec<Param>,
    args: Vec<Argument>,
    record: Vec<Argument>,
    print: Option<String>,
    default_enabled: bool,
}

impl ScopedEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            args: Vec::new(),
            record: Vec::new(),
            print: None,
            default_enabled: true,
        }
    }

    /// Inline argument captured by the end emission point.
    #[must_use]
    pub fn arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    /// Signature-only parameter of the end emission point; capture-record
    /// expressions read from it.
    #[must_use]
    pub fn param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(Param::new(ty, name));
        self
    }

    /// Capture-record field of the end emission point: copied flat at
    /// emission time, formatted only at trace-consumption time. This keeps
    /// the hot emission call to pure value copies.
    #[must_use]
    pub fn record_field(mut self, arg: Argument) -> Self {
        self.record.push(arg);
        self
    }

    /// Opaque custom print override for the end emission point.
    #[must_use]
    pub fn print(mut self, print: impl Into<String>) -> Self {
        self.print = Some(print.into());
        self
    }

    /// Whether the event's toggle starts out enabled.
    #[must_use]
    pub fn default_enabled(mut self, enabled: bool) -> Self {
        self.default_enabled = enabled;
        self
    }

    /// Expand into the start/end pair and register both.
    ///
    /// Both synthesized declarations are validated and checked against the
    /// registry before either is inserted: a failed registration registers
    /// neither and leaves the default-enablement list untouched.
    ///
    /// # Errors
    ///
    /// Any [`ModelError`] from validating the synthesized declarations, or
    /// [`ModelError::DuplicateTracepoint`] if either derived name is taken.
    pub fn register(self, registry: &mut Registry) -> Result<(), ModelError> {
        if !is_c_identifier(&self.name) {
            return Err(ModelError::InvalidName(self.name));
        }

        let start_name = format!("start_{}", self.name);
        let end_name = format!("end_{}", self.name);

        let start = Tracepoint::builder(&start_name)
            .toggle(&self.name)
            .perfetto(format!("{}_start_{}", registry.prefix(), self.name))
            .build()?;

        let mut end = Tracepoint::builder(&end_name)
            .toggle(&self.name)
            .perfetto(format!("{}_end_{}", registry.prefix(), self.name));
        for param in self.params {
            end = end.param(param.ty().to_string(), param.name().to_string());
        }
        for arg in self.args {
            end = end.arg(arg);
        }
        for field in self.record {
            end = end.record_field(field);
        }
        if let Some(print) = self.print {
            end = end.print(print);
        }
        let end = end.build()?;

        if registry.contains(&start_name) {
            return Err(ModelError::DuplicateTracepoint(start_name));
        }
        if registry.contains(&end_name) {
            return Err(ModelError::DuplicateTracepoint(end_name));
        }

        registry.insert(start);
        registry.insert(end);
        if self.default_enabled {
            registry.push_default_enabled(self.name);
        }
        Ok(())
    }
}
