//! Tracepoint declarations.
//!
//! A [`Tracepoint`] is one emission point in the generated code. It is
//! constructed through [`TracepointBuilder`], which validates the
//! declaration before it can enter a registry: mistakes are rejected here,
//! at build time, not discovered later as C compile failures.

use crate::arg::{is_c_identifier, Argument, Param};
use crate::error::ModelError;

/// One emission point in generated code.
///
/// Carries either inline arguments (captured and formatted from the
/// emission-call parameters) or a capture record (flat value copies at
/// emission time, formatting deferred to trace consumption), never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracepoint {
    name: String,
    toggle: Option<String>,
    params: Vec<Param>,
    args: Vec<Argument>,
    record: Vec<Argument>,
    print: Option<String>,
    perfetto: Option<String>,
}

impl Tracepoint {
    pub fn builder(name: impl Into<String>) -> TracepointBuilder {
        TracepointBuilder {
            name: name.into(),
            toggle: None,
            params: Vec::new(),
            args: Vec::new(),
            record: Vec::new(),
            print: None,
            perfetto: None,
        }
    }

    /// Name the generated C symbols are derived from. Unique per registry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime toggle gating this emission point, shared across a scoped
    /// event's start/end pair. Toggle-less tracepoints emit unconditionally.
    #[must_use]
    pub fn toggle(&self) -> Option<&str> {
        self.toggle.as_deref()
    }

    /// Signature-only parameters (record captures read from these).
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Inline arguments: emission-call parameters stored directly.
    #[must_use]
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Capture record fields: copied from capture expressions at emission
    /// time, formatted later.
    #[must_use]
    pub fn record(&self) -> &[Argument] {
        &self.record
    }

    /// The payload stored when this tracepoint fires, regardless of capture
    /// strategy.
    #[must_use]
    pub fn payload(&self) -> &[Argument] {
        if self.record.is_empty() {
            &self.args
        } else {
            &self.record
        }
    }

    #[must_use]
    pub fn has_payload(&self) -> bool {
        !self.payload().is_empty()
    }

    /// Opaque custom print override, passed to the engine verbatim.
    #[must_use]
    pub fn print(&self) -> Option<&str> {
        self.print.as_deref()
    }

    /// Export name for the trace front end. Tracepoints without one are
    /// skipped by the perfetto emitter.
    #[must_use]
    pub fn perfetto(&self) -> Option<&str> {
        self.perfetto.as_deref()
    }
}

/// Configuration for a [`Tracepoint`], with independently defaulted fields
/// and an explicit validation step in [`TracepointBuilder::build`].
#[derive(Debug, Clone)]
pub struct TracepointBuilder {
    name: String,
    toggle: Option<String>,
    params: Vec<Param>,
    args: Vec<Argument>,
    record: Vec<Argument>,
    print: Option<String>,
    perfetto: Option<String>,
}

impl TracepointBuilder {
    #[must_use]
    pub fn toggle(mut self, name: impl Into<String>) -> Self {
        self.toggle = Some(name.into());
        self
    }

    #[must_use]
    pub fn param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(Param::new(ty, name));
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    #[must_use]
    pub fn record_field(mut self, arg: Argument) -> Self {
        self.record.push(arg);
        self
    }

    #[must_use]
    pub fn print(mut self, print: impl Into<String>) -> Self {
        self.print = Some(print.into());
        self
    }

    #[must_use]
    pub fn perfetto(mut self, name: impl Into<String>) -> Self {
        self.perfetto = Some(name.into());
        self
    }

    /// Validate the declaration and produce the immutable [`Tracepoint`].
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for any malformed declaration: a name that
    /// is not a C identifier, both capture strategies populated, signature
    /// parameters without a capture record, or an invalid argument.
    pub fn build(self) -> Result<Tracepoint, ModelError> {
        if !is_c_identifier(&self.name) {
            return Err(ModelError::InvalidName(self.name));
        }
        if !self.args.is_empty() && !self.record.is_empty() {
            return Err(ModelError::ConflictingCapture(self.name));
        }
        if !self.params.is_empty() && self.record.is_empty() {
            return Err(ModelError::DanglingParams(self.name));
        }

        for param in &self.params {
            param.validate(&self.name)?;
        }
        Self::check_unique(&self.name, self.params.iter().map(Param::name))?;

        let payload = if self.record.is_empty() { &self.args } else { &self.record };
        for arg in payload {
            arg.validate(&self.name)?;
        }
        Self::check_unique(&self.name, payload.iter().map(Argument::name))?;

        Ok(Tracepoint {
            name: self.name,
            toggle: self.toggle,
            params: self.params,
            args: self.args,
            record: self.record,
            print: self.print,
            perfetto: self.perfetto,
        })
    }

    fn check_unique<'a>(
        tracepoint: &str,
        names: impl Iterator<Item = &'a str>,
    ) -> Result<(), ModelError> {
        let mut seen = std::collections::HashSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(ModelError::DuplicateArgument {
                    tracepoint: tracepoint.to_string(),
                    argument: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_tracepoint() {
        let tp = Tracepoint::builder("start_blit").toggle("blit").build().unwrap();
        assert_eq!(tp.name(), "start_blit");
        assert_eq!(tp.toggle(), Some("blit"));
        assert!(!tp.has_payload());
        assert!(tp.perfetto().is_none());
    }

    #[test]
    fn test_inline_args_are_the_payload() {
        let tp = Tracepoint::builder("end_gmem_clear")
            .arg(Argument::new("uint8_t", "samples", "%u"))
            .build()
            .unwrap();
        assert_eq!(tp.payload().len(), 1);
        assert_eq!(tp.payload()[0].name(), "samples");
    }

    #[test]
    fn test_record_capture_with_params() {
        let tp = Tracepoint::builder("end_render_pass")
            .param("const struct gpu_framebuffer *", "fb")
            .record_field(Argument::field("uint16_t", "width", "fb->width", "%u"))
            .record_field(Argument::field("uint16_t", "height", "fb->height", "%u"))
            .build()
            .unwrap();
        assert_eq!(tp.params().len(), 1);
        assert_eq!(tp.payload().len(), 2);
        assert_eq!(tp.payload()[1].var(), "fb->height");
    }

    #[test]
    fn test_both_capture_strategies_rejected() {
        let err = Tracepoint::builder("end_blit")
            .arg(Argument::new("uint8_t", "layers", "%u"))
            .record_field(Argument::field("uint8_t", "layers", "layers", "%u"))
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::ConflictingCapture("end_blit".to_string()));
    }

    #[test]
    fn test_params_without_record_rejected() {
        let err = Tracepoint::builder("end_render_pass")
            .param("const struct gpu_framebuffer *", "fb")
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::DanglingParams("end_render_pass".to_string()));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let err = Tracepoint::builder("end blit").build().unwrap_err();
        assert_eq!(err, ModelError::InvalidName("end blit".to_string()));
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let err = Tracepoint::builder("end_compute")
            .arg(Argument::new("uint8_t", "indirect", "%u"))
            .arg(Argument::new("uint16_t", "indirect", "%u"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateArgument {
                tracepoint: "end_compute".to_string(),
                argument: "indirect".to_string(),
            }
        );
    }
}
