//! The declaration registry.
//!
//! Holds the ordered headers, forward declarations, and tracepoint
//! declarations that constitute one complete generation input, plus the
//! default-enablement bookkeeping. Populated once, in source order, then
//! handed unchanged to the generation engine. The registry is an explicit
//! owned value threaded through the caller; there is no ambient state.

use std::collections::HashSet;

use crate::error::ModelError;
use crate::tracepoint::Tracepoint;

/// Where a registered header is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderScope {
    /// Included from the generated instrumentation header, visible to every
    /// consumer of the generated declarations.
    Public,
    /// Included only from the generated instrumentation source.
    Source,
}

/// A header file the generated code must include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRef {
    path: String,
    scope: HeaderScope,
}

impl HeaderRef {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn scope(&self) -> HeaderScope {
        self.scope
    }
}

/// A type forward-declared so generated signatures can reference it without
/// a full include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardDecl {
    text: String,
}

impl ForwardDecl {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered collection of everything one generation pass consumes.
#[derive(Debug)]
pub struct Registry {
    prefix: String,
    headers: Vec<HeaderRef>,
    forward_decls: Vec<ForwardDecl>,
    tracepoints: Vec<Tracepoint>,
    names: HashSet<String>,
    default_enabled: Vec<String>,
}

impl Registry {
    /// Create an empty registry. `prefix` is prepended to the export names
    /// the pair synthesizer derives (e.g. `gpu` -> `gpu_start_blit`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            headers: Vec::new(),
            forward_decls: Vec::new(),
            tracepoints: Vec::new(),
            names: HashSet::new(),
            default_enabled: Vec::new(),
        }
    }

    /// Append a header include. Duplicates are permitted here; collapsing
    /// them is the generation engine's concern.
    pub fn add_header(&mut self, path: impl Into<String>, scope: HeaderScope) {
        self.headers.push(HeaderRef { path: path.into(), scope });
    }

    /// Append a forward declaration.
    pub fn add_forward_decl(&mut self, text: impl Into<String>) {
        self.forward_decls.push(ForwardDecl { text: text.into() });
    }

    /// Append a fully formed tracepoint declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateTracepoint`] if the name is already
    /// registered. The engine derives C symbol names from this field, so a
    /// collision here is a duplicate-symbol build failure downstream.
    pub fn add_tracepoint(&mut self, tracepoint: Tracepoint) -> Result<(), ModelError> {
        if self.contains(tracepoint.name()) {
            return Err(ModelError::DuplicateTracepoint(tracepoint.name().to_string()));
        }
        self.insert(tracepoint);
        Ok(())
    }

    /// Whether a tracepoint with this name is already registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub(crate) fn insert(&mut self, tracepoint: Tracepoint) {
        self.names.insert(tracepoint.name().to_string());
        self.tracepoints.push(tracepoint);
    }

    pub(crate) fn push_default_enabled(&mut self, name: impl Into<String>) {
        self.default_enabled.push(name.into());
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn headers(&self) -> &[HeaderRef] {
        &self.headers
    }

    #[must_use]
    pub fn forward_decls(&self) -> &[ForwardDecl] {
        &self.forward_decls
    }

    #[must_use]
    pub fn tracepoints(&self) -> &[Tracepoint] {
        &self.tracepoints
    }

    /// Scoped-event names enabled when the generated toggle system
    /// initializes, in declaration order.
    #[must_use]
    pub fn default_enabled(&self) -> &[String] {
        &self.default_enabled
    }

    /// Distinct toggle names in first-declaration order. For a registry
    /// built purely from scoped events this is exactly the set of scoped
    /// event names.
    #[must_use]
    pub fn toggle_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut toggles = Vec::new();
        for tp in &self.tracepoints {
            if let Some(toggle) = tp.toggle() {
                if seen.insert(toggle) {
                    toggles.push(toggle);
                }
            }
        }
        toggles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracepoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracepoints.is_empty()
    }
}
