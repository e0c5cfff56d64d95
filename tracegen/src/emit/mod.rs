//! The generation engine.
//!
//! Walks a completed [`Registry`] and writes the three build artifacts:
//! the instrumentation source, the instrumentation header, and the perfetto
//! helper header. The registry (with its default-enablement list) and the
//! naming contract in [`Options`] are handed over exactly once, after every
//! declaration has been registered.
//!
//! Each emitter is generic over [`Write`] so tests can run them against
//! in-memory buffers; file handling lives in [`generate`] alone. Emission
//! is deterministic: the same registry produces byte-identical artifacts.

pub mod header;
pub mod perfetto;
pub mod source;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;
use tracegen_model::{Registry, Tracepoint};

/// Runtime support header the generated code includes. It must be reachable
/// through the import path handed to the build.
pub const RUNTIME_HEADER: &str = "gpu_trace.h";

/// The enabled mask is a `uint64_t`, one bit per toggle.
const MAX_TOGGLES: usize = 64;

/// Fixed naming contract the engine applies to every artifact.
#[derive(Debug, Clone)]
pub struct Options {
    /// Context parameter type of every emission call, e.g. `struct gpu_device *`.
    pub ctx_ty: String,
    /// Context parameter name, e.g. `dev`.
    pub ctx_name: String,
    /// Symbol name of the runtime toggle mask, e.g. `gpu_tracepoint`. Also
    /// names the flag constants, the config hook, and (uppercased) the
    /// environment variable the config hook parses.
    pub toggle_var: String,
    /// Search path where [`RUNTIME_HEADER`] is staged for the driver build.
    pub import_path: PathBuf,
}

/// The three output targets of one generation pass.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub source: PathBuf,
    pub header: PathBuf,
    pub perfetto: PathBuf,
}

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("{0} runtime toggles declared; the enabled mask holds at most 64")]
    TooManyToggles(usize),

    #[error("output path \"{}\" has no file name", .0.display())]
    InvalidOutputPath(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Write all three artifacts for `registry`.
///
/// # Errors
///
/// [`EmitError::TooManyToggles`] if the registry declares more toggles than
/// the mask can hold, [`EmitError::InvalidOutputPath`] for an output path
/// without a file name, or any I/O failure. No attempt is made to clean up
/// partially written artifacts; the caller aborts the build on error.
pub fn generate(registry: &Registry, opts: &Options, paths: &OutputPaths) -> Result<(), EmitError> {
    let toggles = registry.toggle_names();
    if toggles.len() > MAX_TOGGLES {
        return Err(EmitError::TooManyToggles(toggles.len()));
    }

    if !opts.import_path.join(RUNTIME_HEADER).is_file() {
        warn!(
            "runtime header {RUNTIME_HEADER} not found under {}; the driver build must stage it",
            opts.import_path.display()
        );
    }

    let header_name = file_name(&paths.header)?;
    let perfetto_name = file_name(&paths.perfetto)?;

    write_artifact(&paths.header, |w| header::emit(registry, opts, &header_name, w))?;
    info!("wrote instrumentation header {}", paths.header.display());

    write_artifact(&paths.source, |w| {
        source::emit(registry, opts, &header_name, &perfetto_name, w)
    })?;
    info!("wrote instrumentation source {}", paths.source.display());

    write_artifact(&paths.perfetto, |w| {
        perfetto::emit(registry, opts, &header_name, &perfetto_name, w)
    })?;
    info!("wrote perfetto helper header {}", paths.perfetto.display());

    Ok(())
}

fn file_name(path: &Path) -> Result<String, EmitError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| EmitError::InvalidOutputPath(path.to_path_buf()))
}

fn write_artifact<F>(path: &Path, emit: F) -> Result<(), EmitError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    emit(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// `ty name` with pointer types attached directly to the name.
pub(crate) fn c_declare(ty: &str, name: &str) -> String {
    if ty.ends_with('*') {
        format!("{ty}{name}")
    } else {
        format!("{ty} {name}")
    }
}

/// Parameter list of an emission call: the context handle, then signature
/// params, then inline arguments.
pub(crate) fn signature(tracepoint: &Tracepoint, opts: &Options) -> String {
    let mut parts = vec![c_declare(&opts.ctx_ty, &opts.ctx_name)];
    for param in tracepoint.params() {
        parts.push(c_declare(param.ty(), param.name()));
    }
    for arg in tracepoint.args() {
        parts.push(c_declare(arg.ty(), arg.name()));
    }
    parts.join(", ")
}

/// Flag constant for a toggle: `GPU_TRACEPOINT_RENDER_PASS`.
pub(crate) fn flag_ident(toggle_var: &str, toggle: &str) -> String {
    format!(
        "{}_{}",
        toggle_var.to_ascii_uppercase(),
        toggle.to_ascii_uppercase()
    )
}

/// Include-guard macro derived from an artifact file name.
pub(crate) fn guard_ident(file_name: &str) -> String {
    let mut guard = String::from("_");
    for c in file_name.chars() {
        if c.is_ascii_alphanumeric() {
            guard.push(c.to_ascii_uppercase());
        } else {
            guard.push('_');
        }
    }
    guard
}

/// Payload struct tag for a tracepoint: `trace_end_render_pass`.
pub(crate) fn payload_struct(tracepoint: &Tracepoint) -> String {
    format!("trace_{}", tracepoint.name())
}

pub(crate) const BANNER: &str = "/* Generated by tracegen. Do not edit. */";
