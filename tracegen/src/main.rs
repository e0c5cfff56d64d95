//! # tracegen - Main Entry Point
//!
//! Runs one generation pass: validate the invocation, build the
//! declaration registry, hand it to the engine exactly once. Every failure
//! is fatal; a partial artifact set would produce an inconsistent driver
//! build, so nothing is retried or recovered here.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tracegen::cli::Args;
use tracegen::emit::{self, Options, OutputPaths};
use tracegen::tracepoints;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Context handle every generated emission call takes.
const CTX_TYPE: &str = "struct gpu_device *";
const CTX_NAME: &str = "dev";

/// Symbol name of the runtime toggle mask.
const TOGGLE_VAR: &str = "gpu_tracepoint";

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    // Invocation errors (bad path arguments) get the usage exit code, the
    // same one clap uses for its own parse failures.
    if err.to_string().to_lowercase().contains("import path") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Invocation errors are reported before any declaration is registered.
    if !args.import_path.is_dir() {
        anyhow::bail!(
            "import path {} is not a directory",
            args.import_path.display()
        );
    }

    let registry = tracepoints::build_registry().context("invalid tracepoint declarations")?;
    info!(
        "registered {} tracepoints across {} toggles",
        registry.len(),
        registry.toggle_names().len()
    );

    let opts = Options {
        ctx_ty: CTX_TYPE.to_string(),
        ctx_name: CTX_NAME.to_string(),
        toggle_var: TOGGLE_VAR.to_string(),
        import_path: args.import_path,
    };
    let paths = OutputPaths {
        source: args.trace_src,
        header: args.trace_hdr,
        perfetto: args.perfetto_hdr,
    };

    emit::generate(&registry, &opts, &paths).context("code generation failed")?;
    Ok(())
}
