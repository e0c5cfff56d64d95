//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tracegen",
    about = "Generate GPU driver tracepoint instrumentation",
    after_help = "\
EXAMPLES:
    tracegen -p src/trace \\
        --trace-src gen/gpu_tracepoints.c \\
        --trace-hdr gen/gpu_tracepoints.h \\
        --perfetto-hdr gen/gpu_tracepoints_perfetto.h"
)]
pub struct Args {
    /// Search path where the trace runtime support header is staged
    #[arg(short = 'p', long, value_name = "DIR")]
    pub import_path: PathBuf,

    /// Output path for the generated instrumentation source
    #[arg(long, value_name = "FILE")]
    pub trace_src: PathBuf,

    /// Output path for the generated instrumentation header
    #[arg(long, value_name = "FILE")]
    pub trace_hdr: PathBuf,

    /// Output path for the generated perfetto helper header
    #[arg(long, value_name = "FILE")]
    pub perfetto_hdr: PathBuf,
}
