//! Perfetto helper header emitter.
//!
//! Emits the export metadata for the trace front end: one driver-side hook
//! declaration per exported tracepoint, plus C++ helpers that attach a
//! captured payload to a track event as named string values. Conversion
//! expressions are applied here, at export-formatting time, against the raw
//! values stored in the capture record.

use std::io::{self, Write};

use tracegen_model::{Registry, Tracepoint};

use super::{c_declare, guard_ident, payload_struct, Options, BANNER};

pub fn emit<W: Write>(
    registry: &Registry,
    opts: &Options,
    header_name: &str,
    perfetto_name: &str,
    w: &mut W,
) -> io::Result<()> {
    let guard = guard_ident(perfetto_name);

    writeln!(w, "{BANNER}")?;
    writeln!(w)?;
    writeln!(w, "#ifndef {guard}")?;
    writeln!(w, "#define {guard}")?;
    writeln!(w)?;
    writeln!(w, "#include \"{header_name}\"")?;
    writeln!(w)?;
    writeln!(w, "#ifdef __cplusplus")?;
    writeln!(w, "extern \"C\" {{")?;
    writeln!(w, "#endif")?;
    writeln!(w)?;
    writeln!(w, "/* Driver hooks, one per exported tracepoint. Implemented by the")?;
    writeln!(w, " * perfetto integration and invoked when a captured record is")?;
    writeln!(w, " * consumed, never on the emission path. */")?;
    for tracepoint in registry.tracepoints() {
        if let Some(export) = tracepoint.perfetto() {
            let ctx = c_declare(&opts.ctx_ty, &opts.ctx_name);
            if tracepoint.has_payload() {
                writeln!(
                    w,
                    "void {export}({ctx}, uint64_t ts_ns, const struct {} *payload);",
                    payload_struct(tracepoint)
                )?;
            } else {
                writeln!(w, "void {export}({ctx}, uint64_t ts_ns);")?;
            }
        }
    }
    writeln!(w)?;
    writeln!(w, "#ifdef __cplusplus")?;
    writeln!(w, "}}")?;
    writeln!(w, "#endif")?;
    writeln!(w)?;
    writeln!(w, "#ifdef __cplusplus")?;
    writeln!(w)?;
    writeln!(w, "#include <perfetto.h>")?;
    writeln!(w)?;

    for tracepoint in registry.tracepoints() {
        if tracepoint.perfetto().is_some() && tracepoint.has_payload() {
            emit_as_extra(tracepoint, w)?;
        }
    }

    writeln!(w, "#endif /* __cplusplus */")?;
    writeln!(w)?;
    writeln!(w, "#endif /* {guard} */")?;
    Ok(())
}

/// Attach every payload field to a track event as a named string value.
fn emit_as_extra<W: Write>(tracepoint: &Tracepoint, w: &mut W) -> io::Result<()> {
    let export = tracepoint.perfetto().unwrap_or_default();
    writeln!(w, "static void {export}_as_extra(")?;
    writeln!(
        w,
        "   perfetto::protos::pbzero::GpuRenderStageEvent *event,"
    )?;
    writeln!(
        w,
        "   const struct {} *payload)",
        payload_struct(tracepoint)
    )?;
    writeln!(w, "{{")?;
    writeln!(w, "   char buf[128];")?;
    for arg in tracepoint.payload() {
        let access = format!("payload->{}", arg.name());
        writeln!(w)?;
        writeln!(w, "   {{")?;
        writeln!(w, "      auto data = event->add_extra_data();")?;
        writeln!(w, "      data->set_name(\"{}\");", arg.name())?;
        writeln!(
            w,
            "      snprintf(buf, sizeof(buf), \"{}\", {});",
            arg.c_format(),
            arg.print_expr(&access)
        )?;
        writeln!(w, "      data->set_value(buf);")?;
        writeln!(w, "   }}")?;
    }
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}
