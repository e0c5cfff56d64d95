//! Instrumentation source emitter.
//!
//! Implements every registered emission point. Emission bodies are flat
//! value copies of the capture expressions and nothing else; conversion
//! expressions only ever appear in the print functions, which run at
//! trace-consumption time. The default-enablement list becomes the initial
//! value of the toggle mask, and the environment override parser lets a
//! run flip individual toggles without rebuilding.

use std::collections::HashSet;
use std::io::{self, Write};

use tracegen_model::{HeaderScope, Registry, Tracepoint};

use super::{flag_ident, payload_struct, signature, Options, BANNER};

/// Environment override parser, shared by every generated source file.
/// `name` enables a toggle, `-name` disables it, entries are comma
/// separated.
const CONFIG_TEMPLATE: &str = r#"void @TOGGLE@_config(void)
{
   const char *env = getenv("@ENV@");
   if (!env)
      return;
   while (*env) {
      const char *end = strchr(env, ',');
      size_t len = end ? (size_t)(end - env) : strlen(env);
      int enable = 1;
      if (len && (*env == '-' || *env == '+')) {
         enable = *env == '+';
         env++;
         len--;
      }
      for (size_t i = 0; i < sizeof(@TOGGLE@_toggles) / sizeof(@TOGGLE@_toggles[0]); i++) {
         if (strlen(@TOGGLE@_toggles[i].name) == len &&
             !strncmp(@TOGGLE@_toggles[i].name, env, len)) {
            if (enable)
               @TOGGLE@ |= @TOGGLE@_toggles[i].flag;
            else
               @TOGGLE@ &= ~@TOGGLE@_toggles[i].flag;
         }
      }
      env += len;
      if (*env == ',')
         env++;
   }
}
"#;

pub fn emit<W: Write>(
    registry: &Registry,
    opts: &Options,
    header_name: &str,
    perfetto_name: &str,
    w: &mut W,
) -> io::Result<()> {
    writeln!(w, "{BANNER}")?;
    writeln!(w)?;
    writeln!(w, "#include \"{header_name}\"")?;
    writeln!(w)?;
    writeln!(w, "#include <stdlib.h>")?;
    writeln!(w, "#include <string.h>")?;

    let mut seen = HashSet::new();
    for header in registry.headers() {
        if header.scope() == HeaderScope::Source && seen.insert(header.path()) {
            writeln!(w, "#include \"{}\"", header.path())?;
        }
    }
    writeln!(w)?;
    writeln!(w, "#ifdef HAVE_PERFETTO")?;
    writeln!(w, "#include \"{perfetto_name}\"")?;
    writeln!(w, "#endif")?;
    writeln!(w)?;

    emit_toggles(registry, opts, w)?;

    for tracepoint in registry.tracepoints() {
        emit_tracepoint(tracepoint, opts, w)?;
    }
    Ok(())
}

fn emit_toggles<W: Write>(registry: &Registry, opts: &Options, w: &mut W) -> io::Result<()> {
    let toggles = registry.toggle_names();
    if toggles.is_empty() {
        return Ok(());
    }
    let toggle_var = &opts.toggle_var;

    writeln!(w, "/* Runtime toggles by name, in declaration order. */")?;
    writeln!(w, "static const struct {{")?;
    writeln!(w, "   const char *name;")?;
    writeln!(w, "   uint64_t flag;")?;
    writeln!(w, "}} {toggle_var}_toggles[] = {{")?;
    for toggle in &toggles {
        writeln!(
            w,
            "   {{ \"{toggle}\", {} }},",
            flag_ident(toggle_var, toggle)
        )?;
    }
    writeln!(w, "}};")?;
    writeln!(w)?;

    if registry.default_enabled().is_empty() {
        writeln!(w, "uint64_t {toggle_var} = 0;")?;
    } else {
        writeln!(w, "uint64_t {toggle_var} =")?;
        let last = registry.default_enabled().len() - 1;
        for (i, name) in registry.default_enabled().iter().enumerate() {
            let sep = if i == last { ";" } else { " |" };
            writeln!(w, "   {}{sep}", flag_ident(toggle_var, name))?;
        }
    }
    writeln!(w)?;

    let config = CONFIG_TEMPLATE
        .replace("@TOGGLE@", toggle_var)
        .replace("@ENV@", &toggle_var.to_ascii_uppercase());
    w.write_all(config.as_bytes())?;
    writeln!(w)?;
    Ok(())
}

fn emit_tracepoint<W: Write>(
    tracepoint: &Tracepoint,
    opts: &Options,
    w: &mut W,
) -> io::Result<()> {
    let name = tracepoint.name();
    let has_print = tracepoint.has_payload() || tracepoint.print().is_some();

    if has_print {
        emit_print(tracepoint, w)?;
    }
    emit_info(tracepoint, has_print, w)?;

    writeln!(w, "void __trace_{name}({})", signature(tracepoint, opts))?;
    writeln!(w, "{{")?;
    if tracepoint.has_payload() {
        writeln!(
            w,
            "   struct {} *p = gpu_trace_emit({}, &__tp_{name}, sizeof(*p));",
            payload_struct(tracepoint),
            opts.ctx_name
        )?;
        writeln!(w, "   if (!p)")?;
        writeln!(w, "      return;")?;
        for arg in tracepoint.payload() {
            writeln!(w, "   p->{} = {};", arg.name(), arg.var())?;
        }
    } else {
        writeln!(
            w,
            "   gpu_trace_emit({}, &__tp_{name}, 0);",
            opts.ctx_name
        )?;
    }
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}

fn emit_print<W: Write>(tracepoint: &Tracepoint, w: &mut W) -> io::Result<()> {
    let name = tracepoint.name();
    writeln!(w, "static void print_{name}(FILE *out, const void *payload)")?;
    writeln!(w, "{{")?;
    if tracepoint.has_payload() {
        writeln!(
            w,
            "   const struct {} *p = payload;",
            payload_struct(tracepoint)
        )?;
    }
    if let Some(print) = tracepoint.print() {
        // Opaque override, passed through verbatim.
        if tracepoint.has_payload() {
            writeln!(w, "   (void)p;")?;
        }
        writeln!(w, "   fprintf(out, {print});")?;
    } else {
        let fmt: Vec<String> = tracepoint
            .payload()
            .iter()
            .map(|arg| format!("{}={}", arg.name(), arg.c_format()))
            .collect();
        writeln!(w, "   fprintf(out, \"{}\\n\",", fmt.join(", "))?;
        let last = tracepoint.payload().len() - 1;
        for (i, arg) in tracepoint.payload().iter().enumerate() {
            let access = format!("p->{}", arg.name());
            let sep = if i == last { ");" } else { "," };
            writeln!(w, "           {}{sep}", arg.print_expr(&access))?;
        }
    }
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}

fn emit_info<W: Write>(tracepoint: &Tracepoint, has_print: bool, w: &mut W) -> io::Result<()> {
    let name = tracepoint.name();
    writeln!(w, "static const struct gpu_trace_info __tp_{name} = {{")?;
    writeln!(w, "   .name = \"{name}\",")?;
    if tracepoint.has_payload() {
        writeln!(
            w,
            "   .payload_size = sizeof(struct {}),",
            payload_struct(tracepoint)
        )?;
    } else {
        writeln!(w, "   .payload_size = 0,")?;
    }
    if has_print {
        writeln!(w, "   .print = print_{name},")?;
    } else {
        writeln!(w, "   .print = NULL,")?;
    }
    if let Some(export) = tracepoint.perfetto() {
        writeln!(w, "#ifdef HAVE_PERFETTO")?;
        writeln!(w, "   .export = (gpu_trace_export_fn){export},")?;
        writeln!(w, "#endif")?;
    }
    writeln!(w, "}};")?;
    writeln!(w)?;
    Ok(())
}
