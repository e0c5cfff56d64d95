//! Instrumentation header emitter.
//!
//! Declares everything driver code calls: the toggle flag constants, the
//! enabled mask, the payload structs, and one gated inline wrapper per
//! tracepoint. The wrapper checks the owning toggle bit and bails before
//! the out-of-line emission call, so a disabled tracepoint costs one load
//! and one branch at the call site.

use std::collections::HashSet;
use std::io::{self, Write};

use tracegen_model::{HeaderScope, Registry, Tracepoint};

use super::{c_declare, flag_ident, guard_ident, payload_struct, signature, Options, BANNER, RUNTIME_HEADER};

pub fn emit<W: Write>(
    registry: &Registry,
    opts: &Options,
    header_name: &str,
    w: &mut W,
) -> io::Result<()> {
    let guard = guard_ident(header_name);

    writeln!(w, "{BANNER}")?;
    writeln!(w)?;
    writeln!(w, "#ifndef {guard}")?;
    writeln!(w, "#define {guard}")?;
    writeln!(w)?;
    writeln!(w, "#include <stdint.h>")?;
    writeln!(w, "#include <stdio.h>")?;
    writeln!(w)?;
    writeln!(w, "#include \"{RUNTIME_HEADER}\"")?;

    let mut seen = HashSet::new();
    for header in registry.headers() {
        if header.scope() == HeaderScope::Public && seen.insert(header.path()) {
            writeln!(w, "#include \"{}\"", header.path())?;
        }
    }
    writeln!(w)?;
    writeln!(w, "#ifdef __cplusplus")?;
    writeln!(w, "extern \"C\" {{")?;
    writeln!(w, "#endif")?;
    writeln!(w)?;

    for decl in registry.forward_decls() {
        writeln!(w, "{};", decl.text())?;
    }
    if !registry.forward_decls().is_empty() {
        writeln!(w)?;
    }

    let toggles = registry.toggle_names();
    if !toggles.is_empty() {
        writeln!(w, "/* One bit per runtime toggle, in declaration order. */")?;
        for (bit, toggle) in toggles.iter().enumerate() {
            writeln!(
                w,
                "#define {} (1ull << {bit})",
                flag_ident(&opts.toggle_var, toggle)
            )?;
        }
        writeln!(w)?;
        writeln!(w, "/* Mask of currently enabled toggles. */")?;
        writeln!(w, "extern uint64_t {};", opts.toggle_var)?;
        writeln!(w)?;
        writeln!(
            w,
            "/* Apply the {} environment override to the mask. */",
            opts.toggle_var.to_ascii_uppercase()
        )?;
        writeln!(w, "void {}_config(void);", opts.toggle_var)?;
        writeln!(w)?;
    }

    for tracepoint in registry.tracepoints() {
        emit_tracepoint(tracepoint, opts, w)?;
    }

    writeln!(w, "#ifdef __cplusplus")?;
    writeln!(w, "}}")?;
    writeln!(w, "#endif")?;
    writeln!(w)?;
    writeln!(w, "#endif /* {guard} */")?;
    Ok(())
}

fn emit_tracepoint<W: Write>(
    tracepoint: &Tracepoint,
    opts: &Options,
    w: &mut W,
) -> io::Result<()> {
    if tracepoint.has_payload() {
        writeln!(w, "struct {} {{", payload_struct(tracepoint))?;
        for arg in tracepoint.payload() {
            writeln!(w, "   {};", c_declare(arg.ty(), arg.name()))?;
        }
        writeln!(w, "}};")?;
        writeln!(w)?;
    }

    let name = tracepoint.name();
    let sig = signature(tracepoint, opts);
    writeln!(w, "void __trace_{name}({sig});")?;
    writeln!(w, "static inline void trace_{name}({sig})")?;
    writeln!(w, "{{")?;
    if let Some(toggle) = tracepoint.toggle() {
        writeln!(
            w,
            "   if (!({} & {}))",
            opts.toggle_var,
            flag_ident(&opts.toggle_var, toggle)
        )?;
        writeln!(w, "      return;")?;
    }
    let mut call_args = vec![opts.ctx_name.clone()];
    for param in tracepoint.params() {
        call_args.push(param.name().to_string());
    }
    for arg in tracepoint.args() {
        call_args.push(arg.name().to_string());
    }
    writeln!(w, "   __trace_{name}({});", call_args.join(", "))?;
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}
