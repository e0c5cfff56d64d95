//! The driver's tracepoint declarations.
//!
//! Everything the generator knows about the driver is declared here, in
//! source order. Each scoped event brackets one GPU operation on the
//! command-submission path; the payloads hold what a profiling front end
//! needs to label one occurrence of that operation.
//!
//! `render_pass` uses a capture record: the framebuffer fields are copied
//! flat at emission time and formatted only when the trace is consumed.
//! The other events carry a handful of scalars and capture them inline.

use tracegen_model::{Argument, HeaderScope, ModelError, Registry, ScopedEvent};

/// Export-name prefix for the trace front end.
pub const EXPORT_PREFIX: &str = "gpu";

/// Conversion from a stored `VkFormat` to its short display name. Applied
/// at formatting time only; the record stores the raw enumerant.
const FORMAT_NAME: &str = "vk_format_description({})->short_name";

/// Build the complete declaration registry for the driver.
///
/// # Errors
///
/// Any [`ModelError`] from a malformed declaration below. This aborts the
/// generation run; a bad declaration must never reach the engine.
pub fn build_registry() -> Result<Registry, ModelError> {
    let mut registry = Registry::new(EXPORT_PREFIX);
    register_all(&mut registry)?;
    Ok(registry)
}

/// Register every header, forward declaration, and scoped event.
pub fn register_all(reg: &mut Registry) -> Result<(), ModelError> {
    reg.add_header("util/u_dump.h", HeaderScope::Public);
    reg.add_header("vk_format.h", HeaderScope::Public);
    reg.add_header("gpu/gpu_device.h", HeaderScope::Source);

    reg.add_forward_decl("struct gpu_device");
    reg.add_forward_decl("struct gpu_framebuffer");

    ScopedEvent::new("render_pass")
        .param("const struct gpu_framebuffer *", "fb")
        .record_field(Argument::field("uint16_t", "width", "fb->width", "%u"))
        .record_field(Argument::field("uint16_t", "height", "fb->height", "%u"))
        .record_field(Argument::field("uint8_t", "MRTs", "fb->attachment_count", "%u"))
        .record_field(Argument::field(
            "uint16_t",
            "numberOfBins",
            "fb->tile_count.width * fb->tile_count.height",
            "%u",
        ))
        .record_field(Argument::field("uint16_t", "binWidth", "fb->tile0.width", "%u"))
        .record_field(Argument::field("uint16_t", "binHeight", "fb->tile0.height", "%u"))
        .register(reg)?;

    ScopedEvent::new("binning_ib").register(reg)?;
    ScopedEvent::new("draw_ib_sysmem").register(reg)?;
    ScopedEvent::new("draw_ib_gmem").register(reg)?;

    ScopedEvent::new("gmem_clear")
        .arg(Argument::new("enum VkFormat", "format", "%s").converted(FORMAT_NAME))
        .arg(Argument::new("uint8_t", "samples", "%u"))
        .register(reg)?;

    ScopedEvent::new("sysmem_clear")
        .arg(Argument::new("enum VkFormat", "format", "%s").converted(FORMAT_NAME))
        .arg(Argument::new("uint8_t", "uses_3d_ops", "%u"))
        .arg(Argument::new("uint8_t", "samples", "%u"))
        .register(reg)?;

    ScopedEvent::new("sysmem_clear_all")
        .arg(Argument::new("uint8_t", "mrt_count", "%u"))
        .arg(Argument::new("uint8_t", "rect_count", "%u"))
        .register(reg)?;

    ScopedEvent::new("gmem_load")
        .arg(Argument::new("enum VkFormat", "format", "%s").converted(FORMAT_NAME))
        .arg(Argument::new("uint8_t", "force_load", "%u"))
        .register(reg)?;

    ScopedEvent::new("gmem_store")
        .arg(Argument::new("enum VkFormat", "format", "%s").converted(FORMAT_NAME))
        .arg(Argument::new("uint8_t", "fast_path", "%u"))
        .arg(Argument::new("uint8_t", "unaligned", "%u"))
        .register(reg)?;

    ScopedEvent::new("sysmem_resolve")
        .arg(Argument::new("enum VkFormat", "format", "%s").converted(FORMAT_NAME))
        .register(reg)?;

    ScopedEvent::new("blit")
        // TODO: add source and destination megapixel counts once the blit
        // path tracks them.
        .arg(Argument::new("uint8_t", "uses_3d_blit", "%u"))
        .arg(Argument::new("enum VkFormat", "src_format", "%s").converted(FORMAT_NAME))
        .arg(Argument::new("enum VkFormat", "dst_format", "%s").converted(FORMAT_NAME))
        .arg(Argument::new("uint8_t", "layers", "%u"))
        .register(reg)?;

    ScopedEvent::new("compute")
        .arg(Argument::new("uint8_t", "indirect", "%u"))
        .arg(Argument::new("uint16_t", "local_size_x", "%u"))
        .arg(Argument::new("uint16_t", "local_size_y", "%u"))
        .arg(Argument::new("uint16_t", "local_size_z", "%u"))
        .arg(Argument::new("uint16_t", "num_groups_x", "%u"))
        .arg(Argument::new("uint16_t", "num_groups_y", "%u"))
        .arg(Argument::new("uint16_t", "num_groups_z", "%u"))
        .register(reg)?;

    Ok(())
}
