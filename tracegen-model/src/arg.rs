//! Captured argument and signature parameter types.
//!
//! An [`Argument`] is one piece of data captured when a tracepoint fires:
//! a C type, a record field name, a capture expression evaluated at the
//! call site, a printf-style format specifier, and an optional conversion
//! expression applied only when the value is formatted for display.
//!
//! Expressions are opaque strings passed through to the generated code
//! verbatim; the model validates presence and shape, never meaning.

use crate::error::ModelError;

/// Placeholder a conversion expression substitutes the stored value into.
const CONVERSION_PLACEHOLDER: &str = "{}";

/// Returns true if `s` is usable as a C identifier.
pub(crate) fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A single value captured at trace time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    ty: String,
    name: String,
    var: String,
    c_format: String,
    to_prim: Option<String>,
}

impl Argument {
    /// An argument whose record field name and capture expression are the
    /// same identifier. This is the common case for inline arguments, where
    /// the capture expression is simply the emission-call parameter.
    pub fn new(ty: impl Into<String>, var: impl Into<String>, c_format: impl Into<String>) -> Self {
        let var = var.into();
        Self {
            ty: ty.into(),
            name: var.clone(),
            var,
            c_format: c_format.into(),
            to_prim: None,
        }
    }

    /// A record field captured from an explicit expression, e.g. field
    /// `width` read from `fb->width`.
    pub fn field(
        ty: impl Into<String>,
        name: impl Into<String>,
        expr: impl Into<String>,
        c_format: impl Into<String>,
    ) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            var: expr.into(),
            c_format: c_format.into(),
            to_prim: None,
        }
    }

    /// Attach a conversion expression mapping the stored raw value to a
    /// printable primitive, e.g. `vk_format_description({})->short_name`.
    ///
    /// The raw value is what gets copied at capture time; the conversion is
    /// applied only in generated formatting code. When a conversion is
    /// present, the format specifier must describe the converted type.
    #[must_use]
    pub fn converted(mut self, expr: impl Into<String>) -> Self {
        self.to_prim = Some(expr.into());
        self
    }

    /// C type of the stored value.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Record field name (unique within the owning tracepoint).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capture expression evaluated at the emission call site.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Display format specifier (e.g. `%u`, `%s`).
    #[must_use]
    pub fn c_format(&self) -> &str {
        &self.c_format
    }

    /// Conversion expression, if the stored value is not directly printable.
    #[must_use]
    pub fn conversion(&self) -> Option<&str> {
        self.to_prim.as_deref()
    }

    /// Expression the generated formatting code prints for this argument,
    /// with `access` standing in for the stored value (e.g. `p->format`).
    #[must_use]
    pub fn print_expr(&self, access: &str) -> String {
        match &self.to_prim {
            Some(expr) => expr.replace(CONVERSION_PLACEHOLDER, access),
            None => access.to_string(),
        }
    }

    pub(crate) fn validate(&self, tracepoint: &str) -> Result<(), ModelError> {
        if !is_c_identifier(&self.name) || self.var.is_empty() || self.ty.is_empty() {
            return Err(ModelError::InvalidArgument {
                tracepoint: tracepoint.to_string(),
                argument: self.name.clone(),
            });
        }
        if self.c_format.is_empty() {
            return Err(ModelError::MissingFormat {
                tracepoint: tracepoint.to_string(),
                argument: self.name.clone(),
            });
        }
        if let Some(expr) = &self.to_prim {
            if !expr.contains(CONVERSION_PLACEHOLDER) {
                return Err(ModelError::MalformedConversion {
                    tracepoint: tracepoint.to_string(),
                    argument: self.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A signature-only parameter of an emission call.
///
/// Record-capture tracepoints read their capture expressions from these
/// parameters. A `Param` is never captured and never formatted, so it
/// carries no format specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    ty: String,
    name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self { ty: ty.into(), name: name.into() }
    }

    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn validate(&self, tracepoint: &str) -> Result<(), ModelError> {
        if !is_c_identifier(&self.name) || self.ty.is_empty() {
            return Err(ModelError::InvalidArgument {
                tracepoint: tracepoint.to_string(),
                argument: self.name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_identifier() {
        assert!(is_c_identifier("width"));
        assert!(is_c_identifier("_tile0"));
        assert!(is_c_identifier("MRTs"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("9lives"));
        assert!(!is_c_identifier("fb->width"));
    }

    #[test]
    fn test_inline_argument_defaults() {
        let arg = Argument::new("uint8_t", "samples", "%u");
        assert_eq!(arg.name(), "samples");
        assert_eq!(arg.var(), "samples");
        assert!(arg.conversion().is_none());
        assert!(arg.validate("end_gmem_clear").is_ok());
    }

    #[test]
    fn test_field_capture_expression() {
        let arg = Argument::field("uint16_t", "width", "fb->width", "%u");
        assert_eq!(arg.name(), "width");
        assert_eq!(arg.var(), "fb->width");
        assert!(arg.validate("end_render_pass").is_ok());
    }

    #[test]
    fn test_print_expr_applies_conversion() {
        let arg = Argument::new("enum VkFormat", "format", "%s")
            .converted("vk_format_description({})->short_name");
        assert_eq!(
            arg.print_expr("p->format"),
            "vk_format_description(p->format)->short_name"
        );
    }

    #[test]
    fn test_print_expr_without_conversion() {
        let arg = Argument::new("uint8_t", "samples", "%u");
        assert_eq!(arg.print_expr("p->samples"), "p->samples");
    }

    #[test]
    fn test_conversion_requires_placeholder() {
        let arg = Argument::new("enum VkFormat", "format", "%s")
            .converted("vk_format_description(format)");
        assert_eq!(
            arg.validate("end_gmem_clear"),
            Err(ModelError::MalformedConversion {
                tracepoint: "end_gmem_clear".to_string(),
                argument: "format".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_format_rejected() {
        let arg = Argument::new("uint8_t", "samples", "");
        assert!(matches!(
            arg.validate("end_blit"),
            Err(ModelError::MissingFormat { .. })
        ));
    }

    #[test]
    fn test_non_identifier_field_name_rejected() {
        let arg = Argument::new("uint16_t", "fb->width", "%u");
        assert!(matches!(
            arg.validate("end_render_pass"),
            Err(ModelError::InvalidArgument { .. })
        ));
    }
}
