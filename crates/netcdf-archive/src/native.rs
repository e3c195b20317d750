//! Thin helpers over the native netcdf library.
//!
//! The netcdf crate wraps libnetcdf/HDF5. These helpers keep HDF5's stderr
//! diagnostics quiet and turn attribute values into plain Rust types.

use std::sync::Once;

use netcdf::AttributeValue;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Call early in `main()`, before any NetCDF operation. Safe to call more
/// than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Render a scalar or string attribute value as text.
///
/// Array-valued numeric attributes are not used by the archive and yield
/// `None`.
pub(crate) fn attribute_text(value: AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(parts) => Some(parts.join("\n")),
        AttributeValue::Int(v) => Some(v.to_string()),
        AttributeValue::Short(v) => Some(v.to_string()),
        AttributeValue::Longlong(v) => Some(v.to_string()),
        AttributeValue::Float(v) => Some(v.to_string()),
        AttributeValue::Double(v) => Some(v.to_string()),
        _ => None,
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
pub(crate) fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a text attribute from a variable.
pub(crate) fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    attribute_text(attr_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_text() {
        assert_eq!(
            attribute_text(AttributeValue::Str("CF-1.8".to_string())),
            Some("CF-1.8".to_string())
        );
        assert_eq!(attribute_text(AttributeValue::Int(5)), Some("5".to_string()));
        assert_eq!(attribute_text(AttributeValue::Doubles(vec![1.0, 2.0])), None);
    }

    #[test]
    fn test_silence_is_idempotent() {
        silence_hdf5_errors();
        silence_hdf5_errors();
    }
}
