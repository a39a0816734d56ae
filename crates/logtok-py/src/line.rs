use pyo3::{
    prelude::*,
    types::{PyBytes, PyString},
};

/// Borrows the bytes of a `bytes` object, or the UTF-8 encoding of a `str`.
pub(crate) fn line_bytes<'a>(line: &'a Bound<'_, PyAny>) -> PyResult<&'a [u8]> {
    if let Ok(bytes) = line.downcast::<PyBytes>() {
        return Ok(bytes.as_bytes());
    }
    Ok(line.downcast::<PyString>()?.to_str()?.as_bytes())
}
