mod line;
mod pytokenizer;

pub use pytokenizer::{DEFAULT_MAX_IDS, DEFAULT_MAX_LINE_BYTES, PyTokenizer};

use pyo3::{exceptions::PyValueError, prelude::*};
use tracing_subscriber::EnvFilter;

/// FNV-1a identifier of a `str` (UTF-8 encoded) or `bytes` value; the same
/// value `Tokenizer.tokenize` emits for a token with those bytes.
#[pyfunction]
pub fn fnv1a(data: &Bound<'_, PyAny>) -> PyResult<u32> {
    Ok(::logtok::fnv1a(line::line_bytes(data)?))
}

/// Installs a stderr `tracing` subscriber filtered by `filter` (an
/// `EnvFilter` directive such as `"warn"` or `"logtok=trace"`).
///
/// Returns `False` if a subscriber was already installed.
#[pyfunction]
#[pyo3(signature = (filter = "warn"))]
pub fn enable_logging(filter: &str) -> PyResult<bool> {
    let filter = EnvFilter::try_new(filter).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok())
}

#[pymodule]
pub fn logtok(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add_function(wrap_pyfunction!(fnv1a, m)?)?;
    m.add_function(wrap_pyfunction!(enable_logging, m)?)?;
    m.add("DEFAULT_MAX_IDS", DEFAULT_MAX_IDS)?;
    m.add("DEFAULT_MAX_LINE_BYTES", DEFAULT_MAX_LINE_BYTES)?;
    Ok(())
}
