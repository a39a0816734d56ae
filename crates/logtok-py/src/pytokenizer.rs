use ::logtok::{
    Capacity, DelimiterSet, ScanError, ScanStrategy, Tokenizer, TokenizerOptions, VecSink,
};
use pyo3::{exceptions::PyValueError, prelude::*, types::PyBytes};

use crate::line::line_bytes;

/// Identifiers kept per line unless the caller asks for more.
pub const DEFAULT_MAX_IDS: usize = 64;

/// Leading bytes of a line that are scanned by default; longer lines are cut.
pub const DEFAULT_MAX_LINE_BYTES: usize = 4095;

fn value_error(err: ScanError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_strategy(name: &str) -> PyResult<ScanStrategy> {
    match name {
        "auto" => Ok(ScanStrategy::Auto),
        "chunked" => Ok(ScanStrategy::Chunked),
        "lookup" => Ok(ScanStrategy::Lookup),
        other => Err(PyValueError::new_err(format!(
            "unknown strategy {other:?}, expected \"auto\", \"chunked\" or \"lookup\""
        ))),
    }
}

/// Python-facing tokenizer: turns a log line into at most `max_ids` FNV-1a
/// token identifiers.
#[pyclass(name = "Tokenizer", module = "logtok", frozen)]
#[derive(Debug)]
pub struct PyTokenizer {
    inner: Tokenizer,
    max_ids: usize,
}

#[pymethods]
impl PyTokenizer {
    #[new]
    #[pyo3(signature = (
        max_ids = DEFAULT_MAX_IDS as i64,
        delimiters = None,
        strategy = "auto",
        max_line_bytes = Some(DEFAULT_MAX_LINE_BYTES),
        stop_at_nul = false,
    ))]
    pub fn new(
        max_ids: i64,
        delimiters: Option<&Bound<'_, PyAny>>,
        strategy: &str,
        max_line_bytes: Option<usize>,
        stop_at_nul: bool,
    ) -> PyResult<Self> {
        let max_ids = Capacity::try_from(max_ids).map_err(value_error)?.get();
        let delimiters = match delimiters {
            Some(d) => DelimiterSet::new(line_bytes(d)?),
            None => DelimiterSet::default(),
        };
        let options = TokenizerOptions {
            delimiters,
            strategy: parse_strategy(strategy)?,
            max_line_bytes,
            stop_at_nul,
        };
        tracing::debug!(?options, max_ids, "configuring tokenizer");
        let inner = Tokenizer::new(options).map_err(value_error)?;
        Ok(Self { inner, max_ids })
    }

    /// Token identifiers of `line` (`str` or `bytes`), at most `max_ids`.
    pub fn tokenize(&self, line: &Bound<'_, PyAny>) -> PyResult<Vec<u32>> {
        Ok(self.inner.tokenize_to_vec(line_bytes(line)?, self.max_ids))
    }

    /// Like `tokenize`, also returning whether identifiers were left out
    /// because `max_ids` was reached.
    pub fn tokenize_checked(&self, line: &Bound<'_, PyAny>) -> PyResult<(Vec<u32>, bool)> {
        let mut ids = Vec::new();
        let summary = self
            .inner
            .scan_into(line_bytes(line)?, &mut VecSink::new(&mut ids, self.max_ids));
        Ok((ids, summary.truncated))
    }

    /// Tokenizes a batch of lines with the GIL released.
    pub fn tokenize_many<'py>(
        &self,
        py: Python<'py>,
        lines: Vec<Bound<'py, PyAny>>,
    ) -> PyResult<Vec<Vec<u32>>> {
        let owned = lines
            .iter()
            .map(|line| line_bytes(line).map(<[u8]>::to_vec))
            .collect::<PyResult<Vec<_>>>()?;
        tracing::debug!(lines = owned.len(), "tokenizing batch");

        let (tokenizer, max_ids) = (&self.inner, self.max_ids);
        Ok(py.allow_threads(|| {
            owned
                .iter()
                .map(|line| tokenizer.tokenize_to_vec(line, max_ids))
                .collect()
        }))
    }

    #[getter]
    pub fn max_ids(&self) -> usize {
        self.max_ids
    }

    /// The scan path in use: `"chunked"` or `"lookup"`.
    #[getter]
    pub fn strategy(&self) -> &'static str {
        match self.inner.strategy() {
            ScanStrategy::Lookup => "lookup",
            ScanStrategy::Auto | ScanStrategy::Chunked => "chunked",
        }
    }

    #[getter]
    pub fn delimiters<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        let bytes: Vec<u8> = self.inner.options().delimiters.iter().collect();
        PyBytes::new(py, &bytes)
    }

    pub fn __repr__(&self) -> String {
        let delimiters: Vec<u8> = self.inner.options().delimiters.iter().collect();
        format!(
            "Tokenizer(max_ids={}, delimiters=b\"{}\", strategy={:?})",
            self.max_ids,
            delimiters.escape_ascii(),
            self.strategy()
        )
    }
}
