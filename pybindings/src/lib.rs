// There seems to be some issues with the pyo3 bindings generation on methods returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod matrix;
pub mod vector;

use crate::matrix::PyMatrix;
use crate::vector::PyVector;
use dynmat::DynError;
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

/// Range errors become `IndexError`; everything else is a `ValueError`
pub(crate) fn to_py_err(err: DynError) -> PyErr {
    match err {
        DynError::IndexOutOfRange { .. } => PyIndexError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Converts a Python index to `usize`, rejecting negative values instead of wrapping them
pub(crate) fn to_index(i: isize, size: usize) -> PyResult<usize> {
    usize::try_from(i).map_err(|_| {
        PyIndexError::new_err(format!("index {} out of range for size {}", i, size))
    })
}

#[pymodule]
#[pyo3(name = "dynmat")]
fn dynmat_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyVector>()?;
    m.add_class::<PyMatrix>()?;
    m.add("MAX_VECTOR_SIZE", dynmat::MAX_VECTOR_SIZE)?;
    m.add("MAX_MATRIX_SIZE", dynmat::MAX_MATRIX_SIZE)?;
    Ok(())
}
