use pyo3::{prelude::*, IntoPyObjectExt};

use dynmat::DynMatrix;
use rand::{rngs::SmallRng, SeedableRng};

use crate::vector::PyVector;
use crate::{to_index, to_py_err};

#[pyclass(name = "Matrix")]
#[derive(Clone)]
pub struct PyMatrix {
    pub(crate) inner: DynMatrix<f64>,
}

/// Right-hand operand of `Matrix * x`
#[derive(FromPyObject)]
pub enum MatrixOperand {
    Matrix(PyMatrix),
    Vector(PyVector),
    Scalar(f64),
}

#[pymethods]
impl PyMatrix {
    /// Creates a new square Matrix of the given size, filled with zeros
    #[new]
    #[pyo3(signature = (size=1))]
    pub fn new(size: usize) -> PyResult<Self> {
        let inner = DynMatrix::new(size).map_err(to_py_err)?;
        Ok(PyMatrix { inner })
    }

    #[staticmethod]
    pub fn identity(size: usize) -> PyResult<Self> {
        let inner = DynMatrix::identity(size).map_err(to_py_err)?;
        Ok(PyMatrix { inner })
    }

    /// Creates a new random Matrix with elements in [0, 1)
    #[staticmethod]
    #[pyo3(signature = (size, seed=None))]
    pub fn random(size: usize, seed: Option<u64>) -> PyResult<Self> {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };
        let inner = DynMatrix::random(&mut rng, size).map_err(to_py_err)?;
        Ok(PyMatrix { inner })
    }

    /// Parses one row of whitespace-separated values per line
    #[staticmethod]
    pub fn parse(text: &str) -> PyResult<Self> {
        let inner = text.parse().map_err(to_py_err)?;
        Ok(PyMatrix { inner })
    }

    /// Returns the number of rows (and columns)
    #[getter]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Returns a copy of row `i`
    pub fn row(&self, i: isize) -> PyResult<PyVector> {
        let i = to_index(i, self.inner.size())?;
        let row = self.inner.row(i).map_err(to_py_err)?;
        Ok(row.to_vec().into())
    }

    pub fn transposed(&self) -> Self {
        self.inner.transposed().into()
    }

    pub fn scale(&self, val: f64) -> Self {
        self.inner.scale(val).into()
    }

    /// Returns a copy of the matrix
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Matrix(size={})", self.inner.size())
    }

    pub fn __len__(&self) -> usize {
        self.inner.size()
    }

    /// Support for indexing with [i, j]
    pub fn __getitem__(&self, key: (isize, isize)) -> PyResult<f64> {
        let size = self.inner.size();
        let (i, j) = (to_index(key.0, size)?, to_index(key.1, size)?);
        self.inner.at(i, j).copied().map_err(to_py_err)
    }

    /// Support for item assignment with [i, j] = value
    pub fn __setitem__(&mut self, key: (isize, isize), value: f64) -> PyResult<()> {
        let size = self.inner.size();
        let (i, j) = (to_index(key.0, size)?, to_index(key.1, size)?);
        *self.inner.at_mut(i, j).map_err(to_py_err)? = value;
        Ok(())
    }

    pub fn __add__(&self, other: &PyMatrix) -> PyResult<Self> {
        let inner = self.inner.try_add(&other.inner).map_err(to_py_err)?;
        Ok(inner.into())
    }

    pub fn __sub__(&self, other: &PyMatrix) -> PyResult<Self> {
        let inner = self.inner.try_sub(&other.inner).map_err(to_py_err)?;
        Ok(inner.into())
    }

    /// Matrix product, matrix-vector product or scaling, depending on the operand
    pub fn __mul__(&self, py: Python<'_>, other: MatrixOperand) -> PyResult<PyObject> {
        match other {
            MatrixOperand::Matrix(m) => {
                let inner = self.inner.try_mul(&m.inner).map_err(to_py_err)?;
                PyMatrix::from(inner).into_py_any(py)
            }
            MatrixOperand::Vector(v) => {
                let inner = self.inner.try_mul_vector(&v.inner).map_err(to_py_err)?;
                PyVector::from(inner).into_py_any(py)
            }
            MatrixOperand::Scalar(x) => self.scale(x).into_py_any(py),
        }
    }

    pub fn __rmul__(&self, val: f64) -> Self {
        self.scale(val)
    }

    pub fn __eq__(&self, other: &PyMatrix) -> bool {
        self.inner == other.inner
    }

    pub fn __ne__(&self, other: &PyMatrix) -> bool {
        !self.__eq__(other)
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner
            .iter_rows()
            .map(|row| row.as_slice().to_vec())
            .collect()
    }

    #[staticmethod]
    pub fn from_list(data: Vec<Vec<f64>>) -> PyResult<Self> {
        let inner = DynMatrix::from_rows(data).map_err(to_py_err)?;
        Ok(PyMatrix { inner })
    }
}

impl From<DynMatrix<f64>> for PyMatrix {
    fn from(inner: DynMatrix<f64>) -> Self {
        PyMatrix { inner }
    }
}

impl From<PyMatrix> for DynMatrix<f64> {
    fn from(py_matrix: PyMatrix) -> Self {
        py_matrix.inner
    }
}
