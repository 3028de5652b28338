use pyo3::{prelude::*, IntoPyObjectExt};

use dynmat::DynVector;
use rand::{rngs::SmallRng, SeedableRng};

use crate::{to_index, to_py_err};

#[pyclass(name = "Vector")]
#[derive(Clone)]
pub struct PyVector {
    pub(crate) inner: DynVector<f64>,
}

/// Right-hand operand of `Vector * x`
#[derive(FromPyObject)]
pub enum VectorOperand {
    Vector(PyVector),
    Scalar(f64),
}

#[pymethods]
impl PyVector {
    /// Creates a new Vector of the given size, filled with zeros
    #[new]
    #[pyo3(signature = (size=1))]
    pub fn new(size: usize) -> PyResult<Self> {
        let inner = DynVector::new(size).map_err(to_py_err)?;
        Ok(PyVector { inner })
    }

    /// Creates a new random Vector with elements in [0, 1)
    #[staticmethod]
    #[pyo3(signature = (size, seed=None))]
    pub fn random(size: usize, seed: Option<u64>) -> PyResult<Self> {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };
        let inner = DynVector::random(&mut rng, size).map_err(to_py_err)?;
        Ok(PyVector { inner })
    }

    /// Parses whitespace-separated values
    #[staticmethod]
    pub fn parse(text: &str) -> PyResult<Self> {
        let inner = text.parse().map_err(to_py_err)?;
        Ok(PyVector { inner })
    }

    /// Returns the number of elements
    #[getter]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Changes the size, keeping the leading elements and zero-filling any new ones
    pub fn resize(&mut self, size: usize) -> PyResult<()> {
        self.inner.resize(size).map_err(to_py_err)
    }

    pub fn dot(&self, other: &PyVector) -> PyResult<f64> {
        self.inner.try_dot(&other.inner).map_err(to_py_err)
    }

    pub fn add_scalar(&self, val: f64) -> Self {
        self.inner.add_scalar(val).into()
    }

    pub fn sub_scalar(&self, val: f64) -> Self {
        self.inner.sub_scalar(val).into()
    }

    pub fn scale(&self, val: f64) -> Self {
        self.inner.scale(val).into()
    }

    /// Returns a copy of the vector
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Vector(size={})", self.inner.size())
    }

    pub fn __len__(&self) -> usize {
        self.inner.size()
    }

    pub fn __getitem__(&self, i: isize) -> PyResult<f64> {
        let i = to_index(i, self.inner.size())?;
        self.inner.at(i).copied().map_err(to_py_err)
    }

    pub fn __setitem__(&mut self, i: isize, value: f64) -> PyResult<()> {
        let i = to_index(i, self.inner.size())?;
        *self.inner.at_mut(i).map_err(to_py_err)? = value;
        Ok(())
    }

    pub fn __add__(&self, other: &PyVector) -> PyResult<Self> {
        let inner = self.inner.try_add(&other.inner).map_err(to_py_err)?;
        Ok(inner.into())
    }

    pub fn __sub__(&self, other: &PyVector) -> PyResult<Self> {
        let inner = self.inner.try_sub(&other.inner).map_err(to_py_err)?;
        Ok(inner.into())
    }

    /// `Vector * Vector` is the dot product, `Vector * float` scales every element
    pub fn __mul__(&self, py: Python<'_>, other: VectorOperand) -> PyResult<PyObject> {
        match other {
            VectorOperand::Vector(v) => self.dot(&v)?.into_py_any(py),
            VectorOperand::Scalar(x) => self.scale(x).into_py_any(py),
        }
    }

    pub fn __rmul__(&self, val: f64) -> Self {
        self.scale(val)
    }

    pub fn __eq__(&self, other: &PyVector) -> bool {
        self.inner == other.inner
    }

    pub fn __ne__(&self, other: &PyVector) -> bool {
        !self.__eq__(other)
    }

    pub fn to_list(&self) -> Vec<f64> {
        self.inner.as_slice().to_vec()
    }

    #[staticmethod]
    pub fn from_list(data: Vec<f64>) -> PyResult<Self> {
        let inner = DynVector::try_from(data).map_err(to_py_err)?;
        Ok(PyVector { inner })
    }
}

impl From<DynVector<f64>> for PyVector {
    fn from(inner: DynVector<f64>) -> Self {
        PyVector { inner }
    }
}

impl From<PyVector> for DynVector<f64> {
    fn from(py_vector: PyVector) -> Self {
        py_vector.inner
    }
}
