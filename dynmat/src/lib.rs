//! `dynmat` is a small Rust library of bounds-checked linear algebra containers. Some features include:
//! - vectors and square matrices over any numeric-like element type
//! - checked indexing everywhere, with fallible `at`/`row` accessors alongside `[]`
//! - value semantics: deep copies via `Clone`, O(1) ownership transfer via `take`
//! - element-wise arithmetic, dot products, matrix-vector and matrix-matrix products
//! - plain-text reading and writing of whitespace-separated values
//!
//! The two main data structures provided by this crate are:
//! - [`DynVector`]: an owned, fixed-length buffer of elements, which dereferences to
//!   [`DynSlice`] for indexing, comparison and arithmetic
//! - [`DynMatrix`]: a square matrix whose rows are `DynVector`s, exposed to callers only
//!   as `DynSlice`s so that the matrix always stays square
//!
//! ```
//! use dynmat::{DynMatrix, DynVector};
//!
//! let m = DynMatrix::build(3, |i, j| (i + j) as i64).unwrap();
//! let v: DynVector<i64> = DynVector::build(3, |i| i as i64).unwrap();
//! let w = &m * &v;
//! assert_eq!(w.as_slice(), &[5, 8, 11]);
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::suspicious_arithmetic_impl,
    clippy::uninlined_format_args,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod dynmatrix;
pub mod dynvector;
pub mod error;
pub mod io;
pub mod scalar;

pub use dynmatrix::DynMatrix;
pub use dynvector::{DynSlice, DynVector};
pub use error::{DynError, Result};
pub use scalar::Scalar;

/// Largest number of elements a [`DynVector`] may hold
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// Largest number of rows (and columns) a [`DynMatrix`] may hold
pub const MAX_MATRIX_SIZE: usize = 10_000;
