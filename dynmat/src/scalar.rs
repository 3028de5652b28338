use num_traits::Zero;
use std::ops::{Add, AddAssign, Mul, Sub};

/// The capabilities an element type needs for vector and matrix arithmetic.
///
/// This trait is implemented automatically for every type that is default-constructible,
/// cloneable, comparable, closed under `+`, `-` and `*`, supports `+=`, and has a zero
/// value. Dot products and matrix products accumulate starting from [`Zero::zero`].
pub trait Scalar:
    Clone
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + Zero
{
}

impl<T> Scalar for T where
    T: Clone
        + Default
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + AddAssign
        + Zero
{
}
