use crate::error::{check_index, check_same_size, check_size, DynError, Result};
use crate::io::{parse_all, read_elements, Tokens};
use crate::scalar::Scalar;
use crate::MAX_VECTOR_SIZE;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use ref_cast::RefCast;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
pub use std::ops::{Add, Deref, DerefMut, Index, IndexMut, Mul, Sub};

/// An owned, fixed-length vector of elements with checked indexing.
///
/// A `DynVector` always holds between 1 and [`MAX_VECTOR_SIZE`] elements, except for the
/// empty shell left behind by [`DynVector::take`]. Cloning performs a deep copy, while
/// [`DynVector::take`] and [`DynVector::swap`] move the underlying buffer in constant time.
///
/// # Examples
///
/// ```
/// use dynmat::DynVector;
///
/// let mut v: DynVector<i32> = DynVector::new(4).unwrap();
/// v[0] = 4;
/// assert_eq!(v[0], 4);
/// assert!(v.at(4).is_err());
/// ```
///
/// # Note
///
/// Most methods are implemented via dereferencing to [`DynSlice`], which provides indexing,
/// comparison, arithmetic and text I/O. Only operations that change the length or move the
/// buffer live on `DynVector` itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DynVector<T>(Box<[T]>);

/// A borrowed run of elements, represented as a slice of `T`.
///
/// This is what [`DynVector`] dereferences to, and what [`crate::DynMatrix`] hands out
/// for its rows. It cannot change length.
#[derive(RefCast, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct DynSlice<T>([T]);

impl<T> DynSlice<T> {
    /// Returns the number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true only for the shell left behind by [`DynVector::take`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`DynError::IndexOutOfRange`] if `index >= self.size()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T> {
        check_index(index, self.size())?;
        Ok(&self.0[index])
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`DynError::IndexOutOfRange`] if `index >= self.size()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.size())?;
        Ok(&mut self.0[index])
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.0.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    /// Returns an owned copy of these elements.
    #[inline]
    pub fn to_vec(&self) -> DynVector<T>
    where
        T: Clone,
    {
        DynVector(Box::from(&self.0))
    }

    /// Fills every element, in index order, from whitespace-separated values in `reader`.
    ///
    /// # Errors
    ///
    /// [`DynError::Parse`] if a token is not a valid `T`, [`DynError::UnexpectedEof`] if the
    /// reader runs out before every element is filled, and [`DynError::Io`] on read failure.
    /// Elements before the failing one have already been overwritten.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<()>
    where
        T: FromStr,
    {
        self.read_tokens(&mut Tokens::new(reader))
    }

    /// Like [`DynSlice::read_from`], but continues from a shared token stream.
    pub fn read_tokens<R: BufRead>(&mut self, tokens: &mut Tokens<R>) -> Result<()>
    where
        T: FromStr,
    {
        read_elements(&mut self.0, tokens, 0)
    }

    /// Writes the elements separated by single spaces, without a trailing newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()>
    where
        T: fmt::Display,
    {
        write!(writer, "{}", self)?;
        Ok(())
    }
}

impl<T: Scalar> DynSlice<T> {
    fn map_elements(&self, f: impl FnMut(&T) -> T) -> DynVector<T> {
        DynVector(self.0.iter().map(f).collect())
    }

    fn zip_elements(&self, rhs: &DynSlice<T>, f: impl Fn(&T, &T) -> T) -> Result<DynVector<T>> {
        check_same_size(self.size(), rhs.size())?;
        Ok(DynVector(
            self.0.iter().zip(rhs.0.iter()).map(|(a, b)| f(a, b)).collect(),
        ))
    }

    /// Returns a new vector with `val` added to every element.
    pub fn add_scalar(&self, val: T) -> DynVector<T> {
        self.map_elements(|x| x.clone() + val.clone())
    }

    /// Returns a new vector with `val` subtracted from every element.
    pub fn sub_scalar(&self, val: T) -> DynVector<T> {
        self.map_elements(|x| x.clone() - val.clone())
    }

    /// Returns a new vector with every element multiplied by `val`.
    pub fn scale(&self, val: T) -> DynVector<T> {
        self.map_elements(|x| x.clone() * val.clone())
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// [`DynError::SizeMismatch`] if the operands differ in size.
    pub fn try_add(&self, rhs: &DynSlice<T>) -> Result<DynVector<T>> {
        self.zip_elements(rhs, |a, b| a.clone() + b.clone())
    }

    /// Element-wise difference.
    ///
    /// # Errors
    ///
    /// [`DynError::SizeMismatch`] if the operands differ in size.
    pub fn try_sub(&self, rhs: &DynSlice<T>) -> Result<DynVector<T>> {
        self.zip_elements(rhs, |a, b| a.clone() - b.clone())
    }

    /// Computes the dot product, accumulating from `T::zero()`.
    ///
    /// # Errors
    ///
    /// [`DynError::SizeMismatch`] if the operands differ in size.
    pub fn try_dot(&self, rhs: &DynSlice<T>) -> Result<T> {
        check_same_size(self.size(), rhs.size())?;
        let mut res = T::zero();
        for (a, b) in self.0.iter().zip(rhs.0.iter()) {
            res += a.clone() * b.clone();
        }
        Ok(res)
    }
}

impl<T> DynVector<T> {
    /// Wraps `data` without checking its length
    #[inline]
    pub(crate) fn from_boxed(data: Box<[T]>) -> Self {
        DynVector(data)
    }

    /// Builds a `DynVector` from a function `f` giving the value at each index
    ///
    /// # Errors
    ///
    /// [`DynError::InvalidSize`] if `size` is 0 or exceeds [`MAX_VECTOR_SIZE`].
    pub fn build(size: usize, f: impl FnMut(usize) -> T) -> Result<Self> {
        check_size(size, MAX_VECTOR_SIZE)?;
        Ok(DynVector((0..size).map(f).collect()))
    }

    /// Creates a vector of `size` default-valued elements
    ///
    /// # Errors
    ///
    /// [`DynError::InvalidSize`] if `size` is 0 or exceeds [`MAX_VECTOR_SIZE`].
    pub fn new(size: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::build(size, |_| T::default())
    }

    /// Creates a vector holding a copy of `data`
    pub fn from_slice(data: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        check_size(data.len(), MAX_VECTOR_SIZE)?;
        Ok(DynVector(data.into()))
    }

    /// Creates a vector of `size` random elements
    #[inline]
    pub fn random(rng: &mut impl Rng, size: usize) -> Result<Self>
    where
        StandardUniform: Distribution<T>,
    {
        Self::build(size, |_| rng.random())
    }

    /// Moves the buffer out into a new vector, leaving `self` as an empty shell of size 0
    #[inline]
    pub fn take(&mut self) -> Self {
        DynVector(std::mem::take(&mut self.0))
    }

    /// Exchanges contents with `other` without copying any elements
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.0, &mut other.0);
    }

    /// Changes the length to `new_size`.
    ///
    /// Elements below `min(self.size(), new_size)` are kept; any new trailing elements are
    /// `T::default()`. The new buffer is fully built before it replaces the old one.
    ///
    /// # Errors
    ///
    /// [`DynError::InvalidSize`] if `new_size` is 0 or exceeds [`MAX_VECTOR_SIZE`], in which
    /// case `self` is left unchanged.
    pub fn resize(&mut self, new_size: usize) -> Result<()>
    where
        T: Clone + Default,
    {
        check_size(new_size, MAX_VECTOR_SIZE)?;
        log::debug!("resizing vector from {} to {}", self.size(), new_size);
        let keep = usize::min(self.size(), new_size);
        let mut data = Vec::with_capacity(new_size);
        data.extend_from_slice(&self.0[..keep]);
        data.resize_with(new_size, T::default);
        let mut res = DynVector(data.into_boxed_slice());
        self.swap(&mut res);
        Ok(())
    }
}

impl<T: Default> Default for DynVector<T> {
    fn default() -> Self {
        DynVector(Box::new([T::default()]))
    }
}

impl<T> Deref for DynVector<T> {
    type Target = DynSlice<T>;
    fn deref(&self) -> &Self::Target {
        DynSlice::ref_cast(&*self.0)
    }
}

impl<T> DerefMut for DynVector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        DynSlice::ref_cast_mut(&mut *self.0)
    }
}

impl<T> TryFrom<Vec<T>> for DynVector<T> {
    type Error = DynError;

    fn try_from(value: Vec<T>) -> Result<Self> {
        check_size(value.len(), MAX_VECTOR_SIZE)?;
        Ok(DynVector(value.into_boxed_slice()))
    }
}

impl<T> From<DynVector<T>> for Vec<T> {
    fn from(value: DynVector<T>) -> Self {
        value.0.into_vec()
    }
}

impl<'a, T> IntoIterator for &'a DynSlice<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a DynVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Checked indexing. Panics with [`DynError::IndexOutOfRange`] if `index >= self.size()`;
/// use [`DynSlice::at`] for a fallible version.
impl<T> Index<usize> for DynSlice<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for DynSlice<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: fmt::Display> fmt::Display for DynSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for DynVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// Parses whitespace-separated values; the vector's size is the number of tokens.
impl<T: FromStr> FromStr for DynVector<T> {
    type Err = DynError;

    fn from_str(s: &str) -> Result<Self> {
        parse_all(s)?.try_into()
    }
}

impl<T: Scalar> Add for &DynSlice<T> {
    type Output = DynVector<T>;

    fn add(self, rhs: Self) -> Self::Output {
        match self.try_add(rhs) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Scalar> Sub for &DynSlice<T> {
    type Output = DynVector<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.try_sub(rhs) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Dot product
impl<T: Scalar> Mul for &DynSlice<T> {
    type Output = T;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.try_dot(rhs) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Scalar> Add for &DynVector<T> {
    type Output = DynVector<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        &**self + &**rhs
    }
}

impl<T: Scalar> Sub for &DynVector<T> {
    type Output = DynVector<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        &**self - &**rhs
    }
}

/// Dot product
impl<T: Scalar> Mul for &DynVector<T> {
    type Output = T;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        &**self * &**rhs
    }
}

impl<T: Scalar> Add for DynVector<T> {
    type Output = DynVector<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<T: Scalar> Sub for DynVector<T> {
    type Output = DynVector<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

macro_rules! impl_scalar_ops {
    ($($t:ty)*) => {$(
        impl Add<$t> for &DynSlice<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn add(self, rhs: $t) -> Self::Output {
                self.add_scalar(rhs)
            }
        }

        impl Sub<$t> for &DynSlice<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn sub(self, rhs: $t) -> Self::Output {
                self.sub_scalar(rhs)
            }
        }

        impl Mul<$t> for &DynSlice<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn mul(self, rhs: $t) -> Self::Output {
                self.scale(rhs)
            }
        }

        impl Add<$t> for &DynVector<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn add(self, rhs: $t) -> Self::Output {
                self.add_scalar(rhs)
            }
        }

        impl Sub<$t> for &DynVector<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn sub(self, rhs: $t) -> Self::Output {
                self.sub_scalar(rhs)
            }
        }

        impl Mul<$t> for &DynVector<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn mul(self, rhs: $t) -> Self::Output {
                self.scale(rhs)
            }
        }

        impl Add<$t> for DynVector<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn add(self, rhs: $t) -> Self::Output {
                self.add_scalar(rhs)
            }
        }

        impl Sub<$t> for DynVector<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn sub(self, rhs: $t) -> Self::Output {
                self.sub_scalar(rhs)
            }
        }

        impl Mul<$t> for DynVector<$t> {
            type Output = DynVector<$t>;
            #[inline]
            fn mul(self, rhs: $t) -> Self::Output {
                self.scale(rhs)
            }
        }
    )*};
}

impl_scalar_ops!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize f32 f64);
