use crate::dynvector::*;
use crate::error::{check_index, check_same_size, check_size, DynError, Result};
use crate::io::{parse_all, read_elements, Tokens};
use crate::scalar::Scalar;
use crate::MAX_MATRIX_SIZE;
use num_traits::One;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// A square matrix, stored as a vector of row vectors
///
/// Every row is a [`DynVector`] of length [`DynMatrix::size`]. Rows are only ever handed out
/// as [`DynSlice`]s, which can be read and written element-wise but never resized, so the
/// matrix stays square for its whole lifetime.
///
/// Indexing is checked in both dimensions: `m[i]` checks the row and `m[i][j]` then checks
/// the column against that row.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DynMatrix<T> {
    /// the rows of the matrix, each of length `rows.size()`
    rows: DynVector<DynVector<T>>,
}

impl<T> DynMatrix<T> {
    fn build_unchecked(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut rows = Vec::with_capacity(size);
        for i in 0..size {
            rows.push(DynVector::from_boxed((0..size).map(|j| f(i, j)).collect()));
        }
        DynMatrix {
            rows: DynVector::from_boxed(rows.into_boxed_slice()),
        }
    }

    /// Builds a `size` x `size` matrix from a function `f` giving the value at each position
    ///
    /// # Errors
    ///
    /// [`DynError::InvalidSize`] if `size` is 0 or exceeds [`MAX_MATRIX_SIZE`].
    pub fn build(size: usize, f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        check_size(size, MAX_MATRIX_SIZE)?;
        Ok(Self::build_unchecked(size, f))
    }

    /// Creates a `size` x `size` matrix of default-valued elements
    ///
    /// # Errors
    ///
    /// [`DynError::InvalidSize`] if `size` is 0 or exceeds [`MAX_MATRIX_SIZE`].
    pub fn new(size: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::build(size, |_, _| T::default())
    }

    pub fn identity(size: usize) -> Result<Self>
    where
        T: Scalar + One,
    {
        Self::build(size, |i, j| if i == j { T::one() } else { T::zero() })
    }

    #[inline]
    pub fn random(rng: &mut impl Rng, size: usize) -> Result<Self>
    where
        StandardUniform: Distribution<T>,
    {
        Self::build(size, |_, _| rng.random())
    }

    /// Creates a matrix from a list of rows, which must all have as many elements as there
    /// are rows
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let size = rows.len();
        check_size(size, MAX_MATRIX_SIZE)?;
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, data)| {
                if data.len() != size {
                    return Err(DynError::RaggedRow {
                        row,
                        len: data.len(),
                        size,
                    });
                }
                Ok(DynVector::from_boxed(data.into_boxed_slice()))
            })
            .collect::<Result<Box<[_]>>>()?;
        Ok(DynMatrix {
            rows: DynVector::from_boxed(rows),
        })
    }

    /// Returns the number of rows, which is also the number of columns
    #[inline]
    pub fn size(&self) -> usize {
        self.rows.size()
    }

    /// Returns the row at `index`
    ///
    /// # Errors
    ///
    /// [`DynError::IndexOutOfRange`] if `index >= self.size()`.
    #[inline]
    pub fn row(&self, index: usize) -> Result<&DynSlice<T>> {
        self.rows.at(index).map(|r| &**r)
    }

    /// Returns the row at `index` for element-wise modification
    ///
    /// # Errors
    ///
    /// [`DynError::IndexOutOfRange`] if `index >= self.size()`.
    #[inline]
    pub fn row_mut(&mut self, index: usize) -> Result<&mut DynSlice<T>> {
        self.rows.at_mut(index).map(|r| &mut **r)
    }

    #[inline]
    pub fn at(&self, i: usize, j: usize) -> Result<&T> {
        self.row(i)?.at(j)
    }

    #[inline]
    pub fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        self.row_mut(i)?.at_mut(j)
    }

    /// Returns an iterator over the rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &DynSlice<T>> {
        self.rows.iter().map(|r| &**r)
    }

    /// Swaps two rows without copying their elements
    pub fn swap_rows(&mut self, from: usize, to: usize) -> Result<()> {
        check_index(from, self.size())?;
        check_index(to, self.size())?;
        self.rows.as_mut_slice().swap(from, to);
        Ok(())
    }

    /// Moves all rows out into a new matrix, leaving `self` as an empty shell of size 0
    #[inline]
    pub fn take(&mut self) -> Self {
        DynMatrix {
            rows: self.rows.take(),
        }
    }

    /// Exchanges contents with `other` without copying any elements
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.rows.swap(&mut other.rows);
    }

    /// Returns a transposed copy of the matrix
    pub fn transposed(&self) -> Self
    where
        T: Clone,
    {
        Self::build_unchecked(self.size(), |i, j| self.rows[j][i].clone())
    }

    /// Fills every row, in order, from whitespace-separated values in `reader`.
    ///
    /// Values may be split across lines arbitrarily; one row per line is conventional.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<()>
    where
        T: FromStr,
    {
        self.read_tokens(&mut Tokens::new(reader))
    }

    pub fn read_tokens<R: BufRead>(&mut self, tokens: &mut Tokens<R>) -> Result<()>
    where
        T: FromStr,
    {
        let size = self.size();
        for (i, row) in self.rows.iter_mut().enumerate() {
            read_elements(row.as_mut_slice(), tokens, i * size).map_err(|e| match e {
                DynError::UnexpectedEof { read, .. } => DynError::UnexpectedEof {
                    expected: size * size,
                    read,
                },
                e => e,
            })?;
        }
        Ok(())
    }

    /// Writes one row per line
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()>
    where
        T: fmt::Display,
    {
        write!(writer, "{}", self)?;
        Ok(())
    }
}

impl<T: Scalar> DynMatrix<T> {
    fn zip_rows(
        &self,
        rhs: &DynMatrix<T>,
        f: impl Fn(&DynSlice<T>, &DynSlice<T>) -> Result<DynVector<T>>,
    ) -> Result<Self> {
        check_same_size(self.size(), rhs.size())?;
        let rows = self
            .rows
            .iter()
            .zip(rhs.rows.iter())
            .map(|(a, b)| f(&**a, &**b))
            .collect::<Result<Box<[_]>>>()?;
        Ok(DynMatrix {
            rows: DynVector::from_boxed(rows),
        })
    }

    /// Returns a new matrix with every element multiplied by `val`
    pub fn scale(&self, val: T) -> Self {
        let rows = self.rows.iter().map(|r| r.scale(val.clone())).collect();
        DynMatrix {
            rows: DynVector::from_boxed(rows),
        }
    }

    /// Computes the matrix-vector product, whose `i`-th element is the dot product of row
    /// `i` with `v`
    ///
    /// # Errors
    ///
    /// [`DynError::SizeMismatch`] if `v` does not have `self.size()` elements.
    pub fn try_mul_vector(&self, v: &DynSlice<T>) -> Result<DynVector<T>> {
        check_same_size(self.size(), v.size())?;
        let data = self
            .rows
            .iter()
            .map(|r| r.try_dot(v))
            .collect::<Result<Box<[_]>>>()?;
        Ok(DynVector::from_boxed(data))
    }

    /// Element-wise sum
    ///
    /// # Errors
    ///
    /// [`DynError::SizeMismatch`] if the matrices differ in size.
    pub fn try_add(&self, rhs: &DynMatrix<T>) -> Result<Self> {
        self.zip_rows(rhs, DynSlice::try_add)
    }

    /// Element-wise difference
    ///
    /// # Errors
    ///
    /// [`DynError::SizeMismatch`] if the matrices differ in size.
    pub fn try_sub(&self, rhs: &DynMatrix<T>) -> Result<Self> {
        self.zip_rows(rhs, DynSlice::try_sub)
    }

    /// Computes the matrix product, with `res[i][j]` the sum over `k` of
    /// `self[i][k] * rhs[k][j]`
    ///
    /// # Errors
    ///
    /// [`DynError::SizeMismatch`] if the matrices differ in size.
    pub fn try_mul(&self, rhs: &DynMatrix<T>) -> Result<Self> {
        check_same_size(self.size(), rhs.size())?;
        let n = self.size();
        log::trace!("multiplying {}x{} matrices", n, n);
        Ok(Self::build_unchecked(n, |i, j| {
            let mut acc = T::zero();
            for k in 0..n {
                acc += self.rows[i][k].clone() * rhs.rows[k][j].clone();
            }
            acc
        }))
    }
}

impl<T: Default> Default for DynMatrix<T> {
    fn default() -> Self {
        DynMatrix {
            rows: DynVector::default(),
        }
    }
}

/// Returns row `index`, panicking with [`DynError::IndexOutOfRange`] if it does not exist
impl<T> Index<usize> for DynMatrix<T> {
    type Output = DynSlice<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match self.row(index) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.row_mut(index) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self[index.0][index.1]
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self[index.0][index.1]
    }
}

impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Parses one row per non-blank line. The result must be square.
impl<T: FromStr> FromStr for DynMatrix<T> {
    type Err = DynError;

    fn from_str(s: &str) -> Result<Self> {
        let mut offset = 0;
        let mut rows = vec![];
        for line in s.lines().filter(|l| !l.trim().is_empty()) {
            let row: Vec<T> = parse_all(line).map_err(|e| match e {
                DynError::Parse { index, token } => DynError::Parse {
                    index: offset + index,
                    token,
                },
                e => e,
            })?;
            offset += row.len();
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}

impl<T: Scalar> Add for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn add(self, rhs: Self) -> Self::Output {
        match self.try_add(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Scalar> Sub for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.try_sub(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Scalar> Mul for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.try_mul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T: Scalar> Mul<&'a DynSlice<T>> for &DynMatrix<T> {
    type Output = DynVector<T>;

    fn mul(self, rhs: &'a DynSlice<T>) -> Self::Output {
        match self.try_mul_vector(rhs) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T: Scalar> Mul<&'a DynVector<T>> for &DynMatrix<T> {
    type Output = DynVector<T>;

    #[inline]
    fn mul(self, rhs: &'a DynVector<T>) -> Self::Output {
        self * &**rhs
    }
}

impl<T: Scalar> Add for DynMatrix<T> {
    type Output = DynMatrix<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<T: Scalar> Sub for DynMatrix<T> {
    type Output = DynMatrix<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<T: Scalar> Mul for DynMatrix<T> {
    type Output = DynMatrix<T>;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

macro_rules! impl_scalar_mul {
    ($($t:ty)*) => {$(
        impl Mul<$t> for &DynMatrix<$t> {
            type Output = DynMatrix<$t>;
            #[inline]
            fn mul(self, rhs: $t) -> Self::Output {
                self.scale(rhs)
            }
        }

        impl Mul<$t> for DynMatrix<$t> {
            type Output = DynMatrix<$t>;
            #[inline]
            fn mul(self, rhs: $t) -> Self::Output {
                self.scale(rhs)
            }
        }
    )*};
}

impl_scalar_mul!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize f32 f64);

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn filled(size: usize, val: i32) -> DynMatrix<i32> {
        DynMatrix::build(size, |_, _| val).unwrap()
    }

    #[test]
    fn construct_bounds() {
        let m: DynMatrix<i32> = DynMatrix::new(5).unwrap();
        assert_eq!(m.size(), 5);
        for row in m.iter_rows() {
            assert_eq!(row.size(), 5);
        }
        assert!(matches!(
            DynMatrix::<i32>::new(0),
            Err(DynError::InvalidSize { size: 0, .. })
        ));
        assert!(matches!(
            DynMatrix::<i32>::new(MAX_MATRIX_SIZE + 1),
            Err(DynError::InvalidSize { .. })
        ));
        assert!(DynMatrix::<i32>::new(-5i64 as usize).is_err());
        assert_eq!(DynMatrix::<i32>::default().size(), 1);
    }

    #[test]
    fn clone_is_deep() {
        let mut m: DynMatrix<i32> = DynMatrix::new(5).unwrap();
        let m1 = m.clone();
        assert_eq!(m, m1);
        assert_ne!(&m[0][0] as *const i32, &m1[0][0] as *const i32);

        m[1][1] = 100;
        assert_eq!(m[1][1], 100);
        assert_eq!(m1[1][1], 0);
    }

    #[test]
    fn assign() {
        let mut m = filled(5, 1);
        let m1 = m.clone();
        m = m.clone();
        assert_eq!(m, m1);

        let m2 = filled(7, 2);
        m.clone_from(&m2);
        assert_eq!(m.size(), 7);
        assert_eq!(m, m2);

        let m3 = filled(3, 3);
        m.clone_from(&m3);
        assert_eq!(m.size(), 3);
        assert_eq!(m, m3);
    }

    #[test]
    fn take_and_swap() {
        let mut m = filled(4, 2);
        let ptr = m[0].as_slice().as_ptr();
        let m1 = m.take();
        assert_eq!(m.size(), 0);
        assert_eq!(m1, filled(4, 2));
        assert_eq!(m1[0].as_slice().as_ptr(), ptr);

        let mut a = filled(2, 1);
        let mut b = filled(3, 5);
        a.swap(&mut b);
        assert_eq!(a, filled(3, 5));
        assert_eq!(b, filled(2, 1));
    }

    #[test]
    fn checked_access() {
        let mut m: DynMatrix<i32> = DynMatrix::new(5).unwrap();
        assert!(matches!(
            m.row(5),
            Err(DynError::IndexOutOfRange { index: 5, size: 5 })
        ));
        assert!(m.row(-1i64 as usize).is_err());
        assert!(matches!(
            m.at(1, 5),
            Err(DynError::IndexOutOfRange { index: 5, size: 5 })
        ));
        assert!(m.at_mut(6, 1).is_err());

        *m.at_mut(2, 3).unwrap() = 9;
        assert_eq!(m[(2, 3)], 9);
        m[(3, 2)] = 8;
        assert_eq!(*m.at(3, 2).unwrap(), 8);
    }

    #[test]
    #[should_panic(expected = "index 6 out of range for size 5")]
    fn row_index_panics() {
        let m: DynMatrix<i32> = DynMatrix::new(5).unwrap();
        let _x = m[6][1];
    }

    #[test]
    #[should_panic(expected = "index 5 out of range for size 5")]
    fn column_index_panics() {
        let mut m: DynMatrix<i32> = DynMatrix::new(5).unwrap();
        m[1][5] = 1;
    }

    #[test]
    fn equality() {
        let m = filled(5, 0);
        assert_eq!(m, m);
        assert!(m != filled(6, 0));
        assert!(filled(5, 1) != filled(5, 2));
    }

    #[test]
    fn scalar_mul() {
        assert_eq!(&filled(5, 1) * 3, filled(5, 3));
        assert_eq!(filled(2, 2) * 0, filled(2, 0));
    }

    #[test]
    fn matrix_vector() {
        let m = DynMatrix::build(3, |i, j| (i + j) as i32).unwrap();
        let v = DynVector::build(3, |i| i as i32).unwrap();
        let v1 = &m * &v;
        assert_eq!(v1.as_slice(), &[5, 8, 11]);

        let short = DynVector::build(2, |i| i as i32).unwrap();
        assert!(matches!(
            m.try_mul_vector(&short),
            Err(DynError::SizeMismatch { left: 3, right: 2 })
        ));
    }

    #[test]
    fn add_sub() {
        let m = filled(5, 1);
        let m1 = filled(5, 2);
        let m2 = filled(5, 3);
        assert_eq!(&m + &m1, m2);
        assert_eq!(&m2 - &m1, m);
        assert_eq!(m2.clone() - m1.clone() + m.clone(), m1);

        assert!(matches!(
            filled(4, 0).try_add(&filled(5, 0)),
            Err(DynError::SizeMismatch { left: 4, right: 5 })
        ));
        assert!(filled(4, 0).try_sub(&filled(5, 0)).is_err());
    }

    #[test]
    fn matrix_mult() {
        assert_eq!(&filled(5, 1) * &filled(5, 2), filled(5, 10));
        assert!(matches!(
            filled(4, 1).try_mul(&filled(5, 1)),
            Err(DynError::SizeMismatch { left: 4, right: 5 })
        ));
    }

    #[test]
    #[should_panic(expected = "size mismatch: 4 vs 5")]
    fn mismatched_mult_panics() {
        let _ = &filled(4, 1) * &filled(5, 1);
    }

    #[test]
    fn matrix_mult_random() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m1 = DynMatrix::build(20, |_, _| rng.random_range(-10..10i64)).unwrap();
        let m2 = DynMatrix::build(20, |_, _| rng.random_range(-10..10i64)).unwrap();
        let m3 = &m1 * &m2;

        for i in 0..20 {
            for j in 0..20 {
                let mut x = 0;
                for k in 0..20 {
                    x += m1[(i, k)] * m2[(k, j)];
                }
                assert_eq!(m3[(i, j)], x);
            }
        }
    }

    #[test]
    fn identity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let id: DynMatrix<i64> = DynMatrix::identity(10).unwrap();
        for i in 0..10 {
            for j in 0..10 {
                assert_eq!(id[(i, j)], if i == j { 1 } else { 0 });
            }
        }

        let m = DynMatrix::build(10, |_, _| rng.random_range(-100..100i64)).unwrap();
        assert_eq!(&m * &id, m);
        assert_eq!(&id * &m, m);
    }

    #[test]
    fn transpose() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m: DynMatrix<u32> = DynMatrix::random(&mut rng, 12).unwrap();
        let n = m.transposed();
        for i in 0..m.size() {
            for j in 0..m.size() {
                assert_eq!(m[(i, j)], n[(j, i)]);
            }
        }
        assert_eq!(n.transposed(), m);
    }

    #[test]
    fn swap_rows() {
        let mut m = DynMatrix::build(3, |i, _| i as i32).unwrap();
        m.swap_rows(0, 2).unwrap();
        assert_eq!(m[0].as_slice(), &[2, 2, 2]);
        assert_eq!(m[2].as_slice(), &[0, 0, 0]);
        assert!(m.swap_rows(0, 3).is_err());
    }

    #[test]
    fn from_rows() {
        let m = DynMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m[(1, 0)], 3);
        assert!(matches!(
            DynMatrix::from_rows(vec![vec![1, 2], vec![3]]),
            Err(DynError::RaggedRow {
                row: 1,
                len: 1,
                size: 2
            })
        ));
        assert!(DynMatrix::<i32>::from_rows(vec![]).is_err());
    }

    #[test]
    fn display() {
        let m = DynMatrix::build(2, |i, j| (2 * i + j) as i32).unwrap();
        assert_eq!(m.to_string(), "0 1\n2 3\n");
    }

    #[test]
    fn read_and_parse() {
        let mut m: DynMatrix<i32> = DynMatrix::new(2).unwrap();
        m.read_from("1 2 3\n4".as_bytes()).unwrap();
        assert_eq!(m, DynMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap());

        assert!(matches!(
            m.read_from("1 2 3".as_bytes()),
            Err(DynError::UnexpectedEof {
                expected: 4,
                read: 3
            })
        ));

        let parsed: DynMatrix<i32> = "1 2\n\n3 4\n".parse().unwrap();
        assert_eq!(parsed, DynMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap());
        assert!(matches!(
            "1 2\n3 q".parse::<DynMatrix<i32>>(),
            Err(DynError::Parse { index: 3, .. })
        ));
        assert!("1 2\n3".parse::<DynMatrix<i32>>().is_err());
    }

    #[test]
    fn text_round_trip() {
        let mut rng = SmallRng::seed_from_u64(3);
        let m: DynMatrix<i16> = DynMatrix::random(&mut rng, 6).unwrap();

        let mut out = vec![];
        m.write_to(&mut out).unwrap();
        let mut m1: DynMatrix<i16> = DynMatrix::new(6).unwrap();
        m1.read_from(out.as_slice()).unwrap();
        assert_eq!(m, m1);
        assert_eq!(m.to_string().parse::<DynMatrix<i16>>().unwrap(), m);
    }
}
