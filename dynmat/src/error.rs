use std::io;

/// Errors raised by vector and matrix operations
#[derive(Debug, thiserror::Error)]
pub enum DynError {
    /// A container was requested with a size outside `1..=max`.
    #[error("invalid size {size}: must be between 1 and {max}")]
    InvalidSize { size: usize, max: usize },

    /// An element or row index fell outside `0..size`.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// The operands of a binary operation have incompatible sizes.
    #[error("size mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    /// A row passed to a matrix constructor does not match the matrix size.
    #[error("row {row} has {len} elements, expected {size}")]
    RaggedRow { row: usize, len: usize, size: usize },

    #[error("cannot parse element {index} from {token:?}")]
    Parse { index: usize, token: String },

    #[error("unexpected end of input: read {read} of {expected} elements")]
    UnexpectedEof { expected: usize, read: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DynError>;

/// Checks that `size` lies in `1..=max`
#[inline]
pub(crate) fn check_size(size: usize, max: usize) -> Result<()> {
    if size == 0 || size > max {
        log::debug!("rejecting container size {} (max {})", size, max);
        return Err(DynError::InvalidSize { size, max });
    }
    Ok(())
}

/// Checks that `index` lies in `0..size`
#[inline]
pub(crate) fn check_index(index: usize, size: usize) -> Result<()> {
    if index >= size {
        return Err(DynError::IndexOutOfRange { index, size });
    }
    Ok(())
}

/// Checks that two operand sizes agree
#[inline]
pub(crate) fn check_same_size(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(DynError::SizeMismatch { left, right });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let err = DynError::InvalidSize { size: 0, max: 10 };
        assert_eq!(err.to_string(), "invalid size 0: must be between 1 and 10");

        let err = DynError::IndexOutOfRange { index: 4, size: 4 };
        assert_eq!(err.to_string(), "index 4 out of range for size 4");

        let err = DynError::SizeMismatch { left: 4, right: 5 };
        assert_eq!(err.to_string(), "size mismatch: 4 vs 5");

        let err = DynError::RaggedRow {
            row: 1,
            len: 2,
            size: 3,
        };
        assert_eq!(err.to_string(), "row 1 has 2 elements, expected 3");

        let err = DynError::Parse {
            index: 2,
            token: "x".to_owned(),
        };
        assert_eq!(err.to_string(), "cannot parse element 2 from \"x\"");

        let err = DynError::UnexpectedEof {
            expected: 3,
            read: 1,
        };
        assert_eq!(
            err.to_string(),
            "unexpected end of input: read 1 of 3 elements"
        );
    }

    #[test]
    fn checks() {
        assert!(check_size(1, 1).is_ok());
        assert!(matches!(
            check_size(0, 1),
            Err(DynError::InvalidSize { size: 0, max: 1 })
        ));
        assert!(matches!(
            check_size(2, 1),
            Err(DynError::InvalidSize { size: 2, max: 1 })
        ));
        assert!(check_index(2, 3).is_ok());
        assert!(matches!(
            check_index(3, 3),
            Err(DynError::IndexOutOfRange { index: 3, size: 3 })
        ));
        assert!(check_same_size(3, 3).is_ok());
        assert!(matches!(
            check_same_size(3, 4),
            Err(DynError::SizeMismatch { left: 3, right: 4 })
        ));
    }
}
