pub(crate) mod complex_schur;
pub(crate) mod givens;
pub(crate) mod hessenberg;
pub(crate) mod shift;

pub use complex_schur::{
    complex_qr, ComplexSchur, EngineId, IterationBudget, QrOutcome, MAX_ITERATIONS_PER_ROW,
};
pub use givens::Givens;
pub use hessenberg::{hessenberg, HessenbergDecomposition};

/// Errors from linear algebra operations.
///
/// Returned by decomposition constructors and `compute*` entry points.
/// Running out of QR sweeps is *not* an error for [`ComplexSchur`]; it is
/// reported through [`ComputationInfo::NoConvergence`] instead.
///
/// ```
/// use cschur::DynMatrix;
/// use cschur::linalg::{ComplexSchur, LinalgError};
///
/// let rect = DynMatrix::zeros(2, 3, 0.0_f64);
/// assert_eq!(
///     ComplexSchur::new(&rect).unwrap_err(),
///     LinalgError::NotSquare { nrows: 2, ncols: 3 },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// The input matrix is not square.
    NotSquare { nrows: usize, ncols: usize },
    /// Two operands that must share a dimension do not.
    DimensionMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::NotSquare { nrows, ncols } => {
                write!(f, "matrix must be square, got {}x{}", nrows, ncols)
            }
            LinalgError::DimensionMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Outcome of an iterative decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputationInfo {
    /// Every subdiagonal entry was driven to zero.
    Success,
    /// The iteration budget ran out first; results are only partially reduced.
    NoConvergence,
}

impl ComputationInfo {
    #[inline]
    pub fn is_success(self) -> bool {
        self == ComputationInfo::Success
    }
}

impl core::fmt::Display for ComputationInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ComputationInfo::Success => write!(f, "success"),
            ComputationInfo::NoConvergence => write!(f, "no convergence"),
        }
    }
}

/// Reject non-square inputs with [`LinalgError::NotSquare`].
#[inline]
pub(crate) fn ensure_square<T>(
    m: &impl crate::traits::MatrixRef<T>,
) -> Result<usize, LinalgError> {
    if m.nrows() != m.ncols() {
        return Err(LinalgError::NotSquare {
            nrows: m.nrows(),
            ncols: m.ncols(),
        });
    }
    Ok(m.nrows())
}
