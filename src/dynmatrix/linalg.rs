use alloc::vec::Vec;

use num_complex::Complex;

use crate::linalg::{ComplexSchur, ComputationInfo, HessenbergDecomposition, LinalgError};
use crate::traits::LinalgScalar;

use super::DynMatrix;

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: LinalgScalar> DynMatrix<T> {
    /// Hessenberg decomposition: `A = Q H Q^H`.
    pub fn hessenberg(&self) -> Result<HessenbergDecomposition<T>, LinalgError> {
        HessenbergDecomposition::new(self)
    }

    /// Complex Schur decomposition: `A = U T U^H`.
    ///
    /// ```
    /// use cschur::DynMatrix;
    ///
    /// let a = DynMatrix::from_rows(2, 2, &[5.0_f64, 3.0, 0.0, 2.0]);
    /// let schur = a.complex_schur().unwrap();
    /// assert!(schur.info().is_success());
    /// ```
    pub fn complex_schur(&self) -> Result<ComplexSchur<T::Real>, LinalgError> {
        ComplexSchur::new(self)
    }

    /// Eigenvalues of a square matrix via the complex Schur form.
    ///
    /// Maps a budget overrun to [`LinalgError::ConvergenceFailure`].
    ///
    /// ```
    /// use cschur::DynMatrix;
    ///
    /// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, -1.0, 1.0, 2.0]);
    /// let eig = a.complex_eigenvalues().unwrap();
    /// for lambda in eig {
    ///     assert!((lambda.re - 2.0).abs() < 1e-12);
    ///     assert!((lambda.im.abs() - 1.0).abs() < 1e-12);
    /// }
    /// ```
    pub fn complex_eigenvalues(&self) -> Result<Vec<Complex<T::Real>>, LinalgError> {
        let schur = ComplexSchur::from_matrix(self, false)?;
        match schur.info() {
            ComputationInfo::Success => Ok(schur.eigenvalues()),
            ComputationInfo::NoConvergence => Err(LinalgError::ConvergenceFailure),
        }
    }
}
