use num_traits::{Float, Zero};

use crate::traits::LinalgScalar;

use super::DynMatrix;

impl<T: LinalgScalar> DynMatrix<T> {
    /// Frobenius norm (square root of sum of squared moduli).
    ///
    /// ```
    /// use cschur::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        // Scaled accumulation keeps the squares in range for huge entries.
        let scale = self.max_modulus();
        if scale == <T::Real as Zero>::zero() {
            return scale;
        }
        let mut sum = <T::Real as Zero>::zero();
        for &x in &self.data {
            let m = x.modulus() / scale;
            sum = sum + m * m;
        }
        scale * sum.sqrt()
    }

    /// Largest entry modulus, `max |a_ij|` (zero for an empty matrix).
    pub fn max_modulus(&self) -> T::Real {
        self.data
            .iter()
            .map(|&x| x.modulus())
            .fold(<T::Real as Zero>::zero(), |acc, m| if m > acc { m } else { acc })
    }

    /// Relative near-equality: `‖self − other‖_F ≤ tol · min(‖self‖_F, ‖other‖_F)`.
    ///
    /// Two zero matrices are approximately equal; a zero matrix is never
    /// approximately equal to a nonzero one.
    ///
    /// ```
    /// use cschur::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// let mut b = a.clone();
    /// b[(0, 0)] += 1e-14;
    /// assert!(a.is_approx(&b, 1e-12));
    /// assert!(!a.is_approx(&DynMatrix::eye(2, 0.0), 1e-12));
    /// ```
    pub fn is_approx(&self, other: &Self, tol: T::Real) -> bool {
        assert_eq!(
            (self.nrows, self.ncols),
            (other.nrows, other.ncols),
            "dimension mismatch: {}x{} vs {}x{}",
            self.nrows, self.ncols, other.nrows, other.ncols,
        );
        let diff = (self - other).frobenius_norm();
        let a = self.frobenius_norm();
        let b = other.frobenius_norm();
        diff <= tol * a.min(b)
    }
}
