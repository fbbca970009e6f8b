use alloc::vec::Vec;

use crate::traits::{LinalgScalar, Scalar};

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use cschur::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Main diagonal as a `Vec`.
    pub fn diagonal(&self) -> Vec<T> {
        let n = self.nrows.min(self.ncols);
        (0..n).map(|i| self[(i, i)]).collect()
    }
}

impl<T: LinalgScalar> DynMatrix<T> {
    /// Whether every entry strictly below the diagonal has modulus `<= tol`.
    ///
    /// ```
    /// use cschur::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 1e-15, 4.0]);
    /// assert!(m.is_upper_triangular(1e-12));
    /// assert!(!m.is_upper_triangular(0.0));
    /// ```
    pub fn is_upper_triangular(&self, tol: T::Real) -> bool {
        self.below_band_within(0, tol)
    }

    /// Whether every entry two or more rows below the diagonal has modulus `<= tol`.
    pub fn is_upper_hessenberg(&self, tol: T::Real) -> bool {
        self.below_band_within(1, tol)
    }

    fn below_band_within(&self, band: usize, tol: T::Real) -> bool {
        for j in 0..self.ncols {
            for i in (j + band + 1)..self.nrows {
                if self[(i, j)].modulus() > tol {
                    return false;
                }
            }
        }
        true
    }
}
