use alloc::vec::Vec;
use num_complex::Complex;

use crate::traits::LinalgScalar;

use super::DynMatrix;

// ── Map ─────────────────────────────────────────────────────────────

impl<T> DynMatrix<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use cschur::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 4.0, 9.0, 16.0]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 0)], 1.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> DynMatrix<U>
    where
        T: Copy,
    {
        let data: Vec<U> = self.data.iter().map(|&x| f(x)).collect();
        DynMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Transpose (no conjugation).
    pub fn transpose(&self) -> Self
    where
        T: Copy,
    {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}

// ── Conjugation / promotion ─────────────────────────────────────────

impl<T: LinalgScalar> DynMatrix<T> {
    /// Conjugate transpose `A^H` (plain transpose for real matrices).
    ///
    /// ```
    /// use cschur::DynMatrix;
    /// use num_complex::Complex;
    /// let a = DynMatrix::from_rows(1, 2, &[Complex::new(1.0_f64, 2.0), Complex::new(3.0, -1.0)]);
    /// let ah = a.adjoint();
    /// assert_eq!(ah.nrows(), 2);
    /// assert_eq!(ah[(0, 0)], Complex::new(1.0, -2.0));
    /// assert_eq!(ah[(1, 0)], Complex::new(3.0, 1.0));
    /// ```
    pub fn adjoint(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }

    /// Promote every entry into the complex field over `T::Real`.
    pub fn to_complex(&self) -> DynMatrix<Complex<T::Real>> {
        self.map(|x| x.to_complex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_rectangular() {
        let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = m.transpose();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t[(0, 1)], 4.0);
    }

    #[test]
    fn adjoint_of_real_is_transpose() {
        let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        assert_eq!(m.adjoint(), m.transpose());
    }

    #[test]
    fn to_complex_keeps_values() {
        let m = DynMatrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
        let z = m.to_complex();
        assert_eq!(z[(0, 1)], Complex::new(-2.0, 0.0));
        assert_eq!(z[(1, 0)], Complex::new(3.0, 0.0));
    }
}
