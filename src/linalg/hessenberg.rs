use alloc::vec;
use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::linalg::{ensure_square, LinalgError};
use crate::traits::{LinalgScalar, MatrixMut};
use num_traits::{Float, Zero};

/// Reduce a square matrix to upper Hessenberg form via Householder similarity
/// transforms: `Q^H A Q = H`.
///
/// On return:
/// - `a` is overwritten with the upper Hessenberg matrix H; every entry more
///   than one row below the diagonal is exactly zero
/// - `q` holds the accumulated unitary transform Q
///
/// The result satisfies `A = Q H Q^H`. Matrices with `n <= 2` are already
/// Hessenberg and come back untouched with `Q = I`.
pub fn hessenberg<T: LinalgScalar>(a: &mut impl MatrixMut<T>, q: &mut impl MatrixMut<T>) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");
    assert_eq!(q.nrows(), n);
    assert_eq!(q.ncols(), n);

    // Initialize Q = I
    for j in 0..n {
        for (i, x) in q.col_as_mut_slice(j, 0).iter_mut().enumerate() {
            *x = if i == j { T::one() } else { T::zero() };
        }
    }

    let mut v: Vec<T> = Vec::with_capacity(n);
    let mut w: Vec<T> = vec![T::zero(); n];

    for k in 0..n.saturating_sub(2) {
        // Nothing below the subdiagonal: column k is already reduced.
        if a.col_as_slice(k, k + 2).iter().all(|x| x.is_zero()) {
            continue;
        }

        // Householder vector from a[k+1:n, k], norm accumulated with scaling
        let sub_col = a.col_as_slice(k, k + 1);
        let scale = sub_col
            .iter()
            .map(|x| x.modulus())
            .fold(<T::Real as Zero>::zero(), Float::max);
        let mut norm_sq = <T::Real as Zero>::zero();
        for &x in sub_col {
            let m = x.modulus() / scale;
            norm_sq = norm_sq + m * m;
        }
        let norm = scale * norm_sq.sqrt();

        let ak1k = *a.get(k + 1, k);
        let alpha = ak1k.modulus();

        // sigma carries the phase of the leading entry so v0 = ak1k + sigma
        // never cancels.
        let sigma = if alpha == <T::Real as Zero>::zero() {
            T::from_real(norm)
        } else {
            T::from_real(norm) * ak1k.scaled_div(T::from_real(alpha))
        };
        let v0 = ak1k + sigma;
        let tau = v0.scaled_div(sigma);

        // Store normalized Householder vector in a[k+2:n, k] (v[0] = 1 implicit)
        for x in a.col_as_mut_slice(k, k + 2).iter_mut() {
            *x = x.scaled_div(v0);
        }
        v.clear();
        v.push(T::one());
        v.extend_from_slice(a.col_as_slice(k, k + 2));

        // Apply from the left: A[k+1:n, k+1:n] = (I - tau v v^H) A[k+1:n, k+1:n]
        // Column k is set explicitly below.
        for j in (k + 1)..n {
            let col = a.col_as_mut_slice(j, k + 1);
            let mut dot = T::zero();
            for (&vi, &aij) in v.iter().zip(col.iter()) {
                dot = dot + vi.conj() * aij;
            }
            dot = dot * tau;
            for (aij, &vi) in col.iter_mut().zip(v.iter()) {
                *aij = *aij - dot * vi;
            }
        }

        // Apply from the right: A[0:n, k+1:n] = A[0:n, k+1:n] (I - tau v v^H)
        apply_reflector_right(a, k + 1, &v, tau, &mut w);

        // Accumulate Q: Q = Q (I - tau v v^H)
        apply_reflector_right(q, k + 1, &v, tau, &mut w);

        // Zero out the sub-sub-diagonal entries and set a[k+1,k] = -sigma
        *a.get_mut(k + 1, k) = T::zero() - sigma;
        for x in a.col_as_mut_slice(k, k + 2).iter_mut() {
            *x = T::zero();
        }
    }
}

/// `M[:, offset..] -= tau * (M[:, offset..] v) v^H`, using `w` as scratch.
fn apply_reflector_right<T: LinalgScalar>(
    m: &mut impl MatrixMut<T>,
    offset: usize,
    v: &[T],
    tau: T,
    w: &mut [T],
) {
    let n = m.nrows();
    let w = &mut w[..n];
    for x in w.iter_mut() {
        *x = T::zero();
    }
    for (jj, &vj) in v.iter().enumerate() {
        for (wi, &mij) in w.iter_mut().zip(m.col_as_slice(offset + jj, 0)) {
            *wi = *wi + mij * vj;
        }
    }
    for (jj, &vj) in v.iter().enumerate() {
        let coeff = tau * vj.conj();
        for (mij, &wi) in m.col_as_mut_slice(offset + jj, 0).iter_mut().zip(w.iter()) {
            *mij = *mij - wi * coeff;
        }
    }
}

/// Hessenberg decomposition of a dynamically-sized square matrix.
///
/// Computes unitary Q and upper Hessenberg H such that `A = Q H Q^H`.
/// Works for real and complex element types alike.
///
/// # Example
///
/// ```
/// use cschur::DynMatrix;
/// use cschur::linalg::HessenbergDecomposition;
///
/// let a = DynMatrix::from_rows(3, 3, &[
///     4.0_f64, 1.0, -2.0,
///     1.0, 2.0, 0.0,
///     -2.0, 0.0, 3.0,
/// ]);
/// let hess = HessenbergDecomposition::new(&a).unwrap();
/// assert_eq!(hess.matrix_h()[(2, 0)], 0.0);
///
/// let q = hess.matrix_q();
/// let back = q * hess.matrix_h() * q.adjoint();
/// assert!(back.is_approx(&a, 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct HessenbergDecomposition<T> {
    h: DynMatrix<T>,
    q: DynMatrix<T>,
}

impl<T: LinalgScalar> HessenbergDecomposition<T> {
    /// Reduce `a` to upper Hessenberg form.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let n = ensure_square(a)?;
        let mut h = a.clone();
        let mut q = DynMatrix::zeros(n, n, T::zero());
        hessenberg(&mut h, &mut q);
        Ok(Self { h, q })
    }

    /// The upper Hessenberg matrix H.
    #[inline]
    pub fn matrix_h(&self) -> &DynMatrix<T> {
        &self.h
    }

    /// The unitary transform Q.
    #[inline]
    pub fn matrix_q(&self) -> &DynMatrix<T> {
        &self.q
    }

    /// Consume the decomposition, returning `(H, Q)`.
    pub fn into_parts(self) -> (DynMatrix<T>, DynMatrix<T>) {
        (self.h, self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    const TOL: f64 = 1e-10;

    fn assert_unitary<T: LinalgScalar<Real = f64>>(q: &DynMatrix<T>) {
        let n = q.nrows();
        let qhq = q.adjoint() * q;
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                let got = qhq[(i, j)];
                assert!(
                    (got - T::from_real(expected)).modulus() < TOL,
                    "Q^HQ[({},{})] = {:?}, expected {}",
                    i,
                    j,
                    got,
                    expected
                );
            }
        }
    }

    #[test]
    fn hessenberg_3x3() {
        let orig = DynMatrix::from_rows(3, 3, &[4.0_f64, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0]);
        let hess = orig.hessenberg().unwrap();
        let h = hess.matrix_h();
        let q = hess.matrix_q();

        assert!(h.is_upper_hessenberg(0.0));

        // Q^T * orig * Q = H
        let qtaq = q.transpose() * &orig * q;
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (qtaq[(i, j)] - h[(i, j)]).abs() < TOL,
                    "Q^TAQ[({},{})] = {}, H = {}",
                    i,
                    j,
                    qtaq[(i, j)],
                    h[(i, j)]
                );
            }
        }
        assert_unitary(q);
    }

    #[test]
    fn hessenberg_4x4() {
        let orig = DynMatrix::from_fn(4, 4, |i, j| (i * 4 + j + 1) as f64);
        let mut a = orig.clone();
        let mut q = DynMatrix::zeros(4, 4, 0.0_f64);
        hessenberg(&mut a, &mut q);

        assert!(a.is_upper_hessenberg(0.0));
        let back = &q * &a * q.transpose();
        assert!(back.is_approx(&orig, TOL));
        assert_unitary(&q);
    }

    #[test]
    fn hessenberg_complex_5x5() {
        let orig = DynMatrix::from_fn(5, 5, |i, j| {
            Complex::new(((i * 7 + j * 3) % 5) as f64 - 2.0, ((i + 2 * j) % 3) as f64 - 1.0)
        });
        let hess = HessenbergDecomposition::new(&orig).unwrap();
        let (h, q) = hess.into_parts();

        assert!(h.is_upper_hessenberg(0.0));
        let back = &q * &h * q.adjoint();
        assert!(back.is_approx(&orig, TOL));
        assert_unitary(&q);
    }

    #[test]
    fn hessenberg_zero_leading_entry() {
        // a[1,0] = 0 exercises the real-sigma branch
        let orig = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let hess = orig.hessenberg().unwrap();
        assert!(hess.matrix_h().is_upper_hessenberg(0.0));
        let q = hess.matrix_q();
        assert!((q * hess.matrix_h() * q.transpose()).is_approx(&orig, TOL));
    }

    #[test]
    fn hessenberg_complex_tiny_entries() {
        // |x|^2 underflows here, so every division must avoid squaring.
        let base = DynMatrix::from_fn(5, 5, |i, j| {
            Complex::new(((i * 3 + j) % 4) as f64 - 1.5, ((2 * i + j) % 5) as f64 - 2.0)
        });
        let orig = base.map(|z| z.scale(1e-200));
        let hess = orig.hessenberg().unwrap();
        let (h, q) = (hess.matrix_h(), hess.matrix_q());

        assert!(h.as_slice().iter().all(|z| z.re.is_finite() && z.im.is_finite()));
        assert!(h.is_upper_hessenberg(0.0));
        assert_unitary(q);
        assert!((q * h * q.adjoint()).is_approx(&orig, TOL));
    }

    #[test]
    fn already_triangular_is_untouched() {
        let orig = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 6.0]);
        let hess = orig.hessenberg().unwrap();
        assert_eq!(hess.matrix_h(), &orig);
        assert_eq!(hess.matrix_q(), &DynMatrix::eye(3, 0.0));
    }

    #[test]
    fn small_sizes_return_identity() {
        for n in 0..=2 {
            let a = DynMatrix::from_fn(n, n, |i, j| (i + 2 * j + 1) as f64);
            let hess = a.hessenberg().unwrap();
            assert_eq!(hess.matrix_h(), &a);
            assert_eq!(hess.matrix_q(), &DynMatrix::eye(n, 0.0));
        }
    }

    #[test]
    fn rejects_rectangular() {
        let a = DynMatrix::zeros(3, 2, 0.0_f64);
        assert_eq!(
            a.hessenberg().unwrap_err(),
            LinalgError::NotSquare { nrows: 3, ncols: 2 }
        );
    }
}
