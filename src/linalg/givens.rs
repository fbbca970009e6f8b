use core::ops::Range;

use num_complex::Complex;
use num_traits::Zero;

use crate::traits::{FloatScalar, LinalgScalar, MatrixMut};

/// Complex plane rotation `G = [[c, s], [-conj(s), c]]` with real `c`.
///
/// `c^2 + |s|^2 = 1`, so `G` is unitary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Givens<T> {
    pub c: T,
    pub s: Complex<T>,
}

impl<T: FloatScalar> Givens<T> {
    /// The identity rotation.
    #[inline]
    pub fn identity() -> Self {
        Self {
            c: T::one(),
            s: Complex::zero(),
        }
    }

    /// Build `G` such that `G · [f, g]^T = [r, 0]^T`, returning `(G, r)`.
    ///
    /// Uses `h = hypot(|f|, |g|)` and the phase of `f` rather than squared
    /// magnitudes, so neither a huge nor a tiny ratio `|f| / |g|` leaves range.
    ///
    /// ```
    /// use cschur::linalg::Givens;
    /// use num_complex::Complex;
    ///
    /// let f = Complex::new(3.0_f64, 1.0);
    /// let g = Complex::new(-2.0, 4.0);
    /// let (rot, r) = Givens::make(f, g);
    /// let bottom = -rot.s.conj() * f + g * rot.c;
    /// assert!(bottom.norm() < 1e-14);
    /// assert!(((rot.c * f + rot.s * g) - r).norm() < 1e-14);
    /// ```
    pub fn make(f: Complex<T>, g: Complex<T>) -> (Self, Complex<T>) {
        if g.is_zero() {
            return (Self::identity(), f);
        }
        if f.is_zero() {
            let d = g.norm();
            let rot = Self {
                c: T::zero(),
                s: g.conj().unscale(d),
            };
            return (rot, Complex::new(d, T::zero()));
        }

        let fa = f.norm();
        let h = fa.hypot(g.norm());
        let phase = f.unscale(fa);

        let rot = Self {
            c: fa / h,
            s: phase * g.conj().unscale(h),
        };
        (rot, phase.scale(h))
    }

    /// Rows `(p, q)` of `m` become `G · [row_p; row_q]` over `cols`.
    pub fn apply_left<M: MatrixMut<Complex<T>> + ?Sized>(
        &self,
        m: &mut M,
        p: usize,
        q: usize,
        cols: Range<usize>,
    ) {
        let sc = self.s.conj();
        for j in cols {
            let x = *m.get(p, j);
            let y = *m.get(q, j);
            *m.get_mut(p, j) = x * self.c + self.s * y;
            *m.get_mut(q, j) = y * self.c - sc * x;
        }
    }

    /// Columns `(p, q)` of `m` become `[col_p, col_q] · G^H` over `rows`.
    pub fn apply_right<M: MatrixMut<Complex<T>> + ?Sized>(
        &self,
        m: &mut M,
        p: usize,
        q: usize,
        rows: Range<usize>,
    ) {
        let sc = self.s.conj();
        for i in rows {
            let x = *m.get(i, p);
            let y = *m.get(i, q);
            *m.get_mut(i, p) = x * self.c + sc * y;
            *m.get_mut(i, q) = y * self.c - self.s * x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynMatrix;

    const TOL: f64 = 1e-14;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    fn check(f: Complex<f64>, g: Complex<f64>) {
        let (rot, r) = Givens::make(f, g);
        assert!((rot.c * rot.c + rot.s.norm_sqr() - 1.0).abs() < TOL);
        let top = f * rot.c + rot.s * g;
        let bottom = g * rot.c - rot.s.conj() * f;
        assert!((top - r).norm() < TOL * (1.0 + r.norm()), "top {:?} vs r {:?}", top, r);
        assert!(bottom.norm() < TOL * (1.0 + r.norm()), "bottom {:?}", bottom);
        assert!((r.norm() - f.norm().hypot(g.norm())).abs() < TOL * (1.0 + r.norm()));
    }

    #[test]
    fn annihilates_second_component() {
        check(c(3.0, 1.0), c(-2.0, 4.0));
        check(c(1.0, 0.0), c(1.0, 0.0));
        check(c(0.0, -1.5), c(1e-3, 2.0));
    }

    #[test]
    fn degenerate_inputs() {
        let (rot, r) = Givens::make(c(2.0, -1.0), c(0.0, 0.0));
        assert_eq!(rot, Givens::identity());
        assert_eq!(r, c(2.0, -1.0));

        let (rot, r) = Givens::make(c(0.0, 0.0), c(0.0, 3.0));
        assert_eq!(rot.c, 0.0);
        assert!((r - c(3.0, 0.0)).norm() < TOL);
        check(c(0.0, 0.0), c(-4.0, 3.0));
    }

    #[test]
    fn extreme_magnitudes() {
        check(c(1e200, 1e200), c(1e200, -1e199));
        check(c(1e-200, 0.0), c(0.0, 1e-200));
    }

    #[test]
    fn lopsided_magnitudes() {
        check(c(1e-170, 0.0), c(1.0, 0.0));
        check(c(1.0, 0.0), c(0.0, 1e-170));
        check(c(3e-300, -4e-300), c(0.5, 0.5));

        let (rot, r) = Givens::make(c(1e-170, 0.0), c(1.0, 0.0));
        assert!((rot.c - 1e-170).abs() < 1e-184);
        assert!((rot.s - c(1.0, 0.0)).norm() < TOL);
        assert!((r - c(1.0, 0.0)).norm() < TOL);

        let (rot, r) = Givens::<f32>::make(Complex::new(1e-25, 0.0), Complex::new(1.0, 0.0));
        assert!(rot.c.is_finite() && rot.s.norm().is_finite());
        assert!((r.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn left_then_right_is_similarity() {
        let m = DynMatrix::from_fn(3, 3, |i, j| c((i + 2 * j) as f64, i as f64 - j as f64));
        let (rot, _) = Givens::make(m[(0, 0)], m[(1, 0)]);
        let mut t = m.clone();
        rot.apply_left(&mut t, 0, 1, 0..3);
        assert!(t[(1, 0)].norm() < 1e-12);
        rot.apply_right(&mut t, 0, 1, 0..3);
        // Similarity preserves the trace.
        assert!((t.trace() - m.trace()).norm() < 1e-12);
    }
}
