use num_complex::Complex;
use num_traits::Zero;

use crate::traits::{FloatScalar, LinalgScalar, MatrixMut};

/// Deflation test for the subdiagonal entry `t[i, i-1]`.
///
/// The entry is negligible when `|t[i,i-1]|₁ <= eps (|t[i-1,i-1]|₁ + |t[i,i]|₁)`,
/// or when it is below the underflow-safe threshold `min_positive / eps`
/// (covers blocks with vanishing diagonal). A negligible entry is set to
/// exactly zero.
pub(crate) fn subdiagonal_is_negligible<T, M>(t: &mut M, i: usize) -> bool
where
    T: FloatScalar,
    M: MatrixMut<Complex<T>> + ?Sized,
{
    let sd = t.get(i, i - 1).norm1();
    let d = t.get(i - 1, i - 1).norm1() + t.get(i, i).norm1();
    let small_num = T::min_positive_value() / T::epsilon();
    if sd <= T::epsilon() * d || sd < small_num {
        *t.get_mut(i, i - 1) = Complex::zero();
        true
    } else {
        false
    }
}

/// Wilkinson shift for the active block ending at row `iu` (`iu >= 1`).
///
/// Eigenvalue of the trailing 2×2 block `t[iu-1..=iu, iu-1..=iu]` closest
/// to `t[iu, iu]`. The block is normalized by its 1-norm first, and the
/// smaller root is recovered from the determinant to avoid cancellation.
pub(crate) fn wilkinson_shift<T, M>(t: &M, iu: usize) -> Complex<T>
where
    T: FloatScalar,
    M: MatrixMut<Complex<T>> + ?Sized,
{
    let a = *t.get(iu - 1, iu - 1);
    let b = *t.get(iu - 1, iu);
    let c = *t.get(iu, iu - 1);
    let d = *t.get(iu, iu);

    let norm = a.norm1() + b.norm1() + c.norm1() + d.norm1();
    if norm == T::zero() {
        return Complex::zero();
    }
    let (a, b, c, d) = (a.unscale(norm), b.unscale(norm), c.unscale(norm), d.unscale(norm));

    let two = T::one() + T::one();
    let bc = b * c;
    let diff = a - d;
    let disc = (diff * diff + bc.scale(two + two)).sqrt();
    let det = a * d - bc;
    let trace = a + d;

    let mut e1 = (trace + disc).unscale(two);
    let mut e2 = (trace - disc).unscale(two);
    if e1.norm1() > e2.norm1() {
        e2 = det.scaled_div(e1);
    } else if !e2.is_zero() {
        e1 = det.scaled_div(e2);
    }

    let closest = if (e1 - d).norm1() < (e2 - d).norm1() { e1 } else { e2 };
    closest.scale(norm)
}

/// Ad-hoc shift used to break cycles when a block stalls:
/// `|t[iu,iu-1]|₁ + |t[iu-1,iu-2]|₁`.
pub(crate) fn exceptional_shift<T, M>(t: &M, iu: usize) -> Complex<T>
where
    T: FloatScalar,
    M: MatrixMut<Complex<T>> + ?Sized,
{
    let mut s = t.get(iu, iu - 1).norm1();
    if iu >= 2 {
        s = s + t.get(iu - 1, iu - 2).norm1();
    }
    Complex::new(s, T::zero())
}
