use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, `Complex<f32>`, `Complex<f64>` and the integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point matrix elements.
///
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for matrix elements that support linear algebra operations.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). Real inputs are promoted with [`to_complex`](Self::to_complex)
/// when they enter the complex Schur pipeline.
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Cheap magnitude `|re| + |im|`, used by deflation and shift tests.
    fn norm1(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;

    /// `self / rhs` without forming `|rhs|^2`.
    ///
    /// Plain complex division squares the divisor's components, which
    /// underflows to zero for `|rhs|` near `sqrt(min_positive)` and yields NaN.
    /// Here `rhs` is first scaled so its largest component is one.
    fn scaled_div(self, rhs: Self) -> Self;

    /// Promote `self` into the complex field over `Self::Real`.
    fn to_complex(self) -> Complex<Self::Real>;
}

macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn norm1(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn from_real(r: $t) -> $t { r }
                #[inline] fn scaled_div(self, rhs: $t) -> $t { self / rhs }
                #[inline] fn to_complex(self) -> Complex<$t> { Complex::new(self, 0.0) }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn norm1(self) -> T {
        self.re.abs() + self.im.abs()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }

    fn scaled_div(self, rhs: Self) -> Self {
        let s = rhs.re.abs().max(rhs.im.abs());
        if s == T::zero() {
            return self / rhs;
        }
        (self / rhs.unscale(s)).unscale(s)
    }

    #[inline]
    fn to_complex(self) -> Complex<T> {
        self
    }
}

/// Read-only access to a matrix-like type.
///
/// Storage is column-major: `col_as_slice(j, i0)` returns the contiguous
/// run `m[i0..nrows, j]`.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling the in-place
/// reduction kernels to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_promotes_to_complex() {
        let z = 2.5_f64.to_complex();
        assert_eq!(z, Complex::new(2.5, 0.0));
        assert_eq!((-3.0_f32).norm1(), 3.0);
    }

    #[test]
    fn complex_norm1_and_modulus() {
        let z = Complex::new(3.0_f64, -4.0);
        assert_eq!(z.norm1(), 7.0);
        assert!((z.modulus() - 5.0).abs() < 1e-15);
        assert_eq!(LinalgScalar::conj(z), Complex::new(3.0, 4.0));
        assert_eq!(z.to_complex(), z);
    }

    #[test]
    fn scaled_div_survives_tiny_divisors() {
        let x = Complex::new(3e-200_f64, -1e-200);
        let d = Complex::new(1e-200_f64, 2e-200);
        let q = x.scaled_div(d);
        let expected = Complex::new(3.0, -1.0) / Complex::new(1.0, 2.0);
        assert!((q - expected).norm() < 1e-15);

        let phase = Complex::new(0.0_f32, 2e-25).scaled_div(Complex::new(2e-25, 0.0));
        assert!((phase - Complex::new(0.0, 1.0)).norm() < 1e-6);

        assert_eq!(6.0_f64.scaled_div(3.0), 2.0);
    }
}
