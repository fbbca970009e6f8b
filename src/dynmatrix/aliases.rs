//! Pre-defined type aliases for common `DynMatrix` element types.

use num_complex::Complex;

use super::DynMatrix;

/// Dynamic matrix with `f32` elements.
pub type DynMatrixf32 = DynMatrix<f32>;
/// Dynamic matrix with `f64` elements.
pub type DynMatrixf64 = DynMatrix<f64>;

/// Dynamic matrix with `Complex<f32>` elements.
pub type DynMatrixz32 = DynMatrix<Complex<f32>>;
/// Dynamic matrix with `Complex<f64>` elements.
pub type DynMatrixz64 = DynMatrix<Complex<f64>>;
