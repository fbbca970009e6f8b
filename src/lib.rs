//! # cschur
//!
//! Complex Schur decomposition of square matrices in pure Rust, no-std
//! compatible (requires `alloc`).
//!
//! For any square A (real or complex) this computes a unitary U and an upper
//! triangular T with `A = U T U^H`. The diagonal of T holds the eigenvalues
//! of A.
//!
//! ## Quick start
//!
//! ```
//! use cschur::{ComplexSchur, ComputationInfo, DynMatrix};
//!
//! let a = DynMatrix::from_rows(3, 3, &[
//!     1.0_f64, 2.0, 3.0,
//!     4.0, 5.0, 6.0,
//!     7.0, 8.0, 0.0,
//! ]);
//! let schur = ComplexSchur::new(&a).unwrap();
//! assert_eq!(schur.info(), ComputationInfo::Success);
//!
//! let (t, u) = (schur.matrix_t(), schur.matrix_u().unwrap());
//! assert!(t.is_upper_triangular(0.0));
//! assert!((u * t * u.adjoint()).is_approx(&a.to_complex(), 1e-10));
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: Heap-allocated, column-major `DynMatrix<T>` with runtime
//!   dimensions. Arithmetic, norms, adjoint, triangularity checks.
//!
//! - [`linalg`]: The decomposition pipeline:
//!   - [`HessenbergDecomposition`] / [`linalg::hessenberg`]: Householder
//!     reduction `A = Q H Q^H`
//!   - [`linalg::complex_qr`]: shifted QR iteration on a Hessenberg matrix
//!   - [`ComplexSchur`]: reusable engine tying both stages together, with an
//!     iteration budget and convergence status
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements
//!   - [`FloatScalar`]: real floats
//!   - [`LinalgScalar`]: real floats and complex numbers
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade under the
//! `cschur` target: `trace` per deflation, `debug` per computation, `warn`
//! when the iteration budget runs out.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm, `std::error::Error` impls |
//! | `libm`  | baseline | Pure-Rust software float fallback for `no_std` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod linalg;
pub mod traits;

pub use dynmatrix::{DynMatrix, DynMatrixf32, DynMatrixf64, DynMatrixz32, DynMatrixz64};
pub use linalg::{
    ComplexSchur, ComputationInfo, EngineId, HessenbergDecomposition, IterationBudget,
    LinalgError,
};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
