use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace, warn};
use num_complex::Complex;
use num_traits::Zero;

use crate::dynmatrix::DynMatrix;
use crate::linalg::givens::Givens;
use crate::linalg::hessenberg::HessenbergDecomposition;
use crate::linalg::shift::{exceptional_shift, subdiagonal_is_negligible, wilkinson_shift};
use crate::linalg::{ensure_square, ComputationInfo, LinalgError};
use crate::traits::{FloatScalar, LinalgScalar, MatrixMut};

/// Default number of QR sweeps allowed per matrix row.
pub const MAX_ITERATIONS_PER_ROW: usize = 30;

/// Sweeps without a deflation before an exceptional shift is used.
const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

/// Maximum number of QR sweeps a [`ComplexSchur`] computation may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationBudget {
    /// `k * n` sweeps for an `n x n` matrix.
    PerRow(usize),
    /// A fixed number of sweeps regardless of size.
    Total(usize),
}

impl Default for IterationBudget {
    fn default() -> Self {
        IterationBudget::PerRow(MAX_ITERATIONS_PER_ROW)
    }
}

impl IterationBudget {
    /// Number of sweeps allowed for an `n x n` matrix.
    ///
    /// ```
    /// use cschur::linalg::IterationBudget;
    /// assert_eq!(IterationBudget::default().resolve(5), 150);
    /// assert_eq!(IterationBudget::Total(7).resolve(5), 7);
    /// ```
    #[inline]
    pub fn resolve(self, n: usize) -> usize {
        match self {
            IterationBudget::PerRow(k) => k.saturating_mul(n),
            IterationBudget::Total(total) => total,
        }
    }
}

/// Result of running [`complex_qr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOutcome {
    pub info: ComputationInfo,
    /// QR sweeps actually performed.
    pub iterations: usize,
}

/// Shifted QR iteration on a complex upper Hessenberg matrix.
///
/// Drives `t` to upper triangular form in place with single-shift implicit
/// QR steps (Givens bulge chasing) and deflation. If `v` is given, every
/// rotation is also applied to it from the right, so on return
/// `t_in = v T v^H` relative to the `v` passed in (start from `I` to obtain
/// the QR-stage unitary factor).
///
/// Deflation never counts against `max_iter`; an input that is already
/// triangular succeeds with zero sweeps. When the budget runs out the
/// iteration stops where it is and reports
/// [`ComputationInfo::NoConvergence`]; `t` and `v` keep their partially
/// reduced (still similar) state.
///
/// On success every subdiagonal entry of `t` is exactly zero.
pub fn complex_qr<T, M>(t: &mut M, mut v: Option<&mut M>, max_iter: usize) -> QrOutcome
where
    T: FloatScalar,
    M: MatrixMut<Complex<T>>,
{
    let n = t.nrows();
    assert_eq!(n, t.ncols(), "complex_qr requires a square matrix");
    if let Some(v) = v.as_deref() {
        assert_eq!((v.nrows(), v.ncols()), (n, n), "accumulator must be {}x{}", n, n);
    }

    // Active block is t[il..=iu, il..=iu]; rows below iu have converged.
    let mut iu = n.saturating_sub(1);
    let mut iter = 0usize;
    let mut total = 0usize;

    loop {
        while iu > 0 && subdiagonal_is_negligible(t, iu) {
            trace!(target: "cschur", "deflated row {} after {} sweeps", iu, iter);
            iu -= 1;
            iter = 0;
        }
        if iu == 0 {
            return QrOutcome {
                info: ComputationInfo::Success,
                iterations: total,
            };
        }

        if total >= max_iter {
            warn!(
                target: "cschur",
                "QR iteration budget of {} sweeps exhausted with {} rows unreduced",
                max_iter,
                iu + 1
            );
            return QrOutcome {
                info: ComputationInfo::NoConvergence,
                iterations: total,
            };
        }
        total += 1;
        iter += 1;

        let mut il = iu - 1;
        while il > 0 && !subdiagonal_is_negligible(t, il) {
            il -= 1;
        }

        let shift = if iter % EXCEPTIONAL_SHIFT_PERIOD == 0 {
            exceptional_shift(&*t, iu)
        } else {
            wilkinson_shift(&*t, iu)
        };

        qr_step(t, v.as_deref_mut(), il, iu, shift);
    }
}

/// One implicit single-shift QR step on the block `[il, iu]`.
///
/// The first rotation introduces the shift; each following one chases the
/// resulting bulge at `(i+1, i-1)` one row down until it falls off the block.
fn qr_step<T, M>(t: &mut M, mut v: Option<&mut M>, il: usize, iu: usize, shift: Complex<T>)
where
    T: FloatScalar,
    M: MatrixMut<Complex<T>>,
{
    let n = t.nrows();

    let (rot, _) = Givens::make(*t.get(il, il) - shift, *t.get(il + 1, il));
    rot.apply_left(t, il, il + 1, il..n);
    rot.apply_right(t, il, il + 1, 0..(il + 2).min(iu) + 1);
    if let Some(v) = v.as_deref_mut() {
        rot.apply_right(v, il, il + 1, 0..n);
    }

    for i in (il + 1)..iu {
        let (rot, r) = Givens::make(*t.get(i, i - 1), *t.get(i + 1, i - 1));
        *t.get_mut(i, i - 1) = r;
        *t.get_mut(i + 1, i - 1) = Complex::zero();
        rot.apply_left(t, i, i + 1, i..n);
        rot.apply_right(t, i, i + 1, 0..(i + 2).min(iu) + 1);
        if let Some(v) = v.as_deref_mut() {
            rot.apply_right(v, i, i + 1, 0..n);
        }
    }
}

static NEXT_ENGINE_ID: AtomicUsize = AtomicUsize::new(1);

/// Process-unique identity of a [`ComplexSchur`] instance.
///
/// Carries no numerical meaning; two engines built from the same input
/// still have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(usize);

impl EngineId {
    fn next() -> Self {
        EngineId(NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw token value.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for EngineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "schur#{}", self.0)
    }
}

/// Complex Schur decomposition `A = U T U^H`.
///
/// For a square matrix A (real or complex), computes unitary U and upper
/// triangular T. The diagonal of T holds the eigenvalues of A.
///
/// The engine is reusable: each [`compute`](Self::compute) or
/// [`compute_from_hessenberg`](Self::compute_from_hessenberg) call replaces
/// the stored T, U and status. Reading results from an engine that has
/// never computed anything panics.
///
/// # Example
///
/// ```
/// use cschur::DynMatrix;
/// use cschur::linalg::{ComplexSchur, ComputationInfo};
///
/// // 90° rotation: eigenvalues ±i
/// let a = DynMatrix::from_rows(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
/// let schur = ComplexSchur::new(&a).unwrap();
/// assert_eq!(schur.info(), ComputationInfo::Success);
///
/// let t = schur.matrix_t();
/// assert_eq!(t[(1, 0)].norm(), 0.0);
/// for lambda in schur.eigenvalues() {
///     assert!(lambda.re.abs() < 1e-12);
///     assert!((lambda.im.abs() - 1.0).abs() < 1e-12);
/// }
///
/// let u = schur.matrix_u().unwrap();
/// assert!((u * t * u.adjoint()).is_approx(&a.to_complex(), 1e-12));
/// ```
#[derive(Debug)]
pub struct ComplexSchur<T: FloatScalar> {
    t: DynMatrix<Complex<T>>,
    u: Option<DynMatrix<Complex<T>>>,
    info: Option<ComputationInfo>,
    budget: IterationBudget,
    iterations: usize,
    size: usize,
    id: EngineId,
}

impl<T: FloatScalar> Clone for ComplexSchur<T> {
    /// Copies the results and settings under a fresh [`EngineId`].
    fn clone(&self) -> Self {
        Self {
            t: self.t.clone(),
            u: self.u.clone(),
            info: self.info,
            budget: self.budget,
            iterations: self.iterations,
            size: self.size,
            id: EngineId::next(),
        }
    }
}

impl<T: FloatScalar> ComplexSchur<T> {
    /// Empty engine for `n x n` matrices; call a `compute*` method before
    /// reading results.
    pub fn with_size(n: usize) -> Self {
        Self {
            t: DynMatrix::zeros(n, n, Complex::zero()),
            u: None,
            info: None,
            budget: IterationBudget::default(),
            iterations: 0,
            size: n,
            id: EngineId::next(),
        }
    }

    /// Compute the full decomposition (T and U) of `a`.
    pub fn new<S: LinalgScalar<Real = T>>(a: &DynMatrix<S>) -> Result<Self, LinalgError> {
        Self::from_matrix(a, true)
    }

    /// Compute the decomposition of `a`, skipping U when `compute_u` is false.
    ///
    /// Budget exhaustion is not an error here; check [`info`](Self::info).
    pub fn from_matrix<S: LinalgScalar<Real = T>>(
        a: &DynMatrix<S>,
        compute_u: bool,
    ) -> Result<Self, LinalgError> {
        let mut schur = Self::with_size(a.nrows());
        schur.compute(a, compute_u)?;
        Ok(schur)
    }

    /// Reduce `a` to Hessenberg form, then run the QR iteration.
    ///
    /// Real inputs are reduced in real arithmetic and promoted afterwards.
    /// Returns the resulting status; a non-square `a` is rejected and leaves
    /// the engine unchanged.
    pub fn compute<S: LinalgScalar<Real = T>>(
        &mut self,
        a: &DynMatrix<S>,
        compute_u: bool,
    ) -> Result<ComputationInfo, LinalgError> {
        ensure_square(a)?;
        let (h, q) = HessenbergDecomposition::new(a)?.into_parts();
        let q = if compute_u { Some(q.to_complex()) } else { None };
        Ok(self.reduce_to_triangular(h.to_complex(), q))
    }

    /// Run the QR iteration on a caller-supplied Hessenberg pair.
    ///
    /// `q` must be unitary and `h = q^H A q` upper Hessenberg. These
    /// preconditions are trusted, not checked: violating them gives
    /// meaningless T and U, never an error. Debug builds log a warning when
    /// `h` has entries below the subdiagonal. Only the shapes are validated.
    pub fn compute_from_hessenberg<S: LinalgScalar<Real = T>>(
        &mut self,
        h: &DynMatrix<S>,
        q: &DynMatrix<S>,
        compute_u: bool,
    ) -> Result<ComputationInfo, LinalgError> {
        let n = ensure_square(h)?;
        if (q.nrows(), q.ncols()) != (n, n) {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, n),
                got: (q.nrows(), q.ncols()),
            });
        }

        #[cfg(debug_assertions)]
        {
            if !h.is_upper_hessenberg(T::epsilon() * h.max_modulus()) {
                warn!(
                    target: "cschur",
                    "compute_from_hessenberg: input is not upper Hessenberg; results are unspecified"
                );
            }
        }

        let q = if compute_u { Some(q.to_complex()) } else { None };
        Ok(self.reduce_to_triangular(h.to_complex(), q))
    }

    fn reduce_to_triangular(
        &mut self,
        mut t: DynMatrix<Complex<T>>,
        q: Option<DynMatrix<Complex<T>>>,
    ) -> ComputationInfo {
        let n = t.nrows();
        let max_iter = self.budget.resolve(n);
        let mut v = q.as_ref().map(|_| DynMatrix::eye(n, Complex::zero()));

        // Work on t / max|t| so the 2x2 shift arithmetic cannot overflow.
        let scale = t.max_modulus();
        let outcome = if scale == T::zero() {
            QrOutcome {
                info: ComputationInfo::Success,
                iterations: 0,
            }
        } else {
            t = t.map(|z| z.unscale(scale));
            let outcome = complex_qr(&mut t, v.as_mut(), max_iter);
            t = t.map(|z| z.scale(scale));
            outcome
        };

        debug!(
            target: "cschur",
            "complex schur {}: n={} sweeps={} budget={} status={}",
            self.id,
            n,
            outcome.iterations,
            max_iter,
            outcome.info
        );

        self.u = q.zip(v).map(|(q, v)| &q * &v);
        self.t = t;
        self.size = n;
        self.iterations = outcome.iterations;
        self.info = Some(outcome.info);
        outcome.info
    }

    fn assert_initialized(&self) {
        assert!(
            self.info.is_some(),
            "ComplexSchur is not initialized; call compute() first"
        );
    }

    /// Whether a `compute*` call has completed on this engine.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.info.is_some()
    }

    /// Status of the last computation.
    ///
    /// Panics if nothing has been computed yet.
    pub fn info(&self) -> ComputationInfo {
        self.assert_initialized();
        self.info.unwrap_or(ComputationInfo::NoConvergence)
    }

    /// The upper triangular factor T.
    ///
    /// Panics if nothing has been computed yet.
    pub fn matrix_t(&self) -> &DynMatrix<Complex<T>> {
        self.assert_initialized();
        &self.t
    }

    /// The unitary factor U, or `None` if the last computation skipped it.
    ///
    /// Panics if nothing has been computed yet.
    pub fn matrix_u(&self) -> Option<&DynMatrix<Complex<T>>> {
        self.assert_initialized();
        self.u.as_ref()
    }

    /// Eigenvalues, read off the diagonal of T.
    pub fn eigenvalues(&self) -> Vec<Complex<T>> {
        self.matrix_t().diagonal()
    }

    /// QR sweeps used by the last computation.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Cap the total number of QR sweeps for subsequent computations.
    pub fn set_max_iterations(&mut self, max_iterations: usize) -> &mut Self {
        self.budget = IterationBudget::Total(max_iterations);
        self
    }

    /// Sweep limit that the next computation on the current size will use.
    ///
    /// Defaults to `MAX_ITERATIONS_PER_ROW * n`.
    pub fn max_iterations(&self) -> usize {
        self.budget.resolve(self.size)
    }

    pub fn set_iteration_budget(&mut self, budget: IterationBudget) -> &mut Self {
        self.budget = budget;
        self
    }

    #[inline]
    pub fn iteration_budget(&self) -> IterationBudget {
        self.budget
    }

    /// Dimension of the last computation, or the reserved size.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Identity token of this engine instance.
    #[inline]
    pub fn id(&self) -> EngineId {
        self.id
    }
}
