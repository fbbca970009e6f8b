use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex;

// ---------------------------------------------------------------------------
// Helpers: deterministic, non-normal test matrices
// ---------------------------------------------------------------------------

fn entry(i: usize, j: usize) -> f64 {
    ((i * 7 + j * 13) % 17) as f64 / 17.0 - 0.5 + if i == j { 1.0 } else { 0.0 }
}

fn cschur_real(n: usize) -> cschur::DynMatrix<f64> {
    cschur::DynMatrix::from_fn(n, n, entry)
}

fn cschur_complex(n: usize) -> cschur::DynMatrix<Complex<f64>> {
    cschur::DynMatrix::from_fn(n, n, |i, j| Complex::new(entry(i, j), entry(j, i)))
}

fn nalgebra_complex(n: usize) -> nalgebra::DMatrix<Complex<f64>> {
    nalgebra::DMatrix::from_fn(n, n, |i, j| Complex::new(entry(i, j), entry(j, i)))
}

// ---------------------------------------------------------------------------
// Hessenberg reduction
// ---------------------------------------------------------------------------

fn hessenberg(c: &mut Criterion) {
    let mut g = c.benchmark_group("hessenberg");

    for n in [8, 32, 100] {
        g.bench_with_input(BenchmarkId::new("cschur", n), &n, |b, &n| {
            let a = cschur_complex(n);
            b.iter(|| std::hint::black_box(&a).hessenberg().unwrap())
        });

        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_complex(n);
            b.iter(|| std::hint::black_box(&a).clone().hessenberg())
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Full complex Schur decomposition
// ---------------------------------------------------------------------------

fn complex_schur(c: &mut Criterion) {
    let mut g = c.benchmark_group("complex_schur");

    for n in [8, 32, 100] {
        g.bench_with_input(BenchmarkId::new("cschur", n), &n, |b, &n| {
            let a = cschur_complex(n);
            b.iter(|| cschur::ComplexSchur::new(std::hint::black_box(&a)).unwrap())
        });

        g.bench_with_input(BenchmarkId::new("cschur_real_input", n), &n, |b, &n| {
            let a = cschur_real(n);
            b.iter(|| cschur::ComplexSchur::new(std::hint::black_box(&a)).unwrap())
        });

        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_complex(n);
            b.iter(|| std::hint::black_box(&a).clone().schur())
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Eigenvalues only (no U accumulation)
// ---------------------------------------------------------------------------

fn eigenvalues(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigenvalues");

    for n in [32, 100] {
        g.bench_with_input(BenchmarkId::new("cschur", n), &n, |b, &n| {
            let a = cschur_complex(n);
            b.iter(|| std::hint::black_box(&a).complex_eigenvalues().unwrap())
        });

        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_complex(n);
            b.iter(|| std::hint::black_box(&a).clone().schur().eigenvalues())
        });
    }

    g.finish();
}

criterion_group!(benches, hessenberg, complex_schur, eigenvalues);
criterion_main!(benches);
