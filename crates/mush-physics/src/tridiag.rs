// ─────────────────────────────────────────────────────────────────────
// Mush Dynamics — Tridiag
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for the tridiagonal systems assembled by the
//! velocity solver.

use mush_types::error::{MushError, MushResult};

/// Solve the tridiagonal system Ax = d with the Thomas algorithm.
///
/// - `lower`: sub-diagonal \[n\] (`lower[0]` unused)
/// - `diag`: main diagonal \[n\]
/// - `upper`: super-diagonal \[n\] (`upper[n-1]` unused)
/// - `rhs`: right-hand side \[n\]
///
/// Returns the solution vector x \[n\], or an instability fault when a
/// pivot vanishes (singular system). Band lengths must match `rhs`.
pub fn thomas_solve(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> MushResult<Vec<f64>> {
    let n = rhs.len();
    assert!(n > 0, "system size must be > 0");
    assert_eq!(lower.len(), n);
    assert_eq!(diag.len(), n);
    assert_eq!(upper.len(), n);

    let mut upper_prime = vec![0.0; n];
    let mut rhs_prime = vec![0.0; n];

    let mut pivot = diag[0];
    if pivot == 0.0 {
        return Err(MushError::instability("singular tridiagonal system"));
    }
    upper_prime[0] = upper[0] / pivot;
    rhs_prime[0] = rhs[0] / pivot;

    for i in 1..n {
        pivot = diag[i] - lower[i] * upper_prime[i - 1];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(MushError::instability(format!(
                "tridiagonal pivot vanished at row {i}"
            )));
        }
        if i < n - 1 {
            upper_prime[i] = upper[i] / pivot;
        }
        rhs_prime[i] = (rhs[i] - lower[i] * rhs_prime[i - 1]) / pivot;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = rhs_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = rhs_prime[i] - upper_prime[i] * x[i + 1];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_system() {
        let n = 5;
        let lower = vec![0.0; n];
        let diag = vec![1.0; n];
        let upper = vec![0.0; n];
        let rhs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x = thomas_solve(&lower, &diag, &upper, &rhs).unwrap();
        for i in 0..n {
            assert!((x[i] - rhs[i]).abs() < 1e-12, "x[{i}] should equal rhs[{i}]");
        }
    }

    #[test]
    fn test_laplacian_system_residual() {
        // 1D Laplacian stencil [-1, 2, -1]
        let lower = vec![0.0, -1.0, -1.0, -1.0];
        let diag = vec![2.0, 2.0, 2.0, 2.0];
        let upper = vec![-1.0, -1.0, -1.0, 0.0];
        let rhs = vec![1.0, 0.0, 0.0, 1.0];
        let x = thomas_solve(&lower, &diag, &upper, &rhs).unwrap();

        let ax = [
            diag[0] * x[0] + upper[0] * x[1],
            lower[1] * x[0] + diag[1] * x[1] + upper[1] * x[2],
            lower[2] * x[1] + diag[2] * x[2] + upper[2] * x[3],
            lower[3] * x[2] + diag[3] * x[3],
        ];
        for i in 0..4 {
            assert!(
                (ax[i] - rhs[i]).abs() < 1e-10,
                "Ax[{i}] = {}, expected {}",
                ax[i],
                rhs[i]
            );
        }
    }

    #[test]
    fn test_singular_system_is_a_fault() {
        let lower = vec![0.0, 0.0];
        let diag = vec![0.0, 1.0];
        let upper = vec![0.0, 0.0];
        let rhs = vec![1.0, 1.0];
        let err = thomas_solve(&lower, &diag, &upper, &rhs)
            .expect_err("zero leading pivot must not solve");
        match err {
            MushError::Instability { message, .. } => {
                assert!(message.contains("singular"), "unexpected message: {message}");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn test_diagonally_dominant_system_is_finite() {
        let n = 50;
        let lower: Vec<f64> = (0..n).map(|i| if i > 0 { -0.4 } else { 0.0 }).collect();
        let diag = vec![1.8; n];
        let upper: Vec<f64> = (0..n).map(|i| if i < n - 1 { -0.4 } else { 0.0 }).collect();
        let rhs = vec![1.0; n];
        let x = thomas_solve(&lower, &diag, &upper, &rhs).unwrap();
        for (i, xi) in x.iter().enumerate() {
            assert!(xi.is_finite() && *xi > 0.0, "x[{i}] = {xi}");
        }
    }
}
