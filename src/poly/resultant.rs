//! Principal subresultant coefficients.
//!
//! `psc_j(f, g)` is the determinant of the square submatrix formed by the
//! first `m + n - 2j` columns of the `j`-th Sylvester matrix of `f` and `g`
//! (degrees `m` and `n` in the eliminated variable). `psc_0` is the
//! resultant. Determinants are computed fraction-free with Bareiss'
//! algorithm, so every intermediate division is exact.

use log::trace;

use super::MPoly;

/// Determinant of a square matrix of polynomials (Bareiss elimination).
///
/// The empty matrix has determinant `1`.
pub fn determinant(mut matrix: Vec<Vec<MPoly>>, vars: usize) -> MPoly {
    let n = matrix.len();
    if n == 0 {
        return MPoly::one(vars);
    }
    debug_assert!(matrix.iter().all(|row| row.len() == n));

    let mut negate = false;
    let mut prev = MPoly::one(vars);
    for k in 0..n - 1 {
        if matrix[k][k].is_zero() {
            match (k + 1..n).find(|&i| !matrix[i][k].is_zero()) {
                Some(i) => {
                    matrix.swap(k, i);
                    negate = !negate;
                }
                None => return MPoly::zero(vars),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = &(&matrix[i][j] * &matrix[k][k]) - &(&matrix[i][k] * &matrix[k][j]);
                matrix[i][j] = num.exact_quotient(&prev);
            }
        }
        prev = matrix[k][k].clone();
    }

    let det = matrix[n - 1][n - 1].clone();
    if negate {
        -&det
    } else {
        det
    }
}

/// Submatrix of the `j`-th Sylvester matrix whose determinant is `psc_j`.
fn sylvester_submatrix(f: &[MPoly], g: &[MPoly], j: usize, vars: usize) -> Vec<Vec<MPoly>> {
    let m = f.len() - 1;
    let n = g.len() - 1;
    let size = m + n - 2 * j;
    let top = m + n - j - 1;
    let mut rows = Vec::with_capacity(size);

    for (coeffs, deg, count) in [(f, m, n - j), (g, n, m - j)] {
        for i in 0..count {
            let shift = count - 1 - i;
            let row = (0..size)
                .map(|col| {
                    let e = top - col;
                    if e >= shift && e - shift <= deg {
                        coeffs[e - shift].clone()
                    } else {
                        MPoly::zero(vars)
                    }
                })
                .collect();
            rows.push(row);
        }
    }
    rows
}

/// All principal subresultant coefficients `psc_0, ..., psc_{min(m,n)-1}`
/// of `f` and `g` with respect to `x{var}`.
///
/// Returns an empty list when either polynomial has degree zero in `x{var}`.
pub fn principal_subresultant_coefficients(f: &MPoly, g: &MPoly, var: usize) -> Vec<MPoly> {
    let vars = f.vars();
    let fc = f.coefficients(var);
    let gc = g.coefficients(var);
    let m = fc.len() - 1;
    let n = gc.len() - 1;
    if m == 0 || n == 0 {
        return Vec::new();
    }
    trace!("psc(f = {}, g = {}, var = x{}) with degrees {} and {}", f, g, var, m, n);
    (0..m.min(n))
        .map(|j| determinant(sylvester_submatrix(&fc, &gc, j, vars), vars))
        .collect()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::poly::int;

    fn x(i: usize) -> MPoly {
        MPoly::var(2, i)
    }

    fn c(v: i64) -> MPoly {
        MPoly::constant(2, int(v))
    }

    #[test]
    fn test_determinant() {
        let m = vec![vec![c(2), c(3)], vec![c(1), c(4)]];
        assert_eq!(determinant(m, 2), c(5));

        // requires a row swap
        let m = vec![
            vec![c(0), c(1), c(2)],
            vec![c(1), c(0), c(3)],
            vec![c(4), c(-3), c(8)],
        ];
        assert_eq!(determinant(m, 2), c(-2));

        let m = vec![vec![x(0), x(1)], vec![x(1), x(0)]];
        assert_eq!(determinant(m, 2), &(&x(0) * &x(0)) - &(&x(1) * &x(1)));
    }

    #[test]
    fn test_resultant_linear() {
        // res_x1(x1 - x0, x1 - 1) vanishes exactly at x0 = 1
        let f = &x(1) - &x(0);
        let g = &x(1) - &c(1);
        let psc = principal_subresultant_coefficients(&f, &g, 1);
        assert_eq!(psc.len(), 1);
        let r = &psc[0];
        assert_eq!(r.level(), Some(0));
        assert_eq!(r.evaluate(&[int(1), int(0)]), int(0));
        assert_ne!(r.evaluate(&[int(2), int(0)]), int(0));
    }

    #[test]
    fn test_discriminant_of_quadratic() {
        // the discriminant of x1^2 - x0 is a multiple of x0
        let p = &(&x(1) * &x(1)) - &x(0);
        let d = p.derivative(1);
        let psc = principal_subresultant_coefficients(&p, &d, 1);
        assert_eq!(psc.len(), 1);
        assert_eq!(psc[0].monic(), x(0));
    }

    #[test]
    fn test_psc_of_common_root() {
        // (x1 - 1)(x1 - 2) and (x1 - 1)(x1 - 3) share a root: psc_0 = 0, psc_1 != 0
        let f = &(&x(1) - &c(1)) * &(&x(1) - &c(2));
        let g = &(&x(1) - &c(1)) * &(&x(1) - &c(3));
        let psc = principal_subresultant_coefficients(&f, &g, 1);
        assert_eq!(psc.len(), 2);
        assert!(psc[0].is_zero());
        assert!(!psc[1].is_zero());
    }

    #[test]
    fn test_constant_in_var() {
        assert!(principal_subresultant_coefficients(&x(0), &x(1), 1).is_empty());
    }
}
