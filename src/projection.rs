//! Projection of polynomials to lower levels.
//!
//! The discriminant projection of `p` (with respect to its main variable)
//! consists of the leading coefficient and the principal subresultant
//! coefficients of `p` and `∂p/∂v`. The resultant projection of `a` and `b`
//! consists of their principal subresultant coefficients. Both are
//! normalised: constants are dropped, the rest is split into monic
//! square-free factors.
//!
//! Two polynomials sharing a factor `h` have an identically vanishing
//! resultant. In that case `{h, a/h, b/h}` are projected pairwise instead.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::cache::Cache;
use crate::poly::{principal_subresultant_coefficients, MPoly};

/// Drop constants and split the rest into monic square-free factors.
///
/// The result is sorted and free of duplicates.
pub fn normalize(polys: impl IntoIterator<Item = MPoly>) -> Vec<MPoly> {
    let factors: BTreeSet<MPoly> = polys
        .into_iter()
        .filter(|p| !p.is_constant())
        .flat_map(|p| p.square_free_factors())
        .collect();
    factors.into_iter().collect()
}

/// Memoising projection operator.
pub struct Projection {
    discriminants: Cache<(MPoly, usize), Vec<MPoly>>,
    resultants: Cache<(MPoly, MPoly, usize), Vec<MPoly>>,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Projection {
    pub fn new(cache_bits: usize) -> Self {
        Self {
            discriminants: Cache::new(cache_bits),
            resultants: Cache::new(cache_bits),
        }
    }

    pub fn hits(&self) -> usize {
        self.discriminants.hits() + self.resultants.hits()
    }

    pub fn misses(&self) -> usize {
        self.discriminants.misses() + self.resultants.misses()
    }

    pub fn evictions(&self) -> usize {
        self.discriminants.evictions() + self.resultants.evictions()
    }

    pub fn clear(&mut self) {
        self.discriminants.clear();
        self.resultants.clear();
    }

    /// Normalised discriminant projection of `poly` with respect to `x{var}`.
    pub fn discriminant(&mut self, poly: &MPoly, var: usize) -> Vec<MPoly> {
        let key = (poly.clone(), var);
        if let Some(result) = self.discriminants.get(&key) {
            return result;
        }
        let result = if poly.degree(var) == 0 {
            Vec::new()
        } else {
            let derivative = poly.derivative(var);
            let mut parts = vec![poly.leading_coeff(var)];
            parts.extend(principal_subresultant_coefficients(poly, &derivative, var));
            normalize(parts)
        };
        debug!("discriminant(x{}) of {} = {:?}", var, poly, display_all(&result));
        self.discriminants.insert(key, result.clone());
        result
    }

    /// Normalised resultant projection of `a` and `b` with respect to `x{var}`.
    ///
    /// Symmetric in `a` and `b`.
    pub fn resultant(&mut self, a: &MPoly, b: &MPoly, var: usize) -> Vec<MPoly> {
        if a == b {
            return Vec::new();
        }
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        let key = (a.clone(), b.clone(), var);
        if let Some(result) = self.resultants.get(&key) {
            return result;
        }
        let result = self.compute_resultant(a, b, var);
        debug!("resultant(x{}) of {} and {} = {:?}", var, a, b, display_all(&result));
        self.resultants.insert(key, result.clone());
        result
    }

    fn compute_resultant(&mut self, a: &MPoly, b: &MPoly, var: usize) -> Vec<MPoly> {
        if a.degree(var) == 0 || b.degree(var) == 0 {
            return Vec::new();
        }
        let h = a.gcd(b);
        if h.degree(var) == 0 {
            return normalize(principal_subresultant_coefficients(a, b, var));
        }

        trace!("resultant: {} and {} share the factor {}", a, b, h);
        let mut parts = vec![h.clone()];
        for p in [a.exact_quotient(&h), b.exact_quotient(&h)] {
            if p.degree(var) > 0 {
                parts.push(p.monic());
            }
        }
        parts.sort();
        parts.dedup();

        let mut result = BTreeSet::new();
        for i in 0..parts.len() {
            for j in i + 1..parts.len() {
                result.extend(self.resultant(&parts[i], &parts[j], var));
            }
        }
        result.into_iter().collect()
    }
}

fn display_all(polys: &[MPoly]) -> Vec<String> {
    polys.iter().map(|p| p.to_string()).collect()
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
    fn test_normalize() {
        let p = &(&x(0) - &c(1)).pow(2) * &c(4);
        let result = normalize([p, c(3), (&x(0) - &c(1)).scale(&int(-2))]);
        assert_eq!(result, vec![(&x(0) - &c(1)).monic()]);
    }

    #[test]
    fn test_discriminant_of_shifted_parabola() {
        // y^2 - (x - 2)^2 has a double root in y exactly at x = 2
        let mut projection = Projection::default();
        let p = &(&x(1) * &x(1)) - &(&x(0) - &c(2)).pow(2);
        let disc = projection.discriminant(&p, 1);
        assert!(disc.contains(&(&x(0) - &c(2)).monic()));
    }

    #[test]
    fn test_discriminant_is_cached() {
        let mut projection = Projection::default();
        let p = &(&x(1) * &x(1)) - &x(0);
        let first = projection.discriminant(&p, 1);
        let second = projection.discriminant(&p, 1);
        assert_eq!(first, second);
        assert_eq!(first, vec![x(0)]);
        assert_eq!(projection.hits(), 1);
    }

    #[test]
    fn test_resultant_of_parallel_lines() {
        // x1 - 1 and x1 - 2 never meet: the resultant is a nonzero constant
        let mut projection = Projection::default();
        let r = projection.resultant(&(&x(1) - &c(1)), &(&x(1) - &c(2)), 1);
        assert!(r.is_empty());
    }

    #[test]
    fn test_resultant_is_symmetric() {
        let mut projection = Projection::default();
        let a = &(&x(0) * &x(0)) - &x(1);
        let b = &x(1) - &x(0);
        let ab = projection.resultant(&a, &b, 1);
        let ba = projection.resultant(&b, &a, 1);
        assert_eq!(ab, ba);
        assert_eq!(projection.hits(), 1);
        // x0^2 = x0 at x0 = 0 and x0 = 1
        assert_eq!(ab, vec![(&(&x(0) * &x(0)) - &x(0)).monic()]);
    }

    #[test]
    fn test_resultant_with_shared_factor() {
        // a = (x1 - x0)(x1 - 1), b = (x1 - x0)(x1 - 2)
        let mut projection = Projection::default();
        let h = &x(1) - &x(0);
        let a = &h * &(&x(1) - &c(1));
        let b = &h * &(&x(1) - &c(2));
        let r = projection.resultant(&a.monic(), &b.monic(), 1);
        // the common curve crosses x1 = 1 and x1 = 2 at x0 = 1 and x0 = 2
        let mut expected = vec![(&x(0) - &c(1)).monic(), (&x(0) - &c(2)).monic()];
        expected.sort();
        assert_eq!(r, expected);
    }
}
