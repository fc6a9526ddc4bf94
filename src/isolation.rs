//! Real root isolation by Descartes bisection.
//!
//! For an interval `(low, high)` the polynomial is mapped onto the positive
//! half-line ([`UPoly::transform_to_interval`]) and the sign changes of the
//! result are counted. Zero changes means no root, one change means exactly
//! one root, anything else triggers a bisection. Rational roots hit by a
//! bisection midpoint or sitting on the endpoints are recorded as exact
//! point roots.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::cache::Cache;
use crate::interval::Interval;
use crate::poly::{Rational, UPoly};
use crate::root::Root;

/// Memoising root isolator.
///
/// Results are keyed by the square-free part of the polynomial and the
/// search interval.
pub struct RootIsolator {
    cache: Cache<(UPoly, Interval), Vec<Root>>,
}

impl Default for RootIsolator {
    fn default() -> Self {
        Self::new(14)
    }
}

impl RootIsolator {
    pub fn new(cache_bits: usize) -> Self {
        Self {
            cache: Cache::new(cache_bits),
        }
    }

    pub fn hits(&self) -> usize {
        self.cache.hits()
    }

    pub fn misses(&self) -> usize {
        self.cache.misses()
    }

    pub fn evictions(&self) -> usize {
        self.cache.evictions()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Sorted roots of `poly` in the closed interval `bounds`.
    ///
    /// The zero polynomial and constants have no roots.
    pub fn isolate(&mut self, poly: &UPoly, bounds: &Interval) -> Vec<Root> {
        if poly.is_constant() {
            if poly.is_zero() {
                debug!("isolate: zero polynomial has no isolated roots");
            }
            return Vec::new();
        }
        let p = poly.square_free();
        if p.is_linear() {
            let root = Root::rational(&p);
            return match root.value() {
                Some(v) if bounds.contains(&v) => vec![root],
                _ => Vec::new(),
            };
        }

        let key = (p, bounds.clone());
        if let Some(roots) = self.cache.get(&key) {
            trace!("isolate: cached roots of {} in {}", key.0, bounds);
            return roots;
        }
        let (p, bounds) = key;
        let mut roots = isolate_square_free(Arc::new(p.clone()), &bounds);
        roots.sort();
        debug!("isolate: {} roots of {} in {}", roots.len(), p, bounds);
        self.cache.insert((p, bounds), roots.clone());
        roots
    }

    /// Sorted, deduplicated roots of all `polys` in `bounds`.
    pub fn isolate_roots_in_bounds<'a>(
        &mut self,
        polys: impl IntoIterator<Item = &'a UPoly>,
        bounds: &Interval,
    ) -> Vec<Root> {
        let distinct: BTreeSet<&UPoly> = polys.into_iter().collect();
        let mut roots: Vec<Root> = distinct
            .into_iter()
            .flat_map(|p| self.isolate(p, bounds))
            .collect();
        roots.sort();
        roots.dedup();
        roots
    }
}

/// Sorted, deduplicated roots of all `polys` in `bounds`, without memoisation
/// across calls.
pub fn isolate_roots_in_bounds<'a>(polys: impl IntoIterator<Item = &'a UPoly>, bounds: &Interval) -> Vec<Root> {
    RootIsolator::new(8).isolate_roots_in_bounds(polys, bounds)
}

fn isolate_square_free(poly: Arc<UPoly>, bounds: &Interval) -> Vec<Root> {
    let two = Rational::from_integer(2.into());
    let mut roots = Vec::new();
    let mut work = vec![(bounds.low().clone(), bounds.high().clone())];
    while let Some((low, high)) = work.pop() {
        if low == high {
            continue;
        }
        match poly.transform_to_interval(&low, &high).sign_changes() {
            0 => {}
            1 => roots.push(Root::irrational(low, high, Arc::clone(&poly))),
            _ => {
                let mid = (&low + &high) / &two;
                if poly.sign_at(&mid) == 0 {
                    roots.push(Root::irrational(mid.clone(), mid.clone(), Arc::clone(&poly)));
                }
                work.push((low, mid.clone()));
                work.push((mid, high));
            }
        }
    }
    if poly.sign_at(bounds.low()) == 0 {
        let v = bounds.low().clone();
        roots.push(Root::irrational(v.clone(), v, Arc::clone(&poly)));
    }
    if !bounds.is_point() && poly.sign_at(bounds.high()) == 0 {
        let v = bounds.high().clone();
        roots.push(Root::irrational(v.clone(), v, Arc::clone(&poly)));
    }
    roots
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use test_log::test;

    use super::*;
    use crate::poly::{int, rat};

    fn poly(coeffs: &[i64]) -> UPoly {
        UPoly::new(coeffs.iter().map(|&c| int(c)).collect())
    }

    fn iv(a: i64, b: i64) -> Interval {
        Interval::new(int(a), int(b))
    }

    #[test]
    fn test_isolate_quadratic() {
        let mut isolator = RootIsolator::default();
        // x^2 - 2 in [-2, 2]: -sqrt(2) and sqrt(2)
        let roots = isolator.isolate(&poly(&[-2, 0, 1]), &iv(-2, 2));
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].cmp_rational(&int(0)), Ordering::Less);
        assert_eq!(roots[1].cmp_rational(&int(0)), Ordering::Greater);
        assert_eq!(roots[0].cmp(&roots[1]), Ordering::Less);
    }

    #[test]
    fn test_isolate_rational_roots() {
        let mut isolator = RootIsolator::default();
        // roots 0, 1, 2 in [0, 2], including both endpoints and the midpoint
        let p = UPoly::from_roots(&[int(0), int(1), int(2)]);
        let roots = isolator.isolate(&p, &iv(0, 2));
        assert_eq!(roots.len(), 3);
        assert_eq!(roots[0].value(), Some(int(0)));
        assert_eq!(roots[2].value(), Some(int(2)));
        assert_eq!(roots[1].cmp_rational(&int(1)), Ordering::Equal);
        assert_eq!(roots[1].value(), Some(int(1)));
    }

    #[test]
    fn test_isolate_linear() {
        let mut isolator = RootIsolator::default();
        let roots = isolator.isolate(&poly(&[-1, 2]), &iv(0, 1));
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].value(), Some(rat(1, 2)));
        assert!(isolator.isolate(&poly(&[-3, 1]), &iv(0, 1)).is_empty());
    }

    #[test]
    fn test_isolate_constant() {
        let mut isolator = RootIsolator::default();
        assert!(isolator.isolate(&UPoly::zero(), &iv(0, 1)).is_empty());
        assert!(isolator.isolate(&poly(&[3]), &iv(0, 1)).is_empty());
    }

    #[test]
    fn test_isolate_repeated_roots() {
        let mut isolator = RootIsolator::default();
        let p = UPoly::from_roots(&[rat(1, 3), rat(1, 3), rat(2, 3)]);
        let q = &p * &poly(&[-2, 0, 1]);
        let roots = isolator.isolate(&q, &iv(0, 2));
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn test_isolate_is_cached() {
        let mut isolator = RootIsolator::default();
        let p = poly(&[-2, 0, 1]);
        isolator.isolate(&p, &iv(0, 2));
        isolator.isolate(&p, &iv(0, 2));
        assert_eq!(isolator.hits(), 1);
        assert_eq!(isolator.misses(), 1);
    }

    #[test]
    fn test_isolate_roots_in_bounds_dedup() {
        // x^2 - 2 and (x^2 - 2)(x - 1) share sqrt(2)
        let a = poly(&[-2, 0, 1]);
        let b = &a * &poly(&[-1, 1]);
        let roots = isolate_roots_in_bounds([&a, &b, &a], &iv(0, 2));
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].value(), Some(int(1)));
        assert!(roots[0] < roots[1]);
    }

    #[test]
    fn test_isolation_completeness() {
        let expected = [rat(-7, 4), rat(-1, 3), rat(1, 5), rat(3, 2)];
        let p = UPoly::from_roots(&expected);
        let roots = isolate_roots_in_bounds([&p], &iv(-2, 2));
        assert_eq!(roots.len(), expected.len());
        for (root, value) in roots.iter().zip(&expected) {
            assert_eq!(root.cmp_rational(value), Ordering::Equal);
        }
    }
}
