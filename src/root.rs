//! Exact real roots of univariate polynomials.
//!
//! A [`Root`] is an algebraic number given by a square-free polynomial and an
//! isolating interval. The interval is either a single point at which the
//! polynomial vanishes, or an interval whose *open* interior contains exactly
//! one root of the polynomial. Comparisons shrink the interval in place
//! (through a [`RefCell`]) until the answer is decided, so a root only ever
//! becomes more precise.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::trace;

use crate::poly::{MPoly, Rational, UPoly};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bounds {
    lower: Rational,
    upper: Rational,
}

impl Bounds {
    fn is_point(&self) -> bool {
        self.lower == self.upper
    }

    fn width(&self) -> Rational {
        &self.upper - &self.lower
    }
}

/// Sign of `p` on a right neighbourhood of `a`.
fn sign_right_of(p: &UPoly, a: &Rational) -> i8 {
    match p.sign_at(a) {
        0 => p.derivative().sign_at(a),
        s => s,
    }
}

/// Sign of `p` on a left neighbourhood of `b`.
fn sign_left_of(p: &UPoly, b: &Rational) -> i8 {
    match p.sign_at(b) {
        0 => -p.derivative().sign_at(b),
        s => s,
    }
}

/// Whether the square-free `p`, having at most one root in `(a, b)`, has one.
fn has_root_between(p: &UPoly, a: &Rational, b: &Rational) -> bool {
    !p.is_constant() && sign_right_of(p, a) != sign_left_of(p, b)
}

#[derive(Debug, Clone)]
pub struct Root {
    polynomial: Arc<UPoly>,
    bounds: RefCell<Bounds>,
}

impl Root {
    /// The root of a linear polynomial.
    ///
    /// # Panics
    ///
    /// Panics if `polynomial` is not linear.
    pub fn rational(polynomial: &UPoly) -> Root {
        match polynomial.linear_root() {
            Some(value) => Root::point(value),
            None => panic!("Polynomial {} is not linear", polynomial),
        }
    }

    /// The exact rational `value`, as the root of `x - value`.
    pub fn point(value: Rational) -> Root {
        Root {
            polynomial: Arc::new(UPoly::linear_factor(&value)),
            bounds: RefCell::new(Bounds {
                lower: value.clone(),
                upper: value,
            }),
        }
    }

    /// The unique root of the square-free `polynomial` in `(lower, upper)`,
    /// or the point `lower` when `lower == upper`.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    pub fn irrational(lower: Rational, upper: Rational, polynomial: Arc<UPoly>) -> Root {
        assert!(
            lower <= upper,
            "Invalid root of {}: interval [{}, {}] is empty",
            polynomial,
            lower,
            upper
        );
        Root {
            polynomial,
            bounds: RefCell::new(Bounds { lower, upper }),
        }
    }

    pub fn polynomial(&self) -> &UPoly {
        &self.polynomial
    }

    pub fn lower(&self) -> Rational {
        self.bounds.borrow().lower.clone()
    }

    pub fn upper(&self) -> Rational {
        self.bounds.borrow().upper.clone()
    }

    pub fn is_exact(&self) -> bool {
        self.bounds.borrow().is_point()
    }

    /// The exact value, if the root is known to be rational.
    pub fn value(&self) -> Option<Rational> {
        let b = self.bounds.borrow();
        if b.is_point() {
            Some(b.lower.clone())
        } else {
            None
        }
    }

    /// Halve the isolating interval, keeping the half that contains the root.
    pub fn refine(&self) {
        let mut b = self.bounds.borrow_mut();
        if b.is_point() {
            return;
        }
        let mid = (&b.lower + &b.upper) / Rational::from_integer(2.into());
        let s = self.polynomial.sign_at(&mid);
        if s == 0 {
            b.lower = mid.clone();
            b.upper = mid;
        } else if sign_right_of(&self.polynomial, &b.lower) != s {
            b.upper = mid;
        } else {
            b.lower = mid;
        }
    }

    /// Refine until the isolating interval is at most `width` wide.
    pub fn refine_to(&self, width: &Rational) {
        while &self.bounds.borrow().width() > width {
            self.refine();
        }
    }

    /// Compare with a rational number.
    pub fn cmp_rational(&self, value: &Rational) -> Ordering {
        loop {
            let b = self.bounds.borrow().clone();
            if b.is_point() {
                return b.lower.cmp(value);
            }
            if value <= &b.lower {
                return Ordering::Greater;
            }
            if value >= &b.upper {
                return Ordering::Less;
            }
            if self.polynomial.sign_at(value) == 0 {
                *self.bounds.borrow_mut() = Bounds {
                    lower: value.clone(),
                    upper: value.clone(),
                };
                return Ordering::Equal;
            }
            self.refine();
        }
    }

    /// Exact comparison of two roots.
    ///
    /// Two roots of the same polynomial are equal iff their isolating
    /// intervals overlap on a root of the polynomial. Roots of different
    /// polynomials are equal iff the gcd of both polynomials has a root in
    /// the overlap. Otherwise the wider interval is refined until the
    /// intervals separate.
    pub fn cmp_root(&self, other: &Root) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }
        let same = Arc::ptr_eq(&self.polynomial, &other.polynomial) || self.polynomial == other.polynomial;
        let mut common: Option<UPoly> = None;
        loop {
            let a = self.bounds.borrow().clone();
            let b = other.bounds.borrow().clone();
            match (a.is_point(), b.is_point()) {
                (true, true) => return a.lower.cmp(&b.lower),
                (true, false) => return other.cmp_rational(&a.lower).reverse(),
                (false, true) => return self.cmp_rational(&b.lower),
                (false, false) => {}
            }
            if a.upper <= b.lower {
                return Ordering::Less;
            }
            if b.upper <= a.lower {
                return Ordering::Greater;
            }

            let lo = (&a.lower).max(&b.lower);
            let hi = (&a.upper).min(&b.upper);
            let shared: &UPoly = if same {
                &self.polynomial
            } else {
                common.get_or_insert_with(|| self.polynomial.gcd(&other.polynomial))
            };
            if has_root_between(shared, lo, hi) {
                trace!("roots {} and {} coincide", self, other);
                return Ordering::Equal;
            }

            if a.width() >= b.width() {
                self.refine();
            } else {
                other.refine();
            }
        }
    }

    /// A rational strictly between `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics unless `self < other`.
    pub fn middle_value(&self, other: &Root) -> Rational {
        assert_eq!(
            self.cmp_root(other),
            Ordering::Less,
            "Cannot find middle value of [{}, {}]: empty interval",
            self,
            other
        );
        loop {
            let high = self.upper();
            let low = other.lower();
            if high < low {
                return (high + low) / Rational::from_integer(2.into());
            }
            let a = self.bounds.borrow().clone();
            let b = other.bounds.borrow().clone();
            if !a.is_point() && (b.is_point() || a.width() >= b.width()) {
                self.refine();
            } else {
                other.refine();
            }
        }
    }
}

impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_root(other) == Ordering::Equal
    }
}

impl Eq for Root {}

impl PartialOrd for Root {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Root {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_root(other)
    }
}

impl Hash for Root {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.polynomial.hash(state);
    }
}

impl Display for Root {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let b = self.bounds.borrow();
        write!(f, "[{}, {}]{{{}}}", b.lower, b.upper, self.polynomial)
    }
}

/// Identity of a root inside a cylinder: the multivariate polynomial it
/// comes from and its index among that polynomial's roots inside the box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootKey {
    pub poly: MPoly,
    pub ordinal: usize,
}

/// A root of a multivariate polynomial over a sample point of the lower levels.
#[derive(Debug, Clone)]
pub struct MRoot {
    pub root: Root,
    pub ordinal: usize,
    pub poly: MPoly,
}

impl MRoot {
    pub fn new(root: Root, ordinal: usize, poly: MPoly) -> Self {
        Self { root, ordinal, poly }
    }

    pub fn key(&self) -> RootKey {
        RootKey {
            poly: self.poly.clone(),
            ordinal: self.ordinal,
        }
    }
}

impl Display for MRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{} of {}", self.root, self.ordinal, self.poly)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::poly::{int, rat};

    fn poly(coeffs: &[i64]) -> Arc<UPoly> {
        Arc::new(UPoly::new(coeffs.iter().map(|&c| int(c)).collect()))
    }

    /// sqrt(2), isolated in (1, 2).
    fn sqrt2() -> Root {
        Root::irrational(int(1), int(2), poly(&[-2, 0, 1]))
    }

    #[test]
    fn test_rational() {
        let r = Root::rational(&UPoly::new(vec![int(-3), int(2)]));
        assert_eq!(r.value(), Some(rat(3, 2)));
        assert!(r.is_exact());
    }

    #[test]
    #[should_panic(expected = "is not linear")]
    fn test_rational_not_linear() {
        Root::rational(&UPoly::new(vec![int(-2), int(0), int(1)]));
    }

    #[test]
    #[should_panic(expected = "is empty")]
    fn test_irrational_empty() {
        Root::irrational(int(2), int(1), poly(&[-2, 0, 1]));
    }

    #[test]
    fn test_refine_keeps_root() {
        let r = sqrt2();
        for _ in 0..20 {
            r.refine();
            assert!(r.lower() * r.lower() < int(2));
            assert!(r.upper() * r.upper() > int(2));
        }
    }

    #[test]
    fn test_refine_hits_rational_root() {
        // x^2 - 1 has its root 1 at the midpoint of (0, 2)
        let r = Root::irrational(int(0), int(2), poly(&[-1, 0, 1]));
        r.refine();
        assert_eq!(r.value(), Some(int(1)));
    }

    #[test]
    fn test_cmp_rational() {
        let r = sqrt2();
        assert_eq!(r.cmp_rational(&rat(7, 5)), Ordering::Greater);
        assert_eq!(r.cmp_rational(&rat(3, 2)), Ordering::Less);
        let one = Root::irrational(int(0), int(3), poly(&[-1, 0, 1]));
        assert_eq!(one.cmp_rational(&int(1)), Ordering::Equal);
    }

    #[test]
    fn test_cmp_root_different_polynomials() {
        // sqrt(2) < sqrt(3)
        let a = sqrt2();
        let b = Root::irrational(int(1), int(2), poly(&[-3, 0, 1]));
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_cmp_root_shared_factor() {
        // sqrt(2) as a root of x^2 - 2 and of (x^2 - 2)(x - 5)
        let a = sqrt2();
        let p = UPoly::new(vec![int(10), int(-2), int(-5), int(1)]);
        let b = Root::irrational(rat(5, 4), int(3), Arc::new(p));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cmp_point_and_interval() {
        let a = sqrt2();
        assert_eq!(Root::point(int(1)).cmp(&a), Ordering::Less);
        assert_eq!(a.cmp(&Root::point(int(2))), Ordering::Less);
    }

    #[test]
    fn test_middle_value() {
        let a = sqrt2();
        let b = Root::irrational(int(1), int(2), poly(&[-3, 0, 1]));
        let m = a.middle_value(&b);
        assert_eq!(a.cmp_rational(&m), Ordering::Less);
        assert_eq!(b.cmp_rational(&m), Ordering::Greater);

        let c = Root::point(int(2));
        let m = a.middle_value(&c);
        assert!(m < int(2));
        assert_eq!(a.cmp_rational(&m), Ordering::Less);
    }

    #[test]
    #[should_panic(expected = "Cannot find middle value")]
    fn test_middle_value_unordered() {
        let a = sqrt2();
        Root::point(int(2)).middle_value(&a);
    }

    #[test]
    fn test_display() {
        assert_eq!(Root::point(int(1)).to_string(), "[1, 1]{x - 1}");
    }
}
