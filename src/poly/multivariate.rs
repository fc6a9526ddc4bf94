use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use super::{write_term, Rational, UPoly};
use crate::interval::Interval;

/// Exponent vector of a monomial, one entry per variable.
type Monomial = Vec<u32>;

/// Monomial order used for exact division: lexicographic with the
/// highest variable being the most significant.
fn monomial_order(a: &[u32], b: &[u32]) -> Ordering {
    a.iter().rev().cmp(b.iter().rev())
}

/// Sparse multivariate polynomial over the rationals in a fixed ring of
/// `vars` variables `x0, ..., x(vars-1)`.
///
/// Variables are ordered: `x0` is the lowest level, `x(vars-1)` the highest.
/// The representation is canonical (no zero coefficients are stored), so
/// derived equality, hashing and ordering are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MPoly {
    vars: usize,
    terms: BTreeMap<Monomial, Rational>,
}

impl MPoly {
    pub fn zero(vars: usize) -> Self {
        Self {
            vars,
            terms: BTreeMap::new(),
        }
    }

    pub fn one(vars: usize) -> Self {
        Self::constant(vars, Rational::one())
    }

    pub fn constant(vars: usize, c: Rational) -> Self {
        Self::monomial(vars, vec![0; vars], c)
    }

    /// The variable `x{var}`.
    ///
    /// # Panics
    ///
    /// Panics if `var >= vars`.
    pub fn var(vars: usize, var: usize) -> Self {
        assert!(var < vars, "Variable x{} does not exist in a ring with {} variables", var, vars);
        let mut exps = vec![0; vars];
        exps[var] = 1;
        Self::monomial(vars, exps, Rational::one())
    }

    pub fn monomial(vars: usize, exps: Monomial, c: Rational) -> Self {
        assert_eq!(exps.len(), vars);
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(exps, c);
        }
        Self { vars, terms }
    }

    pub fn from_terms(vars: usize, terms: impl IntoIterator<Item = (Monomial, Rational)>) -> Self {
        let mut p = Self::zero(vars);
        for (exps, c) in terms {
            assert_eq!(exps.len(), vars);
            p.add_term(exps, c);
        }
        p
    }

    /// Embed a univariate polynomial as a polynomial in `x{var}`.
    pub fn from_univariate(vars: usize, var: usize, p: &UPoly) -> Self {
        Self::from_terms(
            vars,
            p.coeffs().iter().enumerate().map(|(k, c)| {
                let mut exps = vec![0; vars];
                exps[var] = k as u32;
                (exps, c.clone())
            }),
        )
    }

    /// `sum_k coeffs[k] * x{var}^k`.
    pub fn from_coefficients(vars: usize, var: usize, coeffs: &[MPoly]) -> Self {
        let mut p = Self::zero(vars);
        for (k, c) in coeffs.iter().enumerate() {
            p = &p + &c.mul_var_power(var, k as u32);
        }
        p
    }

    fn add_term(&mut self, exps: Monomial, c: Rational) {
        if c.is_zero() {
            return;
        }
        match self.terms.entry(exps) {
            Entry::Occupied(mut o) => {
                *o.get_mut() += c;
                if o.get().is_zero() {
                    o.remove();
                }
            }
            Entry::Vacant(v) => {
                v.insert(c);
            }
        }
    }

    /// Number of variables of the ring.
    pub fn vars(&self) -> usize {
        self.vars
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.level().is_none()
    }

    /// Value of a constant polynomial.
    pub fn constant_value(&self) -> Option<Rational> {
        if self.is_constant() {
            Some(self.terms.values().next().cloned().unwrap_or_else(Rational::zero))
        } else {
            None
        }
    }

    pub fn degree(&self, var: usize) -> u32 {
        self.terms.keys().map(|e| e[var]).max().unwrap_or(0)
    }

    /// Index of the highest variable with nonzero degree, `None` for constants.
    pub fn level(&self) -> Option<usize> {
        (0..self.vars).rev().find(|&v| self.degree(v) > 0)
    }

    fn leading_term(&self) -> Option<(&Monomial, &Rational)> {
        self.terms.iter().max_by(|a, b| monomial_order(a.0, b.0))
    }

    /// Coefficients in `x{var}`: `result[k]` is the coefficient of `x{var}^k`.
    pub fn coefficients(&self, var: usize) -> Vec<MPoly> {
        let deg = self.degree(var) as usize;
        let mut result = vec![Self::zero(self.vars); deg + 1];
        for (exps, c) in &self.terms {
            let k = exps[var] as usize;
            let mut rest = exps.clone();
            rest[var] = 0;
            result[k].add_term(rest, c.clone());
        }
        result
    }

    /// Leading coefficient in `x{var}`.
    pub fn leading_coeff(&self, var: usize) -> MPoly {
        self.coefficients(var)
            .pop()
            .unwrap_or_else(|| Self::zero(self.vars))
    }

    pub fn scale(&self, c: &Rational) -> MPoly {
        if c.is_zero() {
            return Self::zero(self.vars);
        }
        Self {
            vars: self.vars,
            terms: self.terms.iter().map(|(e, a)| (e.clone(), a * c)).collect(),
        }
    }

    pub fn mul_var_power(&self, var: usize, k: u32) -> MPoly {
        Self {
            vars: self.vars,
            terms: self
                .terms
                .iter()
                .map(|(e, c)| {
                    let mut e = e.clone();
                    e[var] += k;
                    (e, c.clone())
                })
                .collect(),
        }
    }

    pub fn pow(&self, k: u32) -> MPoly {
        (0..k).fold(Self::one(self.vars), |acc, _| &acc * self)
    }

    pub fn derivative(&self, var: usize) -> MPoly {
        Self::from_terms(
            self.vars,
            self.terms.iter().filter(|(e, _)| e[var] > 0).map(|(e, c)| {
                let mut e = e.clone();
                let k = e[var];
                e[var] -= 1;
                (e, c * Rational::from_integer(k.into()))
            }),
        )
    }

    /// Substitute `point[i]` for `x{i}` for every `i < point.len()`.
    pub fn evaluate_prefix(&self, point: &[Rational]) -> MPoly {
        assert!(point.len() <= self.vars);
        Self::from_terms(
            self.vars,
            self.terms.iter().map(|(e, c)| {
                let mut e = e.clone();
                let mut c = c.clone();
                for (i, x) in point.iter().enumerate() {
                    if e[i] > 0 {
                        c *= num_traits::pow(x.clone(), e[i] as usize);
                        e[i] = 0;
                    }
                }
                (e, c)
            }),
        )
    }

    /// Full evaluation at a point with one coordinate per variable.
    pub fn evaluate(&self, point: &[Rational]) -> Rational {
        assert_eq!(point.len(), self.vars, "Point {:?} does not match ring size {}", point, self.vars);
        self.evaluate_prefix(point)
            .constant_value()
            .unwrap_or_else(Rational::zero)
    }

    /// View a polynomial that only depends on `x{var}` as univariate.
    ///
    /// # Panics
    ///
    /// Panics if any other variable occurs.
    pub fn to_univariate(&self, var: usize) -> UPoly {
        let deg = self.degree(var) as usize;
        let mut coeffs = vec![Rational::zero(); deg + 1];
        for (e, c) in &self.terms {
            assert!(
                e.iter().enumerate().all(|(i, &k)| i == var || k == 0),
                "Polynomial {} is not univariate in x{}",
                self,
                var
            );
            coeffs[e[var] as usize] = c.clone();
        }
        UPoly::new(coeffs)
    }

    /// Interval enclosure of the polynomial over a box, one interval per variable.
    pub fn evaluate_interval(&self, region: &[Interval]) -> Interval {
        assert_eq!(region.len(), self.vars);
        let mut result = Interval::point(Rational::zero());
        for (e, c) in &self.terms {
            let mut term = Interval::point(c.clone());
            for (i, &k) in e.iter().enumerate() {
                if k > 0 {
                    term = &term * &region[i].pow(k);
                }
            }
            result = &result + &term;
        }
        result
    }

    /// Whether the interval enclosure over `region` contains zero.
    ///
    /// `false` proves the polynomial has no zero in the region.
    pub fn can_vanish_on(&self, region: &[Interval]) -> bool {
        self.evaluate_interval(region).has_zero()
    }

    /// Exact quotient `self / divisor` if the division leaves no remainder.
    pub fn div_exact(&self, divisor: &MPoly) -> Option<MPoly> {
        assert!(!divisor.is_zero(), "Division by zero polynomial");
        let (ld_exps, ld_c) = match divisor.leading_term() {
            Some((e, c)) => (e.clone(), c.clone()),
            None => return None,
        };
        let mut rem = self.clone();
        let mut quot = Self::zero(self.vars);
        while let Some((lr_exps, lr_c)) = rem.leading_term() {
            if lr_exps.iter().zip(&ld_exps).any(|(a, b)| a < b) {
                return None;
            }
            let exps: Monomial = lr_exps.iter().zip(&ld_exps).map(|(a, b)| a - b).collect();
            let t = Self::monomial(self.vars, exps, lr_c / &ld_c);
            rem = &rem - &(&t * divisor);
            quot = &quot + &t;
        }
        Some(quot)
    }

    /// Quotient of a division known to be exact.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` does not divide `self`.
    pub fn exact_quotient(&self, divisor: &MPoly) -> MPoly {
        self.div_exact(divisor)
            .unwrap_or_else(|| panic!("{} does not divide {}", divisor, self))
    }

    /// Pseudo-remainder of `self` by `divisor` with respect to `x{var}`.
    pub fn pseudo_remainder(&self, divisor: &MPoly, var: usize) -> MPoly {
        let db = divisor.degree(var);
        let lc = divisor.leading_coeff(var);
        let mut rem = self.clone();
        while !rem.is_zero() && rem.degree(var) >= db {
            let dr = rem.degree(var);
            let lr = rem.leading_coeff(var);
            let shifted = (&lr * divisor).mul_var_power(var, dr - db);
            rem = &(&rem * &lc) - &shifted;
        }
        rem
    }

    /// Divide by the leading coefficient (in the monomial order), so that
    /// polynomials differing by a rational factor become identical.
    pub fn monic(&self) -> MPoly {
        match self.leading_term() {
            Some((_, c)) => self.scale(&(Rational::one() / c)),
            None => self.clone(),
        }
    }

    /// Content with respect to `x{var}`: gcd of the coefficients in `x{var}`.
    pub fn content(&self, var: usize) -> MPoly {
        let mut acc = Self::zero(self.vars);
        for c in self.coefficients(var) {
            if c.is_zero() {
                continue;
            }
            acc = acc.gcd(&c);
            if acc.is_constant() {
                return Self::one(self.vars);
            }
        }
        acc
    }

    pub fn primitive_part(&self, var: usize) -> MPoly {
        if self.is_zero() {
            return self.clone();
        }
        self.exact_quotient(&self.content(var))
    }

    /// Monic greatest common divisor, computed recursively by primitive
    /// pseudo-remainder sequences. `gcd(0, 0) = 0`.
    pub fn gcd(&self, other: &MPoly) -> MPoly {
        assert_eq!(self.vars, other.vars);
        if self.is_zero() {
            return other.monic();
        }
        if other.is_zero() {
            return self.monic();
        }
        let var = match (self.level(), other.level()) {
            (Some(a), Some(b)) => a.max(b),
            _ => return Self::one(self.vars),
        };
        if self.degree(var) == 0 {
            return self.gcd(&other.content(var));
        }
        if other.degree(var) == 0 {
            return other.gcd(&self.content(var));
        }

        let ca = self.content(var);
        let cb = other.content(var);
        let common = ca.gcd(&cb);
        let mut a = self.exact_quotient(&ca);
        let mut b = other.exact_quotient(&cb);
        if a.degree(var) < b.degree(var) {
            std::mem::swap(&mut a, &mut b);
        }
        loop {
            let r = a.pseudo_remainder(&b, var);
            if r.is_zero() {
                break;
            }
            if r.degree(var) == 0 {
                b = Self::one(self.vars);
                break;
            }
            a = b;
            b = r.primitive_part(var).monic();
        }
        (&common * &b.primitive_part(var)).monic()
    }

    /// Square-free factors: the content is split off recursively and the
    /// primitive part is reduced to `pp / gcd(pp, pp')`. Every factor is
    /// non-constant and monic. Constants have no factors.
    pub fn square_free_factors(&self) -> Vec<MPoly> {
        let var = match self.level() {
            Some(v) => v,
            None => return Vec::new(),
        };
        let content = self.content(var);
        let pp = self.exact_quotient(&content);
        let mut factors = content.square_free_factors();
        let g = pp.gcd(&pp.derivative(var));
        factors.push(pp.exact_quotient(&g).monic());
        factors
    }
}

impl<'a> Add<&'a MPoly> for &'a MPoly {
    type Output = MPoly;

    fn add(self, rhs: &'a MPoly) -> MPoly {
        assert_eq!(self.vars, rhs.vars);
        let mut result = self.clone();
        for (e, c) in &rhs.terms {
            result.add_term(e.clone(), c.clone());
        }
        result
    }
}

impl<'a> Sub<&'a MPoly> for &'a MPoly {
    type Output = MPoly;

    fn sub(self, rhs: &'a MPoly) -> MPoly {
        assert_eq!(self.vars, rhs.vars);
        let mut result = self.clone();
        for (e, c) in &rhs.terms {
            result.add_term(e.clone(), -c);
        }
        result
    }
}

impl<'a> Mul<&'a MPoly> for &'a MPoly {
    type Output = MPoly;

    fn mul(self, rhs: &'a MPoly) -> MPoly {
        assert_eq!(self.vars, rhs.vars);
        let mut result = MPoly::zero(self.vars);
        for (ea, ca) in &self.terms {
            for (eb, cb) in &rhs.terms {
                let e = ea.iter().zip(eb).map(|(a, b)| a + b).collect();
                result.add_term(e, ca * cb);
            }
        }
        result
    }
}

impl Neg for &MPoly {
    type Output = MPoly;

    fn neg(self) -> MPoly {
        self.scale(&-Rational::one())
    }
}

impl Display for MPoly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut terms: Vec<_> = self.terms.iter().collect();
        terms.sort_by(|a, b| monomial_order(b.0, a.0));
        for (i, (e, c)) in terms.into_iter().enumerate() {
            let monomial = e
                .iter()
                .enumerate()
                .rev()
                .filter(|(_, k)| **k > 0)
                .map(|(v, &k)| if k == 1 { format!("x{}", v) } else { format!("x{}^{}", v, k) })
                .collect::<Vec<_>>()
                .join("*");
            write_term(f, i == 0, c, &monomial)?;
        }
        Ok(())
    }
}
