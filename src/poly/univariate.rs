use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use super::{sign, write_term, Rational};

/// Dense univariate polynomial with rational coefficients.
///
/// `coeffs[i]` is the coefficient of `x^i`. Trailing zeros are always
/// trimmed, so the zero polynomial has no coefficients and two equal
/// polynomials have equal coefficient vectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UPoly {
    coeffs: Vec<Rational>,
}

impl UPoly {
    pub fn new(coeffs: Vec<Rational>) -> Self {
        let mut p = Self { coeffs };
        p.trim();
        p
    }

    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Self::constant(Rational::one())
    }

    pub fn constant(c: Rational) -> Self {
        Self::new(vec![c])
    }

    /// The identity polynomial `x`.
    pub fn x() -> Self {
        Self::new(vec![Rational::zero(), Rational::one()])
    }

    /// The monic linear polynomial `x - root`.
    pub fn linear_factor(root: &Rational) -> Self {
        Self::new(vec![-root.clone(), Rational::one()])
    }

    /// Product of `x - r` over all given roots.
    pub fn from_roots(roots: &[Rational]) -> Self {
        roots
            .iter()
            .fold(Self::one(), |acc, r| &acc * &Self::linear_factor(r))
    }

    fn trim(&mut self) {
        while let Some(c) = self.coeffs.last() {
            if c.is_zero() {
                self.coeffs.pop();
            } else {
                break;
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    pub fn is_linear(&self) -> bool {
        self.coeffs.len() == 2
    }

    /// Degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn leading_coeff(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_else(Rational::zero)
    }

    /// Root of a linear polynomial, `None` for any other degree.
    pub fn linear_root(&self) -> Option<Rational> {
        if self.is_linear() {
            Some(-&self.coeffs[0] / &self.coeffs[1])
        } else {
            None
        }
    }

    /// Horner evaluation.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs
            .iter()
            .rev()
            .fold(Rational::zero(), |acc, c| acc * x + c)
    }

    pub fn sign_at(&self, x: &Rational) -> i8 {
        sign(&self.eval(x))
    }

    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * Rational::from_integer(i.into()))
            .collect();
        Self::new(coeffs)
    }

    pub fn scale(&self, c: &Rational) -> Self {
        Self::new(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Divide by the leading coefficient. The zero polynomial stays zero.
    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let lc = self.leading_coeff();
        Self::new(self.coeffs.iter().map(|a| a / &lc).collect())
    }

    pub fn pow(&self, k: u32) -> Self {
        (0..k).fold(Self::one(), |acc, _| &acc * self)
    }

    /// Euclidean division: returns `(q, r)` with `self = q * divisor + r`
    /// and `deg r < deg divisor`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &UPoly) -> (UPoly, UPoly) {
        assert!(!divisor.is_zero(), "Division by zero polynomial");
        let mut rem = self.coeffs.clone();
        let dd = divisor.degree();
        let lc = divisor.leading_coeff();
        if rem.len() <= dd {
            return (Self::zero(), self.clone());
        }
        let mut quot = vec![Rational::zero(); rem.len() - dd];
        for i in (0..quot.len()).rev() {
            let c = &rem[i + dd] / &lc;
            if !c.is_zero() {
                for (j, d) in divisor.coeffs.iter().enumerate() {
                    rem[i + j] -= &c * d;
                }
            }
            quot[i] = c;
        }
        rem.truncate(dd);
        (Self::new(quot), Self::new(rem))
    }

    /// Monic greatest common divisor. `gcd(0, 0) = 0`.
    pub fn gcd(&self, other: &UPoly) -> UPoly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.div_rem(&b);
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Monic square-free part: the product of the distinct irreducible
    /// factors. Constants map to `1` (zero stays zero).
    pub fn square_free(&self) -> UPoly {
        if self.is_zero() {
            return Self::zero();
        }
        if self.is_constant() {
            return Self::one();
        }
        let g = self.gcd(&self.derivative());
        let (q, _) = self.div_rem(&g);
        q.monic()
    }

    /// Möbius transform onto `[low, high]`:
    /// `(1 + x)^n * p((high + low * x) / (1 + x))`.
    ///
    /// Positive roots of the result correspond one-to-one to roots of `p`
    /// in the open interval `(low, high)`, so Descartes' rule of signs
    /// applied to it bounds the number of those roots.
    pub fn transform_to_interval(&self, low: &Rational, high: &Rational) -> UPoly {
        let n = self.degree();
        let t = Self::new(vec![high.clone(), low.clone()]);
        let s = Self::new(vec![Rational::one(), Rational::one()]);
        let mut t_pows = Vec::with_capacity(n + 1);
        let mut s_pows = Vec::with_capacity(n + 1);
        t_pows.push(Self::one());
        s_pows.push(Self::one());
        for i in 1..=n {
            t_pows.push(&t_pows[i - 1] * &t);
            s_pows.push(&s_pows[i - 1] * &s);
        }
        let mut result = Self::zero();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let term = (&t_pows[i] * &s_pows[n - i]).scale(c);
            result = &result + &term;
        }
        result
    }

    /// Number of sign changes in the coefficient sequence, zeros skipped.
    pub fn sign_changes(&self) -> usize {
        let mut changes = 0;
        let mut last = 0;
        for c in &self.coeffs {
            let s = sign(c);
            if s == 0 {
                continue;
            }
            if last != 0 && s != last {
                changes += 1;
            }
            last = s;
        }
        changes
    }
}

impl<'a> Add<&'a UPoly> for &'a UPoly {
    type Output = UPoly;

    fn add(self, rhs: &'a UPoly) -> UPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        UPoly::new((0..n).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl<'a> Sub<&'a UPoly> for &'a UPoly {
    type Output = UPoly;

    fn sub(self, rhs: &'a UPoly) -> UPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        UPoly::new((0..n).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl<'a> Mul<&'a UPoly> for &'a UPoly {
    type Output = UPoly;

    fn mul(self, rhs: &'a UPoly) -> UPoly {
        if self.is_zero() || rhs.is_zero() {
            return UPoly::zero();
        }
        let mut coeffs = vec![Rational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        UPoly::new(coeffs)
    }
}

impl Neg for &UPoly {
    type Output = UPoly;

    fn neg(self) -> UPoly {
        UPoly::new(self.coeffs.iter().map(|c| -c).collect())
    }
}

impl Display for UPoly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let monomial = match i {
                0 => String::new(),
                1 => "x".to_string(),
                _ => format!("x^{}", i),
            };
            write_term(f, first, c, &monomial)?;
            first = false;
        }
        Ok(())
    }
}
