//! Exact polynomial arithmetic over the rationals.
//!
//! This module is the algebraic collaborator of the decomposition engine:
//!
//! - [`UPoly`]: dense univariate polynomials, used for root isolation.
//! - [`MPoly`]: sparse multivariate polynomials in a fixed number of variables,
//!   used for projection (subresultants, gcd, square-free decomposition).
//!
//! All coefficients are [`Rational`] (`num_rational::BigRational`), so every
//! operation is exact.

mod multivariate;
mod resultant;
mod univariate;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

pub use multivariate::MPoly;
pub use resultant::{determinant, principal_subresultant_coefficients};
pub use univariate::UPoly;

/// Arbitrary-precision rational number.
pub type Rational = BigRational;

/// Build the rational `numer / denom`.
///
/// # Panics
///
/// Panics if `denom == 0`.
pub fn rat(numer: i64, denom: i64) -> Rational {
    assert_ne!(denom, 0, "Denominator should not be zero");
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Build the integer `n` as a rational.
pub fn int(n: i64) -> Rational {
    Rational::from_integer(BigInt::from(n))
}

/// Sign of a rational as `-1`, `0` or `1`.
pub fn sign(x: &Rational) -> i8 {
    if x.is_positive() {
        1
    } else if x.is_negative() {
        -1
    } else {
        0
    }
}

/// Write one term `c * m` into `out`, using `+`/`-` separators after the first term.
pub(crate) fn write_term(
    f: &mut std::fmt::Formatter<'_>,
    first: bool,
    coeff: &Rational,
    monomial: &str,
) -> std::fmt::Result {
    let abs = coeff.abs();
    if first {
        if coeff.is_negative() {
            write!(f, "-")?;
        }
    } else if coeff.is_negative() {
        write!(f, " - ")?;
    } else {
        write!(f, " + ")?;
    }
    if monomial.is_empty() {
        write!(f, "{}", abs)
    } else if num_traits::One::is_one(&abs) {
        write!(f, "{}", monomial)
    } else {
        write!(f, "{}*{}", abs, monomial)
    }
}
