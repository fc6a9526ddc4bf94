//! Closed rational intervals with exact arithmetic.

use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};
use crate::poly::Rational;

/// Closed interval `[low, high]` with `low <= high`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    low: Rational,
    high: Rational,
}

impl Interval {
    /// # Panics
    ///
    /// Panics if `low > high`.
    pub fn new(low: Rational, high: Rational) -> Self {
        assert!(low <= high, "Empty interval [{}, {}]", low, high);
        Self { low, high }
    }

    pub fn point(value: Rational) -> Self {
        Self {
            low: value.clone(),
            high: value,
        }
    }

    pub fn low(&self) -> &Rational {
        &self.low
    }

    pub fn high(&self) -> &Rational {
        &self.high
    }

    pub fn size(&self) -> Rational {
        &self.high - &self.low
    }

    pub fn center(&self) -> Rational {
        (&self.low + &self.high) / Rational::from_integer(2.into())
    }

    pub fn is_point(&self) -> bool {
        self.low == self.high
    }

    pub fn has_zero(&self) -> bool {
        !self.low.is_positive() && !self.high.is_negative()
    }

    pub fn contains(&self, x: &Rational) -> bool {
        &self.low <= x && x <= &self.high
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        if self.intersects(other) {
            let low = (&self.low).max(&other.low).clone();
            let high = (&self.high).min(&other.high).clone();
            Some(Interval { low, high })
        } else {
            None
        }
    }

    /// Split at the center into `[low, center]` and `[center, high]`.
    pub fn halves(&self) -> (Interval, Interval) {
        let c = self.center();
        (
            Interval::new(self.low.clone(), c.clone()),
            Interval::new(c, self.high.clone()),
        )
    }

    pub fn scale(&self, c: &Rational) -> Interval {
        let a = &self.low * c;
        let b = &self.high * c;
        if a <= b {
            Interval { low: a, high: b }
        } else {
            Interval { low: b, high: a }
        }
    }

    /// `self^k`, exact for even powers of intervals containing zero.
    pub fn pow(&self, k: u32) -> Interval {
        if k == 0 {
            return Interval::point(Rational::one());
        }
        let a = num_traits::pow(self.low.clone(), k as usize);
        let b = num_traits::pow(self.high.clone(), k as usize);
        if k % 2 == 1 {
            Interval { low: a, high: b }
        } else if self.has_zero() {
            Interval {
                low: Rational::zero(),
                high: a.max(b),
            }
        } else {
            Interval {
                low: (&a).min(&b).clone(),
                high: a.max(b),
            }
        }
    }

    /// `self / other`.
    ///
    /// Fails with [`Error::DivisionByZero`] when `other` contains zero.
    pub fn checked_div(&self, other: &Interval) -> Result<Interval> {
        if other.has_zero() {
            return Err(Error::DivisionByZero(other.clone()));
        }
        let inverse = Interval::new(
            Rational::one() / &other.high,
            Rational::one() / &other.low,
        );
        Ok(self * &inverse)
    }
}

impl<'a> Add<&'a Interval> for &'a Interval {
    type Output = Interval;

    fn add(self, rhs: &'a Interval) -> Interval {
        Interval {
            low: &self.low + &rhs.low,
            high: &self.high + &rhs.high,
        }
    }
}

impl<'a> Sub<&'a Interval> for &'a Interval {
    type Output = Interval;

    fn sub(self, rhs: &'a Interval) -> Interval {
        Interval {
            low: &self.low - &rhs.high,
            high: &self.high - &rhs.low,
        }
    }
}

impl<'a> Mul<&'a Interval> for &'a Interval {
    type Output = Interval;

    fn mul(self, rhs: &'a Interval) -> Interval {
        let products = [
            &self.low * &rhs.low,
            &self.low * &rhs.high,
            &self.high * &rhs.low,
            &self.high * &rhs.high,
        ];
        let low = products.iter().min().cloned().unwrap_or_else(Rational::zero);
        let high = products.iter().max().cloned().unwrap_or_else(Rational::zero);
        Interval { low, high }
    }
}

impl Neg for &Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval {
            low: -&self.high,
            high: -&self.low,
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::poly::{int, rat};

    fn iv(a: i64, b: i64) -> Interval {
        Interval::new(int(a), int(b))
    }

    #[test]
    fn test_basic() {
        let i = iv(1, 3);
        assert_eq!(i.size(), int(2));
        assert_eq!(i.center(), int(2));
        assert!(i.contains(&int(1)));
        assert!(!i.contains(&int(4)));
        assert!(!i.has_zero());
        assert!(iv(-1, 0).has_zero());
        assert!(Interval::point(int(5)).is_point());
    }

    #[test]
    #[should_panic(expected = "Empty interval")]
    fn test_empty_interval() {
        iv(2, 1);
    }

    #[test]
    fn test_intersect() {
        assert_eq!(iv(0, 2).intersect(&iv(1, 3)), Some(iv(1, 2)));
        assert_eq!(iv(0, 1).intersect(&iv(1, 3)), Some(iv(1, 1)));
        assert_eq!(iv(0, 1).intersect(&iv(2, 3)), None);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(&iv(1, 2) + &iv(-1, 3), iv(0, 5));
        assert_eq!(&iv(1, 2) - &iv(-1, 3), iv(-2, 3));
        assert_eq!(&iv(-1, 2) * &iv(-3, 1), iv(-6, 3));
        assert_eq!(-&iv(1, 2), iv(-2, -1));
        assert_eq!(iv(1, 2).scale(&int(-2)), iv(-4, -2));
    }

    #[test]
    fn test_pow() {
        assert_eq!(iv(-2, 1).pow(2), iv(0, 4));
        assert_eq!(iv(-2, 1).pow(3), iv(-8, 1));
        assert_eq!(iv(-3, -1).pow(2), iv(1, 9));
        assert_eq!(iv(-3, -1).pow(0), iv(1, 1));
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(iv(1, 2).checked_div(&iv(2, 4)), Ok(Interval::new(rat(1, 4), int(1))));
        assert_eq!(
            iv(1, 2).checked_div(&iv(-1, 1)),
            Err(Error::DivisionByZero(iv(-1, 1)))
        );
    }

    #[test]
    fn test_halves() {
        let (a, b) = iv(0, 1).halves();
        assert_eq!(a, Interval::new(int(0), rat(1, 2)));
        assert_eq!(b, Interval::new(rat(1, 2), int(1)));
    }
}
