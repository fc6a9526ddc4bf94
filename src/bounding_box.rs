//! Axis-aligned rational boxes.

use std::fmt::{Display, Formatter};

use num_traits::One;

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::poly::Rational;

/// A box `I_0 x I_1 x ... x I_(d-1)`, one [`Interval`] per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    intervals: Vec<Interval>,
}

impl BoundingBox {
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Checks that the box has at least one dimension and no side of zero width.
    pub fn validate(&self) -> Result<()> {
        if self.intervals.is_empty() {
            return Err(Error::EmptyBox);
        }
        for (dimension, interval) in self.intervals.iter().enumerate() {
            if interval.is_point() {
                return Err(Error::DegenerateBox {
                    dimension,
                    interval: interval.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn dimensions(&self) -> usize {
        self.intervals.len()
    }

    pub fn interval(&self, dimension: usize) -> &Interval {
        &self.intervals[dimension]
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn volume(&self) -> Rational {
        self.intervals
            .iter()
            .fold(Rational::one(), |acc, i| acc * i.size())
    }

    pub fn center(&self) -> Vec<Rational> {
        self.intervals.iter().map(|i| i.center()).collect()
    }

    pub fn contains(&self, point: &[Rational]) -> bool {
        point.len() == self.dimensions()
            && self.intervals.iter().zip(point).all(|(i, x)| i.contains(x))
    }

    /// Split every side at its center, producing `2^d` sub-boxes.
    ///
    /// Sub-box `k` takes the upper half of dimension `i` iff bit `i` of `k` is set.
    ///
    /// # Panics
    ///
    /// Panics if the box has too many dimensions for `2^d` to fit in a `usize`.
    pub fn subdivide(&self) -> Vec<BoundingBox> {
        assert!(
            self.dimensions() < usize::BITS as usize,
            "Cannot subdivide a box with {} dimensions into 2^{} parts",
            self.dimensions(),
            self.dimensions()
        );
        let halves: Vec<(Interval, Interval)> = self.intervals.iter().map(|i| i.halves()).collect();
        (0..1usize << self.dimensions())
            .map(|k| {
                let intervals = halves
                    .iter()
                    .enumerate()
                    .map(|(i, (lo, hi))| if k & (1 << i) == 0 { lo.clone() } else { hi.clone() })
                    .collect();
                BoundingBox::new(intervals)
            })
            .collect()
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.intervals.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(" x "))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::poly::{int, rat};

    fn unit_square() -> BoundingBox {
        BoundingBox::new(vec![
            Interval::new(int(0), int(1)),
            Interval::new(int(0), int(1)),
        ])
    }

    #[test]
    fn test_volume() {
        let b = BoundingBox::new(vec![
            Interval::new(int(0), int(2)),
            Interval::new(int(1), rat(5, 2)),
        ]);
        assert_eq!(b.volume(), int(3));
        assert_eq!(b.dimensions(), 2);
    }

    #[test]
    fn test_subdivide() {
        let parts = unit_square().subdivide();
        assert_eq!(parts.len(), 4);
        let total = parts.iter().fold(int(0), |acc, p| acc + p.volume());
        assert_eq!(total, int(1));
        assert_eq!(
            parts[1],
            BoundingBox::new(vec![
                Interval::new(rat(1, 2), int(1)),
                Interval::new(int(0), rat(1, 2)),
            ])
        );
    }

    #[test]
    #[should_panic(expected = "Cannot subdivide a box with 64 dimensions")]
    fn test_subdivide_too_many_dimensions() {
        let side = Interval::new(int(0), int(1));
        BoundingBox::new(vec![side; 64]).subdivide();
    }

    #[test]
    fn test_contains() {
        let b = unit_square();
        assert!(b.contains(&[rat(1, 2), int(1)]));
        assert!(!b.contains(&[rat(1, 2), int(2)]));
        assert!(!b.contains(&[rat(1, 2)]));
    }

    #[test]
    fn test_validate() {
        assert_eq!(unit_square().validate(), Ok(()));
        assert_eq!(BoundingBox::new(vec![]).validate(), Err(Error::EmptyBox));
        let flat = BoundingBox::new(vec![Interval::new(int(0), int(1)), Interval::point(int(1))]);
        assert_eq!(
            flat.validate(),
            Err(Error::DegenerateBox {
                dimension: 1,
                interval: Interval::point(int(1)),
            })
        );
    }
}
