use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::poly::MPoly;

/// Polynomials grouped by level.
///
/// Entry `i` holds the polynomials whose main variable is the `i`-th one
/// covered by the list. Lists built for a whole box start at level `0`;
/// lists built for a subtree start at the subtree's level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelList {
    levels: Vec<BTreeSet<MPoly>>,
}

impl LevelList {
    pub fn new(levels: Vec<BTreeSet<MPoly>>) -> Self {
        Self { levels }
    }

    /// A list of `len` empty levels.
    pub fn empty(len: usize) -> Self {
        Self {
            levels: vec![BTreeSet::new(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, level: usize) -> Option<&BTreeSet<MPoly>> {
        self.levels.get(level)
    }

    pub fn level(&self, level: usize) -> &BTreeSet<MPoly> {
        &self.levels[level]
    }

    pub fn level_mut(&mut self, level: usize) -> &mut BTreeSet<MPoly> {
        &mut self.levels[level]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BTreeSet<MPoly>> {
        self.levels.iter()
    }

    /// Total number of polynomials over all levels.
    pub fn count(&self) -> usize {
        self.levels.iter().map(|l| l.len()).sum()
    }

    /// Prepend `first` as a new lowest level.
    pub fn prepend(mut self, first: BTreeSet<MPoly>) -> Self {
        self.levels.insert(0, first);
        self
    }

    /// Level-wise union. The shorter list is padded with empty levels.
    pub fn zip(&self, other: &LevelList) -> LevelList {
        let len = self.len().max(other.len());
        let levels = (0..len)
            .map(|i| {
                let mut set = self.get(i).cloned().unwrap_or_default();
                if let Some(o) = other.get(i) {
                    set.extend(o.iter().cloned());
                }
                set
            })
            .collect();
        LevelList { levels }
    }
}

impl Display for LevelList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, level) in self.levels.iter().enumerate() {
            let polys: Vec<String> = level.iter().map(|p| p.to_string()).collect();
            writeln!(f, "{}: {{{}}}", i, polys.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::poly::int;

    fn set(polys: &[MPoly]) -> BTreeSet<MPoly> {
        polys.iter().cloned().collect()
    }

    #[test]
    fn test_zip() {
        let x = MPoly::var(2, 0);
        let y = MPoly::var(2, 1);
        let c = &x - &MPoly::constant(2, int(1));

        let a = LevelList::new(vec![set(&[x.clone()]), set(&[y.clone()])]);
        let b = LevelList::new(vec![set(&[c.clone(), x.clone()])]);
        let z = a.zip(&b);
        assert_eq!(z.len(), 2);
        assert_eq!(z.level(0), &set(&[x, c]));
        assert_eq!(z.level(1), &set(&[y]));
        assert_eq!(z.count(), 3);
        assert_eq!(b.zip(&a), z);
    }

    #[test]
    fn test_prepend() {
        let x = MPoly::var(2, 0);
        let l = LevelList::empty(1).prepend(set(&[x.clone()]));
        assert_eq!(l.len(), 2);
        assert!(l.level(0).contains(&x));
        assert!(l.level(1).is_empty());
        assert!(l.get(2).is_none());
    }
}
