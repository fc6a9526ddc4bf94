//! Cylindrical decomposition trees.
//!
//! A [`Tree`] at level `d` partitions the current fiber of the box along
//! variable `x{d}`: a sorted list of roots splits the axis into open cells
//! (`roots.len() + 1` of them), and each cell carries the subtree
//! describing the next level. A [`Tree::Leaf`] says that the whole remaining
//! cylinder is uniformly inside or outside the set.
//!
//! Roots are stored by their [`RootKey`]-identity together with the root
//! value computed at the sample point used during construction. Box
//! boundaries are never stored as roots.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::ops::Not;

use crate::level::LevelList;
use crate::poly::MPoly;
use crate::root::{MRoot, RootKey};

#[derive(Debug, Clone)]
pub enum Tree {
    Leaf {
        level: usize,
        member: bool,
    },
    Cylinder {
        level: usize,
        roots: Vec<MRoot>,
        cells: Vec<Tree>,
    },
}

impl Tree {
    pub fn leaf(level: usize, member: bool) -> Tree {
        Tree::Leaf { level, member }
    }

    /// # Panics
    ///
    /// Panics if `cells.len() != roots.len() + 1`.
    pub fn cylinder(level: usize, roots: Vec<MRoot>, cells: Vec<Tree>) -> Tree {
        assert_eq!(
            cells.len(),
            roots.len() + 1,
            "Cylinder at level {} with {} roots must have {} cells",
            level,
            roots.len(),
            roots.len() + 1
        );
        Tree::Cylinder { level, roots, cells }
    }

    pub fn level(&self) -> usize {
        match self {
            Tree::Leaf { level, .. } => *level,
            Tree::Cylinder { level, .. } => *level,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf { .. })
    }

    /// Membership of a leaf, `None` for a cylinder.
    pub fn member(&self) -> Option<bool> {
        match self {
            Tree::Leaf { member, .. } => Some(*member),
            Tree::Cylinder { .. } => None,
        }
    }

    pub fn roots(&self) -> &[MRoot] {
        match self {
            Tree::Leaf { .. } => &[],
            Tree::Cylinder { roots, .. } => roots,
        }
    }

    pub fn cells(&self) -> &[Tree] {
        match self {
            Tree::Leaf { .. } => &[],
            Tree::Cylinder { cells, .. } => cells,
        }
    }

    /// The `i`-th cell. A leaf is its own cell at every index.
    pub fn cell(&self, i: usize) -> &Tree {
        match self {
            Tree::Leaf { .. } => self,
            Tree::Cylinder { cells, .. } => &cells[i],
        }
    }

    pub fn keys(&self) -> Vec<RootKey> {
        self.roots().iter().map(|r| r.key()).collect()
    }

    /// Polynomials of the roots stored at this node.
    pub fn polynomials(&self) -> BTreeSet<MPoly> {
        self.roots().iter().map(|r| r.poly.clone()).collect()
    }

    /// Whether some leaf is a member.
    pub fn any(&self) -> bool {
        match self {
            Tree::Leaf { member, .. } => *member,
            Tree::Cylinder { cells, .. } => cells.iter().any(|c| c.any()),
        }
    }

    /// Whether every leaf is a member.
    pub fn all(&self) -> bool {
        match self {
            Tree::Leaf { member, .. } => *member,
            Tree::Cylinder { cells, .. } => cells.iter().all(|c| c.all()),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.any()
    }

    pub fn is_not_empty(&self) -> bool {
        self.any()
    }

    /// Complement: the same decomposition with every leaf flipped.
    pub fn complement(&self) -> Tree {
        match self {
            Tree::Leaf { level, member } => Tree::leaf(*level, !member),
            Tree::Cylinder { level, roots, cells } => Tree::Cylinder {
                level: *level,
                roots: roots.clone(),
                cells: cells.iter().map(|c| c.complement()).collect(),
            },
        }
    }

    /// Polynomials of all roots in the tree, by level relative to this node.
    pub fn level_list(&self) -> LevelList {
        match self {
            Tree::Leaf { .. } => LevelList::default(),
            Tree::Cylinder { cells, .. } => {
                let children = cells
                    .iter()
                    .fold(LevelList::default(), |acc, c| acc.zip(&c.level_list()));
                children.prepend(self.polynomials())
            }
        }
    }

    /// Structural equality up to root values: same root keys at every node
    /// and the same leaves.
    pub fn similar(&self, other: &Tree) -> bool {
        match (self, other) {
            (Tree::Leaf { member: a, .. }, Tree::Leaf { member: b, .. }) => a == b,
            (
                Tree::Cylinder {
                    roots: ra, cells: ca, ..
                },
                Tree::Cylinder {
                    roots: rb, cells: cb, ..
                },
            ) => {
                ra.len() == rb.len()
                    && ra.iter().zip(rb).all(|(a, b)| a.ordinal == b.ordinal && a.poly == b.poly)
                    && ca.iter().zip(cb).all(|(a, b)| a.similar(b))
            }
            _ => false,
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        1 + self.cells().iter().map(|c| c.size()).sum::<usize>()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        match self {
            Tree::Leaf { .. } => 1,
            Tree::Cylinder { cells, .. } => cells.iter().map(|c| c.leaf_count()).sum(),
        }
    }
}

impl Not for &Tree {
    type Output = Tree;

    fn not(self) -> Tree {
        self.complement()
    }
}

impl Not for Tree {
    type Output = Tree;

    fn not(self) -> Tree {
        self.complement()
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Tree::Leaf { member, .. } => write!(f, "{}", if *member { "T" } else { "F" }),
            Tree::Cylinder { level, roots, cells } => {
                write!(f, "x{}[", level)?;
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        let r = &roots[i - 1];
                        write!(f, " | {}#{} | ", r.poly, r.ordinal)?;
                    }
                    write!(f, "{}", cell)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::poly::{int, rat};
    use crate::root::Root;

    fn x0_minus(v: i64) -> MPoly {
        &MPoly::var(2, 0) - &MPoly::constant(2, int(v))
    }

    fn mroot(v: i64, ordinal: usize) -> MRoot {
        MRoot::new(Root::point(int(v)), ordinal, x0_minus(v))
    }

    /// `(0, 1)` is in, the rest of the axis is out.
    fn band() -> Tree {
        Tree::cylinder(
            0,
            vec![mroot(0, 0), mroot(1, 0)],
            vec![Tree::leaf(1, false), Tree::leaf(1, true), Tree::leaf(1, false)],
        )
    }

    #[test]
    fn test_any_all() {
        let t = band();
        assert!(t.any());
        assert!(!t.all());
        assert!(t.is_not_empty());
        assert!(Tree::leaf(0, false).is_empty());
        assert!(Tree::leaf(0, true).all());
    }

    #[test]
    fn test_complement() {
        let t = band();
        let n = !&t;
        assert_eq!(n.cell(1).member(), Some(false));
        assert_eq!(n.cell(0).member(), Some(true));
        assert!((!n).similar(&t));
    }

    #[test]
    fn test_cell_of_leaf() {
        let leaf = Tree::leaf(1, true);
        assert_eq!(leaf.cell(5).member(), Some(true));
        assert!(leaf.roots().is_empty());
    }

    #[test]
    fn test_level_list() {
        let inner = Tree::cylinder(
            1,
            vec![MRoot::new(Root::point(rat(1, 2)), 0, MPoly::var(2, 1))],
            vec![Tree::leaf(2, true), Tree::leaf(2, false)],
        );
        let t = Tree::cylinder(
            0,
            vec![mroot(1, 0)],
            vec![inner, Tree::leaf(1, false)],
        );
        let levels = t.level_list();
        assert_eq!(levels.len(), 2);
        assert!(levels.level(0).contains(&x0_minus(1)));
        assert!(levels.level(1).contains(&MPoly::var(2, 1)));
    }

    #[test]
    fn test_similar() {
        assert!(band().similar(&band()));
        assert!(!band().similar(&band().complement()));
        assert!(!band().similar(&Tree::leaf(0, false)));
        let other = Tree::cylinder(
            0,
            vec![mroot(0, 0), mroot(2, 0)],
            vec![Tree::leaf(1, false), Tree::leaf(1, true), Tree::leaf(1, false)],
        );
        assert!(!band().similar(&other));
    }

    #[test]
    fn test_size() {
        assert_eq!(band().size(), 4);
        assert_eq!(band().leaf_count(), 3);
    }

    #[test]
    #[should_panic(expected = "must have 2 cells")]
    fn test_cylinder_shape() {
        Tree::cylinder(0, vec![mroot(0, 0)], vec![Tree::leaf(1, true)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(band().to_string(), "x0[F | x0#0 | T | x0 - 1#0 | F]");
    }
}
