//! Iterator over the leaf cells of a decomposition tree.
//!
//! The walk is depth-first and uses an explicit stack, so it is lazy: each
//! call to `next` descends only as far as the next leaf. Stored roots are
//! re-isolated by key over the sample point of the enclosing cell, and a
//! fresh sample is chosen strictly inside each gap.
//!
//! ```
//! use semialg_rs::bounding_box::BoundingBox;
//! use semialg_rs::interval::Interval;
//! use semialg_rs::poly::int;
//! use semialg_rs::solver::Solver;
//!
//! let solver = Solver::new(BoundingBox::new(vec![
//!     Interval::new(int(0), int(1)),
//!     Interval::new(int(0), int(1)),
//! ]));
//! let diagonal = &solver.variable(0) - &solver.variable(1);
//! let tree = solver.positive(&diagonal);
//!
//! for cell in solver.walk_cells(&tree) {
//!     assert_eq!(solver.contains(&tree, &cell.point), cell.member);
//! }
//! ```

use crate::poly::Rational;
use crate::root::Root;
use crate::solver::Solver;
use crate::tree::Tree;

/// A leaf cell: a sample point inside it, its index path from the root of
/// the tree, and its membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub point: Vec<Rational>,
    pub coordinates: Vec<usize>,
    pub member: bool,
}

/// See [`Solver::walk_cells`].
pub struct CellWalk<'a> {
    solver: &'a Solver,
    stack: Vec<(&'a Tree, Vec<Rational>, Vec<usize>)>,
}

impl Solver {
    /// Returns an iterator over all leaf cells of `tree`, in order.
    ///
    /// Coordinates above a leaf's level are filled in with the centre of the box.
    pub fn walk_cells<'a>(&'a self, tree: &'a Tree) -> CellWalk<'a> {
        CellWalk {
            solver: self,
            stack: vec![(tree, Vec::new(), Vec::new())],
        }
    }
}

impl<'a> Iterator for CellWalk<'a> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((tree, mut point, coordinates)) = self.stack.pop() {
            match tree {
                Tree::Leaf { member, .. } => {
                    let center = self.solver.bounds().center();
                    point.extend(center.into_iter().skip(point.len()));
                    return Some(Cell {
                        point,
                        coordinates,
                        member: *member,
                    });
                }
                Tree::Cylinder { level, roots, cells } => {
                    debug_assert_eq!(point.len(), *level);
                    let located = self.solver.locate_roots(&point, roots);
                    let delimiters: Vec<&Root> = located.iter().collect();
                    let samples = self.solver.samples(*level, &delimiters);
                    for (i, (cell, sample)) in cells.iter().zip(samples).enumerate().rev() {
                        let mut p = point.clone();
                        p.push(sample);
                        let mut c = coordinates.clone();
                        c.push(i);
                        self.stack.push((cell, p, c));
                    }
                }
            }
        }
        None
    }
}
