//! # Decomposition manager
//!
//! The [`Solver`] owns everything a family of decomposition trees shares:
//! the bounding box, the boundary polynomials `x_d - low_d` and
//! `x_d - high_d`, and the root isolation and projection caches. Every
//! operation goes through the solver, so trees built by the same solver
//! can be combined and results of expensive algebra are reused.
//!
//! ## Building trees
//!
//! [`Solver::positive`] projects the polynomial level by level (from the
//! highest variable down), collecting in each level the polynomials whose
//! roots must delimit cells so that the polynomial has a constant sign on
//! every cell. The tree is then built top-down: at each level, the roots of
//! that level's polynomials over the current sample point are isolated,
//! a rational sample is picked strictly inside every gap, and the
//! construction recurses with the extended sample point.
//!
//! ## Combining trees
//!
//! [`Solver::and`], [`Solver::or`] and [`Solver::subset`] merge two trees
//! cell by cell. At each level the roots of both trees are isolated
//! together; between consecutive roots, additional roots are inserted where
//! the two trees' higher-level roots may cross (resultants between the
//! polynomials of the two subtrees, projected down to the current level).
//!
//! ## Example
//!
//! ```
//! use semialg_rs::bounding_box::BoundingBox;
//! use semialg_rs::interval::Interval;
//! use semialg_rs::poly::int;
//! use semialg_rs::solver::Solver;
//!
//! let solver = Solver::new(BoundingBox::new(vec![
//!     Interval::new(int(0), int(2)),
//!     Interval::new(int(0), int(2)),
//! ]));
//! let x = solver.variable(0);
//! let y = solver.variable(1);
//!
//! // y < x^2
//! let below = solver.positive(&(&(&x * &x) - &y));
//! assert!(below.is_not_empty());
//! assert!(!below.all());
//! assert!(solver.contains(&below, &[int(1), semialg_rs::poly::rat(1, 2)]));
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{Debug, Formatter};

use log::{debug, trace, warn};
use num_traits::Signed;

use crate::bounding_box::BoundingBox;
use crate::error::Result;
use crate::isolation::RootIsolator;
use crate::level::LevelList;
use crate::poly::{MPoly, Rational};
use crate::projection::{normalize, Projection};
use crate::root::{MRoot, Root, RootKey};
use crate::tree::Tree;

/// Solver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Each cache holds at most `2^cache_bits` entries.
    pub cache_bits: usize,
    /// Prune the results of `positive`, `negative`, `and` and `or`.
    pub prune: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cache_bits: 14,
            prune: true,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_bits(mut self, cache_bits: usize) -> Self {
        self.cache_bits = cache_bits;
        self
    }

    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub projection_hits: usize,
    pub projection_misses: usize,
    pub isolation_hits: usize,
    pub isolation_misses: usize,
    pub evictions: usize,
}

pub struct Solver {
    bounds: BoundingBox,
    boundary: Vec<(MPoly, MPoly)>,
    boundary_roots: Vec<(Root, Root)>,
    config: SolverConfig,
    projection: RefCell<Projection>,
    isolator: RefCell<RootIsolator>,
}

impl Debug for Solver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("bounds", &self.bounds.to_string())
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

pub(crate) fn fmt_point(point: &[Rational]) -> String {
    point.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", ")
}

impl Solver {
    /// # Panics
    ///
    /// Panics if the box has no dimensions or a zero-width side.
    pub fn new(bounds: BoundingBox) -> Self {
        Self::with_config(bounds, SolverConfig::default())
    }

    /// # Panics
    ///
    /// Panics if the box has no dimensions or a zero-width side.
    pub fn with_config(bounds: BoundingBox, config: SolverConfig) -> Self {
        match Self::try_new(bounds, config) {
            Ok(solver) => solver,
            Err(e) => panic!("Invalid bounding box: {}", e),
        }
    }

    pub fn try_new(bounds: BoundingBox, config: SolverConfig) -> Result<Self> {
        bounds.validate()?;
        debug!("Solver::try_new(bounds = {}, config = {:?})", bounds, config);
        let d = bounds.dimensions();
        let boundary = bounds
            .intervals()
            .iter()
            .enumerate()
            .map(|(i, interval)| {
                let x = MPoly::var(d, i);
                (
                    &x - &MPoly::constant(d, interval.low().clone()),
                    &x - &MPoly::constant(d, interval.high().clone()),
                )
            })
            .collect();
        let boundary_roots = bounds
            .intervals()
            .iter()
            .map(|interval| (Root::point(interval.low().clone()), Root::point(interval.high().clone())))
            .collect();
        Ok(Self {
            boundary,
            boundary_roots,
            projection: RefCell::new(Projection::new(config.cache_bits)),
            isolator: RefCell::new(RootIsolator::new(config.cache_bits)),
            config,
            bounds,
        })
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn dimensions(&self) -> usize {
        self.bounds.dimensions()
    }

    /// The variable `x{var}` in this solver's polynomial ring.
    pub fn variable(&self, var: usize) -> MPoly {
        MPoly::var(self.dimensions(), var)
    }

    /// The constant `c` in this solver's polynomial ring.
    pub fn constant(&self, c: Rational) -> MPoly {
        MPoly::constant(self.dimensions(), c)
    }

    pub fn stats(&self) -> SolverStats {
        let projection = self.projection.borrow();
        let isolator = self.isolator.borrow();
        SolverStats {
            projection_hits: projection.hits(),
            projection_misses: projection.misses(),
            isolation_hits: isolator.hits(),
            isolation_misses: isolator.misses(),
            evictions: projection.evictions() + isolator.evictions(),
        }
    }

    pub fn clear_caches(&self) {
        self.projection.borrow_mut().clear();
        self.isolator.borrow_mut().clear();
    }

    fn check_ring(&self, poly: &MPoly) {
        assert_eq!(
            poly.vars(),
            self.dimensions(),
            "Polynomial {} has {} variables, but the box has {} dimensions",
            poly,
            poly.vars(),
            self.dimensions()
        );
    }

    fn can_vanish(&self, poly: &MPoly) -> bool {
        poly.can_vanish_on(self.bounds.intervals())
    }

    fn discriminant(&self, poly: &MPoly, var: usize) -> Vec<MPoly> {
        self.projection.borrow_mut().discriminant(poly, var)
    }

    fn resultant(&self, a: &MPoly, b: &MPoly, var: usize) -> Vec<MPoly> {
        self.projection.borrow_mut().resultant(a, b, var)
    }

    /// Where the roots of `poly` cross the box boundary of dimension `var`.
    fn boundary_resultants(&self, poly: &MPoly, var: usize) -> Vec<MPoly> {
        let (low, high) = &self.boundary[var];
        let mut result = self.resultant(poly, low, var);
        result.extend(self.resultant(poly, high, var));
        result
    }

    /// Project `polys` through all levels of the box.
    ///
    /// Level `d` of the result holds the polynomials with main variable
    /// `x{d}` whose roots delimit the cells of the decomposition.
    fn project(&self, polys: impl IntoIterator<Item = MPoly>) -> LevelList {
        let mut levels = LevelList::empty(self.dimensions());
        let mut pending: BTreeSet<MPoly> = normalize(polys).into_iter().filter(|p| self.can_vanish(p)).collect();
        for var in (0..self.dimensions()).rev() {
            let (here, mut next): (BTreeSet<MPoly>, BTreeSet<MPoly>) =
                pending.into_iter().partition(|p| p.level() == Some(var));
            let list: Vec<&MPoly> = here.iter().collect();
            for (i, p) in list.iter().enumerate() {
                next.extend(self.discriminant(p, var));
                next.extend(self.boundary_resultants(p, var));
                for q in &list[i + 1..] {
                    next.extend(self.resultant(p, q, var));
                }
            }
            trace!("project: level {} has {} polynomials", var, here.len());
            *levels.level_mut(var) = here;
            pending = next.into_iter().filter(|p| self.can_vanish(p)).collect();
        }
        debug!("project: {} polynomials over {} levels", levels.count(), levels.len());
        levels
    }

    /// Roots of `poly` over `point` strictly inside the box, sorted.
    fn interior_roots(&self, point: &[Rational], poly: &MPoly) -> Vec<Root> {
        let var = point.len();
        let fiber = poly.evaluate_prefix(point);
        if fiber.is_constant() {
            if fiber.is_zero() {
                warn!("{} vanishes identically over ({})", poly, fmt_point(point));
            }
            return Vec::new();
        }
        let roots = self
            .isolator
            .borrow_mut()
            .isolate(&fiber.to_univariate(var), self.bounds.interval(var));
        let (low, high) = &self.boundary_roots[var];
        roots
            .into_iter()
            .filter(|r| r.cmp_root(low).is_gt() && r.cmp_root(high).is_lt())
            .collect()
    }

    /// Roots of all `polys` over `point`, sorted and grouped: roots of
    /// different polynomials that coincide share one group.
    fn isolate_level<'a>(&self, point: &[Rational], polys: impl IntoIterator<Item = &'a MPoly>) -> Vec<Vec<MRoot>> {
        let mut all = Vec::new();
        for poly in polys {
            for (ordinal, root) in self.interior_roots(point, poly).into_iter().enumerate() {
                all.push(MRoot::new(root, ordinal, poly.clone()));
            }
        }
        all.sort_by(|a, b| a.root.cmp(&b.root));

        let mut groups: Vec<Vec<MRoot>> = Vec::new();
        for r in all {
            match groups.last_mut() {
                Some(group) if group[0].root == r.root => group.push(r),
                _ => groups.push(vec![r]),
            }
        }
        groups
    }

    /// Re-isolate stored roots over a new sample point, by key.
    ///
    /// # Panics
    ///
    /// Panics if a stored root does not exist over `point`.
    pub(crate) fn locate_roots(&self, point: &[Rational], roots: &[MRoot]) -> Vec<Root> {
        roots
            .iter()
            .map(|m| {
                self.interior_roots(point, &m.poly)
                    .into_iter()
                    .nth(m.ordinal)
                    .unwrap_or_else(|| {
                        panic!("Root #{} of {} does not exist over ({})", m.ordinal, m.poly, fmt_point(point))
                    })
            })
            .collect()
    }

    /// One rational sample strictly inside each gap between consecutive
    /// delimiters (box boundaries included).
    pub(crate) fn samples(&self, var: usize, roots: &[&Root]) -> Vec<Rational> {
        let (low, high) = &self.boundary_roots[var];
        let mut delimiters: Vec<&Root> = Vec::with_capacity(roots.len() + 2);
        delimiters.push(low);
        delimiters.extend(roots.iter().copied());
        delimiters.push(high);
        delimiters.windows(2).map(|w| w[0].middle_value(w[1])).collect()
    }

    fn finish(&self, tree: Tree) -> Tree {
        if self.config.prune {
            self.prune(&tree)
        } else {
            tree
        }
    }

    /// The set `{ x in box | poly(x) > 0 }`.
    ///
    /// # Panics
    ///
    /// Panics if `poly` is not a polynomial in as many variables as the box has dimensions.
    pub fn positive(&self, poly: &MPoly) -> Tree {
        debug!("positive(poly = {})", poly);
        self.check_ring(poly);
        let levels = self.project([poly.clone()]);
        let mut point = Vec::with_capacity(self.dimensions());
        let tree = self.make_positive(&mut point, poly, &levels);
        self.finish(tree)
    }

    /// The set `{ x in box | poly(x) < 0 }`.
    pub fn negative(&self, poly: &MPoly) -> Tree {
        debug!("negative(poly = {})", poly);
        self.positive(&-poly)
    }

    fn make_positive(&self, point: &mut Vec<Rational>, poly: &MPoly, levels: &LevelList) -> Tree {
        let var = point.len();
        if var == self.dimensions() {
            let value = poly.evaluate(point);
            trace!("make_positive: {} at ({}) = {}", poly, fmt_point(point), value);
            return Tree::leaf(var, value.is_positive());
        }

        let groups = self.isolate_level(point, levels.level(var));
        let delimiters: Vec<&Root> = groups.iter().map(|g| &g[0].root).collect();
        let samples = self.samples(var, &delimiters);
        let mut cells = Vec::with_capacity(samples.len());
        for sample in samples {
            point.push(sample);
            cells.push(self.make_positive(point, poly, levels));
            point.pop();
        }
        let roots = groups.into_iter().map(|mut g| g.swap_remove(0)).collect();
        Tree::cylinder(var, roots, cells)
    }

    /// Intersection.
    pub fn and(&self, a: &Tree, b: &Tree) -> Tree {
        debug!("and(a = {} nodes, b = {} nodes)", a.size(), b.size());
        let tree = self.apply_top(a, b, &|x, y| x && y);
        self.finish(tree)
    }

    /// Union.
    pub fn or(&self, a: &Tree, b: &Tree) -> Tree {
        debug!("or(a = {} nodes, b = {} nodes)", a.size(), b.size());
        let tree = self.apply_top(a, b, &|x, y| x || y);
        self.finish(tree)
    }

    /// Complement within the box.
    pub fn not(&self, a: &Tree) -> Tree {
        debug!("not(a = {} nodes)", a.size());
        a.complement()
    }

    /// Whether `a` is a subset of `b`.
    pub fn subset(&self, a: &Tree, b: &Tree) -> bool {
        debug!("subset(a = {} nodes, b = {} nodes)", a.size(), b.size());
        self.apply_top(a, b, &|x, y| !x || y).all()
    }

    /// Whether `a` and `b` describe the same set.
    pub fn equivalent(&self, a: &Tree, b: &Tree) -> bool {
        self.subset(a, b) && self.subset(b, a)
    }

    fn apply_top(&self, a: &Tree, b: &Tree, op: &dyn Fn(bool, bool) -> bool) -> Tree {
        assert_eq!(a.level(), 0, "Only whole-box trees can be combined, got level {}", a.level());
        assert_eq!(b.level(), 0, "Only whole-box trees can be combined, got level {}", b.level());
        let mut point = Vec::with_capacity(self.dimensions());
        self.apply(&mut point, a, b, op)
    }

    fn apply(&self, point: &mut Vec<Rational>, a: &Tree, b: &Tree, op: &dyn Fn(bool, bool) -> bool) -> Tree {
        let var = point.len();
        if let (Tree::Leaf { member: x, .. }, Tree::Leaf { member: y, .. }) = (a, b) {
            return Tree::leaf(var, op(*x, *y));
        }
        trace!("apply: level {} at ({})", var, fmt_point(point));

        let keys_a: HashSet<RootKey> = a.keys().into_iter().collect();
        let keys_b: HashSet<RootKey> = b.keys().into_iter().collect();
        let polys: BTreeSet<MPoly> = a.polynomials().union(&b.polynomials()).cloned().collect();
        let groups = self.isolate_level(point, &polys);

        let (low, high) = &self.boundary_roots[var];
        let mut roots = Vec::new();
        let mut cells = Vec::new();
        let mut ia = 0;
        let mut ib = 0;
        for i in 0..=groups.len() {
            let lower = if i == 0 { low } else { &groups[i - 1][0].root };
            let upper = if i == groups.len() { high } else { &groups[i][0].root };
            self.apply_sector(point, (lower, upper), a.cell(ia), b.cell(ib), op, &mut roots, &mut cells);
            if let Some(group) = groups.get(i) {
                if group.iter().any(|r| keys_a.contains(&r.key())) {
                    ia += 1;
                }
                if group.iter().any(|r| keys_b.contains(&r.key())) {
                    ib += 1;
                }
                roots.push(group[0].clone());
            }
        }
        assert_eq!(ia, a.roots().len(), "Lost track of roots of the left tree at level {}", var);
        assert_eq!(ib, b.roots().len(), "Lost track of roots of the right tree at level {}", var);
        Tree::cylinder(var, roots, cells)
    }

    /// Combine `a` and `b` over the sector between two consecutive roots,
    /// splitting it further where the roots of the two subtrees may cross.
    #[allow(clippy::too_many_arguments)]
    fn apply_sector(
        &self,
        point: &mut Vec<Rational>,
        (lower, upper): (&Root, &Root),
        a: &Tree,
        b: &Tree,
        op: &dyn Fn(bool, bool) -> bool,
        roots: &mut Vec<MRoot>,
        cells: &mut Vec<Tree>,
    ) {
        let var = point.len();
        let mut extra: Vec<Vec<MRoot>> = Vec::new();
        if !(a.is_leaf() && b.is_leaf()) {
            let crossings = self.intersect_cylinder(var + 1, &a.level_list(), &b.level_list());
            let here: Vec<&MPoly> = crossings.iter().filter(|p| p.level() == Some(var)).collect();
            if !here.is_empty() {
                extra = self
                    .isolate_level(point, here)
                    .into_iter()
                    .filter(|g| lower.cmp_root(&g[0].root).is_lt() && g[0].root.cmp_root(upper).is_lt())
                    .collect();
                trace!("apply: {} extra roots at level {}", extra.len(), var);
            }
        }

        let mut delimiters: Vec<&Root> = Vec::with_capacity(extra.len() + 2);
        delimiters.push(lower);
        delimiters.extend(extra.iter().map(|g| &g[0].root));
        delimiters.push(upper);
        for (k, w) in delimiters.windows(2).enumerate() {
            point.push(w[0].middle_value(w[1]));
            cells.push(self.apply(point, a, b, op));
            point.pop();
            if let Some(group) = extra.get(k) {
                roots.push(group[0].clone());
            }
        }
    }

    /// Polynomials below level `var` whose roots delimit where the roots
    /// of two subtrees (with level lists `a` and `b` starting at `var`)
    /// may cross each other.
    fn intersect_cylinder(&self, var: usize, a: &LevelList, b: &LevelList) -> BTreeSet<MPoly> {
        let height = a.len().max(b.len());
        debug_assert!(var + height <= self.dimensions());
        let empty = BTreeSet::new();
        let mut pending: BTreeSet<MPoly> = BTreeSet::new();
        for i in (0..height).rev() {
            let v = var + i;
            let left = a.get(i).unwrap_or(&empty);
            let right = b.get(i).unwrap_or(&empty);
            let (here, mut next): (BTreeSet<MPoly>, BTreeSet<MPoly>) =
                pending.into_iter().partition(|p| p.level() == Some(v));

            // A polynomial in both trees is projected together with every
            // other polynomial of each tree, so its crossings are already
            // delimited by that tree's own lower levels.
            for l in left.difference(right) {
                for r in right.difference(left) {
                    next.extend(self.resultant(l, r, v));
                }
            }

            let fresh: Vec<&MPoly> = here
                .iter()
                .filter(|p| !left.contains(*p) && !right.contains(*p))
                .collect();
            for (k, p) in fresh.iter().enumerate() {
                next.extend(self.discriminant(p, v));
                next.extend(self.boundary_resultants(p, v));
                for q in left.union(right) {
                    next.extend(self.resultant(p, q, v));
                }
                for q in &fresh[k + 1..] {
                    next.extend(self.resultant(p, q, v));
                }
            }
            pending = next.into_iter().filter(|p| self.can_vanish(p)).collect();
        }
        pending
    }

    /// Remove roots that separate similar cells and collapse uniform
    /// cylinders into leaves.
    ///
    /// A root survives if its neighbouring cells differ, or if its
    /// polynomial shares a factor with the projection of a neighbouring
    /// cell (then the root is needed to keep that cell's roots delineable).
    pub fn prune(&self, tree: &Tree) -> Tree {
        let before = tree.size();
        let (pruned, _) = self.prune_node(tree);
        debug!("prune: {} -> {} nodes", before, pruned.size());
        pruned
    }

    fn prune_node(&self, tree: &Tree) -> (Tree, BTreeSet<MPoly>) {
        let (var, roots, cells) = match tree {
            Tree::Leaf { .. } => return (tree.clone(), BTreeSet::new()),
            Tree::Cylinder { level, roots, cells } => (*level, roots, cells),
        };

        let mut pruned: Vec<(Tree, BTreeSet<MPoly>)> = cells.iter().map(|c| self.prune_node(c)).collect();
        if let Some(member) = uniform_member(pruned.iter().map(|(t, _)| t)) {
            return (Tree::leaf(var, member), BTreeSet::new());
        }

        let keep: Vec<bool> = roots
            .iter()
            .enumerate()
            .map(|(i, root)| {
                let (left, left_projection) = &pruned[i];
                let (right, right_projection) = &pruned[i + 1];
                !left.similar(right) || shares_factor(&root.poly, left_projection, right_projection)
            })
            .collect();

        let (last, last_projection) = match pruned.pop() {
            Some(cell) => cell,
            None => unreachable!("cylinder without cells"),
        };
        let mut kept_roots = Vec::new();
        let mut kept_cells = Vec::new();
        let mut transfer = BTreeSet::new();
        for ((root, keep), (cell, projection)) in roots.iter().zip(keep).zip(pruned) {
            if keep {
                kept_roots.push(root.clone());
                kept_cells.push(cell);
                transfer.extend(projection);
            } else {
                trace!("prune: dropping root #{} of {} at level {}", root.ordinal, root.poly, var);
            }
        }
        transfer.extend(last_projection);

        if kept_roots.is_empty() {
            if let Tree::Leaf { member, .. } = last {
                return (Tree::leaf(var, member), BTreeSet::new());
            }
        }
        kept_cells.push(last);

        let node = Tree::cylinder(var, kept_roots, kept_cells);
        let projection = self.node_projection(&node, transfer);
        (node, projection)
    }

    /// Projection of a pruned node: everything its cells project plus the
    /// projections of the polynomials at the node's level, restricted to
    /// lower levels.
    fn node_projection(&self, node: &Tree, transfer: BTreeSet<MPoly>) -> BTreeSet<MPoly> {
        let var = node.level();
        let mut at_level = node.polynomials();
        at_level.extend(transfer.iter().filter(|p| p.level() == Some(var)).cloned());

        let mut result: BTreeSet<MPoly> = transfer.into_iter().filter(|p| p.level().is_some_and(|l| l < var)).collect();
        let list: Vec<&MPoly> = at_level.iter().collect();
        for (i, p) in list.iter().enumerate() {
            result.extend(self.discriminant(p, var));
            result.extend(self.boundary_resultants(p, var));
            for q in &list[i + 1..] {
                result.extend(self.resultant(p, q, var));
            }
        }
        result
    }

    /// Membership of a point of the box.
    ///
    /// # Panics
    ///
    /// Panics if the point lies outside the box or exactly on a root.
    pub fn contains(&self, tree: &Tree, point: &[Rational]) -> bool {
        assert!(
            self.bounds.contains(point),
            "Point ({}) lies outside of the box {}",
            fmt_point(point),
            self.bounds
        );
        let mut node = tree;
        loop {
            match node {
                Tree::Leaf { member, .. } => return *member,
                Tree::Cylinder { level, roots, cells } => {
                    let x = &point[*level];
                    let located = self.locate_roots(&point[..*level], roots);
                    let mut index = 0;
                    for root in &located {
                        match root.cmp_rational(x) {
                            Ordering::Less => index += 1,
                            Ordering::Equal => panic!(
                                "Point ({}) lies on the root {} at level {}",
                                fmt_point(point),
                                root,
                                level
                            ),
                            Ordering::Greater => break,
                        }
                    }
                    node = &cells[index];
                }
            }
        }
    }
}

/// The common membership if all `trees` are leaves with the same member.
fn uniform_member<'a>(mut trees: impl Iterator<Item = &'a Tree>) -> Option<bool> {
    let first = trees.next()?.member()?;
    for t in trees {
        if t.member()? != first {
            return None;
        }
    }
    Some(first)
}

fn shares_factor(poly: &MPoly, left: &BTreeSet<MPoly>, right: &BTreeSet<MPoly>) -> bool {
    left.contains(poly)
        || right.contains(poly)
        || left
            .iter()
            .chain(right)
            .filter(|q| q.level() == poly.level())
            .any(|q| !q.gcd(poly).is_constant())
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::Error;
    use crate::interval::Interval;
    use crate::poly::{int, rat};

    fn square(side: i64) -> BoundingBox {
        BoundingBox::new(vec![
            Interval::new(int(0), int(side)),
            Interval::new(int(0), int(side)),
        ])
    }

    #[test]
    fn test_try_new_degenerate() {
        let flat = BoundingBox::new(vec![Interval::new(int(0), int(1)), Interval::point(int(0))]);
        assert!(matches!(
            Solver::try_new(flat, SolverConfig::default()),
            Err(Error::DegenerateBox { dimension: 1, .. })
        ));
        assert_eq!(
            Solver::try_new(BoundingBox::new(vec![]), SolverConfig::default()).err(),
            Some(Error::EmptyBox)
        );
    }

    #[test]
    #[should_panic(expected = "has 3 variables, but the box has 2 dimensions")]
    fn test_wrong_ring() {
        let solver = Solver::new(square(1));
        solver.positive(&MPoly::var(3, 0));
    }

    #[test]
    fn test_project_parabola() {
        let solver = Solver::new(square(2));
        let x = solver.variable(0);
        let y = solver.variable(1);
        let p = &(&x * &x) - &y;
        let levels = solver.project([p.clone()]);
        assert_eq!(levels.level(1).iter().collect::<Vec<_>>(), vec![&p.monic()]);
        // where the parabola leaves the box through y = 0 and y = 2
        assert!(levels.level(0).contains(&x));
        assert!(levels.level(0).contains(&(&(&x * &x) - &solver.constant(int(2)))));
    }

    #[test]
    fn test_positive_line() {
        // x0 - x1 > 0 is the half below the diagonal
        let solver = Solver::new(square(1));
        let p = &solver.variable(0) - &solver.variable(1);
        let tree = solver.positive(&p);
        assert!(tree.any());
        assert!(!tree.all());
        assert!(solver.contains(&tree, &[rat(1, 2), rat(1, 4)]));
        assert!(!solver.contains(&tree, &[rat(1, 2), rat(3, 4)]));
    }

    #[test]
    fn test_positive_constant() {
        let solver = Solver::new(square(1));
        assert!(solver.positive(&solver.constant(int(-1))).is_empty());
        assert!(solver.positive(&solver.constant(int(3))).all());
        assert!(solver.positive(&solver.constant(int(0))).is_empty());
    }

    #[test]
    fn test_positive_without_zero_in_box() {
        // x0 + x1 + 1 > 0 everywhere on the unit square
        let solver = Solver::new(square(1));
        let p = &(&solver.variable(0) + &solver.variable(1)) + &solver.constant(int(1));
        let tree = solver.positive(&p);
        assert!(tree.is_leaf());
        assert!(tree.all());
    }

    #[test]
    fn test_negative() {
        let solver = Solver::new(square(1));
        let p = &solver.variable(0) - &solver.variable(1);
        let pos = solver.positive(&p);
        let neg = solver.negative(&p);
        assert!(solver.equivalent(&solver.and(&pos, &neg), &solver.positive(&solver.constant(int(-1)))));
        // roots are not cells, so the diagonal does not show up in the union
        assert!(solver.or(&pos, &neg).all());
    }

    #[test]
    fn test_prune_collapses() {
        let solver = Solver::with_config(square(1), SolverConfig::new().with_pruning(false));
        let p = &solver.variable(0) - &solver.constant(rat(1, 2));
        let raw = solver.positive(&p);
        let pruned = solver.prune(&raw);
        assert!(pruned.size() < raw.size());
        assert!(solver.equivalent(&raw, &pruned));
        let either = solver.or(&raw, &solver.not(&raw));
        let collapsed = solver.prune(&either);
        assert!(collapsed.is_leaf());
        assert!(collapsed.all());
    }

    #[test]
    fn test_union_with_complement_covers_open_cells() {
        let solver = Solver::new(square(2));
        let x = solver.variable(0);
        let y = solver.variable(1);
        let a = solver.positive(&(&(&x * &x) - &y));
        let u = solver.or(&a, &solver.not(&a));
        assert!(u.all());
        assert!(solver.and(&a, &solver.not(&a)).is_empty());
    }

    #[test]
    #[should_panic(expected = "lies on the root")]
    fn test_contains_on_root() {
        let solver = Solver::new(square(1));
        let p = &solver.variable(0) - &solver.variable(1);
        let tree = solver.positive(&p);
        solver.contains(&tree, &[rat(1, 2), rat(1, 2)]);
    }

    #[test]
    fn test_stats() {
        let solver = Solver::new(square(2));
        let x = solver.variable(0);
        let y = solver.variable(1);
        let p = &(&x * &x) - &y;
        solver.positive(&p);
        let first = solver.stats();
        solver.positive(&p);
        let second = solver.stats();
        assert!(second.projection_hits > first.projection_hits);
        solver.clear_caches();
    }
}
