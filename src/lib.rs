//! # semialg-rs: Exact semi-algebraic sets in Rust
//!
//! **`semialg-rs`** answers the question *"for which points of a bounded rational box does a
//! polynomial sign condition hold?"* exactly, without floating point. A set is represented as a
//! cylindrical decomposition [`Tree`][crate::tree::Tree]: the box is cut into open cells by the
//! real roots of polynomials, level by level, and every cell is marked as inside or outside the set.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All operations go through the [`Solver`][crate::solver::Solver].
//!   It owns the box, the boundary polynomials and the caches shared by all trees it builds.
//! - **Exact Arithmetic**: Rationals are [`num_rational::BigRational`]; real algebraic roots are kept
//!   as isolating intervals and refined on demand during comparisons.
//! - **Caching**: Root isolation and projection (discriminants, resultants) are memoised per solver.
//! - **Set Algebra**: intersection, union, complement, subset and equivalence checks, with pruning of
//!   redundant roots.
//!
//! ## Basic Usage
//!
//! ```rust
//! use semialg_rs::bounding_box::BoundingBox;
//! use semialg_rs::interval::Interval;
//! use semialg_rs::poly::{int, rat};
//! use semialg_rs::solver::Solver;
//!
//! // 1. Initialize the solver over the box [0, 2] x [0, 2]
//! let solver = Solver::new(BoundingBox::new(vec![
//!     Interval::new(int(0), int(2)),
//!     Interval::new(int(0), int(2)),
//! ]));
//!
//! // 2. Build polynomials in the solver's ring
//! let x = solver.variable(0);
//! let y = solver.variable(1);
//! let four = solver.constant(int(4));
//! let p = &(&x * &x) - &y;                                   // x^2 - y
//! let q = &(&(&(&x * &x) - &x.scale(&int(4))) + &four) - &y; // (x - 2)^2 - y
//!
//! // 3. Sets above both parabolas
//! let above_p = solver.not(&solver.positive(&p));
//! let above_q = solver.not(&solver.positive(&q));
//! let above_both = solver.and(&above_p, &above_q);
//!
//! // 4. Check properties
//! assert!(above_both.is_not_empty());
//! assert!(solver.subset(&above_both, &above_p));
//! assert!(!solver.contains(&above_both, &[rat(1, 2), rat(3, 2)]));
//! ```
//!
//! ## Core Components
//!
//! - **[`solver`]**: The [`Solver`][crate::solver::Solver] manager with tree construction, boolean
//!   operations and pruning.
//! - **[`tree`]**: The decomposition tree.
//! - **[`root`]** and **[`isolation`]**: Exact real roots and Descartes root isolation.
//! - **[`projection`]**: Discriminant and resultant projections.
//! - **[`poly`]**: Univariate and multivariate polynomials over the rationals.

pub mod bounding_box;
pub mod cache;
pub mod cells;
pub mod error;
pub mod interval;
pub mod isolation;
pub mod level;
pub mod poly;
pub mod projection;
pub mod root;
pub mod solver;
pub mod tree;
