//! Hyperplanes solves small dense systems of linear equations exactly.
//!
//! A system is a list of hyperplanes `a · x = c` in n-dimensional space.
//! Gaussian elimination brings it into triangular form and then into reduced
//! row echelon form, from which the solution set is read off: a single point,
//! nothing at all, or an affine subspace given by a basepoint and directions.
//!
//! For example:
//!
//! ```
//! use hyperplanes::{
//!     geometry::equation::Equation,
//!     rings::{
//!         linear_system::{LinearSystem, Solution},
//!         rational::RationalField,
//!     },
//! };
//!
//! fn main() {
//!     let f = RationalField::new();
//!     let system = LinearSystem::new(vec![
//!         Equation::parse(&["1.7", "1", "1"], "1", f).unwrap(),
//!         Equation::parse(&["1.3", "1.3", "1"], "2", f).unwrap(),
//!     ])
//!     .unwrap();
//!
//!     match system.compute_solution() {
//!         Solution::Infinite(p) => println!("{}", p),
//!         s => panic!("Unexpected solution {}", s),
//!     }
//! }
//! ```
//!
//! Arithmetic is exact over [RationalField](rings::rational::RationalField).
//! Coefficients are nevertheless compared against a small tolerance, set through
//! [SolverSettings](settings::SolverSettings), so that systems built from rounded
//! data are classified the same way over [FloatField](rings::float::FloatField).

pub mod geometry;
pub mod printer;
pub mod rings;
pub mod settings;
pub mod utils;
