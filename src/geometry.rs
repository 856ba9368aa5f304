//! Points, directions and hyperplanes in n-dimensional space.

pub mod equation;
pub mod parametrization;
pub mod vector;
