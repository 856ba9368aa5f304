pub mod float;
pub mod linear_system;
pub mod rational;

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
};

pub trait Ring: Clone + Copy + PartialEq + Debug + Display {
    type Element: Clone + PartialEq + Debug + Display;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero() -> Self::Element;
    fn one(&self) -> Self::Element;
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;

    /// Sample an integer from the half-open `range`, embedded in the ring.
    /// Panics if `range` is empty.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element;
}

pub trait Field: Ring {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn inv(&self, a: &Self::Element) -> Self::Element;
}

/// A field that embeds into the reals, so that coefficients can be compared
/// against a tolerance, parsed from decimal literals and rounded for display.
pub trait OrderedField: Field {
    fn abs(&self, a: &Self::Element) -> Self::Element;
    fn cmp(&self, a: &Self::Element, b: &Self::Element) -> Ordering;
    fn to_f64(&self, a: &Self::Element) -> f64;
    /// Convert a finite float into the field. Returns `None` for NaN or infinities.
    fn from_f64(&self, a: f64) -> Option<Self::Element>;
    /// Parse a decimal literal such as `-10.366`, `1e-3` or `2/3`.
    fn parse(&self, s: &str) -> Result<Self::Element, String>;
    /// Format `a` rounded to `precision` decimal places.
    fn to_decimal_string(&self, a: &Self::Element, precision: usize) -> String;

    /// Returns `true` iff `a` is zero or `|a| < tolerance`.
    #[inline]
    fn is_near_zero(&self, a: &Self::Element, tolerance: &Self::Element) -> bool {
        Self::is_zero(a) || self.cmp(&self.abs(a), tolerance) == Ordering::Less
    }
}
