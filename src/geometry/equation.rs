use std::fmt::Display;

use crate::{
    printer::{EquationPrinter, PrintOptions},
    rings::{Field, OrderedField, Ring},
};

use super::vector::{Vector, VectorError};

/// Signals that every coefficient of a normal vector vanishes, so that the
/// equation has no pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoNonzeroElement;

impl std::fmt::Display for NoNonzeroElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No nonzero elements found")
    }
}

impl std::error::Error for NoNonzeroElement {}

/// A linear equation `normal · x = constant`, describing a hyperplane.
///
/// Equality compares raw coefficients: `x + y = 1` and `2x + 2y = 2` are
/// different equations even though they describe the same hyperplane. Use
/// [Equation::is_coincident_with] for the geometric comparison.
#[derive(Clone, PartialEq, Debug)]
pub struct Equation<F: Ring> {
    pub(crate) normal: Vector<F>,
    pub(crate) constant: F::Element,
}

impl<F: Ring> Equation<F> {
    pub fn new(normal: Vector<F>, constant: F::Element) -> Equation<F> {
        Equation { normal, constant }
    }

    /// The trivial equation `0 = 0` in `dimension` variables.
    pub fn zero(dimension: usize, field: F) -> Result<Equation<F>, VectorError> {
        Ok(Equation {
            normal: Vector::zero(dimension, field)?,
            constant: F::zero(),
        })
    }

    #[inline]
    pub fn normal(&self) -> &Vector<F> {
        &self.normal
    }

    #[inline]
    pub fn constant(&self) -> &F::Element {
        &self.constant
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.normal.dimension()
    }

    /// Multiply both sides of the equation by `c`.
    pub fn scaled(&self, c: &F::Element) -> Equation<F> {
        Equation {
            normal: self.normal.scale(c),
            constant: self.normal.field.mul(&self.constant, c),
        }
    }

    /// Add two equations side by side.
    pub fn add(&self, other: &Self) -> Result<Equation<F>, VectorError> {
        Ok(Equation {
            normal: self.normal.add(&other.normal)?,
            constant: self.normal.field.add(&self.constant, &other.constant),
        })
    }

    /// Add `coefficient * other` to `self` in place. Both equations must have the same dimension.
    pub(crate) fn add_scaled_assign(&mut self, coefficient: &F::Element, other: &Self) {
        debug_assert_eq!(self.dimension(), other.dimension());

        let field = self.normal.field;
        for (a, b) in self.normal.data.iter_mut().zip(&other.normal.data) {
            field.add_assign(a, &field.mul(coefficient, b));
        }
        field.add_assign(&mut self.constant, &field.mul(coefficient, &other.constant));
    }

    /// Compute `normal · point - constant`, which vanishes iff `point` lies on the hyperplane.
    pub fn residual(&self, point: &Vector<F>) -> Result<F::Element, VectorError> {
        let lhs = self.normal.dot(point)?;
        Ok(self.normal.field.sub(&lhs, &self.constant))
    }
}

impl<F: OrderedField> Equation<F> {
    /// Parse an equation from the decimal literals of its normal vector and constant.
    pub fn parse(normal: &[&str], constant: &str, field: F) -> Result<Equation<F>, VectorError> {
        Ok(Equation {
            normal: Vector::parse(normal, field)?,
            constant: field.parse(constant).map_err(VectorError::Parse)?,
        })
    }

    /// Get the index of the first coordinate that is not near zero.
    pub fn first_nonzero_index(
        coordinates: &[F::Element],
        field: &F,
        tolerance: &F::Element,
    ) -> Result<usize, NoNonzeroElement> {
        coordinates
            .iter()
            .position(|c| !field.is_near_zero(c, tolerance))
            .ok_or(NoNonzeroElement)
    }

    /// Returns `true` iff `point` satisfies the equation up to `tolerance`.
    pub fn is_satisfied_by(
        &self,
        point: &Vector<F>,
        tolerance: &F::Element,
    ) -> Result<bool, VectorError> {
        Ok(self
            .normal
            .field
            .is_near_zero(&self.residual(point)?, tolerance))
    }

    /// A point on the hyperplane: all coordinates are zero except the first
    /// one with a nonzero coefficient. Returns `None` when the normal vanishes.
    pub fn basepoint(&self, tolerance: &F::Element) -> Option<Vector<F>> {
        let field = &self.normal.field;
        let index =
            Self::first_nonzero_index(self.normal.as_slice(), field, tolerance).ok()?;

        let mut basepoint = self.normal.new_zero();
        basepoint.data[index] = field.div(&self.constant, &self.normal[index]);
        Some(basepoint)
    }

    /// Check whether the normals are parallel by testing that every 2x2 minor
    /// of the pair vanishes. A zero normal is parallel to every normal.
    pub fn is_parallel_to(&self, other: &Self, tolerance: &F::Element) -> Result<bool, VectorError> {
        if self.dimension() != other.dimension() {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }

        let (a, b, field) = (&self.normal, &other.normal, &self.normal.field);
        for i in 0..a.dimension() {
            for j in i + 1..a.dimension() {
                let minor = field.sub(&field.mul(&a[i], &b[j]), &field.mul(&a[j], &b[i]));
                if !field.is_near_zero(&minor, tolerance) {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Check whether both equations describe the same hyperplane.
    pub fn is_coincident_with(
        &self,
        other: &Self,
        tolerance: &F::Element,
    ) -> Result<bool, VectorError> {
        let field = &self.normal.field;

        match (self.basepoint(tolerance), other.basepoint(tolerance)) {
            (None, None) => {
                if self.dimension() != other.dimension() {
                    return Err(VectorError::DimensionMismatch {
                        expected: self.dimension(),
                        found: other.dimension(),
                    });
                }
                let diff = field.sub(&self.constant, &other.constant);
                Ok(field.is_near_zero(&diff, tolerance))
            }
            (Some(p1), Some(p2)) => {
                if !self.is_parallel_to(other, tolerance)? {
                    return Ok(false);
                }
                let diff = p1.sub(&p2)?;
                Ok(field.is_near_zero(&diff.dot(&self.normal)?, tolerance))
            }
            _ => Ok(false),
        }
    }
}

impl<F: OrderedField> Display for Equation<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        EquationPrinter::new(self, PrintOptions::default()).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::rational::{Rational, RationalField};

    fn eq(normal: &[&str], constant: &str) -> Equation<RationalField> {
        Equation::parse(normal, constant, RationalField::new()).unwrap()
    }

    fn eps() -> Rational {
        Rational::new(1, 10_000_000_000)
    }

    #[test]
    fn first_nonzero() {
        let f = RationalField::new();
        let zero = eq(&["0", "0", "0"], "1");
        assert_eq!(
            Equation::first_nonzero_index(zero.normal().as_slice(), &f, &eps()),
            Err(NoNonzeroElement)
        );

        let e = eq(&["0", "5", "3"], "1");
        assert_eq!(
            Equation::first_nonzero_index(e.normal().as_slice(), &f, &eps()),
            Ok(1)
        );

        let tiny = eq(&["1e-12", "-2", "3"], "1");
        assert_eq!(
            Equation::first_nonzero_index(tiny.normal().as_slice(), &f, &eps()),
            Ok(1)
        );
    }

    #[test]
    fn algebra() {
        let a = eq(&["1", "2", "3"], "4");
        let b = eq(&["0", "-1", "1"], "2");

        assert_eq!(a.scaled(&Rational::new(1, 2)), eq(&["0.5", "1", "1.5"], "2"));
        assert_eq!(a.add(&b).unwrap(), eq(&["1", "1", "4"], "6"));

        let mut c = a.clone();
        c.add_scaled_assign(&Rational::from(-2), &b);
        assert_eq!(c, eq(&["1", "4", "1"], "0"));

        assert!(a.add(&eq(&["1", "2"], "3")).is_err());
        assert_eq!(
            Equation::zero(2, RationalField::new()).unwrap(),
            eq(&["0", "0"], "0")
        );
    }

    #[test]
    fn points_on_hyperplane() {
        let a = eq(&["0", "2", "4"], "8");
        let p = a.basepoint(&eps()).unwrap();
        assert_eq!(p, Vector::parse(&["0", "4", "0"], RationalField::new()).unwrap());
        assert!(a.is_satisfied_by(&p, &eps()).unwrap());

        let q = Vector::parse(&["7", "0", "2"], RationalField::new()).unwrap();
        assert!(a.is_satisfied_by(&q, &eps()).unwrap());
        assert!(!a.is_satisfied_by(&p.add(&q).unwrap(), &eps()).unwrap());

        assert_eq!(eq(&["0", "0"], "1").basepoint(&eps()), None);
    }

    #[test]
    fn parallel_and_coincident() {
        let e = eps();

        let a = eq(&["-0.412", "3.806", "0.728"], "-3.46");
        let b = eq(&["1.03", "-9.515", "-1.82"], "8.65");
        assert!(a.is_parallel_to(&b, &e).unwrap());
        assert!(a.is_coincident_with(&b, &e).unwrap());

        let a = eq(&["2.611", "5.528", "0.283"], "4.6");
        let b = eq(&["7.715", "8.306", "5.342"], "3.76");
        assert!(!a.is_parallel_to(&b, &e).unwrap());
        assert!(!a.is_coincident_with(&b, &e).unwrap());

        let a = eq(&["-7.926", "8.625", "-7.212"], "-7.952");
        let b = eq(&["-2.642", "2.875", "-2.404"], "-2.443");
        assert!(a.is_parallel_to(&b, &e).unwrap());
        assert!(!a.is_coincident_with(&b, &e).unwrap());

        let z1 = eq(&["0", "0"], "0");
        let z2 = eq(&["0", "0"], "1");
        assert!(z1.is_coincident_with(&z1.clone(), &e).unwrap());
        assert!(!z1.is_coincident_with(&z2, &e).unwrap());
        assert!(!z1.is_coincident_with(&eq(&["1", "0"], "0"), &e).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(eq(&["1", "-2.5", "0"], "3").to_string(), "1.000x_1 - 2.500x_2 = 3.000");
        assert_eq!(eq(&["0", "-1"], "-0.25").to_string(), "-1.000x_2 = -0.250");
        assert_eq!(eq(&["0", "0"], "1").to_string(), "0 = 1.000");
    }
}
