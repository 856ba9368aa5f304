use std::{
    fmt::{Display, Write},
    ops::{Index, Neg},
};

use smallvec::SmallVec;

use crate::rings::{Field, OrderedField, Ring};

/// Errors that can occur when performing vector operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorError {
    Empty,
    DimensionMismatch { expected: usize, found: usize },
    ZeroVectorNormalization,
    ZeroVectorAngle,
    NoUniqueParallelComponent,
    NotThreeDimensional(usize),
    Parse(String),
}

impl std::fmt::Display for VectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorError::Empty => write!(f, "The coordinates must be nonempty"),
            VectorError::DimensionMismatch { expected, found } => write!(
                f,
                "Vectors do not have equal dimension: {} vs {}",
                expected, found
            ),
            VectorError::ZeroVectorNormalization => write!(f, "Cannot normalize the zero vector"),
            VectorError::ZeroVectorAngle => {
                write!(f, "Cannot compute an angle with the zero vector")
            }
            VectorError::NoUniqueParallelComponent => {
                write!(f, "No unique parallel component with respect to the zero vector")
            }
            VectorError::NotThreeDimensional(d) => write!(
                f,
                "The cross product is only defined in two or three dimensions, not {}",
                d
            ),
            VectorError::Parse(e) => write!(f, "Could not parse coordinate: {}", e),
        }
    }
}

impl std::error::Error for VectorError {}

/// An n-dimensional vector with a fixed, nonzero dimension.
#[derive(Clone, PartialEq, Debug)]
pub struct Vector<F: Ring> {
    pub(crate) data: SmallVec<[F::Element; 4]>,
    pub(crate) field: F,
}

impl<F: Ring> Vector<F> {
    /// Create a new vector from a list of scalars.
    pub fn new(data: Vec<F::Element>, field: F) -> Result<Vector<F>, VectorError> {
        if data.is_empty() {
            return Err(VectorError::Empty);
        }

        Ok(Vector {
            data: data.into(),
            field,
        })
    }

    /// Create the zero vector of dimension `dimension`.
    pub fn zero(dimension: usize, field: F) -> Result<Vector<F>, VectorError> {
        Vector::new(vec![F::zero(); dimension], field)
    }

    /// Create a new zero vector from an existing one.
    pub fn new_zero(&self) -> Vector<F> {
        Vector {
            data: (0..self.data.len()).map(|_| F::zero()).collect(),
            field: self.field,
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    #[inline]
    pub fn as_slice(&self) -> &[F::Element] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F::Element> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<F::Element> {
        self.data.into_vec()
    }

    fn check_dimension(&self, rhs: &Self) -> Result<(), VectorError> {
        if self.data.len() != rhs.data.len() {
            return Err(VectorError::DimensionMismatch {
                expected: self.data.len(),
                found: rhs.data.len(),
            });
        }
        Ok(())
    }

    /// Add two vectors.
    pub fn add(&self, rhs: &Self) -> Result<Vector<F>, VectorError> {
        self.check_dimension(rhs)?;

        Ok(Vector {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| self.field.add(a, b))
                .collect(),
            field: self.field,
        })
    }

    /// Subtract `rhs` from `self`.
    pub fn sub(&self, rhs: &Self) -> Result<Vector<F>, VectorError> {
        self.check_dimension(rhs)?;

        Ok(Vector {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| self.field.sub(a, b))
                .collect(),
            field: self.field,
        })
    }

    /// Multiply each entry by the scalar `c`.
    pub fn scale(&self, c: &F::Element) -> Vector<F> {
        Vector {
            data: self.data.iter().map(|e| self.field.mul(e, c)).collect(),
            field: self.field,
        }
    }

    /// Take the Euclidean scalar product of two vectors.
    pub fn dot(&self, rhs: &Self) -> Result<F::Element, VectorError> {
        self.check_dimension(rhs)?;

        let mut res = F::zero();
        for (e1, e2) in self.data.iter().zip(&rhs.data) {
            self.field.add_assign(&mut res, &self.field.mul(e1, e2));
        }
        Ok(res)
    }

    pub fn norm_squared(&self) -> F::Element {
        let mut res = F::zero();
        for e in &self.data {
            self.field.add_assign(&mut res, &self.field.mul(e, e));
        }
        res
    }

    /// Returns `true` iff every entry is exactly zero.
    pub fn is_exactly_zero(&self) -> bool {
        self.data.iter().all(F::is_zero)
    }

    /// Compute the Euclidean cross product in three dimensions. Two-dimensional
    /// vectors are embedded in the `z = 0` plane first.
    pub fn cross_product(&self, rhs: &Self) -> Result<Vector<F>, VectorError> {
        self.check_dimension(rhs)?;

        match self.data.len() {
            2 => self.embed_in_3d().cross_product(&rhs.embed_in_3d()),
            3 => {
                let (a, b, f) = (&self.data, &rhs.data, &self.field);
                Ok(Vector {
                    data: [
                        f.sub(&f.mul(&a[1], &b[2]), &f.mul(&a[2], &b[1])),
                        f.sub(&f.mul(&a[2], &b[0]), &f.mul(&a[0], &b[2])),
                        f.sub(&f.mul(&a[0], &b[1]), &f.mul(&a[1], &b[0])),
                    ]
                    .into_iter()
                    .collect(),
                    field: self.field,
                })
            }
            d => Err(VectorError::NotThreeDimensional(d)),
        }
    }

    fn embed_in_3d(&self) -> Vector<F> {
        let mut data = self.data.clone();
        data.push(F::zero());
        Vector {
            data,
            field: self.field,
        }
    }
}

impl<F: Field> Vector<F> {
    /// Compute the projection of `self` onto `basis`.
    pub fn component_parallel_to(&self, basis: &Self) -> Result<Vector<F>, VectorError> {
        self.check_dimension(basis)?;

        let norm = basis.norm_squared();
        if F::is_zero(&norm) {
            return Err(VectorError::NoUniqueParallelComponent);
        }

        let coefficient = self.field.div(&self.dot(basis)?, &norm);
        Ok(basis.scale(&coefficient))
    }

    /// Compute the part of `self` that is orthogonal to `basis`.
    pub fn component_orthogonal_to(&self, basis: &Self) -> Result<Vector<F>, VectorError> {
        self.sub(&self.component_parallel_to(basis)?)
    }
}

impl<F: OrderedField> Vector<F> {
    /// Parse a vector from decimal literals, e.g. `["5.862", "1.178", "-10.366"]`.
    pub fn parse(coordinates: &[&str], field: F) -> Result<Vector<F>, VectorError> {
        let data = coordinates
            .iter()
            .map(|c| field.parse(c).map_err(VectorError::Parse))
            .collect::<Result<Vec<_>, _>>()?;
        Vector::new(data, field)
    }

    /// The Euclidean length, evaluated in double precision.
    pub fn magnitude(&self) -> f64 {
        self.field.to_f64(&self.norm_squared()).sqrt()
    }

    /// Scale the vector to unit length. The reciprocal of the magnitude is
    /// computed in double precision, so the result is a unit vector only up to
    /// rounding.
    pub fn normalized(&self) -> Result<Vector<F>, VectorError> {
        if F::is_zero(&self.norm_squared()) {
            return Err(VectorError::ZeroVectorNormalization);
        }

        let inv = self
            .field
            .from_f64(1. / self.magnitude())
            .ok_or(VectorError::ZeroVectorNormalization)?;
        Ok(self.scale(&inv))
    }

    /// Compute the angle between `self` and `rhs`, in radians or in degrees.
    pub fn angle_with(&self, rhs: &Self, in_degrees: bool) -> Result<f64, VectorError> {
        self.check_dimension(rhs)?;

        let (m1, m2) = (self.magnitude(), rhs.magnitude());
        if self.is_exactly_zero() || rhs.is_exactly_zero() || m1 == 0. || m2 == 0. {
            return Err(VectorError::ZeroVectorAngle);
        }

        let cos = self.field.to_f64(&self.dot(rhs)?) / (m1 * m2);
        let angle = cos.clamp(-1., 1.).acos();
        Ok(if in_degrees { angle.to_degrees() } else { angle })
    }

    /// Returns `true` iff every entry is below `tolerance` in absolute value.
    pub fn is_zero(&self, tolerance: &F::Element) -> bool {
        self.data
            .iter()
            .all(|e| self.field.is_near_zero(e, tolerance))
    }

    /// Check whether the vectors are parallel or anti-parallel by testing the
    /// equality case of the Cauchy-Schwarz inequality. The zero vector is
    /// parallel to every vector.
    pub fn is_parallel_to(&self, rhs: &Self, tolerance: f64) -> Result<bool, VectorError> {
        let dot = self.field.to_f64(&self.dot(rhs)?);
        Ok((dot.abs() - self.magnitude() * rhs.magnitude()).abs() < tolerance)
    }

    pub fn is_orthogonal_to(&self, rhs: &Self, tolerance: f64) -> Result<bool, VectorError> {
        let dot = self.dot(rhs)?;
        Ok(F::is_zero(&dot) || self.field.to_f64(&dot).abs() < tolerance)
    }

    pub fn area_of_parallelogram_with(&self, rhs: &Self) -> Result<f64, VectorError> {
        Ok(self.cross_product(rhs)?.magnitude())
    }

    pub fn area_of_triangle_with(&self, rhs: &Self) -> Result<f64, VectorError> {
        Ok(self.area_of_parallelogram_with(rhs)? / 2.)
    }
}

impl<F: Ring> Index<usize> for Vector<F> {
    type Output = F::Element;

    /// Get the `i`th entry of the vector.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<F: Ring> Neg for Vector<F> {
    type Output = Vector<F>;

    /// Negate each entry of the vector.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = self.field.neg(e);
        }

        self
    }
}

impl<F: Ring> Display for Vector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('(')?;
        for (i, e) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_char(')')
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::rings::{
        float::FloatField,
        rational::{Rational, RationalField},
    };

    fn q(coordinates: &[&str]) -> Vector<RationalField> {
        Vector::parse(coordinates, RationalField::new()).unwrap()
    }

    #[test]
    fn construction() {
        assert_eq!(
            Vector::<RationalField>::new(vec![], RationalField::new()),
            Err(VectorError::Empty)
        );
        assert_eq!(
            Vector::<RationalField>::zero(0, RationalField::new()),
            Err(VectorError::Empty)
        );
        assert!(matches!(
            Vector::parse(&["1", "x"], RationalField::new()),
            Err(VectorError::Parse(_))
        ));

        let v = q(&["1", "2.5", "-3"]);
        assert_eq!(v.dimension(), 3);
        assert_eq!(v[1], Rational::new(5, 2));
        assert_eq!(v.to_string(), "(1, 5/2, -3)");
    }

    #[test]
    fn arithmetic() {
        let a = q(&["8.218", "-9.341"]);
        let b = q(&["-1.129", "2.111"]);
        assert_eq!(a.add(&b).unwrap(), q(&["7.089", "-7.23"]));

        let a = q(&["7.119", "8.215"]);
        let b = q(&["-8.223", "0.878"]);
        assert_eq!(a.sub(&b).unwrap(), q(&["15.342", "7.337"]));

        let c = q(&["1.671", "-1.012", "-0.318"]);
        assert_eq!(
            c.scale(&Rational::new(7410, 1000)),
            q(&["12.38211", "-7.49892", "-2.35638"])
        );

        assert_eq!(-q(&["1", "-2"]), q(&["-1", "2"]));

        assert_eq!(
            a.add(&c),
            Err(VectorError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn dot_and_magnitude() {
        let a = q(&["7.887", "4.138"]);
        let b = q(&["-8.802", "6.776"]);
        assert_eq!(a.dot(&b).unwrap(), "-41.382286".parse::<Rational>().unwrap());

        let m = q(&["-0.221", "7.437"]).magnitude();
        assert!((m - 7.440).abs() < 1e-3);

        let n = q(&["3", "4"]).normalized().unwrap();
        assert!((n.magnitude() - 1.).abs() < 1e-12);
        assert_eq!(
            q(&["0", "0"]).normalized(),
            Err(VectorError::ZeroVectorNormalization)
        );
    }

    #[test]
    fn angles() {
        let a = q(&["3.183", "-7.627"]);
        let b = q(&["-2.668", "5.319"]);
        assert!((a.angle_with(&b, false).unwrap() - 3.072).abs() < 1e-3);

        let a = q(&["7.35", "0.221", "5.188"]);
        let b = q(&["2.751", "8.259", "3.985"]);
        assert!((a.angle_with(&b, true).unwrap() - 60.276).abs() < 1e-3);

        let a = q(&["1", "0"]);
        assert!((a.angle_with(&-a.clone(), false).unwrap() - PI).abs() < 1e-12);
        assert_eq!(
            a.angle_with(&q(&["0", "0"]), false),
            Err(VectorError::ZeroVectorAngle)
        );
    }

    #[test]
    fn parallel_and_orthogonal() {
        let a = q(&["-7.579", "-7.88"]);
        let b = q(&["22.737", "23.64"]);
        assert!(a.is_parallel_to(&b, 1e-5).unwrap());
        assert!(!a.is_orthogonal_to(&b, 1e-10).unwrap());

        let a = q(&["-2.029", "9.97", "4.172"]);
        let b = q(&["-9.231", "-6.639", "-7.245"]);
        assert!(!a.is_parallel_to(&b, 1e-5).unwrap());
        assert!(!a.is_orthogonal_to(&b, 1e-10).unwrap());

        let a = q(&["-2.328", "-7.284", "-1.214"]);
        let b = q(&["-1.821", "1.072", "-2.94"]);
        assert!(!a.is_parallel_to(&b, 1e-5).unwrap());
        assert!(a.is_orthogonal_to(&b, 1e-10).unwrap());

        let a = q(&["2.118", "4.827"]);
        let b = q(&["0", "0"]);
        assert!(a.is_parallel_to(&b, 1e-5).unwrap());
        assert!(a.is_orthogonal_to(&b, 1e-10).unwrap());
    }

    #[test]
    fn projections() {
        let v = q(&["3.039", "1.879"]);
        let b = q(&["0.825", "2.036"]);
        let p = v.component_parallel_to(&b).unwrap();
        let o = v.component_orthogonal_to(&b).unwrap();

        assert_eq!(p.add(&o).unwrap(), v);
        assert!(RationalField::is_zero(&o.dot(&b).unwrap()));
        assert!((p[0].to_f64() - 1.083).abs() < 1e-3);
        assert!((p[1].to_f64() - 2.672).abs() < 1e-3);

        assert_eq!(
            v.component_parallel_to(&q(&["0", "0"])),
            Err(VectorError::NoUniqueParallelComponent)
        );
    }

    #[test]
    fn cross_products() {
        let v = q(&["8.462", "7.893", "-8.187"]);
        let w = q(&["6.984", "-5.975", "4.778"]);
        let c = v.cross_product(&w).unwrap();
        assert_eq!(c, q(&["-11.204571", "-97.609444", "-105.685162"]));
        assert!(RationalField::is_zero(&c.dot(&v).unwrap()));

        let v = q(&["8.462", "7.893"]);
        let w = q(&["6.984", "-5.975"]);
        let area = v.area_of_parallelogram_with(&w).unwrap();
        assert!((area - 105.685162).abs() < 1e-9);
        assert!((v.area_of_triangle_with(&w).unwrap() - area / 2.).abs() < 1e-12);

        let u = q(&["1", "2", "3", "4"]);
        assert_eq!(
            u.cross_product(&u),
            Err(VectorError::NotThreeDimensional(4))
        );
    }

    #[test]
    fn float_vectors() {
        let f = FloatField::new();
        let v = Vector::parse(&["0.1", "0.2"], f).unwrap();
        let w = Vector::parse(&["0.3", "-1e-12"], f).unwrap();
        let s = v.add(&w).unwrap();
        assert!(!s.is_zero(&1e-10));
        assert!(v.sub(&v).unwrap().is_zero(&1e-10));
    }
}
