use std::fmt::Display;

use crate::{
    printer::{ParametrizationPrinter, PrintOptions},
    rings::{
        linear_system::{tolerance_in_field, LinearSystemError},
        OrderedField, Ring,
    },
    settings::SolverSettings,
};

use super::vector::Vector;

/// An affine subspace `basepoint + t_1 d_1 + ... + t_k d_k`.
#[derive(Clone, PartialEq, Debug)]
pub struct Parametrization<F: Ring> {
    basepoint: Vector<F>,
    directions: Vec<Vector<F>>,
}

impl<F: Ring> Parametrization<F> {
    pub fn basepoint(&self) -> &Vector<F> {
        &self.basepoint
    }

    pub fn directions(&self) -> &[Vector<F>] {
        &self.directions
    }

    /// The dimension of the ambient space.
    pub fn dimension(&self) -> usize {
        self.basepoint.dimension()
    }

    /// Evaluate the parametrization, with one parameter per direction.
    pub fn point_at(&self, parameters: &[F::Element]) -> Result<Vector<F>, LinearSystemError> {
        if parameters.len() != self.directions.len() {
            return Err(LinearSystemError::ParameterCount {
                expected: self.directions.len(),
                found: parameters.len(),
            });
        }

        let mut point = self.basepoint.clone();
        for (t, d) in parameters.iter().zip(&self.directions) {
            point = point.add(&d.scale(t))?;
        }
        Ok(point)
    }

    /// Evaluate the parametrization at random parameters sampled from the
    /// half-open `range`. Panics if `range` is empty.
    pub fn sample_point(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Vector<F> {
        assert!(
            range.0 < range.1,
            "Cannot sample parameters from the empty range {}..{}",
            range.0,
            range.1
        );

        let field = *self.basepoint.field();
        let mut point = self.basepoint.clone();
        for d in &self.directions {
            let t = field.sample(rng, range);
            for (p, e) in point.data.iter_mut().zip(&d.data) {
                field.add_assign(p, &field.mul(&t, e));
            }
        }
        point
    }
}

impl<F: OrderedField> Parametrization<F> {
    pub fn new(
        basepoint: Vector<F>,
        directions: Vec<Vector<F>>,
    ) -> Result<Parametrization<F>, LinearSystemError> {
        Self::with_settings(basepoint, directions, SolverSettings::default())
    }

    /// Create a parametrization, dropping directions that are zero up to the
    /// tolerance of `settings`.
    pub fn with_settings(
        basepoint: Vector<F>,
        directions: Vec<Vector<F>>,
        settings: SolverSettings,
    ) -> Result<Parametrization<F>, LinearSystemError> {
        for (index, d) in directions.iter().enumerate() {
            if d.dimension() != basepoint.dimension() {
                return Err(LinearSystemError::DimensionMismatch {
                    index,
                    expected: basepoint.dimension(),
                    found: d.dimension(),
                });
            }
        }

        let tolerance = tolerance_in_field(basepoint.field(), &settings)?;
        Ok(Self::from_parts(basepoint, directions, &tolerance))
    }

    pub(crate) fn from_parts(
        basepoint: Vector<F>,
        directions: Vec<Vector<F>>,
        tolerance: &F::Element,
    ) -> Parametrization<F> {
        Parametrization {
            basepoint,
            directions: directions
                .into_iter()
                .filter(|d| !d.is_zero(tolerance))
                .collect(),
        }
    }
}

impl<F: OrderedField> Display for Parametrization<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ParametrizationPrinter::new(self, PrintOptions::default()).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::rational::{Rational, RationalField};

    fn q(coordinates: &[&str]) -> Vector<RationalField> {
        Vector::parse(coordinates, RationalField::new()).unwrap()
    }

    #[test]
    fn construction() {
        let p = Parametrization::new(
            q(&["1", "2", "0"]),
            vec![q(&["0", "0", "0"]), q(&["1e-11", "0", "0"]), q(&["-1", "0", "1"])],
        )
        .unwrap();
        assert_eq!(p.dimension(), 3);
        assert_eq!(p.directions(), &[q(&["-1", "0", "1"])]);

        assert_eq!(
            Parametrization::new(q(&["1", "2"]), vec![q(&["1", "0"]), q(&["1"])]),
            Err(LinearSystemError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1
            })
        );

        let exact = Parametrization::with_settings(
            q(&["1", "2"]),
            vec![q(&["1e-11", "0"])],
            SolverSettings::exact(),
        )
        .unwrap();
        assert_eq!(exact.directions().len(), 1);
    }

    #[test]
    fn evaluation() {
        let p = Parametrization::new(
            q(&["1", "2", "0"]),
            vec![q(&["-1", "0", "1"]), q(&["0.5", "1", "0"])],
        )
        .unwrap();

        assert_eq!(
            p.point_at(&[Rational::from(2), Rational::new(-1, 2)]).unwrap(),
            q(&["-1.25", "1.5", "2"])
        );
        assert_eq!(
            p.point_at(&[Rational::from(2)]),
            Err(LinearSystemError::ParameterCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn sampling() {
        let p = Parametrization::new(q(&["1", "2"]), vec![q(&["1", "-1"])]).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..5 {
            let x = p.sample_point(&mut rng, (-10, 10));
            assert_eq!(x.dot(&q(&["1", "1"])).unwrap(), Rational::from(3));
        }
    }

    #[test]
    #[should_panic(expected = "empty range 3..3")]
    fn sampling_from_empty_range() {
        let p = Parametrization::new(q(&["1", "2"]), vec![q(&["1", "-1"])]).unwrap();
        p.sample_point(&mut rand::thread_rng(), (3, 3));
    }

    #[test]
    fn display() {
        let p = Parametrization::new(
            q(&["-1.3456", "2", "0"]),
            vec![q(&["-1", "0", "1"]), q(&["0.5", "1", "0"])],
        )
        .unwrap();
        assert_eq!(
            p.to_string(),
            "x_1 = -1.346 + -1.000 t_1 + 0.500 t_2\n\
             x_2 = 2.000 + 0.000 t_1 + 1.000 t_2\n\
             x_3 = 0.000 + 1.000 t_1 + 0.000 t_2"
        );

        let point = Parametrization::new(q(&["3", "4"]), vec![]).unwrap();
        assert_eq!(point.to_string(), "x_1 = 3.000\nx_2 = 4.000");
    }
}
