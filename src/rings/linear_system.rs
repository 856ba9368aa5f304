use std::{fmt::Display, ops::Index};

use tracing::{debug, instrument, trace};

use crate::{
    geometry::{
        equation::Equation,
        parametrization::Parametrization,
        vector::{Vector, VectorError},
    },
    printer::{LinearSystemPrinter, PrintOptions, SolutionPrinter},
    settings::SolverSettings,
};

use super::{OrderedField, Ring};

/// Errors that can occur when building or evaluating linear systems.
#[derive(Clone, Debug, PartialEq)]
pub enum LinearSystemError {
    Empty,
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    InvalidTolerance(f64),
    ParameterCount {
        expected: usize,
        found: usize,
    },
    Vector(VectorError),
}

impl std::fmt::Display for LinearSystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinearSystemError::Empty => write!(f, "A linear system needs at least one equation"),
            LinearSystemError::DimensionMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "All equations in the system should live in the same dimension: entry {} has dimension {}, expected {}",
                index, found, expected
            ),
            LinearSystemError::InvalidTolerance(t) => {
                write!(f, "The tolerance must be finite and nonnegative, not {}", t)
            }
            LinearSystemError::ParameterCount { expected, found } => write!(
                f,
                "Expected {} parameters, one for each direction, but got {}",
                expected, found
            ),
            LinearSystemError::Vector(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LinearSystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinearSystemError::Vector(e) => Some(e),
            _ => None,
        }
    }
}

impl From<VectorError> for LinearSystemError {
    fn from(e: VectorError) -> Self {
        LinearSystemError::Vector(e)
    }
}

/// Convert the tolerance of `settings` into an element of `field`.
pub(crate) fn tolerance_in_field<F: OrderedField>(
    field: &F,
    settings: &SolverSettings,
) -> Result<F::Element, LinearSystemError> {
    let t = settings.tolerance;
    if !t.is_finite() || t < 0. {
        return Err(LinearSystemError::InvalidTolerance(t));
    }

    // parse the shortest decimal representation so that 1e-10 becomes 1/10^10
    // instead of its binary expansion
    field
        .parse(&t.to_string())
        .ok()
        .or_else(|| field.from_f64(t))
        .ok_or(LinearSystemError::InvalidTolerance(t))
}

/// The outcome of solving a linear system.
#[derive(Clone, PartialEq, Debug)]
pub enum Solution<F: Ring> {
    /// Exactly one point satisfies all equations.
    Unique(Vector<F>),
    /// The equations are inconsistent.
    NoSolution,
    /// The solution set is an affine subspace of positive dimension.
    Infinite(Parametrization<F>),
}

impl<F: Ring> Solution<F> {
    pub fn is_unique(&self) -> bool {
        matches!(self, Solution::Unique(_))
    }

    /// The dimension of the solution set, or `None` when there is no solution.
    pub fn degrees_of_freedom(&self) -> Option<usize> {
        match self {
            Solution::Unique(_) => Some(0),
            Solution::NoSolution => None,
            Solution::Infinite(p) => Some(p.directions().len()),
        }
    }
}

impl<F: OrderedField> Display for Solution<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        SolutionPrinter::new(self, PrintOptions::default()).fmt(f)
    }
}

/// A system of linear equations in a fixed number of unknowns.
///
/// Elimination never modifies the system itself: [LinearSystem::compute_triangular_form],
/// [LinearSystem::compute_rref] and [LinearSystem::compute_solution] work on a copy.
/// Whether a coefficient vanishes is decided with the tolerance of the system.
#[derive(Clone, PartialEq, Debug)]
pub struct LinearSystem<F: Ring> {
    equations: Vec<Equation<F>>,
    dimension: usize,
    field: F,
    tolerance: F::Element,
}

impl<F: Ring> LinearSystem<F> {
    #[inline]
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// Always `false`, since a system has at least one equation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// The number of unknowns.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    #[inline]
    pub fn tolerance(&self) -> &F::Element {
        &self.tolerance
    }

    pub fn equations(&self) -> &[Equation<F>] {
        &self.equations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Equation<F>> {
        self.equations.iter()
    }

    pub fn into_equations(self) -> Vec<Equation<F>> {
        self.equations
    }

    /// Swap two rows. Panics if either index is out of bounds.
    pub fn swap_rows(&mut self, row1: usize, row2: usize) {
        self.equations.swap(row1, row2);
    }

    /// Multiply a row, both normal and constant, by `coefficient`.
    pub fn multiply_row(&mut self, coefficient: &F::Element, row: usize) {
        let scaled = self.equations[row].scaled(coefficient);
        self.equations[row] = scaled;
    }

    /// Perform `row[row_to_be_added_to] += coefficient * row[row_to_add]`.
    pub fn add_scaled_row_to_row(
        &mut self,
        coefficient: &F::Element,
        row_to_add: usize,
        row_to_be_added_to: usize,
    ) {
        let source = self.equations[row_to_add].clone();
        self.equations[row_to_be_added_to].add_scaled_assign(coefficient, &source);
    }

    /// Replace a row by `equation`, which must have the dimension of the system.
    pub fn set_row(&mut self, row: usize, equation: Equation<F>) -> Result<(), LinearSystemError> {
        if equation.dimension() != self.dimension {
            return Err(LinearSystemError::DimensionMismatch {
                index: row,
                expected: self.dimension,
                found: equation.dimension(),
            });
        }

        self.equations[row] = equation;
        Ok(())
    }
}

impl<F: OrderedField> LinearSystem<F> {
    /// Create a system with the default tolerance.
    pub fn new(equations: Vec<Equation<F>>) -> Result<LinearSystem<F>, LinearSystemError> {
        Self::with_settings(equations, SolverSettings::default())
    }

    pub fn with_settings(
        equations: Vec<Equation<F>>,
        settings: SolverSettings,
    ) -> Result<LinearSystem<F>, LinearSystemError> {
        let first = equations.first().ok_or(LinearSystemError::Empty)?;
        let (dimension, field) = (first.dimension(), first.normal().field);

        for (index, e) in equations.iter().enumerate() {
            if e.dimension() != dimension {
                return Err(LinearSystemError::DimensionMismatch {
                    index,
                    expected: dimension,
                    found: e.dimension(),
                });
            }
        }

        let tolerance = tolerance_in_field(&field, &settings)?;

        Ok(LinearSystem {
            equations,
            dimension,
            field,
            tolerance,
        })
    }

    #[inline]
    fn is_near_zero(&self, a: &F::Element) -> bool {
        self.field.is_near_zero(a, &self.tolerance)
    }

    /// Bring a copy of the system into row echelon form by swapping rows and
    /// adding multiples of rows to the rows below them. Pivots are not scaled.
    ///
    /// A column without a usable pivot is skipped, so that the pivots of
    /// consecutive rows move strictly to the right. Entries below a pivot that
    /// are near zero are set to zero, so that scaling a row by its pivot later
    /// cannot turn them into new pivots.
    pub fn compute_triangular_form(&self) -> LinearSystem<F> {
        let mut system = self.clone();
        let field = self.field;

        let mut row = 0;
        let mut col = 0;
        while row < system.len() && col < system.dimension {
            if system.is_near_zero(&system.equations[row].normal[col]) {
                let swap = (row + 1..system.len())
                    .find(|k| !system.is_near_zero(&system.equations[*k].normal[col]));

                match swap {
                    Some(k) => {
                        trace!("Swapping rows {} and {} for pivot in column {}", row, k, col);
                        system.swap_rows(row, k);
                    }
                    None => {
                        for k in row..system.len() {
                            system.equations[k].normal.data[col] = F::zero();
                        }
                        col += 1;
                        continue;
                    }
                }
            }

            let pivot = system.equations[row].normal[col].clone();
            for k in row + 1..system.len() {
                if system.is_near_zero(&system.equations[k].normal[col]) {
                    system.equations[k].normal.data[col] = F::zero();
                    continue;
                }

                let coefficient = field.neg(&field.div(&system.equations[k].normal[col], &pivot));
                trace!("Adding {} times row {} to row {}", coefficient, row, k);
                system.add_scaled_row_to_row(&coefficient, row, k);
                system.equations[k].normal.data[col] = F::zero();
            }

            row += 1;
            col += 1;
        }

        system
    }

    /// Compute the reduced row echelon form of the system: every pivot is one
    /// and is the only nonzero entry of its column.
    pub fn compute_rref(&self) -> LinearSystem<F> {
        let mut system = self.compute_triangular_form();
        let field = self.field;
        let pivots = system.indices_of_first_nonzero_terms_in_each_row();

        for (row, pivot) in pivots.iter().enumerate().rev() {
            let Some(col) = *pivot else {
                continue;
            };

            let inv = field.inv(&system.equations[row].normal[col]);
            system.multiply_row(&inv, row);
            system.equations[row].normal.data[col] = field.one();

            for above in 0..row {
                if system.is_near_zero(&system.equations[above].normal[col]) {
                    system.equations[above].normal.data[col] = F::zero();
                    continue;
                }

                let coefficient = field.neg(&system.equations[above].normal[col]);
                system.add_scaled_row_to_row(&coefficient, row, above);
                system.equations[above].normal.data[col] = F::zero();
            }
        }

        system
    }

    /// For each row, the index of its first coefficient that is not near zero,
    /// or `None` if the normal vanishes.
    pub fn indices_of_first_nonzero_terms_in_each_row(&self) -> Vec<Option<usize>> {
        self.equations
            .iter()
            .map(|e| {
                Equation::first_nonzero_index(e.normal().as_slice(), &self.field, &self.tolerance)
                    .ok()
            })
            .collect()
    }

    /// Solve the system. A contradictory row such as `0 = 1` takes precedence
    /// over free variables.
    #[instrument(level = "trace", skip_all, fields(system = %self))]
    pub fn compute_solution(&self) -> Solution<F> {
        let rref = self.compute_rref();
        let pivots = rref.indices_of_first_nonzero_terms_in_each_row();

        if let Some(e) = rref
            .equations
            .iter()
            .zip(&pivots)
            .find(|(e, p)| p.is_none() && !rref.is_near_zero(e.constant()))
            .map(|(e, _)| e)
        {
            debug!("Inconsistent equation: {}", e);
            return Solution::NoSolution;
        }

        let rank = pivots.iter().flatten().count();
        if rank < self.dimension {
            debug!("Rank {} in dimension {}", rank, self.dimension);
            return Solution::Infinite(rref.parametrize(&pivots));
        }

        let mut point = rref.equations[0].normal.new_zero();
        for (e, pivot) in rref.equations.iter().zip(&pivots) {
            if let Some(col) = pivot {
                point.data[*col] = e.constant.clone();
            }
        }

        debug!("Unique solution: {}", point);
        Solution::Unique(point)
    }

    /// Build the solution set of a consistent system in reduced row echelon
    /// form. Every column without a pivot becomes a free parameter.
    fn parametrize(&self, pivots: &[Option<usize>]) -> Parametrization<F> {
        let field = self.field;
        let mut basepoint = self.equations[0].normal.new_zero();
        let mut is_pivot_column = vec![false; self.dimension];

        for (e, pivot) in self.equations.iter().zip(pivots) {
            if let Some(col) = pivot {
                basepoint.data[*col] = e.constant.clone();
                is_pivot_column[*col] = true;
            }
        }

        let directions = (0..self.dimension)
            .filter(|c| !is_pivot_column[*c])
            .map(|free| {
                let mut direction = basepoint.new_zero();
                direction.data[free] = field.one();
                for (e, pivot) in self.equations.iter().zip(pivots) {
                    if let Some(col) = pivot {
                        direction.data[*col] = field.neg(&e.normal[free]);
                    }
                }
                direction
            })
            .collect();

        Parametrization::from_parts(basepoint, directions, &self.tolerance)
    }

    /// Check whether `point` satisfies every equation up to the tolerance.
    pub fn is_satisfied_by(&self, point: &Vector<F>) -> Result<bool, LinearSystemError> {
        for e in &self.equations {
            if !e.is_satisfied_by(point, &self.tolerance)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<F: Ring> Index<usize> for LinearSystem<F> {
    type Output = Equation<F>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.equations[index]
    }
}

impl<F: OrderedField> Display for LinearSystem<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        LinearSystemPrinter::new(self, PrintOptions::default()).fmt(f)
    }
}
