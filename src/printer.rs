use std::fmt::{self, Write};

use crate::{
    geometry::{equation::Equation, parametrization::Parametrization, vector::Vector},
    rings::{
        linear_system::{LinearSystem, Solution},
        OrderedField,
    },
};

/// Options that control how numbers and variables are rendered.
/// Rounding only affects the output; the values themselves keep full precision.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// The number of decimal places.
    pub precision: usize,
    /// The name of the unknowns, printed as `x_1`, `x_2`, ...
    pub variable: &'static str,
    /// The name of the free parameters, printed as `t_1`, `t_2`, ...
    pub parameter: &'static str,
}

impl PrintOptions {
    pub fn with_precision(mut self, precision: usize) -> PrintOptions {
        self.precision = precision;
        self
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            precision: 3,
            variable: "x",
            parameter: "t",
        }
    }
}

pub struct VectorPrinter<'a, F: OrderedField> {
    pub vector: &'a Vector<F>,
    pub opts: PrintOptions,
}

impl<'a, F: OrderedField> VectorPrinter<'a, F> {
    pub fn new(vector: &'a Vector<F>, opts: PrintOptions) -> VectorPrinter<'a, F> {
        VectorPrinter { vector, opts }
    }
}

impl<'a, F: OrderedField> fmt::Display for VectorPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let field = self.vector.field();
        f.write_char('(')?;
        for (i, e) in self.vector.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&field.to_decimal_string(e, self.opts.precision))?;
        }
        f.write_char(')')
    }
}

/// Prints an equation as `1.000x_1 - 2.000x_3 = 4.000`, leaving out terms
/// whose coefficient rounds to zero.
pub struct EquationPrinter<'a, F: OrderedField> {
    pub equation: &'a Equation<F>,
    pub opts: PrintOptions,
}

impl<'a, F: OrderedField> EquationPrinter<'a, F> {
    pub fn new(equation: &'a Equation<F>, opts: PrintOptions) -> EquationPrinter<'a, F> {
        EquationPrinter { equation, opts }
    }
}

impl<'a, F: OrderedField> fmt::Display for EquationPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let field = self.equation.normal().field();
        let mut first = true;

        for (i, c) in self.equation.normal().iter().enumerate() {
            let s = field.to_decimal_string(c, self.opts.precision);
            let (negative, magnitude) = match s.strip_prefix('-') {
                Some(m) => (true, m),
                None => (false, s.as_str()),
            };
            if magnitude.bytes().all(|b| b == b'0' || b == b'.') {
                continue;
            }

            match (first, negative) {
                (true, true) => f.write_char('-')?,
                (true, false) => {}
                (false, true) => f.write_str(" - ")?,
                (false, false) => f.write_str(" + ")?,
            }
            write!(f, "{}{}_{}", magnitude, self.opts.variable, i + 1)?;
            first = false;
        }

        if first {
            f.write_char('0')?;
        }

        write!(
            f,
            " = {}",
            field.to_decimal_string(self.equation.constant(), self.opts.precision)
        )
    }
}

pub struct LinearSystemPrinter<'a, F: OrderedField> {
    pub system: &'a LinearSystem<F>,
    pub opts: PrintOptions,
}

impl<'a, F: OrderedField> LinearSystemPrinter<'a, F> {
    pub fn new(system: &'a LinearSystem<F>, opts: PrintOptions) -> LinearSystemPrinter<'a, F> {
        LinearSystemPrinter { system, opts }
    }
}

impl<'a, F: OrderedField> fmt::Display for LinearSystemPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Linear System:")?;
        for (i, e) in self.system.iter().enumerate() {
            write!(
                f,
                "\nEquation {}: {}",
                i + 1,
                EquationPrinter::new(e, self.opts)
            )?;
        }
        Ok(())
    }
}

/// Prints one line per coordinate: `x_1 = 1.000 + -2.000 t_1 + 0.500 t_2`.
pub struct ParametrizationPrinter<'a, F: OrderedField> {
    pub parametrization: &'a Parametrization<F>,
    pub opts: PrintOptions,
}

impl<'a, F: OrderedField> ParametrizationPrinter<'a, F> {
    pub fn new(
        parametrization: &'a Parametrization<F>,
        opts: PrintOptions,
    ) -> ParametrizationPrinter<'a, F> {
        ParametrizationPrinter {
            parametrization,
            opts,
        }
    }
}

impl<'a, F: OrderedField> fmt::Display for ParametrizationPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.parametrization;
        let field = p.basepoint().field();

        for (coord, b) in p.basepoint().iter().enumerate() {
            if coord > 0 {
                f.write_char('\n')?;
            }
            write!(
                f,
                "{}_{} = {}",
                self.opts.variable,
                coord + 1,
                field.to_decimal_string(b, self.opts.precision)
            )?;
            for (free_var, d) in p.directions().iter().enumerate() {
                write!(
                    f,
                    " + {} {}_{}",
                    field.to_decimal_string(&d[coord], self.opts.precision),
                    self.opts.parameter,
                    free_var + 1
                )?;
            }
        }
        Ok(())
    }
}

pub struct SolutionPrinter<'a, F: OrderedField> {
    pub solution: &'a Solution<F>,
    pub opts: PrintOptions,
}

impl<'a, F: OrderedField> SolutionPrinter<'a, F> {
    pub fn new(solution: &'a Solution<F>, opts: PrintOptions) -> SolutionPrinter<'a, F> {
        SolutionPrinter { solution, opts }
    }
}

impl<'a, F: OrderedField> fmt::Display for SolutionPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.solution {
            Solution::Unique(v) => {
                for (i, e) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_char('\n')?;
                    }
                    write!(
                        f,
                        "{}_{} = {}",
                        self.opts.variable,
                        i + 1,
                        v.field().to_decimal_string(e, self.opts.precision)
                    )?;
                }
                Ok(())
            }
            Solution::NoSolution => f.write_str("No solutions"),
            Solution::Infinite(p) => write!(f, "{}", ParametrizationPrinter::new(p, self.opts)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::rational::RationalField;

    #[test]
    fn vectors() {
        let v = Vector::parse(&["1.0005", "-2", "1/3"], RationalField::new()).unwrap();
        assert_eq!(
            VectorPrinter::new(&v, PrintOptions::default()).to_string(),
            "(1.001, -2.000, 0.333)"
        );
        assert_eq!(
            VectorPrinter::new(&v, PrintOptions::default().with_precision(1)).to_string(),
            "(1.0, -2.0, 0.3)"
        );
    }

    #[test]
    fn custom_names() {
        let e = Equation::parse(&["2", "0.0001"], "1", RationalField::new()).unwrap();
        let opts = PrintOptions {
            precision: 2,
            variable: "y",
            parameter: "s",
        };
        assert_eq!(EquationPrinter::new(&e, opts).to_string(), "2.00y_1 = 1.00");
    }

    #[test]
    fn systems() {
        let f = RationalField::new();
        let s = LinearSystem::new(vec![
            Equation::parse(&["1", "1"], "1", f).unwrap(),
            Equation::parse(&["0", "-3"], "2", f).unwrap(),
        ])
        .unwrap();
        assert_eq!(
            LinearSystemPrinter::new(&s, PrintOptions::default()).to_string(),
            "Linear System:\nEquation 1: 1.000x_1 + 1.000x_2 = 1.000\nEquation 2: -3.000x_2 = 2.000"
        );
    }
}
