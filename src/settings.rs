//! Configuration of the elimination engine.

/// Settings that control how a [LinearSystem](crate::rings::linear_system::LinearSystem)
/// decides whether a coefficient vanishes.
///
/// Even over an exact field the tolerance is applied, so that systems built from
/// measured or rounded data classify the same way regardless of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSettings {
    /// Coefficients with an absolute value strictly below this bound are treated as zero.
    pub tolerance: f64,
}

impl SolverSettings {
    pub const DEFAULT_TOLERANCE: f64 = 1e-10;

    pub fn new() -> SolverSettings {
        SolverSettings {
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    /// Treat values below `tolerance` as zero.
    pub fn with_tolerance(mut self, tolerance: f64) -> SolverSettings {
        self.tolerance = tolerance;
        self
    }

    /// Only exact zeros vanish.
    pub fn exact() -> SolverSettings {
        SolverSettings { tolerance: 0. }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::new()
    }
}
