//! Newton iteration with an explicit convergence flag.

/// Outcome of a Newton solve.
///
/// A solve that runs out of iterations is not an error: `root` holds the
/// last iterate and `converged` is false, leaving the caller to decide
/// whether to trust it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonSolution {
    pub root: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Find a root of `f` starting from `start`, stepping by `f(x) / slope(x)`.
///
/// Stops when a step is smaller than `tolerance`, keeping the iterate that
/// produced the small step. A zero or non-finite slope or step ends the
/// solve unconverged at the current iterate.
pub fn solve(
    f: impl Fn(f64) -> f64,
    slope: impl Fn(f64) -> f64,
    start: f64,
    tolerance: f64,
    max_iterations: usize,
) -> NewtonSolution {
    let mut x = start;

    for iteration in 0..max_iterations {
        let d = slope(x);
        if d == 0.0 || !d.is_finite() {
            return NewtonSolution {
                root: x,
                iterations: iteration,
                converged: false,
            };
        }

        let next = x - f(x) / d;
        if !next.is_finite() {
            return NewtonSolution {
                root: x,
                iterations: iteration,
                converged: false,
            };
        }

        if (next - x).abs() < tolerance {
            return NewtonSolution {
                root: x,
                iterations: iteration + 1,
                converged: true,
            };
        }
        x = next;
    }

    NewtonSolution {
        root: x,
        iterations: max_iterations,
        converged: false,
    }
}
