use log::debug;
use ndarray::{Array1, Array2};

use crate::error::{Error, Result};
use crate::functions::FittableFunction;
use crate::util::diff;

/// One recorded state of a descent: the step index, the cost at that step,
/// and a snapshot of every parameter in fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryEntry {
    pub step: usize,
    pub cost: f64,
    pub variables: Vec<(&'static str, f64)>,
}

/// The values one parameter took across all recorded steps, in step order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Cost evaluated over a grid of two-parameter combinations.
///
/// `costs[[j, i]]` holds the cost at `(first_range[i], second_range[j])`,
/// so rows vary the second parameter. The ranges span the minimum to
/// maximum value each parameter took during the recorded descent.
#[derive(Debug, Clone, PartialEq)]
pub struct CostGrid {
    pub first_name: &'static str,
    pub second_name: &'static str,
    pub first_range: Array1<f64>,
    pub second_range: Array1<f64>,
    pub costs: Array2<f64>,
}

/// Directional vectors between consecutive recorded parameter pairs, for
/// overlaying the descent path on a contour plot.
///
/// Element `k` describes the arrow from step `k`'s parameter pair to step
/// `k + 1`'s: it starts at `(x0[k], y0[k])` and spans `(dx[k], dy[k])`.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentVectors {
    pub x0: Vec<f64>,
    pub y0: Vec<f64>,
    pub dx: Vec<f64>,
    pub dy: Vec<f64>,
}

/// Batch gradient descent over a [`FittableFunction`] and fixed samples.
///
/// The optimizer owns the function and the sample vectors. `run` performs
/// a fixed number of steepest-descent updates with a constant learning
/// rate, recording a trajectory entry per step; there is no convergence
/// check and no divergence guard.
///
/// # Examples
///
/// ```
/// use gradfit::descent::GradientDescent;
/// use gradfit::functions::{FittableFunction, Gaussian};
/// use ndarray::Array1;
///
/// let x = Array1::linspace(-5.0, 5.0, 10);
/// let y = Gaussian::new(1.0, 3.0).f(&x);
///
/// let mut descent = GradientDescent::new(Gaussian::new(0.1, 3.8), x, y)
///     .unwrap()
///     .iterations(10)
///     .learning_rate(50.0);
/// descent.run().unwrap();
///
/// let results = descent.results();
/// assert_eq!(results.len(), 11);
/// assert!(results.last().unwrap().cost < results[0].cost);
/// ```
#[derive(Debug, Clone)]
pub struct GradientDescent<F> {
    function: F,
    x: Array1<f64>,
    y: Array1<f64>,
    iterations: usize,
    learning_rate: f64,
    results: Vec<TrajectoryEntry>,
}

impl<F: FittableFunction> GradientDescent<F> {
    /// Creates an optimizer over the given function and samples.
    ///
    /// Defaults to 100 iterations at a learning rate of 50. Returns
    /// `Error::ShapeMismatch` when `x` and `y` differ in length or are
    /// empty.
    pub fn new(function: F, x: Array1<f64>, y: Array1<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::ShapeMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        if x.is_empty() {
            return Err(Error::ShapeMismatch {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self {
            function,
            x,
            y,
            iterations: 100,
            learning_rate: 50.0,
            results: Vec::new(),
        })
    }

    /// Sets the number of update iterations per `run` call.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the fixed step size multiplying the negative gradient.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Returns the function at its current parameter values.
    pub fn function(&self) -> &F {
        &self.function
    }

    /// Returns the sum of squared residuals at the current parameters:
    /// `(y - f(x)) . (y - f(x))`. Never negative; zero only at a perfect
    /// fit.
    pub fn cost(&self) -> f64 {
        let residual = &self.y - &self.function.f(&self.x);
        residual.dot(&residual)
    }

    /// Returns the gradient of the cost with respect to each parameter,
    /// in the function's fixed parameter order.
    ///
    /// Entry `i` is `-2 (y - f(x)) . df/dtheta_i(x)`, assembled from the
    /// function's analytic partial derivatives via the chain rule.
    pub fn jacobian(&self) -> Array1<f64> {
        let residual = &self.y - &self.function.f(&self.x);
        Array1::from_iter(
            self.function
                .partial_derivatives()
                .iter()
                .map(|partial| -2.0 * residual.dot(&partial(&self.x))),
        )
    }

    /// Performs the descent: records the current state, then applies
    /// `iterations` updates `theta <- theta - learning_rate * jacobian()`,
    /// recording an entry after each.
    ///
    /// The first call records `iterations + 1` entries with steps
    /// `0..=iterations`; entry `i` snapshots the state after `i` updates,
    /// so the final entry always matches the function's committed
    /// parameters. Calling `run` again continues descending from the
    /// current parameters and extends the same trajectory with continuing
    /// step numbers; callers needing an isolated trajectory should build a
    /// fresh optimizer.
    ///
    /// A non-finite cost or gradient aborts immediately with
    /// `Error::InvalidDomain`, leaving the entries recorded so far and the
    /// parameters at their last set values.
    pub fn run(&mut self) -> Result<()> {
        let mut step = match self.results.last() {
            Some(last) => last.step + 1,
            None => {
                self.record(0)?;
                1
            }
        };

        for _ in 0..self.iterations {
            let gradient = self.jacobian();
            if gradient.iter().any(|g| !g.is_finite()) {
                return Err(Error::invalid_domain(format!(
                    "non-finite gradient before step {step}"
                )));
            }
            let updated = self.function.parameters() - gradient * self.learning_rate;
            self.function.set_parameters(&updated)?;
            self.record(step)?;
            step += 1;
        }

        debug!("descent finished at step {}", step - 1);
        Ok(())
    }

    /// Returns the recorded trajectory, ordered by step.
    pub fn results(&self) -> &[TrajectoryEntry] {
        &self.results
    }

    /// Returns the values each parameter took across the recorded steps,
    /// one series per parameter, in parameter order.
    pub fn parameter_series(&self) -> Vec<ParameterSeries> {
        self.function
            .named_parameters()
            .iter()
            .enumerate()
            .map(|(i, &(name, _))| ParameterSeries {
                name,
                values: self
                    .results
                    .iter()
                    .map(|entry| entry.variables[i].1)
                    .collect(),
            })
            .collect()
    }

    /// Returns `steps` linearly spaced values per parameter, spanning the
    /// minimum to maximum value that parameter took during the recorded
    /// descent, in parameter order.
    ///
    /// Returns `Error::NotRun` before any completed run, since there are
    /// no observed values to span.
    pub fn parameter_ranges(&self, steps: usize) -> Result<Vec<(&'static str, Array1<f64>)>> {
        if self.results.is_empty() {
            return Err(Error::NotRun);
        }
        Ok(self
            .parameter_series()
            .into_iter()
            .map(|series| {
                let min = series.values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = series
                    .values
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                (series.name, Array1::linspace(min, max, steps))
            })
            .collect())
    }

    /// Evaluates the cost at every combination of the two parameters'
    /// observed ranges, on a `steps x steps` grid.
    ///
    /// Returns `Error::Unsupported` for functions with a parameter count
    /// other than two, and `Error::NotRun` before any completed run.
    pub fn cost_grid(&self, steps: usize) -> Result<CostGrid>
    where
        F: Clone,
    {
        let ranges = self.parameter_ranges(steps)?;
        if ranges.len() != 2 {
            return Err(Error::unsupported(format!(
                "cost grid requires exactly 2 parameters, the function has {}",
                ranges.len()
            )));
        }

        let (first_name, first_range) = ranges[0].clone();
        let (second_name, second_range) = ranges[1].clone();

        let mut probe = self.function.clone();
        let mut costs = Array2::zeros((steps, steps));
        for (j, &second) in second_range.iter().enumerate() {
            for (i, &first) in first_range.iter().enumerate() {
                probe.set_parameters(&Array1::from(vec![first, second]))?;
                let residual = &self.y - &probe.f(&self.x);
                costs[[j, i]] = residual.dot(&residual);
            }
        }

        Ok(CostGrid {
            first_name,
            second_name,
            first_range,
            second_range,
            costs,
        })
    }

    /// Returns the arrows between consecutive recorded parameter pairs,
    /// for overlaying the descent path on a contour plot.
    ///
    /// Same preconditions as [`cost_grid`](Self::cost_grid): exactly two
    /// parameters and at least one completed run.
    pub fn descent_vectors(&self) -> Result<DescentVectors> {
        if self.results.is_empty() {
            return Err(Error::NotRun);
        }
        let series = self.parameter_series();
        if series.len() != 2 {
            return Err(Error::unsupported(format!(
                "descent vectors require exactly 2 parameters, the function has {}",
                series.len()
            )));
        }

        let first = &series[0].values;
        let second = &series[1].values;
        Ok(DescentVectors {
            x0: first[..first.len() - 1].to_vec(),
            y0: second[..second.len() - 1].to_vec(),
            dx: diff(first),
            dy: diff(second),
        })
    }

    fn record(&mut self, step: usize) -> Result<()> {
        let cost = self.cost();
        if !cost.is_finite() {
            return Err(Error::invalid_domain(format!(
                "non-finite cost at step {step}"
            )));
        }
        debug!("step {step}: cost {cost:e}");
        self.results.push(TrajectoryEntry {
            step,
            cost,
            variables: self.function.named_parameters(),
        });
        Ok(())
    }
}
