pub mod gaussian;
pub mod linear;

use ndarray::Array1;

use crate::error::Result;

pub use gaussian::Gaussian;
pub use linear::Linear;

/// An evaluator for the partial derivative of a function with respect to
/// one of its parameters, applied elementwise over a sample vector.
pub type PartialDerivative<'a> = Box<dyn Fn(&Array1<f64>) -> Array1<f64> + 'a>;

/// A parametric scalar function of one variable that can be fitted by
/// gradient descent.
///
/// Implementations own an ordered parameter vector and expose analytic
/// partial derivatives for each parameter. The ordering contract is the
/// heart of the abstraction: `named_parameters()`, `parameters()`,
/// `partial_derivatives()`, and the vector accepted by `set_parameters()`
/// must all refer to the same parameter at the same index, at all times.
/// A mismatch silently corrupts the gradient-to-parameter mapping with no
/// runtime signal, so implementations must keep a single fixed order
/// chosen at construction.
pub trait FittableFunction {
    /// Evaluates the function elementwise over the sample inputs.
    ///
    /// Pure: the output has the same length as `x` and evaluation has no
    /// side effects.
    fn f(&self, x: &Array1<f64>) -> Array1<f64>;

    /// Returns one partial-derivative evaluator per parameter, in
    /// parameter order.
    ///
    /// Each evaluator takes the sample inputs and returns the elementwise
    /// partial derivative of `f` with respect to that one parameter,
    /// holding the others fixed at their current values.
    fn partial_derivatives(&self) -> Vec<PartialDerivative<'_>>;

    /// Returns the current parameter values in their fixed order.
    fn parameters(&self) -> Array1<f64>;

    /// Replaces all parameter values atomically.
    ///
    /// Returns `Error::ShapeMismatch` without changing any parameter when
    /// `values` has the wrong length. The order of `values` must match
    /// the order of `parameters()`.
    fn set_parameters(&mut self, values: &Array1<f64>) -> Result<()>;

    /// Returns the parameter names paired with their current values, in
    /// the same order as `parameters()`, for display purposes.
    fn named_parameters(&self) -> Vec<(&'static str, f64)>;
}
