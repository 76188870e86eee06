use ndarray::Array1;

use crate::error::{Error, Result};
use crate::functions::{FittableFunction, PartialDerivative};

/// A straight line with slope `m` and intercept `c`: `f(x) = m x + c`.
///
/// # Examples
///
/// ```
/// use gradfit::functions::{FittableFunction, Linear};
/// use ndarray::array;
///
/// let line = Linear::new(2.0, 1.0);
/// assert_eq!(line.f(&array![0.0, 3.0]), array![1.0, 7.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    m: f64,
    c: f64,
}

impl Linear {
    /// Creates a line with the given slope and intercept.
    pub fn new(m: f64, c: f64) -> Self {
        Self { m, c }
    }
}

impl FittableFunction for Linear {
    fn f(&self, x: &Array1<f64>) -> Array1<f64> {
        x * self.m + self.c
    }

    fn partial_derivatives(&self) -> Vec<PartialDerivative<'_>> {
        vec![
            // df/dm = x, df/dc = 1 elementwise; neither depends on the
            // current parameter values.
            Box::new(|x| x.clone()),
            Box::new(|x| Array1::ones(x.len())),
        ]
    }

    fn parameters(&self) -> Array1<f64> {
        Array1::from(vec![self.m, self.c])
    }

    fn set_parameters(&mut self, values: &Array1<f64>) -> Result<()> {
        if values.len() != 2 {
            return Err(Error::ShapeMismatch {
                expected: 2,
                actual: values.len(),
            });
        }
        self.m = values[0];
        self.c = values[1];
        Ok(())
    }

    fn named_parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("m", self.m), ("c", self.c)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_evaluation() {
        let line = Linear::new(3.0, -2.0);
        assert_eq!(line.f(&array![0.0, 1.0, 2.0]), array![-2.0, 1.0, 4.0]);
    }

    #[test]
    fn test_partials_are_constant_in_parameters() {
        let line = Linear::new(5.0, 7.0);
        let x = array![1.0, 2.0, 4.0];
        let partials = line.partial_derivatives();
        assert_eq!(partials[0](&x), x);
        assert_eq!(partials[1](&x), array![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_set_parameters_rejects_wrong_length() {
        let mut line = Linear::new(0.0, 0.0);
        assert!(matches!(
            line.set_parameters(&array![1.0]),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
