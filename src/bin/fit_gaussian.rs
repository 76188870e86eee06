use ndarray::Array1;

use gradfit::plot::{render_contour, ContourConfig};
use gradfit::report::{print_results, ReportConfig};
use gradfit::{FittableFunction, Gaussian, GradientDescent, Result};

/// Fits a Gaussian with perturbed starting parameters to samples drawn
/// from a known ground truth, then prints the descent table and a contour
/// map of the cost surface.
fn main() -> Result<()> {
    let (mu, sig) = (1.0, 3.0);
    let x = Array1::linspace(-5.0, 5.0, 10);
    let y = Gaussian::new(mu, sig).f(&x);

    let (mu_guess, sig_guess) = (0.1, 3.8);
    let mut descent = GradientDescent::new(Gaussian::new(mu_guess, sig_guess), x, y)?
        .iterations(10)
        .learning_rate(50.0);

    descent.run()?;
    print_results(descent.results(), &ReportConfig::default());

    println!();
    print!("{}", render_contour(&descent, &ContourConfig::default())?);
    Ok(())
}
