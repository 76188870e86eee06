use std::fmt::Write;

use crate::descent::GradientDescent;
use crate::error::{Error, Result};
use crate::functions::FittableFunction;

/// Shade characters from lowest to highest cost level.
const SHADES: &[u8] = b" .:-=+*#%@";

/// Configuration for the textual contour rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourConfig {
    /// Grid resolution per parameter axis.
    pub steps: usize,
    /// Overlay the recorded descent path as directional markers.
    pub vectors: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            steps: 60,
            vectors: true,
        }
    }
}

/// Renders a two-dimensional contour map of cost over the two parameters'
/// observed value ranges, as text.
///
/// Cost levels are quantized on a log scale into shade characters, with
/// the first parameter on the horizontal axis and the second on the
/// vertical axis (largest value at the top). When `config.vectors` is set,
/// the recorded descent path is overlaid: each recorded parameter pair is
/// marked with an arrow character pointing toward the next recorded pair,
/// and the final pair with `o`.
///
/// Requires exactly two parameters (`Error::Unsupported` otherwise) and at
/// least one completed run (`Error::NotRun` before that), per the
/// optimizer accessors this consumes. A resolution below 2 steps cannot
/// span a range and is rejected with `Error::Unsupported`.
pub fn render_contour<F>(descent: &GradientDescent<F>, config: &ContourConfig) -> Result<String>
where
    F: FittableFunction + Clone,
{
    if config.steps < 2 {
        return Err(Error::unsupported(format!(
            "contour rendering requires at least 2 grid steps, got {}",
            config.steps
        )));
    }
    let grid = descent.cost_grid(config.steps)?;

    // Quantize log-cost into shade levels.
    let log_costs = grid.costs.mapv(|cost| (cost + f64::MIN_POSITIVE).ln());
    let lo = log_costs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = log_costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let level = |log_cost: f64| -> usize {
        if hi > lo {
            let t = (log_cost - lo) / (hi - lo);
            ((t * (SHADES.len() - 1) as f64).round() as usize).min(SHADES.len() - 1)
        } else {
            0
        }
    };

    let mut canvas: Vec<Vec<u8>> = (0..config.steps)
        .map(|j| {
            (0..config.steps)
                .map(|i| SHADES[level(log_costs[[j, i]])])
                .collect()
        })
        .collect();

    if config.vectors {
        overlay_path(descent, &grid.first_range, &grid.second_range, &mut canvas)?;
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Contours of cost with {} and {}",
        grid.first_name, grid.second_name
    );
    let _ = writeln!(
        out,
        "{}: {:.4} .. {:.4} (columns, left to right)",
        grid.first_name,
        grid.first_range[0],
        grid.first_range[config.steps - 1]
    );
    let _ = writeln!(
        out,
        "{}: {:.4} .. {:.4} (rows, bottom to top)",
        grid.second_name,
        grid.second_range[0],
        grid.second_range[config.steps - 1]
    );
    for row in canvas.iter().rev() {
        // Shade bytes and marker characters are all ASCII.
        let _ = writeln!(out, "{}", std::str::from_utf8(row).unwrap_or(""));
    }
    Ok(out)
}

/// Marks the recorded parameter pairs on the canvas, each with an arrow
/// toward the next recorded pair and the final pair with `o`.
fn overlay_path<F>(
    descent: &GradientDescent<F>,
    first_range: &ndarray::Array1<f64>,
    second_range: &ndarray::Array1<f64>,
    canvas: &mut [Vec<u8>],
) -> Result<()>
where
    F: FittableFunction,
{
    let vectors = descent.descent_vectors()?;
    let steps = canvas.len();

    let to_cell = |value: f64, range: &ndarray::Array1<f64>| -> usize {
        let min = range[0];
        let max = range[steps - 1];
        if max > min {
            let t = (value - min) / (max - min);
            ((t * (steps - 1) as f64).round() as usize).min(steps - 1)
        } else {
            steps / 2
        }
    };

    for k in 0..vectors.x0.len() {
        let i = to_cell(vectors.x0[k], first_range);
        let j = to_cell(vectors.y0[k], second_range);
        canvas[j][i] = arrow(vectors.dx[k], vectors.dy[k]);
    }
    // Final recorded pair has no outgoing vector.
    let series = descent.parameter_series();
    if let (Some(&last_first), Some(&last_second)) =
        (series[0].values.last(), series[1].values.last())
    {
        let i = to_cell(last_first, first_range);
        let j = to_cell(last_second, second_range);
        canvas[j][i] = b'o';
    }
    Ok(())
}

/// Picks an arrow character for the dominant direction of a step.
fn arrow(dx: f64, dy: f64) -> u8 {
    if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            b'>'
        } else {
            b'<'
        }
    } else if dy >= 0.0 {
        b'^'
    } else {
        b'v'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::functions::Gaussian;
    use ndarray::Array1;

    fn fitted_descent() -> GradientDescent<Gaussian> {
        let x = Array1::linspace(-5.0, 5.0, 10);
        let y = Gaussian::new(1.0, 3.0).f(&x);
        let mut descent = GradientDescent::new(Gaussian::new(0.1, 3.8), x, y)
            .unwrap()
            .iterations(10)
            .learning_rate(50.0);
        descent.run().unwrap();
        descent
    }

    #[test]
    fn test_contour_requires_a_run() {
        let x = Array1::linspace(-5.0, 5.0, 10);
        let y = Gaussian::new(1.0, 3.0).f(&x);
        let descent = GradientDescent::new(Gaussian::new(0.1, 3.8), x, y).unwrap();
        assert!(matches!(
            render_contour(&descent, &ContourConfig::default()),
            Err(Error::NotRun)
        ));
    }

    #[test]
    fn test_contour_rejects_degenerate_resolutions() {
        let descent = fitted_descent();
        for steps in [0, 1] {
            let config = ContourConfig {
                steps,
                vectors: false,
            };
            assert!(matches!(
                render_contour(&descent, &config),
                Err(Error::Unsupported(_))
            ));
        }
    }

    #[test]
    fn test_contour_dimensions() {
        let config = ContourConfig {
            steps: 20,
            vectors: false,
        };
        let contour = render_contour(&fitted_descent(), &config).unwrap();
        let lines: Vec<&str> = contour.lines().collect();
        // Three header lines plus one line per grid row.
        assert_eq!(lines.len(), 3 + 20);
        for row in &lines[3..] {
            assert_eq!(row.len(), 20);
        }
    }

    #[test]
    fn test_contour_labels_carry_parameter_names() {
        let contour = render_contour(&fitted_descent(), &ContourConfig::default()).unwrap();
        assert!(contour.starts_with("Contours of cost with mu and sig"));
        assert!(contour.contains("\nmu:"));
        assert!(contour.contains("\nsig:"));
    }

    #[test]
    fn test_vector_overlay_marks_the_path() {
        let config = ContourConfig {
            steps: 30,
            vectors: true,
        };
        let contour = render_contour(&fitted_descent(), &config).unwrap();
        let grid_rows: String = contour.lines().skip(3).collect();
        // Final parameter pair is always marked.
        assert!(grid_rows.contains('o'));
        // At least one directional marker from the recorded steps.
        assert!(grid_rows.chars().any(|c| matches!(c, '>' | '<' | '^' | 'v')));
    }

    #[test]
    fn test_arrow_directions() {
        assert_eq!(arrow(1.0, 0.1), b'>');
        assert_eq!(arrow(-1.0, 0.1), b'<');
        assert_eq!(arrow(0.1, 1.0), b'^');
        assert_eq!(arrow(0.1, -1.0), b'v');
    }
}
