use std::fmt::Write;

use crate::descent::TrajectoryEntry;

/// Numeric precision for the rendered result table.
///
/// Explicit configuration for the reporting collaborator; there are no
/// module-level display constants.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Significant digits for the cost column, scientific notation.
    pub cost_precision: usize,
    /// Decimal places for parameter values.
    pub variables_precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cost_precision: 5,
            variables_precision: 2,
        }
    }
}

/// Renders a descent trajectory as a fixed-width table: a header row, then
/// one row per entry showing the step index, the cost in scientific
/// notation, and `name=value` pairs in parameter order.
///
/// # Examples
///
/// ```
/// use gradfit::descent::TrajectoryEntry;
/// use gradfit::report::{write_results, ReportConfig};
///
/// let results = vec![TrajectoryEntry {
///     step: 0,
///     cost: 2.0,
///     variables: vec![("m", 1.0), ("c", -0.5)],
/// }];
///
/// let mut table = String::new();
/// write_results(&mut table, &results, &ReportConfig::default()).unwrap();
/// assert!(table.contains("m=1.00 c=-0.50"));
/// ```
pub fn write_results(
    w: &mut impl Write,
    results: &[TrajectoryEntry],
    config: &ReportConfig,
) -> std::fmt::Result {
    let step_name = "Step";
    let last_step_digits = results
        .last()
        .map(|entry| entry.step.to_string().len())
        .unwrap_or(0);
    let buffer = step_name.len().max(last_step_digits);

    let cost_width = config.cost_precision + 6;

    writeln!(
        w,
        "{:<buffer$} | {:<cost_width$} | Variables",
        step_name, "Cost",
    )?;

    for entry in results {
        let variables = entry
            .variables
            .iter()
            .map(|(name, value)| format!("{name}={value:.prec$}", prec = config.variables_precision))
            .collect::<Vec<_>>()
            .join(" ");
        // The exponent renders with a variable width, so the cost is
        // formatted first and then padded to keep the columns aligned.
        let cost = format!("{:.prec$E}", entry.cost, prec = config.cost_precision);
        writeln!(w, "{:<buffer$} | {cost:<cost_width$} | {variables}", entry.step)?;
    }

    Ok(())
}

/// Prints the result table to stdout.
pub fn print_results(results: &[TrajectoryEntry], config: &ReportConfig) {
    let mut table = String::new();
    // Writing into a String cannot fail.
    let _ = write_results(&mut table, results, config);
    print!("{table}");
}
