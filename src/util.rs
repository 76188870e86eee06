/// Returns the element-by-element differences of consecutive values.
///
/// The output is one element shorter than the input; a single-element or
/// empty input yields an empty vector.
///
/// # Examples
///
/// ```
/// use gradfit::util::diff;
///
/// assert_eq!(diff(&[1.0, 2.0, 3.0, 5.0, 8.0, 13.0]), vec![1.0, 1.0, 2.0, 3.0, 5.0]);
/// ```
pub fn diff(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
