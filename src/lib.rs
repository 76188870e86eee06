pub mod descent;
pub mod error;
pub mod functions;
pub mod plot;
pub mod report;
pub mod util;

pub use descent::GradientDescent;
pub use error::{Error, Result};
pub use functions::{FittableFunction, Gaussian, Linear};
