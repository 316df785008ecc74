//! Optional smoothing for the published palm position.
//!
//! Tracker jitter makes a raw palm cursor shake; these filters trade a little
//! latency for a steadier position. The default is no filtering.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{constants::{DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MOVING_AVERAGE_WINDOW}, Error, Result};

/// Trait for all position filters
pub trait PositionFilter: Send + Sync {
    /// Apply filter to a position
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl PositionFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a position filter from a spec such as `none`, `moving_average:5`
/// or `exponential:0.3`. Parameters are optional.
///
/// # Errors
///
/// Returns `Error::FilterError` for unknown names or invalid parameters.
pub fn create_filter(spec: &str) -> Result<Box<dyn PositionFilter>> {
    let lowered = spec.trim().to_lowercase();
    let (name, param) = match lowered.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (lowered.as_str(), None),
    };

    match name {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => {
            let window = match param {
                Some(p) => p
                    .parse::<usize>()
                    .map_err(|e| Error::FilterError(format!("Invalid window '{p}': {e}")))?,
                None => DEFAULT_MOVING_AVERAGE_WINDOW,
            };
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)?))
        }
        "exponential" => {
            let alpha = match param {
                Some(p) => p
                    .parse::<f64>()
                    .map_err(|e| Error::FilterError(format!("Invalid alpha '{p}': {e}")))?,
                None => DEFAULT_EXPONENTIAL_ALPHA,
            };
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)?))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {spec}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter() {
        let mut filter = NoFilter;
        let (x, y) = filter.apply(0.3, 0.7);
        assert_eq!(x, 0.3);
        assert_eq!(y, 0.7);
    }

    #[test]
    fn test_create_filter() {
        assert_eq!(create_filter("none").unwrap().name(), "NoFilter");
        assert_eq!(create_filter("moving_average").unwrap().name(), "MovingAverageFilter");
        assert_eq!(create_filter("MovingAverage:3").unwrap().name(), "MovingAverageFilter");
        assert_eq!(create_filter("exponential:0.3").unwrap().name(), "ExponentialFilter");
        assert!(create_filter("kalman").is_err());
        assert!(create_filter("moving_average:0").is_err());
        assert!(create_filter("exponential:abc").is_err());
        assert!(create_filter("exponential:1.5").is_err());
    }
}
