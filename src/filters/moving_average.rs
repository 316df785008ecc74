use super::PositionFilter;
use crate::{Error, Result};
use std::collections::VecDeque;

/// Moving average filter
pub struct MovingAverageFilter {
    window_size: usize,
    x_buffer: VecDeque<f64>,
    y_buffer: VecDeque<f64>,
}

impl MovingAverageFilter {
    /// Create a moving average over the last `window_size` positions
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` if `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::FilterError(
                "Moving average window size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            x_buffer: VecDeque::with_capacity(window_size),
            y_buffer: VecDeque::with_capacity(window_size),
        })
    }
}

impl PositionFilter for MovingAverageFilter {
    #[allow(clippy::cast_precision_loss)] // window sizes are tiny
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        if self.x_buffer.len() >= self.window_size {
            self.x_buffer.pop_front();
            self.y_buffer.pop_front();
        }

        self.x_buffer.push_back(x);
        self.y_buffer.push_back(y);

        let n = self.x_buffer.len() as f64;
        let x_avg = self.x_buffer.iter().sum::<f64>() / n;
        let y_avg = self.y_buffer.iter().sum::<f64>() / n;

        (x_avg, y_avg)
    }

    fn reset(&mut self) {
        self.x_buffer.clear();
        self.y_buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}
