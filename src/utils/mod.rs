mod numerics;

pub use numerics::{gauss_legendre, gradient, trapz};
use std::fmt;
use std::time::Instant;

/// Wall-clock timer for the log blocks. Displays as a right-aligned
/// `elapsed time:` line.
pub struct Timer {
    time: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            time: Instant::now(),
        }
    }

    pub fn seconds(&self) -> f32 {
        self.time.elapsed().as_secs_f32()
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>68} {:>8.2} s",
            "elapsed time:",
            self.seconds()
        )
    }
}
