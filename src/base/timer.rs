use std::time::Instant;

/// Measures the duration of a process and logs it when dropped
///
/// # Examples
///
/// ```
/// use sfem::base::Timer;
///
/// {
///     let _timer = Timer::new("Matrix assembly");
///     // ... work ...
/// } // logs "Matrix assembly completed in: 0 milliseconds"
/// ```
pub struct Timer {
    /// Name of the process being timed
    name: String,

    /// Starting instant
    start: Instant,
}

impl Timer {
    /// Starts a new timer
    pub fn new(name: &str) -> Self {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Returns the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::debug!("{} completed in: {} milliseconds", self.name, self.elapsed_millis());
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Timer;

    #[test]
    fn timer_works() {
        let timer = Timer::new("Nothing");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.elapsed_millis() >= 2);
    }
}
