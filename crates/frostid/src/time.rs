use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Custom epoch: Monday, January 1, 2024 00:00:00 UTC
pub const CUSTOM_EPOCH: Duration = Duration::from_millis(1_704_067_200_000);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The timestamp type `T` is generic (here typically `i64`), and the unit is
/// expected to be **milliseconds** relative to a configurable origin.
///
/// # Example
///
/// ```
/// use frostid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<i64> for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> T;
}

/// A wall-clock time source returning milliseconds relative to a fixed epoch.
///
/// Every call reads `SystemTime::now()` directly. This source reports
/// whatever the operating system says, including backward adjustments (NTP
/// steps, manual changes); the generator surfaces those as
/// [`Error::ClockMovedBackwards`] instead of hiding them, so no smoothing or
/// ticker thread sits in between.
///
/// A system clock set before the configured epoch yields negative readings
/// rather than a panic.
///
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
#[derive(Copy, Clone)]
pub struct SystemClock {
    epoch_millis: i64,
}

impl Default for SystemClock {
    /// Constructs a system clock aligned to the default [`CUSTOM_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(CUSTOM_EPOCH)
    }
}

impl SystemClock {
    /// Constructs a system clock using a custom epoch as the origin (t = 0),
    /// specified as a [`Duration`] since 1970-01-01 UTC.
    pub fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_millis: epoch.as_millis() as i64,
        }
    }
}

impl TimeSource<i64> for SystemClock {
    fn current_millis(&self) -> i64 {
        unix_millis() - self.epoch_millis
    }
}

/// Milliseconds since the Unix epoch; negative if the system clock is set
/// before 1970.
fn unix_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(e) => -(e.duration().as_millis() as i64),
    }
}
