
use core::cmp::Ordering;

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, MachineId, Result, SnowflakeId, TimeSource};

/// Mutable issuance state, guarded by the generator's mutex.
struct GeneratorState {
    /// Relative millisecond of the most recently issued ID. `-1` until the
    /// first issuance.
    last_timestamp: i64,
    /// Intra-millisecond counter; resets to 0 on every new tick.
    sequence: i64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// One mutex serializes every call to [`next_id`], so a single instance
/// observes a total order over issuance: no two calls return the same value,
/// and within that order each ID's (timestamp, sequence) pair is
/// non-decreasing. Share an instance across threads with
/// `Arc<SnowflakeGenerator<_>>`.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Strict per-instance issue order
/// - ✅ Usable after a clock regression (the failed call returns an error,
///   nothing else changes)
///
/// There is no public reset or state inspection: the surface is construction
/// plus [`next_id`].
///
/// [`next_id`]: Self::next_id
pub struct SnowflakeGenerator<T>
where
    T: TimeSource<i64>,
{
    machine_id: MachineId,
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<GeneratorState>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<GeneratorState>,
    time: T,
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource<i64>,
{
    /// Creates a new [`SnowflakeGenerator`] for the given node identity.
    ///
    /// # Parameters
    ///
    /// - `datacenter_id`: datacenter portion of the node identity, `0..=31`
    /// - `worker_id`: worker portion of the node identity, `0..=31`
    /// - `time`: a [`TimeSource`] implementation (e.g., [`SystemClock`]) that
    ///   supplies epoch-relative milliseconds during ID generation
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatacenterIdOutOfRange`] or
    /// [`Error::WorkerIdOutOfRange`] when the corresponding input is out of
    /// bounds; no partially constructed generator escapes.
    ///
    /// # Example
    /// ```
    /// use frostid::{SnowflakeGenerator, SystemClock};
    ///
    /// let generator = SnowflakeGenerator::new(1, 7, SystemClock::default())?;
    /// let id = generator.next_id()?;
    /// assert!(id.is_valid());
    /// # Ok::<(), frostid::Error>(())
    /// ```
    ///
    /// [`SystemClock`]: crate::SystemClock
    pub fn new(datacenter_id: i64, worker_id: i64, time: T) -> Result<Self> {
        Ok(Self::from_machine_id(
            MachineId::new(datacenter_id, worker_id)?,
            time,
        ))
    }

    /// Creates a new [`SnowflakeGenerator`] from a pre-validated identity.
    pub fn from_machine_id(machine_id: MachineId, time: T) -> Self {
        let state = GeneratorState {
            last_timestamp: -1,
            sequence: 0,
        };
        Self {
            machine_id,
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(state),
            time,
        }
    }

    /// Generates the next ID.
    ///
    /// The entire call runs under the generator's lock. Within one
    /// millisecond the sequence increments; when all 4096 sequence values of
    /// a millisecond are spent, the call busy-waits (still holding the lock)
    /// until the clock advances, so exhaustion is never an error and never a
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] when the clock reads earlier
    /// than the last issued ID's millisecond, carrying the regression
    /// magnitude. The call issues nothing; the generator state is untouched
    /// and later calls succeed once the clock catches up.
    ///
    /// # Example
    /// ```
    /// use frostid::{SnowflakeGenerator, SystemClock};
    ///
    /// let generator = SnowflakeGenerator::new(0, 0, SystemClock::default())?;
    /// let a = generator.next_id()?;
    /// let b = generator.next_id()?;
    /// assert_ne!(a, b);
    /// # Ok::<(), frostid::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.lock();
        let mut now = self.current_tick();

        match now.cmp(&state.last_timestamp) {
            Ordering::Less => {
                return Err(Self::cold_clock_behind(now, state.last_timestamp));
            }
            Ordering::Equal => {
                state.sequence = (state.sequence + 1) & SnowflakeId::SEQUENCE_MASK;
                if state.sequence == 0 {
                    // Sequence exhausted for this tick.
                    now = self.wait_until_next_tick(state.last_timestamp);
                }
            }
            Ordering::Greater => {
                state.sequence = 0;
            }
        }

        state.last_timestamp = now;
        Ok(SnowflakeId::from_parts(
            now,
            self.machine_id.to_raw(),
            state.sequence,
        ))
    }

    /// Current relative tick, masked to the 41 bits the layout reserves for
    /// time. Readings past the ~69-year range wrap silently.
    fn current_tick(&self) -> i64 {
        self.time.current_millis() & SnowflakeId::TIMESTAMP_MASK
    }

    /// Tight poll until the clock strictly exceeds `last`. No sleep, no
    /// yield: the expected wait is under a millisecond, and the lock stays
    /// held so concurrent callers queue in order behind it.
    fn wait_until_next_tick(&self, last: i64) -> i64 {
        let mut now = self.current_tick();
        while now <= last {
            core::hint::spin_loop();
            now = self.current_tick();
        }
        now
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: i64, last_timestamp: i64) -> Error {
        let behind_ms = last_timestamp - now;
        debug_assert!(behind_ms > 0);
        Error::ClockMovedBackwards { behind_ms }
    }
}
