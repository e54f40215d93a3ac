pub type Result<T> = core::result::Result<T, Error>;

/// All possible errors that `frostid` can produce.
///
/// Construction fails only on an out-of-range node identity; issuance fails
/// only when the wall clock is observed behind the last issued ID. Sequence
/// exhaustion is never an error: the generator waits for the next
/// millisecond instead.
#[derive(Clone, Copy, PartialEq, Eq, thiserror::Error, Debug)]
pub enum Error {
    /// The datacenter id fell outside the 5-bit field.
    #[error("datacenter id {value} out of range (expected 0..=31)")]
    DatacenterIdOutOfRange { value: i64 },

    /// The worker id fell outside the 5-bit field.
    #[error("worker id {value} out of range (expected 0..=31)")]
    WorkerIdOutOfRange { value: i64 },

    /// The clock moved backwards relative to the last issued ID.
    ///
    /// Not retried internally. The generator stays usable: its last-issued
    /// timestamp is left untouched, so issuance resumes once the clock
    /// catches back up.
    #[error("clock moved backwards: refusing to generate an id for {behind_ms} ms")]
    ClockMovedBackwards { behind_ms: i64 },
}
