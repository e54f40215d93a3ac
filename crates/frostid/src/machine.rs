use crate::{Error, Result};
use core::fmt;

/// A validated node identity.
///
/// Combines a 5-bit datacenter id and a 5-bit worker id into the single
/// 10-bit machine field encoded in every generated ID. Both halves must lie
/// in `0..=31`; construction is the only place this is checked, so a
/// `MachineId` in hand is always in range.
///
/// Distinct `(datacenter_id, worker_id)` pairs must be allocated to distinct
/// nodes by an external coordinator. `frostid` does not enforce fleet-wide
/// uniqueness.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MachineId {
    id: i64,
}

impl MachineId {
    /// Number of bits reserved for the datacenter id.
    pub const DATACENTER_ID_BITS: i64 = 5;

    /// Number of bits reserved for the worker id.
    pub const WORKER_ID_BITS: i64 = 5;

    /// Largest permitted datacenter id (31).
    pub const MAX_DATACENTER_ID: i64 = (1 << Self::DATACENTER_ID_BITS) - 1;

    /// Largest permitted worker id (31).
    pub const MAX_WORKER_ID: i64 = (1 << Self::WORKER_ID_BITS) - 1;

    /// Validates both halves and packs them as
    /// `(datacenter_id << 5) | worker_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatacenterIdOutOfRange`] or
    /// [`Error::WorkerIdOutOfRange`] when the corresponding input falls
    /// outside `0..=31`.
    pub fn new(datacenter_id: i64, worker_id: i64) -> Result<Self> {
        if !(0..=Self::MAX_DATACENTER_ID).contains(&datacenter_id) {
            return Err(Error::DatacenterIdOutOfRange {
                value: datacenter_id,
            });
        }
        if !(0..=Self::MAX_WORKER_ID).contains(&worker_id) {
            return Err(Error::WorkerIdOutOfRange { value: worker_id });
        }
        Ok(Self {
            id: (datacenter_id << Self::WORKER_ID_BITS) | worker_id,
        })
    }

    /// Extracts the datacenter half of the machine field.
    pub const fn datacenter_id(&self) -> i64 {
        self.id >> Self::WORKER_ID_BITS
    }

    /// Extracts the worker half of the machine field.
    pub const fn worker_id(&self) -> i64 {
        self.id & Self::MAX_WORKER_ID
    }

    /// Returns the packed 10-bit machine field.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_every_valid_identity() {
        for datacenter_id in 0..=MachineId::MAX_DATACENTER_ID {
            for worker_id in 0..=MachineId::MAX_WORKER_ID {
                let machine = MachineId::new(datacenter_id, worker_id).expect("in range");
                assert_eq!(machine.to_raw(), (datacenter_id << 5) | worker_id);
                assert_eq!(machine.datacenter_id(), datacenter_id);
                assert_eq!(machine.worker_id(), worker_id);
            }
        }
    }

    #[test]
    fn rejects_out_of_range_datacenter_id() {
        for value in [-1, 32, i64::MAX, i64::MIN] {
            assert_eq!(
                MachineId::new(value, 0),
                Err(Error::DatacenterIdOutOfRange { value })
            );
        }
    }

    #[test]
    fn rejects_out_of_range_worker_id() {
        for value in [-1, 32, i64::MAX, i64::MIN] {
            assert_eq!(
                MachineId::new(0, value),
                Err(Error::WorkerIdOutOfRange { value })
            );
        }
    }

    #[test]
    fn datacenter_is_checked_before_worker() {
        assert_eq!(
            MachineId::new(99, 99),
            Err(Error::DatacenterIdOutOfRange { value: 99 })
        );
    }
}
