use crate::MachineId;
use core::fmt;

/// A 64-bit Snowflake ID using the deployed `frostid` layout
///
/// Field widths are the classic split:
///
/// - 1 bit reserved (sign)
/// - 41 bits timestamp (ms since [`CUSTOM_EPOCH`])
/// - 10 bits machine ID (datacenter ID (5) and worker ID (5))
/// - 12 bits sequence
///
/// The packing shifts, however, are **not** the disjoint 22/12/0 those widths
/// would suggest. Production IDs were issued with the timestamp shifted by
/// only 9 bits:
///
/// ```text
/// raw = ((timestamp & MASK_41) << 9) | (machine_id << 12) | sequence
/// ```
///
/// so the timestamp's low bits overlap the machine field (bits 12..=21) and
/// the sequence's top three bits (bits 9..=11). That layout is preserved
/// bit-for-bit here: changing [`Self::TIMESTAMP_SHIFT`] to 22 would restore
/// the clean split but alter every previously issued value.
///
/// Consequences of the overlap, stated once so callers can reason about it:
///
/// - Raw values sort in issue order only while the OR merges no set bits.
///   With machine ID 0 and fewer than 512 IDs per millisecond, raws are
///   strictly increasing and unique.
/// - Field extraction reverses the same shifts, so an extracted field equals
///   what the generator packed only under the same no-merge condition.
///
/// [`CUSTOM_EPOCH`]: crate::CUSTOM_EPOCH
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Number of bits reserved for the timestamp field.
    pub const TIMESTAMP_BITS: i64 = 41;

    /// Number of bits reserved for the machine ID field.
    pub const MACHINE_ID_BITS: i64 = 10;

    /// Number of bits reserved for the sequence field.
    pub const SEQUENCE_BITS: i64 = 12;

    /// Bitmask for the 41-bit timestamp field.
    pub const TIMESTAMP_MASK: i64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for the 10-bit machine ID field.
    pub const MACHINE_ID_MASK: i64 = (1 << Self::MACHINE_ID_BITS) - 1;

    /// Bitmask for the 12-bit sequence field.
    pub const SEQUENCE_MASK: i64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits the timestamp is shifted in the packed value.
    ///
    /// Deliberately 9, not 22. See the type-level docs before "fixing" this.
    pub const TIMESTAMP_SHIFT: i64 = 9;

    /// Number of bits the machine ID is shifted in the packed value.
    pub const MACHINE_ID_SHIFT: i64 = 12;

    /// Number of bits the sequence is shifted in the packed value (bit 0).
    pub const SEQUENCE_SHIFT: i64 = 0;

    /// Largest raw value the packing can produce (`2^50 - 1`).
    pub const MAX: i64 = (1 << 50) - 1;

    /// Packs the three components with the deployed shifts.
    ///
    /// Each component is masked to its field width first; a timestamp beyond
    /// the 41-bit range wraps silently.
    pub const fn from_parts(timestamp: i64, machine_id: i64, sequence: i64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let machine_id = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | machine_id | sequence,
        }
    }

    /// Extracts the timestamp from the packed ID.
    ///
    /// Faithful to the packed value only when the machine ID is 0 and the
    /// sequence is below 512 (see the type-level docs).
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the machine ID from the packed ID.
    ///
    /// Faithful only when bits 3..=12 of the packed timestamp are zero.
    pub const fn machine_id(&self) -> i64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the datacenter half of the machine ID field.
    pub const fn datacenter_id(&self) -> i64 {
        self.machine_id() >> MachineId::WORKER_ID_BITS
    }

    /// Extracts the worker half of the machine ID field.
    pub const fn worker_id(&self) -> i64 {
        self.machine_id() & MachineId::MAX_WORKER_ID
    }

    /// Extracts the sequence number from the packed ID.
    ///
    /// The top three bits are faithful only when bits 0..=2 of the packed
    /// timestamp are zero.
    pub const fn sequence(&self) -> i64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns true if the raw value lies in the packable range.
    pub const fn is_valid(&self) -> bool {
        self.id >= 0 && self.id <= Self::MAX
    }

    /// Converts this ID into its raw `i64` representation.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Converts a raw `i64` into an ID without validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 19-digit string.
    ///
    /// All packable values are non-negative and fit in 19 decimal digits, so
    /// the padded strings sort lexicographically like the raw values.
    pub fn to_padded_string(&self) -> String {
        format!("{:019}", self.id)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("machine_id", &self.machine_id())
            .field("datacenter_id", &self.datacenter_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_matches_the_deployed_shifts() {
        let timestamp = 123_456;
        let machine_id = 69;
        let sequence = 7;

        let id = SnowflakeId::from_parts(timestamp, machine_id, sequence);
        assert_eq!(
            id.to_raw(),
            (timestamp << 9) | (machine_id << 12) | sequence
        );
    }

    #[test]
    fn components_are_masked_to_field_width() {
        // One past each field's mask packs the same as zero.
        let wrapped = SnowflakeId::from_parts(SnowflakeId::TIMESTAMP_MASK + 1, 0, 0);
        assert_eq!(wrapped, SnowflakeId::from_parts(0, 0, 0));

        let wrapped = SnowflakeId::from_parts(0, SnowflakeId::MACHINE_ID_MASK + 1, 0);
        assert_eq!(wrapped, SnowflakeId::from_parts(0, 0, 0));

        let wrapped = SnowflakeId::from_parts(0, 0, SnowflakeId::SEQUENCE_MASK + 1);
        assert_eq!(wrapped, SnowflakeId::from_parts(0, 0, 0));
    }

    #[test]
    fn fields_decode_in_the_no_merge_regime() {
        // Machine id 0, sequence below 512: timestamp and sequence are exact.
        let id = SnowflakeId::from_parts(987_654_321, 0, 511);
        assert_eq!(id.timestamp(), 987_654_321);
        assert_eq!(id.machine_id(), 0);
        assert_eq!(id.sequence(), 511);

        // Timestamp with bits 0..=12 clear: the machine field is exact.
        let tick = 3 << 13;
        let id = SnowflakeId::from_parts(tick, (2 << 5) | 5, 7);
        assert_eq!(id.machine_id(), (2 << 5) | 5);
        assert_eq!(id.datacenter_id(), 2);
        assert_eq!(id.worker_id(), 5);
        assert_eq!(id.sequence(), 7);
    }

    #[test]
    fn overlapping_layout_is_preserved_bit_for_bit() {
        // Timestamp bit 0 lands on sequence bit 9. This collision is the
        // compatibility surface, not an accident.
        assert_eq!(
            SnowflakeId::from_parts(1, 0, 0),
            SnowflakeId::from_parts(0, 0, 512)
        );
        // Timestamp bit 3 lands on machine bit 0.
        assert_eq!(
            SnowflakeId::from_parts(8, 0, 0),
            SnowflakeId::from_parts(0, 1, 0)
        );
    }

    #[test]
    fn max_raw_value_is_packable() {
        let id = SnowflakeId::from_parts(
            SnowflakeId::TIMESTAMP_MASK,
            SnowflakeId::MACHINE_ID_MASK,
            SnowflakeId::SEQUENCE_MASK,
        );
        assert_eq!(id.to_raw(), SnowflakeId::MAX);
        assert!(id.is_valid());
    }

    #[test]
    fn validity_bounds() {
        assert!(SnowflakeId::from_raw(0).is_valid());
        assert!(SnowflakeId::from_raw(SnowflakeId::MAX).is_valid());
        assert!(!SnowflakeId::from_raw(-1).is_valid());
        assert!(!SnowflakeId::from_raw(SnowflakeId::MAX + 1).is_valid());
        assert!(!SnowflakeId::from_raw(i64::MAX).is_valid());
    }

    #[test]
    fn padded_string_is_fixed_width() {
        assert_eq!(SnowflakeId::from_raw(42).to_padded_string().len(), 19);
        assert_eq!(
            SnowflakeId::from_raw(SnowflakeId::MAX).to_padded_string().len(),
            19
        );
        assert_eq!(
            SnowflakeId::from_raw(42).to_padded_string(),
            "0000000000000000042"
        );
    }
}
