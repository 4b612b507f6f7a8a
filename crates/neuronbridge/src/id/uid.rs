use core::{fmt, str::FromStr, time::Duration};

use crate::Error;

/// A 64-bit JACS UID.
///
/// - 42 bits timestamp (ms since [`JACS_EPOCH`])
/// - 10 bits sequence (retry index within one millisecond)
/// - 4 bits deployment context
/// - 8 bits host component (last octet of the host's IPv4 address)
///
/// ```text
///  Bit Index:  63             22 21            12 11             8 7          0
///              +----------------+----------------+----------------+------------+
///  Field:      | timestamp (42) | sequence (10)  | context (4)    | host (8)   |
///              +----------------+----------------+----------------+------------+
///              |<----- MSB --------------- 64 bits -------------- LSB -------->|
/// ```
///
/// Ordering follows the raw value, so UIDs from one host and context sort by
/// time and then by sequence.
///
/// [`JACS_EPOCH`]: crate::time::JACS_EPOCH
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct JacsUid {
    id: u64,
}

impl JacsUid {
    /// Bitmask for the 42-bit timestamp field. Occupies bits 22 through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << 42) - 1;

    /// Bitmask for the 10-bit sequence field. Occupies bits 12 through 21.
    pub const SEQUENCE_MASK: u64 = (1 << 10) - 1;

    /// Bitmask for the 4-bit deployment context. Occupies bits 8 through 11.
    pub const CONTEXT_MASK: u64 = (1 << 4) - 1;

    /// Bitmask for the 8-bit host component. Occupies bits 0 through 7.
    pub const HOST_MASK: u64 = (1 << 8) - 1;

    pub const TIMESTAMP_SHIFT: u64 = 22;
    pub const SEQUENCE_SHIFT: u64 = 12;
    pub const CONTEXT_SHIFT: u64 = 8;
    pub const HOST_SHIFT: u64 = 0;

    /// Packs the four fields into a UID. Each value is masked to its width.
    ///
    /// # Example
    ///
    /// ```
    /// use neuronbridge::id::JacsUid;
    ///
    /// let uid = JacsUid::from_components(1_000, 3, 2, 17);
    /// assert_eq!(uid.timestamp(), 1_000);
    /// assert_eq!(uid.sequence(), 3);
    /// assert_eq!(uid.deployment_context(), 2);
    /// assert_eq!(uid.host(), 17);
    /// ```
    #[must_use]
    pub const fn from_components(timestamp: u64, sequence: u64, context: u8, host: u8) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        let context = (context as u64 & Self::CONTEXT_MASK) << Self::CONTEXT_SHIFT;
        let host = (host as u64 & Self::HOST_MASK) << Self::HOST_SHIFT;
        Self {
            id: timestamp | sequence | context | host,
        }
    }

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Milliseconds since [`JACS_EPOCH`](crate::time::JACS_EPOCH).
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    #[must_use]
    pub const fn deployment_context(&self) -> u8 {
        ((self.id >> Self::CONTEXT_SHIFT) & Self::CONTEXT_MASK) as u8
    }

    #[must_use]
    pub const fn host(&self) -> u8 {
        ((self.id >> Self::HOST_SHIFT) & Self::HOST_MASK) as u8
    }

    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    #[must_use]
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    #[must_use]
    pub const fn max_deployment_context() -> u8 {
        Self::CONTEXT_MASK as u8
    }

    /// Wall-clock time encoded in this UID, as milliseconds since the Unix
    /// epoch, given the epoch the generator's clock was anchored to.
    #[must_use]
    pub const fn unix_millis(&self, epoch: Duration) -> u64 {
        self.timestamp() + epoch.as_millis() as u64
    }

    /// Returns true if the sequence can be incremented within the current
    /// millisecond.
    #[must_use]
    pub const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new UID in the same millisecond with the sequence
    /// incremented.
    #[must_use]
    pub const fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.sequence() + 1,
            self.deployment_context(),
            self.host(),
        )
    }

    /// Returns a new UID at a later timestamp with the sequence reset to zero.
    #[must_use]
    pub const fn rollover_to_timestamp(&self, timestamp: u64) -> Self {
        Self::from_components(timestamp, 0, self.deployment_context(), self.host())
    }

    /// True when both UIDs carry the same deployment context and host
    /// component, i.e. they can only differ in timestamp and sequence.
    #[must_use]
    pub const fn same_origin(&self, other: &Self) -> bool {
        let origin = (Self::CONTEXT_MASK << Self::CONTEXT_SHIFT) | Self::HOST_MASK;
        (self.id & origin) == (other.id & origin)
    }

    /// Returns the UID as a zero-padded 20-digit string.
    #[must_use]
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<u64> for JacsUid {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<JacsUid> for u64 {
    fn from(uid: JacsUid) -> Self {
        uid.to_raw()
    }
}

impl FromStr for JacsUid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self::from_raw)
            .map_err(|_| Error::ParseUid {
                input: s.to_owned(),
            })
    }
}

impl fmt::Display for JacsUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for JacsUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JacsUid")
            .field("id", &format_args!("0x{:016x} ({})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("sequence", &self.sequence())
            .field("deployment_context", &self.deployment_context())
            .field("host", &self.host())
            .finish()
    }
}
