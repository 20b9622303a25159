//! BSON Timestamp (internal replication timestamp).

/// A replication timestamp: 32-bit seconds plus a 32-bit ordinal.
///
/// On the wire the increment is written first, then the time, both
/// little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub time: u32,
    /// Ordinal for operations within a given second.
    pub increment: u32,
}

impl Timestamp {
    pub fn new(time: u32, increment: u32) -> Timestamp {
        Timestamp { time, increment }
    }
}
