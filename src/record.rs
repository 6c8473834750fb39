//! Fixed-width sensor record layout.
//!
//! Records are stored back to back with no framing, so record `n` always
//! starts at byte `n * RECORD_SIZE`. Fields use host byte order and the
//! alignment a C compiler gives the equivalent struct on an LP64 host:
//!
//! ```text
//! +-----------+-------------+----------+---------+-----------+
//! | sensor_id | temperature | humidity | padding | timestamp |
//! |   u32     |    f32      |   f32    |  4 x 0  |    i64    |
//! +-----------+-------------+----------+---------+-----------+
//!  0           4             8          12        16         24
//! ```

/// Size in bytes of one encoded record.
pub const RECORD_SIZE: usize = 24;

const ID_OFFSET: usize = 0;
const TEMPERATURE_OFFSET: usize = 4;
const HUMIDITY_OFFSET: usize = 8;
const PADDING_OFFSET: usize = 12;
const TIMESTAMP_OFFSET: usize = 16;

/// One synthetic sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRecord {
    pub sensor_id: u32,
    pub temperature_celsius: f32,
    pub humidity_percent: f32,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl SensorRecord {
    /// Encode into the on-disk layout. Padding bytes are zero.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[ID_OFFSET..TEMPERATURE_OFFSET].copy_from_slice(&self.sensor_id.to_ne_bytes());
        buf[TEMPERATURE_OFFSET..HUMIDITY_OFFSET]
            .copy_from_slice(&self.temperature_celsius.to_ne_bytes());
        buf[HUMIDITY_OFFSET..PADDING_OFFSET].copy_from_slice(&self.humidity_percent.to_ne_bytes());
        buf[TIMESTAMP_OFFSET..RECORD_SIZE].copy_from_slice(&self.timestamp.to_ne_bytes());
        buf
    }

    /// Decode from the on-disk layout. Padding bytes are ignored.
    pub fn from_bytes(buf: &[u8; RECORD_SIZE]) -> Self {
        Self {
            sensor_id: u32::from_ne_bytes(field(buf, ID_OFFSET)),
            temperature_celsius: f32::from_ne_bytes(field(buf, TEMPERATURE_OFFSET)),
            humidity_percent: f32::from_ne_bytes(field(buf, HUMIDITY_OFFSET)),
            timestamp: i64::from_ne_bytes(field(buf, TIMESTAMP_OFFSET)),
        }
    }

    /// Append the encoded record to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_bytes());
    }

    /// Field-wise equality that compares floats by bit pattern, so NaN
    /// payloads and signed zeros count.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.sensor_id == other.sensor_id
            && self.temperature_celsius.to_bits() == other.temperature_celsius.to_bits()
            && self.humidity_percent.to_bits() == other.humidity_percent.to_bits()
            && self.timestamp == other.timestamp
    }
}

fn field<const N: usize>(buf: &[u8; RECORD_SIZE], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    out
}
