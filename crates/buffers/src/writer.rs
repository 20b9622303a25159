//! Binary buffer writer with auto-growing capacity.

/// A binary buffer writer that grows automatically as needed.
///
/// All multi-byte writes are little-endian.
///
/// # Example
///
/// ```
/// use bson_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.i32(2);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x00, 0x00, 0x00]);
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
    /// Allocation size when buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with default allocation size (4KB).
    pub fn new() -> Self {
        Self::with_alloc_size(4 * 1024)
    }

    /// Creates a new writer with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        let uint8 = vec![0u8; alloc_size];
        Self {
            uint8,
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Ensures the buffer has at least `capacity` bytes available.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.uint8.len() - self.x;
        if remaining < capacity {
            let total = self.uint8.len() - self.x0;
            let required = capacity - remaining;
            let total_required = total + required;
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    fn grow(&mut self, new_size: usize) {
        let x0 = self.x0;
        let x = self.x;
        let mut new_buf = vec![0u8; new_size];
        new_buf[..x - x0].copy_from_slice(&self.uint8[x0..x]);
        self.uint8 = new_buf;
        self.x = x - x0;
        self.x0 = 0;
    }

    /// Moves the cursor forward by the given amount, reserving space.
    pub fn move_cursor(&mut self, capacity: usize) {
        self.ensure_capacity(capacity);
        self.x += capacity;
    }

    /// Returns the written data and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.ensure_capacity(4);
        let bytes = val.to_le_bytes();
        self.uint8[self.x..self.x + 4].copy_from_slice(&bytes);
        self.x += 4;
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.ensure_capacity(4);
        let bytes = val.to_le_bytes();
        self.uint8[self.x..self.x + 4].copy_from_slice(&bytes);
        self.x += 4;
    }

    /// Writes a signed 64-bit integer (little-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.ensure_capacity(8);
        let bytes = val.to_le_bytes();
        self.uint8[self.x..self.x + 8].copy_from_slice(&bytes);
        self.x += 8;
    }

    /// Writes a 64-bit floating point number (little-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.ensure_capacity(8);
        let bytes = val.to_le_bytes();
        self.uint8[self.x..self.x + 8].copy_from_slice(&bytes);
        self.x += 8;
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        let bytes = s.as_bytes();
        let length = bytes.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(bytes);
        self.x += length;
        length
    }

    /// Overwrites 4 bytes at an absolute buffer position with a
    /// little-endian i32. Used to backpatch length prefixes reserved with
    /// `move_cursor`. Positions are only stable while `x0 == 0` (no flush
    /// has happened since the writer was created).
    pub fn patch_i32(&mut self, at: usize, val: i32) {
        self.uint8[at..at + 4].copy_from_slice(&val.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_i32_little_endian() {
        let mut writer = Writer::new();
        writer.i32(0x01020304);
        assert_eq!(writer.flush(), [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_utf8() {
        let mut writer = Writer::new();
        writer.utf8("hello");
        assert_eq!(writer.flush(), b"hello");
    }

    #[test]
    fn test_flush_multiple() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        assert_eq!(writer.flush(), [0x01]);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }

    #[test]
    fn test_grow_past_alloc_size() {
        let mut writer = Writer::with_alloc_size(4);
        writer.buf(&[1, 2, 3]);
        writer.i64(-1);
        let data = writer.flush();
        assert_eq!(data.len(), 11);
        assert_eq!(&data[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_patch_i32() {
        let mut writer = Writer::new();
        writer.move_cursor(4); // reserve length slot
        writer.u8(0xff);
        writer.patch_i32(0, 5);
        assert_eq!(writer.flush(), [0x05, 0x00, 0x00, 0x00, 0xff]);
    }

    #[test]
    fn test_i64_roundtrip() {
        let mut writer = Writer::new();
        writer.i64(-9_999_999_999i64);
        let data = writer.flush();
        assert_eq!(data.len(), 8);
        assert_eq!(
            i64::from_le_bytes(data.try_into().unwrap()),
            -9_999_999_999i64
        );
    }
}
