//! Big-endian byte buffer.
//!
//! Every memory access is routed through this 8-byte buffer so that all
//! granularities share one byte order: the value occupies the buffer
//! most-significant byte first, and an access of `n` bytes uses the last `n`
//! bytes of the buffer.

/// Width of the buffer in bytes.
const WIDTH: usize = 8;

/// An 8-byte big-endian staging buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: [u8; WIDTH],
}

impl ByteBuffer {
    /// Stages a 64-bit value.
    pub const fn from_value(value: u64) -> Self {
        Self { bytes: value.to_be_bytes() }
    }

    /// Stages the bytes read from memory, right-aligned and zero-filled.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Up to eight bytes, most significant first.
    pub fn from_tail(bytes: &[u8]) -> Self {
        let mut buf = Self::default();
        let len = bytes.len().min(WIDTH);
        buf.bytes[WIDTH - len..].copy_from_slice(&bytes[..len]);
        buf
    }

    /// Returns the low `size` bytes, most significant first.
    pub fn tail(&self, size: usize) -> &[u8] {
        &self.bytes[WIDTH - size.min(WIDTH)..]
    }

    /// Returns the staged value.
    pub const fn value(&self) -> u64 {
        u64::from_be_bytes(self.bytes)
    }
}
