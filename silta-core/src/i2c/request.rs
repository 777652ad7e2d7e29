//! Transaction request type

use heapless::Vec;

use super::error::I2cError;

/// Highest 7-bit address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Maximum number of bytes in the write phase
pub const MAX_WRITE_LEN: usize = 124;

/// Maximum number of bytes in the read phase
pub const MAX_READ_LEN: usize = 128;

/// Bytes returned by a successful read phase
pub type ReadBuffer = Vec<u8, MAX_READ_LEN>;

/// One write-then-read transaction
///
/// Borrows the write bytes from the caller for the duration of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRequest<'a> {
    address: u8,
    write: &'a [u8],
    read_len: u8,
}

impl<'a> TransactionRequest<'a> {
    /// Build a request, checking the bounds of every field
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `write` - Bytes sent in the write phase (may be empty)
    /// * `read_len` - Bytes expected in the read phase (may be zero)
    pub fn new(address: u8, write: &'a [u8], read_len: u8) -> Result<Self, I2cError> {
        if address > MAX_ADDRESS
            || write.len() > MAX_WRITE_LEN
            || read_len as usize > MAX_READ_LEN
        {
            return Err(I2cError::InvalidRequest);
        }

        Ok(Self {
            address,
            write,
            read_len,
        })
    }

    /// 7-bit device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write-phase bytes
    pub fn write(&self) -> &'a [u8] {
        self.write
    }

    /// Number of bytes to read
    pub fn read_len(&self) -> u8 {
        self.read_len
    }

    /// Check whether this is a presence check (no data in either direction)
    pub fn is_presence_check(&self) -> bool {
        self.write.is_empty() && self.read_len == 0
    }
}
