//! Offset/length views over caller-owned buffers.

use crate::error::{CipherError, Result};

/// A `[offset, offset + len)` window into a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Index of the first byte.
    pub offset: usize,
    /// Number of bytes.
    pub len: usize,
}

impl Region {
    /// Creates a region; bounds are checked when it is applied to a buffer.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Builds a region from the signed offset/length pair used at the C boundary.
    pub fn from_abi(offset: i32, len: i32) -> Result<Self> {
        let offset = usize::try_from(offset).map_err(|_| CipherError::NegativeArgument {
            what: "offset",
            value: offset.into(),
        })?;
        let len = usize::try_from(len).map_err(|_| CipherError::NegativeArgument {
            what: "length",
            value: len.into(),
        })?;
        Ok(Self { offset, len })
    }

    /// One past the last byte, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.len)
    }

    fn checked_end(&self, buffer_len: usize) -> Result<usize> {
        self.end()
            .filter(|end| *end <= buffer_len)
            .ok_or(CipherError::OutOfBounds {
                offset: self.offset,
                len: self.len,
                buffer_len,
            })
    }

    /// Borrows the region out of `buf`.
    pub fn slice<'a>(&self, buf: &'a [u8]) -> Result<&'a [u8]> {
        let end = self.checked_end(buf.len())?;
        Ok(&buf[self.offset..end])
    }

    /// Mutable counterpart of [`Region::slice`].
    pub fn slice_mut<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8]> {
        let end = self.checked_end(buf.len())?;
        Ok(&mut buf[self.offset..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_inside_bounds() {
        let buf: Vec<u8> = (0..32).collect();
        let view = Region::new(4, 8).slice(&buf).unwrap();
        assert_eq!(view, &buf[4..12]);
        assert!(Region::new(32, 0).slice(&buf).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_bounds() {
        let mut buf = [0u8; 16];
        assert_eq!(
            Region::new(8, 9).slice(&buf),
            Err(CipherError::OutOfBounds {
                offset: 8,
                len: 9,
                buffer_len: 16
            })
        );
        assert!(Region::new(usize::MAX, 2).slice_mut(&mut buf).is_err());
    }

    #[test]
    fn rejects_negative_abi_values() {
        assert_eq!(
            Region::from_abi(-1, 16),
            Err(CipherError::NegativeArgument {
                what: "offset",
                value: -1
            })
        );
        assert!(matches!(
            Region::from_abi(0, i32::MIN),
            Err(CipherError::NegativeArgument { what: "length", .. })
        ));
        assert_eq!(Region::from_abi(3, 16), Ok(Region::new(3, 16)));
    }
}
