//! Capacity-checked copies and fixed-capacity scratch buffers.
//!
//! Small formatted values (status code, content length) are rendered into a
//! [`ScratchBuf`] on the stack instead of a heap `String`. All writes go
//! through [`append_bounded`], which never writes past the destination.

use core::fmt;

/// Copy at most `max_count` bytes of `src` into `dest` starting at
/// `write_offset`, returning the new write offset.
///
/// The copy is clamped to the remaining capacity of `dest`, so it can never
/// overflow. A zero-length copy (including a `write_offset` at or beyond the
/// end of `dest`) is a no-op and returns `write_offset` unchanged.
pub fn append_bounded(dest: &mut [u8], write_offset: usize, src: &[u8], max_count: usize) -> usize {
    let remaining = dest.len().saturating_sub(write_offset);
    let count = max_count.min(src.len()).min(remaining);
    if count == 0 {
        return write_offset;
    }
    dest[write_offset..write_offset + count].copy_from_slice(&src[..count]);
    write_offset + count
}

/// Fixed-capacity byte buffer with explicit length tracking.
///
/// Never grows. Writes beyond `N` bytes are truncated.
#[derive(Clone, Copy)]
pub struct ScratchBuf<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> ScratchBuf<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Render `value` with its `Display` impl, truncated to `N` bytes.
    pub fn display(value: impl fmt::Display) -> Self {
        let mut buf = Self::new();
        // Writes into a ScratchBuf never fail; overflow is truncated.
        let _ = fmt::Write::write_fmt(&mut buf, format_args!("{value}"));
        buf
    }

    /// Append as much of `src` as fits. Returns the number of bytes copied.
    pub fn push_bytes(&mut self, src: &[u8]) -> usize {
        let before = self.len;
        self.len = append_bounded(&mut self.bytes, self.len, src, src.len());
        self.len - before
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }


}

impl<const N: usize> Default for ScratchBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for ScratchBuf<N> {
    /// Truncating write: output past capacity is dropped, not reported.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for ScratchBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScratchBuf")
            .field("len", &self.len)
            .field("capacity", &N)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;

    #[test]
    fn append_copies_within_capacity() {
        let mut dest = [0u8; 8];
        let off = append_bounded(&mut dest, 0, b"abc", 3);
        assert_eq!(off, 3);
        let off = append_bounded(&mut dest, off, b"defg", 4);
        assert_eq!(off, 7);
        assert_eq!(&dest[..off], b"abcdefg");
    }

    #[test]
    fn append_clamps_to_remaining_capacity() {
        let mut dest = [0u8; 4];
        let off = append_bounded(&mut dest, 2, b"xyz", 3);
        assert_eq!(off, 4);
        assert_eq!(&dest, b"\0\0xy");
    }

    #[test]
    fn append_respects_max_count() {
        let mut dest = [0u8; 8];
        let off = append_bounded(&mut dest, 0, b"hello", 2);
        assert_eq!(off, 2);
        assert_eq!(&dest[..2], b"he");
    }

    #[test]
    fn append_zero_count_is_noop() {
        let mut dest = [7u8; 4];
        assert_eq!(append_bounded(&mut dest, 1, b"abc", 0), 1);
        assert_eq!(append_bounded(&mut dest, 4, b"abc", 3), 4);
        assert_eq!(append_bounded(&mut dest, 9, b"abc", 3), 9);
        assert_eq!(dest, [7u8; 4]);
    }

    #[test]
    fn scratch_formats_decimal() {
        let mut s = ScratchBuf::<20>::new();
        write!(s, "{}", 4096usize).unwrap();
        assert_eq!(s.as_bytes(), b"4096");
        assert_eq!(s.as_bytes().len(), 4);
    }

    #[test]
    fn scratch_truncates_instead_of_growing() {
        let mut s = ScratchBuf::<3>::new();
        write!(s, "{}", 123456).unwrap();
        assert_eq!(s.as_bytes(), b"123");
        assert_eq!(s.push_bytes(b"more"), 0);
        assert_eq!(s.as_bytes().len(), 3);
    }

    #[test]
    fn scratch_display_renders_value() {
        assert_eq!(ScratchBuf::<5>::display(400u16).as_bytes(), b"400");
        assert_eq!(ScratchBuf::<2>::display(12345).as_bytes(), b"12");
    }

    #[test]
    fn scratch_starts_empty() {
        let mut s = ScratchBuf::<8>::default();
        assert_eq!(s.as_bytes(), b"");
        assert_eq!(s.push_bytes(b"abc"), 3);
        assert_eq!(s.as_bytes(), b"abc");
    }
}
