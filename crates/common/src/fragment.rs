//! Ordered byte-string fragments joined into one exactly-sized buffer.
//!
//! A response is described as a list of borrowed fragments. The total length
//! is computed first so [`join`] allocates once, at the final size.

use crate::buf::append_bounded;
use crate::error::FragmentError;

/// Sum of all fragment lengths.
pub fn total_length(fragments: &[&[u8]]) -> usize {
    fragments.iter().map(|f| f.len()).sum()
}

/// Copy `fragments` contiguously into `dest`.
///
/// `dest` is expected to be exactly [`total_length`] bytes. If it is shorter,
/// the copy is truncated at its end; that indicates a sizing bug in the
/// caller, not a normal path.
pub fn join_into(dest: &mut [u8], fragments: &[&[u8]]) {
    let mut offset = 0;
    for fragment in fragments {
        offset = append_bounded(dest, offset, fragment, fragment.len());
    }
}

/// Join `fragments` into a freshly allocated buffer of exactly
/// [`total_length`] bytes.
pub fn join(fragments: &[&[u8]]) -> Vec<u8> {
    let mut out = vec![0u8; total_length(fragments)];
    join_into(&mut out, fragments);
    out
}

/// Fixed-capacity ordered list of borrowed fragments.
///
/// Holds at most `N` entries on the stack; order is output order.
#[derive(Debug, Clone, Copy)]
pub struct FragmentList<'a, const N: usize> {
    items: [&'a [u8]; N],
    len: usize,
}

const EMPTY: &[u8] = &[];

impl<'a, const N: usize> FragmentList<'a, N> {
    pub const fn new() -> Self {
        Self {
            items: [EMPTY; N],
            len: 0,
        }
    }

    /// Append a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::CapacityExceeded`] if the list already holds
    /// `N` fragments.
    pub fn push(&mut self, fragment: &'a [u8]) -> Result<(), FragmentError> {
        if self.len == N {
            return Err(FragmentError::CapacityExceeded { capacity: N });
        }
        self.items[self.len] = fragment;
        self.len += 1;
        Ok(())
    }

    /// Append every fragment of `other`, in order.
    pub fn extend_from(&mut self, other: &[&'a [u8]]) -> Result<(), FragmentError> {
        other.iter().try_for_each(|&f| self.push(f))
    }

    pub fn as_slice(&self) -> &[&'a [u8]] {
        &self.items[..self.len]
    }

    pub fn total_length(&self) -> usize {
        total_length(self.as_slice())
    }

    pub fn join(&self) -> Vec<u8> {
        join(self.as_slice())
    }
}

impl<const N: usize> Default for FragmentList<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
