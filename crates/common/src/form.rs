//! `name=value` extraction from an `&`-delimited form body.
//!
//! Values are returned as a view into the caller's buffer and are not
//! decoded: no `%XX` handling, no `+` to space.

use crate::request::find_subslice;

/// Location of one form field's value inside a body buffer.
///
/// `found == true` implies `offset + length <= body.len()` for the body the
/// view was produced from. A view must not be applied to any other buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamView {
    pub found: bool,
    pub offset: usize,
    pub length: usize,
}

impl ParamView {
    const ABSENT: Self = Self {
        found: false,
        offset: 0,
        length: 0,
    };

    /// Borrow the value bytes from `body`, or `None` if the field was absent.
    pub fn value<'a>(&self, body: &'a [u8]) -> Option<&'a [u8]> {
        if !self.found {
            return None;
        }
        body.get(self.offset..self.offset + self.length)
    }

    /// Like [`ParamView::value`], but an empty value (`text=&...`) counts as
    /// not supplied.
    pub fn supplied<'a>(&self, body: &'a [u8]) -> Option<&'a [u8]> {
        self.value(body).filter(|v| !v.is_empty())
    }
}

/// Locate the first occurrence of `name` in `body` and return a view of the
/// value that follows it.
///
/// `name` includes the `=` (e.g. `b"text="`). The value starts immediately
/// after the match and ends at the first `&`, or at the end of the scan
/// window: at most `max_scan` bytes past the value start, and never past the
/// end of `body`.
pub fn find_param(body: &[u8], name: &[u8], max_scan: usize) -> ParamView {
    let Some(pos) = find_subslice(body, name) else {
        return ParamView::ABSENT;
    };
    let offset = pos + name.len();
    let window_end = body.len().min(offset.saturating_add(max_scan));
    let window = &body[offset..window_end];
    let length = window
        .iter()
        .position(|&b| b == b'&')
        .unwrap_or(window.len());

    ParamView {
        found: true,
        offset,
        length,
    }
}
