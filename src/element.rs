//! Queue elements handed back to callers

use std::cmp::Ordering;
use std::fmt;

use crate::error::QueueError;
use crate::order::compare;

/// An element removed from a [`Queue`](crate::Queue).
///
/// The caller owns it; dropping it releases the value. Elements order the
/// same way the queue sorts them, see [`compare`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    pub(crate) fn new(value: String) -> Self {
        Self { value }
    }

    /// Returns the element's value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the element, returning its value.
    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies the value into `buf` as a NUL-terminated byte string.
    ///
    /// At most `buf.len() - 1` bytes of the value are copied, followed by a
    /// `0` byte, so `buf` is never overrun. An empty `buf` is left untouched.
    /// Returns the number of value bytes copied.
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };
        let bytes = self.value.as_bytes();
        let len = bytes.len().min(room);
        buf[..len].copy_from_slice(&bytes[..len]);
        buf[len] = 0;
        len
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value).finish()
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.value, &other.value)
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.value
    }
}

/// Duplicates `s` into a freshly allocated `String`.
///
/// Reports allocation failure instead of aborting.
pub(crate) fn duplicate(s: &str) -> Result<String, QueueError> {
    let mut value = String::new();
    value
        .try_reserve_exact(s.len())
        .map_err(|_| QueueError::AllocationFailed)?;
    value.push_str(s);
    Ok(value)
}
