//! Logical to physical index mapping for containers.

use crate::error::{RuntimeError, RuntimeResult};

/// Map a logical index onto a physical slot of a container of `length`.
///
/// Non-negative indices address slots from the front, negative indices
/// count back from the end (`-1` is the last slot).
///
/// # Errors
///
/// Returns [`RuntimeError::OutOfRange`] when the resulting index falls
/// outside `[0, length)`.
///
/// # Examples
///
/// ```
/// use core_types::normalise_index;
///
/// assert_eq!(normalise_index(0, 3).unwrap(), 0);
/// assert_eq!(normalise_index(-1, 3).unwrap(), 2);
/// assert!(normalise_index(3, 3).is_err());
/// assert!(normalise_index(-4, 3).is_err());
/// ```
pub fn normalise_index(logical: i64, length: usize) -> RuntimeResult<usize> {
    let out_of_range = || RuntimeError::OutOfRange {
        index: logical,
        length,
    };
    let len = i64::try_from(length).map_err(|_| out_of_range())?;
    let physical = if logical >= 0 { logical } else { len + logical };
    if physical < 0 || physical >= len {
        return Err(out_of_range());
    }
    usize::try_from(physical).map_err(|_| out_of_range())
}
