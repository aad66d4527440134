//! Employee identifier.

use std::fmt;
use std::num::NonZeroU32;

/// Numeric identifier of an employee.
///
/// Employee IDs are:
/// - Positive and within a signed 32-bit integer
///   (`1..=`[`EmployeeId::MAX`]), as the wire format declares them `int32`
/// - Part of the identity key, together with the name
/// - Immutable once an [`super::Employee`] is built
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeId(NonZeroU32);

impl EmployeeId {
    /// Largest accepted ID.
    pub const MAX: u32 = i32::MAX as u32;

    /// Creates an ID from a raw number.
    ///
    /// Returns `None` unless `raw` is in `1..=EmployeeId::MAX`.
    #[must_use]
    pub fn new(raw: i64) -> Option<Self> {
        u32::try_from(raw)
            .ok()
            .filter(|&n| n <= Self::MAX)
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    /// Returns the numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmployeeId({})", self.0)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmployeeId> for u32 {
    fn from(id: EmployeeId) -> Self {
        id.get()
    }
}
