//! Schema versions.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Version of the employee schema a record was written under.
///
/// | version | fields                                   |
/// |---------|------------------------------------------|
/// | V1      | id, name, birthday, gender               |
/// | V2      | V1 + role, email, phone numbers          |
///
/// Readers upgrade older records by filling the fields they lack with
/// defaults: role [`super::Role::Unknown`], no email, no phone numbers.
///
/// A V1 record cannot carry a role. Legacy sample data that pairs a V1 tag
/// with a role has to be re-tagged V2 before it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaVersion {
    /// The original field set.
    V1,
    /// Adds role, email and phone numbers.
    V2,
}

impl SchemaVersion {
    /// The version new records are written under by default.
    pub const CURRENT: Self = Self::V2;

    /// Every known version, oldest first.
    pub const ALL: [Self; 2] = [Self::V1, Self::V2];

    /// Returns the numeric tag stored in encoded records.
    #[must_use]
    pub const fn tag(self) -> u16 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    /// Resolves a numeric tag found in a payload.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedVersion`] for tags newer than
    /// [`SchemaVersion::CURRENT`] and [`CoreError::CorruptPayload`] for 0.
    pub fn from_tag(tag: u64) -> CoreResult<Self> {
        match tag {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            0 => Err(CoreError::corrupt("record version tag 0 is invalid")),
            found => Err(CoreError::UnsupportedVersion {
                what: "record",
                found,
                max_supported: u64::from(Self::CURRENT.tag()),
            }),
        }
    }

    /// Returns true if records of this version carry role, email and
    /// phone numbers.
    #[must_use]
    pub const fn has_contact_fields(self) -> bool {
        matches!(self, Self::V2)
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for version in SchemaVersion::ALL {
            assert_eq!(
                SchemaVersion::from_tag(u64::from(version.tag())).unwrap(),
                version
            );
        }
    }

    #[test]
    fn newer_tag_is_unsupported() {
        assert!(matches!(
            SchemaVersion::from_tag(3),
            Err(CoreError::UnsupportedVersion {
                found: 3,
                max_supported: 2,
                ..
            })
        ));
    }

    #[test]
    fn zero_tag_is_corrupt() {
        assert!(matches!(
            SchemaVersion::from_tag(0),
            Err(CoreError::CorruptPayload { .. })
        ));
    }

    #[test]
    fn ordering_and_default() {
        assert!(SchemaVersion::V1 < SchemaVersion::V2);
        assert_eq!(SchemaVersion::default(), SchemaVersion::CURRENT);
        assert!(!SchemaVersion::V1.has_contact_fields());
        assert_eq!(SchemaVersion::V2.to_string(), "v2");
    }
}
