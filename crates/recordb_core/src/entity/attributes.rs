//! Attribute value types.
//!
//! Each categorical attribute has a fixed upper-case name used by the
//! text format and a number used by the wire format.

use crate::error::{CoreError, CoreResult};
use recordb_codec::wire::UnknownFields;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident = ($text:literal, $wire:literal) ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant's text name, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            /// Returns the upper-case text name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }

            /// Returns the wire format number.
            #[must_use]
            pub const fn wire_number(self) -> u64 {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }

            /// Looks up a variant by wire format number.
            #[must_use]
            pub const fn from_wire_number(n: u64) -> Option<Self> {
                match n {
                    $( $wire => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            /// Case-insensitive match on the text name.
            fn from_str(s: &str) -> CoreResult<Self> {
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(CoreError::validation(format!(
                    "unknown {} \"{s}\", expected one of {}",
                    stringify!($name).to_lowercase(),
                    Self::NAMES.join(", ")
                )))
            }
        }
    };
}

categorical! {
    /// Gender of an employee.
    Gender {
        /// Male.
        Male = ("MALE", 0),
        /// Female.
        Female = ("FEMALE", 1),
    }
}

categorical! {
    /// Job role. Added in schema version 2; older records read as
    /// [`Role::Unknown`].
    Role {
        /// Not recorded.
        Unknown = ("UNKNOWN", 0),
        /// Architect.
        Architect = ("ARCHITECT", 1),
        /// Consultant.
        Consultant = ("CONSULTANT", 2),
        /// Developer.
        Developer = ("DEVELOPER", 3),
        /// Manager.
        Manager = ("MANAGER", 4),
    }
}

categorical! {
    /// Kind of phone number.
    PhoneType {
        /// Mobile phone.
        Mobile = ("MOBILE", 0),
        /// Home phone.
        Home = ("HOME", 1),
        /// Work phone.
        Work = ("WORK", 2),
        /// Not recognised.
        Unknown = ("UNKNOWN", 3),
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Default for PhoneType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl PhoneType {
    /// Parses console input, falling back to [`PhoneType::Unknown`] for
    /// anything unrecognised.
    ///
    /// Returns the type and whether the input was recognised.
    #[must_use]
    pub fn parse_lenient(input: &str) -> (Self, bool) {
        match input.trim().parse() {
            Ok(kind) => (kind, true),
            Err(_) => (Self::Unknown, false),
        }
    }
}

/// A phone number and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    /// The number as entered.
    pub number: String,
    /// What kind of phone it is.
    pub kind: PhoneType,
    pub(crate) unknown_fields: UnknownFields,
}

impl PhoneNumber {
    /// Creates a phone number.
    pub fn new(number: impl Into<String>, kind: PhoneType) -> Self {
        Self {
            number: number.into(),
            kind,
            unknown_fields: UnknownFields::new(),
        }
    }

    /// Phone fields read from the wire format that this build does not
    /// know, including phone type numbers outside [`PhoneType`].
    #[must_use]
    pub fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }
}
