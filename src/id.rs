//! Opaque identifiers for timers and groups

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TimerError;

macro_rules! define_id {
    ($(#[$meta:meta])* pub struct $name:ident { len: $len:expr, kind: $kind:expr }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Length of the identifier string.
            pub const LEN: usize = $len;

            pub(crate) fn generate() -> Self {
                let raw = Uuid::new_v4().simple().to_string();
                Self(raw[raw.len() - Self::LEN..].to_string())
            }

            /// Parse an identifier, rejecting strings of any other shape.
            pub fn parse(value: &str) -> Result<Self, TimerError> {
                let well_formed = value.len() == Self::LEN
                    && value.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase());
                if well_formed {
                    Ok(Self(value.to_string()))
                } else {
                    Err(TimerError::NotAnInstance {
                        value: value.to_string(),
                        expected: $kind,
                    })
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = TimerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TimerError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier of a [`Timer`](crate::timer::Timer).
    pub struct TimerId { len: 8, kind: "timer" }
}

define_id! {
    /// Unique identifier of a [`TimerGroup`](crate::group::TimerGroup).
    pub struct GroupId { len: 6, kind: "group" }
}
