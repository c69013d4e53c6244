use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ReconcileError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ReconcileError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DocumentStatus {
    Missing => "Missing",
    Pending => "Pending",
    Verified => "Verified",
    Rejected => "Rejected",
    Expired => "Expired",
});

str_enum!(OwnerType {
    Case => "CASE",
    Party => "PARTY",
});

impl DocumentStatus {
    /// `Missing` is virtual: it marks a requirement with nothing uploaded.
    pub fn has_content(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}
