//! Time-of-day choices for a climb.
//!
//! A climb is stored with a single-character code ("M", "E" or "N") and
//! displayed with its human label ("Morning", "Evening", "Night").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// When during the day a climb took place.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
pub enum ClimbTime {
    #[default]
    #[serde(rename = "M")]
    Morning,
    #[serde(rename = "E")]
    Evening,
    #[serde(rename = "N")]
    Night,
}

impl ClimbTime {
    /// Every choice, in presentation order.
    pub const ALL: [ClimbTime; 3] = [ClimbTime::Morning, ClimbTime::Evening, ClimbTime::Night];

    /// The stored single-character code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Morning => "M",
            Self::Evening => "E",
            Self::Night => "N",
        }
    }

    /// The human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

impl fmt::Display for ClimbTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClimbTime {
    type Err = Error;

    /// Parse a stored code. Labels are not accepted.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "'{s}' is not a valid climb time (expected one of M, E, N)"
                ))
            })
    }
}
