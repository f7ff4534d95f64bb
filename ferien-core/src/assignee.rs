//! Who takes care of a day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FerienError;

/// Assignment tag stored per date. An absent entry means unassigned.
///
/// `Both` is a tag of its own, not the combination of two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assignee {
    P1,
    P2,
    Both,
    Care,
}

impl Assignee {
    pub const ALL: [Assignee; 4] = [Assignee::P1, Assignee::P2, Assignee::Both, Assignee::Care];

    pub fn has_p1(self) -> bool {
        matches!(self, Assignee::P1 | Assignee::Both)
    }

    pub fn has_p2(self) -> bool {
        matches!(self, Assignee::P2 | Assignee::Both)
    }

    pub fn has_care(self) -> bool {
        self == Assignee::Care
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Assignee::P1 => "p1",
            Assignee::P2 => "p2",
            Assignee::Both => "both",
            Assignee::Care => "care",
        }
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assignee {
    type Err = FerienError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p1" => Ok(Assignee::P1),
            "p2" => Ok(Assignee::P2),
            "both" => Ok(Assignee::Both),
            "care" => Ok(Assignee::Care),
            other => Err(FerienError::Serialization(format!(
                "Unknown assignee '{other}', expected p1, p2, both or care"
            ))),
        }
    }
}

/// Next assignment when `clicking` clicks a day currently tagged `current`.
///
/// An empty day takes the clicking identity. An assigned day advances
/// P1 -> P2 -> BOTH -> CARE -> empty, whether or not the clicking identity
/// matches the current tag.
pub fn next_on_click(current: Option<Assignee>, clicking: Assignee) -> Option<Assignee> {
    use Assignee::*;

    match (current, clicking) {
        (None, who) => Some(who),

        // same identity
        (Some(P1), P1) => Some(P2),
        (Some(P2), P2) => Some(Both),
        (Some(Both), Both) => Some(Care),
        (Some(Care), Care) => None,

        // different identity
        (Some(P1), P2 | Both | Care) => Some(P2),
        (Some(P2), P1 | Both | Care) => Some(Both),
        (Some(Both), P1 | P2 | Care) => Some(Care),
        (Some(Care), P1 | P2 | Both) => None,
    }
}
