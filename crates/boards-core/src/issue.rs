//! Issue enums and key formatting
//!
//! Issue keys look like `PA-42`: the owning project's key, a dash, and a
//! per-project sequence number. The next number is one past the highest
//! currently held; gaps left by deletions below the maximum stay open.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of work an issue tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum IssueType {
    Task,
    Bug,
    Story,
    Epic,
}

/// Flat status enum. Any status may move to any other; there is no
/// guarded transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum IssueStatus {
    ToDo,
    InProgress,
    Done,
    Canceled,
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum IssuePriority {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

macro_rules! str_enum {
    ($ty:ty { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $ty {
            /// Stable string form used in storage.
            pub fn as_str(self) -> &'static str {
                match self { $(Self::$variant => $s),+ }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant),)+
                    other => Err(format!(concat!("unknown ", stringify!($ty), ": {}"), other)),
                }
            }
        }
    };
}

str_enum!(IssueType {
    Task => "TASK",
    Bug => "BUG",
    Story => "STORY",
    Epic => "EPIC",
});

str_enum!(IssueStatus {
    ToDo => "TO_DO",
    InProgress => "IN_PROGRESS",
    Done => "DONE",
    Canceled => "CANCELED",
});

str_enum!(IssuePriority {
    Lowest => "LOWEST",
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
    Highest => "HIGHEST",
});

/// A formatted issue key: project key prefix plus sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueKey {
    /// The owning project's key, e.g. `PA`
    pub prefix: String,
    /// Per-project sequence number, starting at 1
    pub number: i64,
}

impl IssueKey {
    /// Build the key for the next issue after `latest_number`.
    ///
    /// `latest_number` is the highest existing sequence number for the
    /// project, or `None` when the project has no issues yet.
    pub fn next(project_key: &str, latest_number: Option<i64>) -> Self {
        Self {
            prefix: project_key.to_string(),
            number: latest_number.unwrap_or(0) + 1,
        }
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.number)
    }
}
