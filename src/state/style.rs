//! Conversational style

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Behavior profile selecting the active policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Default,
    Involved,
    /// Preference changes need an explicit confirmation round-trip
    Considerate,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Default, Style::Involved, Style::Considerate];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Default => "default",
            Style::Involved => "involved",
            Style::Considerate => "considerate",
        }
    }

    pub fn requires_confirmation(self) -> bool {
        self == Style::Considerate
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported style `{0}`")]
pub struct UnsupportedStyle(pub String);

impl FromStr for Style {
    type Err = UnsupportedStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == s.trim())
            .ok_or_else(|| UnsupportedStyle(s.to_string()))
    }
}
