//! Document delivery status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a document is in the intake → publish lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    /// Stored and waiting to be forwarded.
    #[default]
    Received,
    /// Forwarded to the downstream publisher.
    Sent,
    /// Forwarding failed.
    Failed,
}

impl DocumentStatus {
    /// Variant names in declaration order.
    pub const NAMES: &'static [&'static str] = &["RECEIVED", "SENT", "FAILED"];

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }

    /// Position of the variant in declaration order.
    pub fn ordinal(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = docgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RECEIVED" => Ok(Self::Received),
            "SENT" => Ok(Self::Sent),
            "FAILED" => Ok(Self::Failed),
            _ => Err(docgate_core::AppError::validation(format!(
                "Invalid document status: '{s}'. Expected one of: RECEIVED, SENT, FAILED"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_any_case() {
        assert_eq!("sent".parse::<DocumentStatus>().unwrap(), DocumentStatus::Sent);
        assert_eq!(" Failed ".parse::<DocumentStatus>().unwrap(), DocumentStatus::Failed);
        assert!("ARCHIVED".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_names_match_as_str() {
        for (i, name) in DocumentStatus::NAMES.iter().enumerate() {
            let status: DocumentStatus = name.parse().unwrap();
            assert_eq!(status.ordinal() as usize, i);
            assert_eq!(status.as_str(), *name);
        }
        assert_eq!(DocumentStatus::default(), DocumentStatus::Received);
    }
}
