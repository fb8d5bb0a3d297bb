//! Document type and intake channel enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business category of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Know-your-customer evidence.
    Kyc,
    /// Signed contract.
    Contract,
    /// Filled-in form.
    Form,
    /// Supporting material attached to another document.
    SupportingDocument,
    /// Anything else.
    Other,
}

impl DocumentType {
    /// Variant names in declaration order.
    pub const NAMES: &'static [&'static str] =
        &["KYC", "CONTRACT", "FORM", "SUPPORTING_DOCUMENT", "OTHER"];

    /// Return the type as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        Self::NAMES[self.ordinal() as usize]
    }

    /// Position of the variant in declaration order.
    pub fn ordinal(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = docgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KYC" => Ok(Self::Kyc),
            "CONTRACT" => Ok(Self::Contract),
            "FORM" => Ok(Self::Form),
            "SUPPORTING_DOCUMENT" => Ok(Self::SupportingDocument),
            "OTHER" => Ok(Self::Other),
            _ => Err(docgate_core::AppError::validation(format!(
                "Invalid document type: '{s}'. Expected one of: {}",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Channel a document arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Channel {
    /// Uploaded at a branch office.
    Branch,
    /// Uploaded through a digital channel.
    Digital,
    /// Uploaded by back-office staff.
    Backoffice,
    /// Anything else.
    Other,
}

impl Channel {
    /// Variant names in declaration order.
    pub const NAMES: &'static [&'static str] = &["BRANCH", "DIGITAL", "BACKOFFICE", "OTHER"];

    /// Return the channel as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        Self::NAMES[self.ordinal() as usize]
    }

    /// Position of the variant in declaration order.
    pub fn ordinal(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Channel {
    type Err = docgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BRANCH" => Ok(Self::Branch),
            "DIGITAL" => Ok(Self::Digital),
            "BACKOFFICE" => Ok(Self::Backoffice),
            "OTHER" => Ok(Self::Other),
            _ => Err(docgate_core::AppError::validation(format!(
                "Invalid channel: '{s}'. Expected one of: {}",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip() {
        for name in DocumentType::NAMES {
            let parsed: DocumentType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
        assert_eq!(
            "supporting_document".parse::<DocumentType>().unwrap(),
            DocumentType::SupportingDocument
        );
        assert!("INVOICE".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&DocumentType::SupportingDocument).unwrap();
        assert_eq!(json, "\"SUPPORTING_DOCUMENT\"");
        let channel: Channel = serde_json::from_str("\"BACKOFFICE\"").unwrap();
        assert_eq!(channel, Channel::Backoffice);
        assert_eq!(channel.to_string(), "BACKOFFICE");
    }

    #[test]
    fn test_ordinals_follow_declaration() {
        assert_eq!(Channel::Branch.ordinal(), 0);
        assert_eq!(Channel::Other.ordinal(), 3);
        assert_eq!(DocumentType::Other.ordinal(), 4);
    }
}
