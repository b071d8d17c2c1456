//! FDI tooth codes
//!
//! Two-digit tooth numbering: the first digit is the quadrant (1-4), the
//! second the position counted from the midline (1-8). Codes are ordered by
//! quadrant, then position, so ordered containers list teeth in chart order.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when parsing a tooth code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToothParseError {
    #[error("Tooth code must be two digits, got '{0}'")]
    Malformed(String),

    #[error("Quadrant must be 1-4, got {0}")]
    InvalidQuadrant(u8),

    #[error("Tooth position must be 1-8, got {0}")]
    InvalidPosition(u8),
}

/// A validated permanent-dentition tooth code in FDI notation
///
/// Serialized as a string. Draft files may write it as `36` or `'36'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct ToothCode {
    quadrant: u8,
    position: u8,
}

impl ToothCode {
    /// Build a tooth code from its quadrant and position
    pub fn new(quadrant: u8, position: u8) -> Result<Self, ToothParseError> {
        if !(1..=4).contains(&quadrant) {
            return Err(ToothParseError::InvalidQuadrant(quadrant));
        }
        if !(1..=8).contains(&position) {
            return Err(ToothParseError::InvalidPosition(position));
        }
        Ok(Self { quadrant, position })
    }

    pub fn quadrant(&self) -> u8 {
        self.quadrant
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// Upper arch teeth live in quadrants 1 and 2
    pub fn is_upper(&self) -> bool {
        self.quadrant <= 2
    }

    /// All 32 permanent teeth in chart order
    pub fn all() -> impl Iterator<Item = ToothCode> {
        (1..=4u8).flat_map(|q| (1..=8u8).map(move |p| ToothCode { quadrant: q, position: p }))
    }
}

impl std::fmt::Display for ToothCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.quadrant, self.position)
    }
}

impl std::str::FromStr for ToothCode {
    type Err = ToothParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits: Vec<u8> = trimmed
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ToothParseError::Malformed(s.to_string()))?;

        match digits.as_slice() {
            [q, p] => ToothCode::new(*q, *p),
            _ => Err(ToothParseError::Malformed(s.to_string())),
        }
    }
}

struct ToothCodeVisitor;

impl Visitor<'_> for ToothCodeVisitor {
    type Value = ToothCode;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a two-digit FDI tooth code such as 36")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ToothCode, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ToothCode, E> {
        self.visit_str(&value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ToothCode, E> {
        self.visit_str(&value.to_string())
    }
}

impl<'de> Deserialize<'de> for ToothCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ToothCodeVisitor)
    }
}

impl TryFrom<String> for ToothCode {
    type Error = ToothParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ToothCode> for String {
    fn from(code: ToothCode) -> Self {
        code.to_string()
    }
}

/// Format a list of teeth as "16, 26, 36"
pub fn join_teeth<'a>(teeth: impl IntoIterator<Item = &'a ToothCode>) -> String {
    teeth
        .into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a list of tooth codes separated by commas or whitespace
pub fn parse_teeth(input: &str) -> Result<Vec<ToothCode>, ToothParseError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        let tooth: ToothCode = "36".parse().unwrap();
        assert_eq!(tooth.quadrant(), 3);
        assert_eq!(tooth.position(), 6);
        assert_eq!(tooth.to_string(), "36");
        assert!(!tooth.is_upper());
        assert!("11".parse::<ToothCode>().unwrap().is_upper());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            "51".parse::<ToothCode>(),
            Err(ToothParseError::InvalidQuadrant(5))
        );
        assert_eq!(
            "19".parse::<ToothCode>(),
            Err(ToothParseError::InvalidPosition(9))
        );
        assert_eq!(
            "10".parse::<ToothCode>(),
            Err(ToothParseError::InvalidPosition(0))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            "1".parse::<ToothCode>(),
            Err(ToothParseError::Malformed(_))
        ));
        assert!(matches!(
            "123".parse::<ToothCode>(),
            Err(ToothParseError::Malformed(_))
        ));
        assert!(matches!(
            "ab".parse::<ToothCode>(),
            Err(ToothParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_ordering_follows_chart() {
        let mut teeth: Vec<ToothCode> = ["21", "18", "11", "31"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        teeth.sort();
        assert_eq!(join_teeth(&teeth), "11, 18, 21, 31");
    }

    #[test]
    fn test_all_has_32_teeth() {
        assert_eq!(ToothCode::all().count(), 32);
    }

    #[test]
    fn test_serde_as_string() {
        let tooth: ToothCode = "45".parse().unwrap();
        let yaml = serde_yml::to_string(&tooth).unwrap();
        assert!(yaml.contains("45"));
        let parsed: ToothCode = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, tooth);
        assert!(serde_yml::from_str::<ToothCode>("'99'").is_err());
    }

    #[test]
    fn test_deserialize_unquoted_codes() {
        let teeth: Vec<ToothCode> = serde_yml::from_str("[36, '11', 47]").unwrap();
        assert_eq!(join_teeth(&teeth), "36, 11, 47");

        let surfaces: std::collections::BTreeMap<ToothCode, String> =
            serde_yml::from_str("16: MOD\n'26': O\n").unwrap();
        assert_eq!(surfaces.len(), 2);
        assert_eq!(surfaces[&"16".parse().unwrap()], "MOD");

        let json: Vec<ToothCode> = serde_json::from_str(r#"[21, "22"]"#).unwrap();
        assert_eq!(join_teeth(&json), "21, 22");

        assert!(serde_yml::from_str::<Vec<ToothCode>>("[19]").is_err());
        assert!(serde_yml::from_str::<ToothCode>("-11").is_err());
        assert!(serde_yml::from_str::<ToothCode>("true").is_err());
    }

    #[test]
    fn test_parse_teeth_list() {
        let teeth = parse_teeth("11, 21 36").unwrap();
        assert_eq!(join_teeth(&teeth), "11, 21, 36");
        assert!(parse_teeth("").unwrap().is_empty());
        assert!(parse_teeth("11, 19").is_err());
    }
}
