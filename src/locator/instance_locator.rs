use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

static SEGMENT_SEPARATOR: char = ':';
const SEGMENT_COUNT: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("invalid instance locator '{input}': expected 'version:region:identifier', got {segments} segment(s)")]
    InvalidFormat { input: String, segments: usize },
}

/// Names a single platform instance: `version:region:identifier`.
///
/// Values are only obtainable through [`InstanceLocator::parse`] (or the
/// `FromStr` / `TryFrom` / serde paths built on it), so a locator in hand is
/// always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct InstanceLocator {
    version: String,
    region: String,
    identifier: String,
}

impl InstanceLocator {
    /// Split `input` on `:` into exactly three segments.
    ///
    /// The input is taken as canonical: no trimming or case folding.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let segments: Vec<&str> = input.split(SEGMENT_SEPARATOR).collect();
        match segments.as_slice() {
            [version, region, identifier] => Ok(Self {
                version: (*version).to_owned(),
                region: (*region).to_owned(),
                identifier: (*identifier).to_owned(),
            }),
            other => Err(LocatorError::InvalidFormat {
                input: input.to_owned(),
                segments: other.len(),
            }),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl FromStr for InstanceLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InstanceLocator {
    type Error = LocatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for InstanceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.version,
            self.region,
            self.identifier,
            sep = SEGMENT_SEPARATOR
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_segments_in_order() {
        let locator = InstanceLocator::parse("v1:us-east-1:abc123").unwrap();
        assert_eq!(locator.version(), "v1");
        assert_eq!(locator.region(), "us-east-1");
        assert_eq!(locator.identifier(), "abc123");
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        for (input, expected) in [
            ("", 1),
            ("v1", 1),
            ("v1:us-east-1", 2),
            ("v1:us-east-1:abc123:extra", 4),
            ("v1:us1:abc:def:ghi", 5),
        ] {
            let err = InstanceLocator::parse(input).unwrap_err();
            assert_eq!(
                err,
                LocatorError::InvalidFormat { input: input.to_owned(), segments: expected }
            );
        }
    }

    #[test]
    fn error_names_the_malformed_input() {
        let err = InstanceLocator::parse("v1:us-east-1").unwrap_err();
        assert!(err.to_string().contains("'v1:us-east-1'"));
    }

    #[test]
    fn does_not_normalize_segments() {
        let locator = InstanceLocator::parse(" V1 :US1:").unwrap();
        assert_eq!(locator.version(), " V1 ");
        assert_eq!(locator.region(), "US1");
        assert_eq!(locator.identifier(), "");
    }

    #[test]
    fn display_round_trips() {
        let raw = "v1:eu-west-2:0f1e2d";
        let locator: InstanceLocator = raw.parse().unwrap();
        assert_eq!(locator.to_string(), raw);
        assert_eq!(InstanceLocator::parse(&locator.to_string()).unwrap(), locator);
    }

    #[test]
    fn deserializes_through_parse() {
        let locator: InstanceLocator = serde_json::from_str(r#""v1:us1:abc""#).unwrap();
        assert_eq!(locator.region(), "us1");

        let bad = serde_json::from_str::<InstanceLocator>(r#""v1:us1""#);
        assert!(bad.is_err());
    }
}
