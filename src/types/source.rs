use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::{Error, Result};

/// Key reserved for the synthesized cross-source summary.
pub const BEST_SOURCE: &str = "Best";

/// Stable identifier of a price source.
///
/// `SourceName::new` refuses the reserved `"Best"` key, so a configured
/// source can never collide with the derived summary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceName(String);

impl SourceName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidSourceName(name));
        }
        if trimmed.eq_ignore_ascii_case(BEST_SOURCE) {
            return Err(Error::ReservedSourceName(name));
        }

        Ok(SourceName(trimmed.to_string()))
    }

    pub fn best() -> Self {
        SourceName(BEST_SOURCE.to_string())
    }

    pub fn is_best(&self) -> bool {
        self.0 == BEST_SOURCE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SourceName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        SourceName::new(value)
    }
}

impl From<SourceName> for String {
    fn from(value: SourceName) -> Self {
        value.0
    }
}

impl AsRef<str> for SourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_reserved_best_key() {
        assert!(matches!(SourceName::new("Best"), Err(Error::ReservedSourceName(_))));
        assert!(matches!(SourceName::new(" best "), Err(Error::ReservedSourceName(_))));
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(SourceName::new("   "), Err(Error::InvalidSourceName(_))));
    }

    #[test]
    fn best_constructor_is_the_only_way_to_the_reserved_key() {
        let best = SourceName::best();
        assert!(best.is_best());
        assert_eq!(best.as_str(), "Best");

        let stubhub = SourceName::new(" StubHub ").unwrap();
        assert!(!stubhub.is_best());
        assert_eq!(stubhub.as_str(), "StubHub");
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let ok: SourceName = serde_json::from_str("\"VividSeats\"").unwrap();
        assert_eq!(ok.as_str(), "VividSeats");
        assert!(serde_json::from_str::<SourceName>("\"Best\"").is_err());
    }
}
