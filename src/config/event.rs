use chrono::NaiveDate;
use std::fmt;
use crate::error::{Error, Result};

/// Which event is being tracked. Every field is required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventIdentity {
    pub artist: String,
    pub venue: String,
    pub date: NaiveDate,
}

impl EventIdentity {
    pub fn new(artist: &str, venue: &str, date: &str) -> Result<Self> {
        let artist = artist.trim();
        let venue = venue.trim();
        let date = date.trim();

        if artist.is_empty() {
            return Err(Error::ConfigError("artist is required".to_string()));
        }
        if venue.is_empty() {
            return Err(Error::ConfigError("venue is required".to_string()));
        }
        if date.is_empty() {
            return Err(Error::ConfigError("date is required".to_string()));
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| Error::ConfigError(format!("malformed event date {:?}: {}", date, e)))?;

        Ok(EventIdentity {
            artist: artist.to_string(),
            venue: venue.to_string(),
            date,
        })
    }

    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Stable key used to seed synthetic prices for this event.
    pub fn context_key(&self) -> String {
        format!("{}|{}|{}", self.artist, self.venue, self.date_string())
    }
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} on {}", self.artist, self.venue, self.date_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date_and_trims() {
        let event = EventIdentity::new(" LAMP ", "House of Blues Anaheim", "2025-11-07").unwrap();
        assert_eq!(event.artist, "LAMP");
        assert_eq!(event.context_key(), "LAMP|House of Blues Anaheim|2025-11-07");
        assert_eq!(event.to_string(), "LAMP @ House of Blues Anaheim on 2025-11-07");
    }

    #[test]
    fn missing_fields_are_config_errors() {
        assert!(matches!(EventIdentity::new("", "v", "2025-11-07"), Err(Error::ConfigError(_))));
        assert!(matches!(EventIdentity::new("a", " ", "2025-11-07"), Err(Error::ConfigError(_))));
        assert!(matches!(EventIdentity::new("a", "v", ""), Err(Error::ConfigError(_))));
    }

    #[test]
    fn malformed_date_is_a_config_error() {
        assert!(matches!(EventIdentity::new("a", "v", "11/07/2025"), Err(Error::ConfigError(_))));
        assert!(matches!(EventIdentity::new("a", "v", "2025-02-30"), Err(Error::ConfigError(_))));
    }
}
