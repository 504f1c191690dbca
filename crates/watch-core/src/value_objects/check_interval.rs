//! Check interval - the fixed set of allowed periods between automatic checks
//!
//! Single source of truth for the label <-> seconds mapping used by both the
//! user-facing and admin-facing flows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Allowed interval between two automatic checks of a monitored domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckInterval {
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    #[default]
    OneHour,
    TwoHours,
    SixHours,
    TwelveHours,
    TwentyFourHours,
}

impl CheckInterval {
    /// Every allowed interval, in ascending order
    pub const ALL: [CheckInterval; 9] = [
        Self::FiveMinutes,
        Self::TenMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::SixHours,
        Self::TwelveHours,
        Self::TwentyFourHours,
    ];

    /// The wire label for this interval (e.g. "5min", "1hour")
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5min",
            Self::TenMinutes => "10min",
            Self::FifteenMinutes => "15min",
            Self::ThirtyMinutes => "30min",
            Self::OneHour => "1hour",
            Self::TwoHours => "2hours",
            Self::SixHours => "6hours",
            Self::TwelveHours => "12hours",
            Self::TwentyFourHours => "24hours",
        }
    }

    /// The interval length in seconds
    #[must_use]
    pub const fn seconds(self) -> i32 {
        match self {
            Self::FiveMinutes => 300,
            Self::TenMinutes => 600,
            Self::FifteenMinutes => 900,
            Self::ThirtyMinutes => 1800,
            Self::OneHour => 3600,
            Self::TwoHours => 7200,
            Self::SixHours => 21600,
            Self::TwelveHours => 43200,
            Self::TwentyFourHours => 86400,
        }
    }

    /// Look up an interval by its wire label
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|i| i.label() == label)
            .ok_or_else(|| DomainError::InvalidCheckInterval(label.to_string()))
    }

    /// Reverse lookup from a stored seconds value
    ///
    /// Unknown values fall back to one hour rather than failing, so rows
    /// written before an interval was removed from the set still render.
    #[must_use]
    pub fn from_seconds(seconds: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|i| i.seconds() == seconds)
            .unwrap_or_default()
    }

    /// All valid labels, for error messages and the API interval table
    #[must_use]
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|i| i.label()).collect()
    }
}

impl fmt::Display for CheckInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CheckInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CheckInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_seconds_round_trip() {
        for interval in CheckInterval::ALL {
            assert_eq!(CheckInterval::from_label(interval.label()).unwrap(), interval);
            assert_eq!(CheckInterval::from_seconds(interval.seconds()), interval);
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(CheckInterval::FiveMinutes.seconds(), 300);
        assert_eq!(CheckInterval::OneHour.seconds(), 3600);
        assert_eq!(CheckInterval::TwentyFourHours.seconds(), 86400);
        assert_eq!(CheckInterval::OneHour.label(), "1hour");
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = CheckInterval::from_label("45min").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCheckInterval(_)));
    }

    #[test]
    fn test_unknown_seconds_falls_back_to_one_hour() {
        assert_eq!(CheckInterval::from_seconds(1234), CheckInterval::OneHour);
    }

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(CheckInterval::default(), CheckInterval::OneHour);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&CheckInterval::ThirtyMinutes).unwrap();
        assert_eq!(json, "\"30min\"");

        let parsed: CheckInterval = serde_json::from_str("\"2hours\"").unwrap();
        assert_eq!(parsed, CheckInterval::TwoHours);

        assert!(serde_json::from_str::<CheckInterval>("\"never\"").is_err());
    }

    #[test]
    fn test_all_is_ascending() {
        for pair in CheckInterval::ALL.windows(2) {
            assert!(pair[0].seconds() < pair[1].seconds());
        }
    }
}
