//! Report types: the voyage phases a vessel reports through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ParseError, fold_label};

/// The voyage phase a noon report was filed under.
///
/// Variants are listed in voyage order. `InPort` is the odd one out:
/// it can repeat any number of times while the vessel is in port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    AtSea,
    Arrival,
    ArrivalAtBerth,
    InPort,
    DepartureFromBerth,
    Departure,
}

impl ReportType {
    /// Every report type, in voyage order.
    pub const ALL: [Self; 6] = [
        Self::AtSea,
        Self::Arrival,
        Self::ArrivalAtBerth,
        Self::InPort,
        Self::DepartureFromBerth,
        Self::Departure,
    ];

    /// The label used in reports and explanations, e.g. `"Arrival At Berth"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::AtSea => "At Sea",
            Self::Arrival => "Arrival",
            Self::ArrivalAtBerth => "Arrival At Berth",
            Self::InPort => "In Port",
            Self::DepartureFromBerth => "Departure From Berth",
            Self::Departure => "Departure",
        }
    }

    /// Departures are where a cargo status change is expected.
    pub fn is_departure(self) -> bool {
        matches!(self, Self::Departure | Self::DepartureFromBerth)
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_label(s);
        Self::ALL
            .into_iter()
            .find(|t| fold_label(t.label()) == folded)
            .ok_or_else(|| ParseError::ReportType(s.to_string()))
    }
}

impl Serialize for ReportType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ReportType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
