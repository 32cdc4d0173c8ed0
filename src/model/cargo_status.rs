//! Cargo status: laden or in ballast.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ParseError, fold_label};

/// Whether the vessel is carrying cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CargoStatus {
    Laden,
    Ballast,
}

impl CargoStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Laden => "Laden",
            Self::Ballast => "Ballast",
        }
    }
}

impl fmt::Display for CargoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CargoStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_label(s).as_str() {
            "laden" => Ok(Self::Laden),
            "ballast" => Ok(Self::Ballast),
            _ => Err(ParseError::CargoStatus(s.to_string())),
        }
    }
}

impl Serialize for CargoStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CargoStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
