//! Categorical tags for places and their names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GazetteerError;

/// GeoPlanet place type of a node in the hierarchy.
///
/// The canonical token of every tag is its variant name (e.g. `"HistoricalTown"`),
/// except `Poi`, whose token is `"POI"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum PlaceType {
    Airport,
    Colloquial,
    Continent,
    Country,
    County,
    Drainage,
    Estate,
    HistoricalCounty,
    HistoricalState,
    HistoricalTown,
    Island,
    LandFeature,
    LocalAdmin,
    Miscellaneous,
    Ocean,
    /// Generic type used by GeoPlanet for places without a finer category
    PlaceType,
    #[serde(rename = "POI")]
    Poi,
    Sea,
    Sport,
    State,
    Suburb,
    Supername,
    Timezone,
    Town,
    Zip,
    Zone,
}

impl PlaceType {
    /// Get all place types in declaration order
    pub fn all() -> &'static [PlaceType] {
        &[
            PlaceType::Airport,
            PlaceType::Colloquial,
            PlaceType::Continent,
            PlaceType::Country,
            PlaceType::County,
            PlaceType::Drainage,
            PlaceType::Estate,
            PlaceType::HistoricalCounty,
            PlaceType::HistoricalState,
            PlaceType::HistoricalTown,
            PlaceType::Island,
            PlaceType::LandFeature,
            PlaceType::LocalAdmin,
            PlaceType::Miscellaneous,
            PlaceType::Ocean,
            PlaceType::PlaceType,
            PlaceType::Poi,
            PlaceType::Sea,
            PlaceType::Sport,
            PlaceType::State,
            PlaceType::Suburb,
            PlaceType::Supername,
            PlaceType::Timezone,
            PlaceType::Town,
            PlaceType::Zip,
            PlaceType::Zone,
        ]
    }

    /// Canonical token as found in the GeoPlanet dump
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceType::Airport => "Airport",
            PlaceType::Colloquial => "Colloquial",
            PlaceType::Continent => "Continent",
            PlaceType::Country => "Country",
            PlaceType::County => "County",
            PlaceType::Drainage => "Drainage",
            PlaceType::Estate => "Estate",
            PlaceType::HistoricalCounty => "HistoricalCounty",
            PlaceType::HistoricalState => "HistoricalState",
            PlaceType::HistoricalTown => "HistoricalTown",
            PlaceType::Island => "Island",
            PlaceType::LandFeature => "LandFeature",
            PlaceType::LocalAdmin => "LocalAdmin",
            PlaceType::Miscellaneous => "Miscellaneous",
            PlaceType::Ocean => "Ocean",
            PlaceType::PlaceType => "PlaceType",
            PlaceType::Poi => "POI",
            PlaceType::Sea => "Sea",
            PlaceType::Sport => "Sport",
            PlaceType::State => "State",
            PlaceType::Suburb => "Suburb",
            PlaceType::Supername => "Supername",
            PlaceType::Timezone => "Timezone",
            PlaceType::Town => "Town",
            PlaceType::Zip => "Zip",
            PlaceType::Zone => "Zone",
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = GazetteerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        PlaceType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == token)
            .ok_or_else(|| GazetteerError::Parse {
                kind: "PlaceType",
                token: s.to_string(),
            })
    }
}

/// Classification of an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum NameType {
    /// Abbreviation or code for the place (e.g. "NYC" for New York)
    A,
    /// English preferred. Like `Q`, but only for English; when absent the
    /// default place name is the English display name.
    P,
    /// Qualified name: the preferred name in a language other than the one
    /// used by residents (e.g. "紐約" for New York)
    Q,
    /// Synonym or colloquial name (e.g. "Big Apple")
    S,
    /// Well-known but unofficial variant (e.g. "New York City")
    V,
}

impl NameType {
    pub fn all() -> &'static [NameType] {
        &[NameType::A, NameType::P, NameType::Q, NameType::S, NameType::V]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NameType::A => "A",
            NameType::P => "P",
            NameType::Q => "Q",
            NameType::S => "S",
            NameType::V => "V",
        }
    }
}

impl fmt::Display for NameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameType {
    type Err = GazetteerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        NameType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == token)
            .ok_or_else(|| GazetteerError::Parse {
                kind: "NameType",
                token: s.to_string(),
            })
    }
}
