use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Beach tournament as listed by VIS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub gender: Gender,
    #[serde(rename = "type")]
    pub tournament_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Mixed,
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Men" => Ok(Gender::Men),
            "Women" => Ok(Gender::Women),
            "Mixed" => Ok(Gender::Mixed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Mixed => "Mixed",
        };
        f.write_str(label)
    }
}

/// Enhanced single-tournament record.
///
/// Only `number` is guaranteed. The primary detail endpoint fills every field
/// it knows; the fallback list endpoint leaves the enhanced ones empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetail {
    pub number: u32,
    pub code: Option<String>,
    pub name: Option<String>,
    pub country_code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[serde(rename = "type")]
    pub tournament_type: Option<String>,
    pub title: Option<String>,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub status: Option<String>,
    pub prize_money: Option<String>,
    pub season: Option<String>,
    pub federation_code: Option<String>,
}

impl TournamentDetail {
    /// True when every field of the basic listing is known
    pub fn has_basic_fields(&self) -> bool {
        self.code.is_some()
            && self.name.is_some()
            && self.country_code.is_some()
            && self.start_date.is_some()
            && self.end_date.is_some()
            && self.gender.is_some()
            && self.tournament_type.is_some()
    }
}

/// Result of a VIS list fetch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisResponse {
    pub tournaments: Vec<Tournament>,
    pub total_count: usize,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataCompleteness {
    Full,
    Partial,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Primary,
    Fallback,
    Cache,
}
