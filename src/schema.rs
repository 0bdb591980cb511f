use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::MatchModel;

/// A counter column that can only move forward by one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Goals,
    YellowCards,
    RedCards,
}

impl Stat {
    pub fn column(self) -> &'static str {
        match self {
            Stat::Goals => "goals",
            Stat::YellowCards => "yellow_cards",
            Stat::RedCards => "red_cards",
        }
    }
}

// Payload for POST and PUT. Unknown fields such as `id` or the counters are ignored.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchSchema {
    pub home_team: String,
    pub away_team: String,
    pub match_date: NaiveDate,
}

pub type UpdateMatchSchema = CreateMatchSchema;

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtraTimeSchema {
    #[serde(default)]
    pub extra_time: String,
}

impl ExtraTimeSchema {
    /// Anything that isn't a well-formed payload counts as clearing the annotation.
    pub fn from_body_lossy(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

// For json response
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetMatchSchema {
    pub id: i32,
    pub home_team: String,
    pub away_team: String,
    pub match_date: NaiveDate,
    pub goals: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub extra_time: String,
}

impl From<MatchModel> for GetMatchSchema {
    fn from(m: MatchModel) -> Self {
        Self {
            id: m.id,
            home_team: m.home_team,
            away_team: m.away_team,
            match_date: m.match_date,
            goals: m.goals,
            yellow_cards: m.yellow_cards,
            red_cards: m.red_cards,
            extra_time: m.extra_time.unwrap_or_default(),
        }
    }
}
