use chrono::NaiveDate;

// For sqlx
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchModel {
    pub id: i32,
    #[sqlx(rename = "team_a")]
    pub home_team: String,
    #[sqlx(rename = "team_b")]
    pub away_team: String,
    pub match_date: NaiveDate,
    pub goals: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub extra_time: Option<String>,
}
